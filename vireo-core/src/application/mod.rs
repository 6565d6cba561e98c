//! Application-level composition: the port bundle and the lookup service
//! built on top of it.

pub mod unit_of_work;
pub mod user_library;

pub use unit_of_work::{AppUnitOfWork, AppUnitOfWorkBuilder};
pub use user_library::UserLibraryService;
