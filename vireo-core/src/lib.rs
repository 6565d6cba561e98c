//! # Vireo Core
//!
//! Access-controlled retrieval and personalization for a media library.
//!
//! The crate sits between a transport (HTTP handlers in `vireo-server`) and
//! the collaborators that own the data: the user directory, the catalog,
//! the metadata refresher and the personalization storage. It provides:
//!
//! - a visibility gate deciding whether a user may see a node
//! - an on-demand refresh policy repairing sparse Person metadata on lookup
//! - favorite and like/dislike updates on per-user records
//! - the "latest items" aggregation with group collapsing
//!
//! [`application::UserLibraryService`] ties these together behind the
//! operations transports call.
//!
//! ## Feature Flags
//!
//! - `memory` (default): in-memory adapters for every port and the library
//!   snapshot loader

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ports;

pub use application::{AppUnitOfWork, AppUnitOfWorkBuilder, UserLibraryService};
pub use error::{MediaError, Result};
