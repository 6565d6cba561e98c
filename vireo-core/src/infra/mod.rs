//! Adapters for the collaborator ports.

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "memory")]
pub mod snapshot;
