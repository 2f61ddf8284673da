//! Repository implementations module.
//!
//! This module contains the implementations of the repository traits:
//! - `local`: In-memory implementation of both traits, for unit testing and local development
//! - `file`: JSON file implementation of `ConfigStore`

#[cfg(feature = "file-repo")]
pub mod file;
pub mod local;

#[cfg(feature = "file-repo")]
pub use file::FileConfigStore;
pub use local::LocalRepository;
