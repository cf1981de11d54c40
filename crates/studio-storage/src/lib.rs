//! Local artifact store.
//!
//! This crate provides:
//! - Append-only persistence of pipeline inputs and outputs
//! - Key -> absolute path and key -> public URL mapping
//! - Idempotent directory creation
//! - UUID-based unique artifact naming

pub mod error;
pub mod local;

pub use error::{StorageError, StorageResult};
pub use local::{unique_file_name, LocalStore, StoreConfig};
