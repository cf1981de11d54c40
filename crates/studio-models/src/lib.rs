//! Shared data models for the studio tools backend.
//!
//! This crate provides Serde-serializable types for:
//! - Media sources (local paths and remote URLs)
//! - Processing results returned by the tool pipelines
//! - Clip extraction parameters

pub mod clip;
pub mod result;
pub mod source;

// Re-export common types
pub use clip::ClipSpec;
pub use result::{ClipEntry, ProcessingResult, ProcessingStatus};
pub use source::MediaSource;
