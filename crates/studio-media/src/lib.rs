//! External-tool layer for media processing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - A bounded subprocess runner (timeout kills the child)
//! - Tool availability probing via version subprocesses
//! - Clip extraction with a fixed cut window
//! - AI matting tool invocation
//! - Verbatim file copy used by the degraded fallback paths

pub mod command;
pub mod config;
pub mod error;
pub mod extract;
pub mod fs_utils;
pub mod matting;
pub mod probe;
pub mod thumbnail;

pub use command::{FfmpegCommand, ToolOutput, ToolRunner};
pub use config::ToolsConfig;
pub use error::{MediaError, MediaResult};
pub use extract::extract_clip;
pub use fs_utils::copy_file;
pub use matting::invoke_matting_tool;
pub use probe::probe_tool;
pub use thumbnail::generate_thumbnail;
