//! MBROLA Env - Where and how the synthesizer can be invoked
//!
//! This crate never spawns processes. It answers two questions for callers
//! that do:
//! - Which command line launches MBROLA here (`mbrola`, or `wsl mbrola`
//!   on Windows hosts with a WSL2 distribution)
//! - Whether that command is present on `PATH`
//!
//! Answers are memoized in a [`CommandCache`] that callers own and can
//! refresh or invalidate when the environment changes.

pub mod error;
pub mod platform;
pub mod command;
pub mod path;
pub mod cache;

pub use error::*;
pub use platform::*;
pub use command::*;
pub use path::*;
pub use cache::*;
