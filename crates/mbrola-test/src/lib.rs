//! MBROLA Test Harness - End-to-end checks across the workspace
//!
//! This crate provides:
//! - Named utterance scenarios run from raw input to `.pho` text
//! - A seeded value fuzzer that feeds arbitrary shapes to every validator

pub mod scenario;
pub mod value_fuzzer;

pub use scenario::*;
pub use value_fuzzer::*;
