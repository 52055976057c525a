//! MBROLA Wire - Command file format
//!
//! The synthesizer reads a line-oriented `.pho` file:
//! - Optional `;` comment naming the word
//! - Onset silence line
//! - One line per phoneme: name, duration, then (position, pitch) pairs
//! - Offset silence line
//!
//! Only writing is supported. Input must already be canonical.

pub mod pho;

pub use pho::*;
