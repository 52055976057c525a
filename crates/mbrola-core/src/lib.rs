//! MBROLA Core - Utterance parameters for the MBROLA diphone synthesizer
//!
//! This crate turns loosely-typed caller input into the canonical per-phoneme
//! parameters the synthesizer's command file requires:
//! - Phoneme sequence (a word split into characters, or an explicit list)
//! - Duration vector (one duration in ms per phoneme)
//! - Pitch vector (one contour of integer points per phoneme)
//! - Outer silences (onset and offset, in ms)
//!
//! Every validator is a pure function. The first violation is returned as
//! an [`MbrolaError`] and nothing is partially accepted.

pub mod error;
pub mod value;
pub mod config;
pub mod phon;
pub mod durations;
pub mod pitch;
pub mod silences;
pub mod utterance;

pub use error::*;
pub use value::*;
pub use config::*;
pub use phon::*;
pub use durations::*;
pub use pitch::*;
pub use silences::*;
pub use utterance::*;
