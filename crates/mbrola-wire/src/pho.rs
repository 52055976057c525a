//! `.pho` rendering for canonical utterances

use std::fmt::{self, Write as _};
use std::io;

use mbrola_core::CanonicalUtterance;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Phoneme symbol MBROLA voices use for silence
pub const SILENCE_PHONEME: &str = "_";

/// Position of a lone pitch point, in percent of the phoneme
pub const SINGLE_POINT_POSITION: u32 = 50;

/// Command file errors
#[derive(Error, Debug)]
pub enum WireError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("formatting error")]
    Fmt(#[from] fmt::Error),

    /// A token that would not stay on its own line or field
    #[error("{field} {token:?} is empty or contains whitespace")]
    UnsafeToken { field: &'static str, token: String },
}

pub type WireResult<T> = Result<T, WireError>;

/// Rendering options
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoConfig {
    /// Symbol written for the outer silences
    pub silence_phoneme: String,

    /// Write a `; word` comment when the utterance came from a word
    pub word_comment: bool,
}

impl Default for PhoConfig {
    fn default() -> Self {
        PhoConfig {
            silence_phoneme: SILENCE_PHONEME.to_string(),
            word_comment: true,
        }
    }
}

/// Positions (0..=100, percent of the phoneme) for `count` evenly spread points
pub fn contour_positions(count: usize) -> Vec<u32> {
    match count {
        0 => Vec::new(),
        1 => vec![SINGLE_POINT_POSITION],
        _ => {
            let span = (count - 1) as u64;
            // round half up of 100 * i / span
            (0..count as u64)
                .map(|i| ((200 * i + span) / (2 * span)) as u32)
                .collect()
        }
    }
}

/// Writes canonical utterances as `.pho` text
#[derive(Clone, Debug, Default)]
pub struct PhoWriter {
    config: PhoConfig,
}

impl PhoWriter {
    pub fn new(config: PhoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhoConfig {
        &self.config
    }

    /// Render the whole file
    ///
    /// Phoneme tokens and the silence symbol must be non-empty and free of
    /// whitespace; the word comment must be a single line.
    pub fn render(&self, utterance: &CanonicalUtterance) -> WireResult<String> {
        let mut out = String::new();
        self.render_into(utterance, &mut out)?;
        tracing::trace!(
            phonemes = utterance.phon.len(),
            bytes = out.len(),
            "rendered pho"
        );
        Ok(out)
    }

    fn render_into(&self, utterance: &CanonicalUtterance, out: &mut String) -> WireResult<()> {
        let silence = &self.config.silence_phoneme;
        check_token("silence phoneme", silence)?;
        for phoneme in &utterance.phon {
            check_token("phoneme", phoneme)?;
        }

        if self.config.word_comment {
            if let Some(word) = &utterance.word {
                if word.contains(['\n', '\r']) {
                    return Err(unsafe_token("word", word));
                }
                writeln!(out, "; {}", word)?;
            }
        }

        writeln!(out, "{} {}", silence, utterance.outer_silences.onset_ms)?;
        for (phoneme, duration, contour) in utterance.segments() {
            write!(out, "{} {}", phoneme, duration)?;
            for (position, pitch) in contour_positions(contour.len()).into_iter().zip(contour) {
                write!(out, " {} {}", position, pitch)?;
            }
            writeln!(out)?;
        }
        writeln!(out, "{} {}", silence, utterance.outer_silences.offset_ms)?;
        Ok(())
    }

    /// Render into any writer
    pub fn write_to<W: io::Write>(&self, utterance: &CanonicalUtterance, mut writer: W) -> WireResult<()> {
        writer.write_all(self.render(utterance)?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn check_token(field: &'static str, token: &str) -> WireResult<()> {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(unsafe_token(field, token));
    }
    Ok(())
}

fn unsafe_token(field: &'static str, token: &str) -> WireError {
    tracing::debug!(field, token, "refusing to render token");
    WireError::UnsafeToken {
        field,
        token: token.to_string(),
    }
}
