//! Value Fuzzer - Random input shapes against the validators
//!
//! Checks that hold for any input:
//! - Accepted durations and pitch have exactly one entry per phoneme
//! - Every accepted contour has at least one point
//! - Rendered utterances have exactly one `.pho` line per phoneme plus silences
//! - The writer refuses only utterances holding a whitespace or empty token
//! - The gate never accepts what normalization rejects on parity or silences

use mbrola_core::{ErrorKind, Utterance, ValidationConfig, Validator, Value};
use mbrola_wire::PhoWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fuzzer configuration
#[derive(Clone, Debug)]
pub struct FuzzerConfig {
    /// Number of utterances to generate
    pub iterations: usize,
    /// Maximum nesting of lists and tuples
    pub max_depth: usize,
    /// Maximum sequence length
    pub max_len: usize,
    /// Validation settings under test
    pub validation: ValidationConfig,
    /// Random seed
    pub seed: u64,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        FuzzerConfig {
            iterations: 2000,
            max_depth: 3,
            max_len: 8,
            validation: ValidationConfig::default(),
            seed: 42,
        }
    }
}

impl FuzzerConfig {
    /// Light fuzzing for quick tests
    pub fn light() -> Self {
        FuzzerConfig {
            iterations: 300,
            ..FuzzerConfig::default()
        }
    }
}

/// Counts and invariant violations from one fuzzing run
#[derive(Clone, Debug, Default)]
pub struct FuzzReport {
    pub iterations: usize,
    pub accepted: usize,
    pub type_mismatches: usize,
    pub constraint_violations: usize,
    /// Accepted by validation, refused by the writer
    pub unrenderable: usize,
    pub violations: Vec<String>,
}

impl FuzzReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Seeded generator of utterances with arbitrary field shapes
pub struct ValueFuzzer {
    config: FuzzerConfig,
    rng: StdRng,
    validator: Validator,
    writer: PhoWriter,
}

impl ValueFuzzer {
    pub fn new(config: FuzzerConfig) -> Self {
        ValueFuzzer {
            rng: StdRng::seed_from_u64(config.seed),
            validator: Validator::new(config.validation.clone()),
            writer: PhoWriter::default(),
            config,
        }
    }

    /// Random value, biased toward shapes the validators accept
    pub fn gen_value(&mut self, depth: usize) -> Value {
        // leaves only once the nesting limit is reached
        let choices = if depth >= self.config.max_depth { 5 } else { 8 };
        match self.rng.gen_range(0..choices) {
            0 | 1 => Value::Int(self.rng.gen_range(-5..400)),
            2 => Value::Float(self.rng.gen_range(-10.0..10.0)),
            3 => Value::Str(self.gen_word()),
            4 => match self.rng.gen_range(0..2) {
                0 => Value::Bool(self.rng.gen()),
                _ => Value::None,
            },
            5 | 6 => Value::List(self.gen_items(depth)),
            _ => Value::Tuple(self.gen_items(depth)),
        }
    }

    fn gen_items(&mut self, depth: usize) -> Vec<Value> {
        let len = self.rng.gen_range(0..=self.config.max_len);
        (0..len).map(|_| self.gen_value(depth + 1)).collect()
    }

    fn gen_word(&mut self) -> String {
        const ALPHABET: &[u8] = b"abdeiklmnoprstuz@/ \t\n_";
        let len = self.rng.gen_range(0..=self.config.max_len);
        (0..len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Utterance whose fields are sometimes well-formed, sometimes not
    pub fn gen_utterance(&mut self) -> Utterance {
        let phon = if self.rng.gen_bool(0.7) {
            Value::Str(self.gen_word())
        } else {
            self.gen_value(0)
        };
        let mut utterance = Utterance::new(phon);
        if self.rng.gen_bool(0.5) {
            utterance.durations = self.gen_value(0);
        }
        if self.rng.gen_bool(0.5) {
            utterance.pitch = self.gen_value(0);
        }
        if self.rng.gen_bool(0.5) {
            utterance.outer_silences = self.gen_value(0);
        }
        utterance
    }

    pub fn run(&mut self) -> FuzzReport {
        let mut report = FuzzReport::default();
        for _ in 0..self.config.iterations {
            let utterance = self.gen_utterance();
            report.iterations += 1;
            self.check(&utterance, &mut report);
        }
        report
    }

    fn check(&self, utterance: &Utterance, report: &mut FuzzReport) {
        let gate = self.validator.mbrola_args(utterance);
        let canonical = match utterance.normalize(&self.validator) {
            Ok(canonical) => canonical,
            Err(e) => {
                match e.kind() {
                    ErrorKind::TypeMismatch => report.type_mismatches += 1,
                    ErrorKind::ConstraintViolation => report.constraint_violations += 1,
                }
                if gate.is_ok() && is_gate_field(e.field()) {
                    report
                        .violations
                        .push(format!("gate accepted but normalize rejected {}: {:?}", e, utterance));
                }
                return;
            }
        };
        report.accepted += 1;

        let n = canonical.phon.len();
        if canonical.durations.len() != n || canonical.pitch.len() != n {
            report
                .violations
                .push(format!("length drift for {:?}", utterance));
        }
        if canonical.pitch.iter().any(|c| c.is_empty()) {
            report
                .violations
                .push(format!("empty contour for {:?}", utterance));
        }
        let unsafe_token = canonical
            .phon
            .iter()
            .any(|ph| ph.is_empty() || ph.chars().any(char::is_whitespace));
        match self.writer.render(&canonical) {
            Ok(pho) => {
                let comment = usize::from(canonical.word.is_some());
                let lines = pho.lines().count();
                if unsafe_token || lines != n + 2 + comment {
                    report
                        .violations
                        .push(format!("{} pho lines for {} phonemes: {:?}", lines, n, utterance));
                }
            }
            Err(e) => {
                report.unrenderable += 1;
                if !unsafe_token {
                    report
                        .violations
                        .push(format!("writer refused {:?}: {}", utterance, e));
                }
            }
        }
    }
}

/// Fields whose parity or sign the gate checks before normalization
fn is_gate_field(field: &str) -> bool {
    matches!(field, "onset_silence" | "offset_silence" | "outer_silences")
}
