//! End-to-end utterance scenarios
//!
//! Each scenario runs one raw utterance through the gate, normalization and
//! `.pho` rendering, and compares the outcome with what it expects.

use mbrola_core::{
    list, tuple, ErrorKind, MbrolaError, Utterance, ValidationConfig, Validator, Value,
};
use mbrola_wire::PhoWriter;
use thiserror::Error;

/// What a scenario should produce
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expectation {
    /// Accepted, rendering exactly this `.pho` text
    Pho(String),
    /// Accepted; output not compared
    Accept,
    /// Accepted by validation, refused by the writer
    Unrenderable,
    /// Rejected with this kind, on this field
    Reject { kind: ErrorKind, field: String },
}

impl Expectation {
    pub fn reject(kind: ErrorKind, field: impl Into<String>) -> Self {
        Expectation::Reject {
            kind,
            field: field.into(),
        }
    }
}

/// A named utterance with its expected outcome
#[derive(Clone, Debug)]
pub struct Scenario {
    pub name: &'static str,
    pub utterance: Utterance,
    pub expect: Expectation,
}

impl Scenario {
    pub fn new(name: &'static str, utterance: Utterance, expect: Expectation) -> Self {
        Self {
            name,
            utterance,
            expect,
        }
    }
}

/// Why a scenario failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioFailure {
    #[error("expected rejection ({kind} on `{field}`), but the utterance was accepted")]
    UnexpectedAccept { kind: ErrorKind, field: String },

    #[error("expected acceptance, but got: {0}")]
    UnexpectedReject(MbrolaError),

    #[error("expected {expected_kind} on `{expected_field}`, got {actual}")]
    WrongRejection {
        expected_kind: ErrorKind,
        expected_field: String,
        actual: MbrolaError,
    },

    #[error("expected the writer to refuse the utterance, but it rendered")]
    UnexpectedRender,

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("rendered output differs:\n--- expected\n{expected}--- actual\n{actual}")]
    WrongOutput { expected: String, actual: String },
}

/// Result of one scenario run
#[derive(Clone, Debug)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub failure: Option<ScenarioFailure>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

/// Runs scenarios under one validator and writer
#[derive(Debug, Default)]
pub struct ScenarioHarness {
    validator: Validator,
    writer: PhoWriter,
}

impl ScenarioHarness {
    pub fn new(validator: Validator, writer: PhoWriter) -> Self {
        Self { validator, writer }
    }

    pub fn run(&self, scenario: &Scenario) -> ScenarioOutcome {
        let result = scenario.utterance.normalize(&self.validator);
        let failure = match (&scenario.expect, result) {
            (Expectation::Pho(expected), Ok(canonical)) => match self.writer.render(&canonical) {
                Ok(actual) => (&actual != expected).then(|| ScenarioFailure::WrongOutput {
                    expected: expected.clone(),
                    actual,
                }),
                Err(e) => Some(ScenarioFailure::Render(e.to_string())),
            },
            (Expectation::Accept, Ok(canonical)) => self
                .writer
                .render(&canonical)
                .err()
                .map(|e| ScenarioFailure::Render(e.to_string())),
            (Expectation::Unrenderable, Ok(canonical)) => self
                .writer
                .render(&canonical)
                .is_ok()
                .then_some(ScenarioFailure::UnexpectedRender),
            (Expectation::Pho(_) | Expectation::Accept | Expectation::Unrenderable, Err(e)) => {
                Some(ScenarioFailure::UnexpectedReject(e))
            }
            (Expectation::Reject { kind, field }, Ok(_)) => Some(ScenarioFailure::UnexpectedAccept {
                kind: *kind,
                field: field.clone(),
            }),
            (Expectation::Reject { kind, field }, Err(e)) => {
                (e.kind() != *kind || e.field() != field.as_str()).then(|| ScenarioFailure::WrongRejection {
                    expected_kind: *kind,
                    expected_field: field.clone(),
                    actual: e,
                })
            }
        };
        ScenarioOutcome {
            name: scenario.name,
            failure,
        }
    }

    pub fn run_all(&self, scenarios: &[Scenario]) -> ScenarioReport {
        ScenarioReport {
            outcomes: scenarios.iter().map(|s| self.run(s)).collect(),
        }
    }
}

/// Outcomes of a batch of scenarios
#[derive(Clone, Debug, Default)]
pub struct ScenarioReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// One line per failing scenario
    pub fn summary(&self) -> String {
        self.failures()
            .filter_map(|o| o.failure.as_ref().map(|f| format!("{}: {}", o.name, f)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Scenarios every build must pass under the default configuration
pub fn standard_scenarios() -> Vec<Scenario> {
    use ErrorKind::*;

    vec![
        Scenario::new(
            "word with defaults",
            Utterance::new("ab"),
            Expectation::Pho("; ab\n_ 1\na 100 0 200 100 200\nb 100 0 200 100 200\n_ 1\n".into()),
        ),
        Scenario::new(
            "explicit phonemes with contour",
            Utterance::new(vec!["m", "a"])
                .with_durations(vec![70, 140])
                .with_pitch(list![list![120, 150, 110], 130])
                .with_outer_silences((200, 300)),
            Expectation::Pho("_ 200\nm 70 0 120 50 150 100 110\na 140 0 130 100 130\n_ 300\n".into()),
        ),
        Scenario::new(
            "integer phonemes are stringified",
            Utterance::new(vec![1, 2, 3]),
            Expectation::Accept,
        ),
        Scenario::new(
            "mixed pitch list",
            Utterance::new("mbrola").with_pitch(list![200, list![200, 10, 200], 200, 200, 200, 200]),
            Expectation::Accept,
        ),
        Scenario::new(
            "durations shorter than phonemes",
            Utterance::new("mbrola").with_durations(vec![100]),
            Expectation::reject(ConstraintViolation, "durations"),
        ),
        Scenario::new(
            "durations given as text",
            Utterance::new("mbrola").with_durations("100"),
            Expectation::reject(TypeMismatch, "durations"),
        ),
        Scenario::new(
            "pitch shorter than phonemes",
            Utterance::new("mbrola").with_pitch(vec![200, 200]),
            Expectation::reject(ConstraintViolation, "pitch"),
        ),
        Scenario::new(
            "pitch contour as tuple",
            Utterance::new("mbrola").with_pitch(list![200, tuple!(200, 200), 200, 200, 200, 200]),
            Expectation::reject(TypeMismatch, "pitch[1]"),
        ),
        Scenario::new(
            "text inside a contour",
            Utterance::new("mbrola").with_pitch(list![200, list![200, "200"], 200, 200, 200, 200]),
            Expectation::reject(TypeMismatch, "pitch[1][1]"),
        ),
        Scenario::new(
            "zero onset silence",
            Utterance::new("mbrola").with_outer_silences((0, 1)),
            Expectation::reject(ConstraintViolation, "onset_silence"),
        ),
        Scenario::new(
            "text onset silence",
            Utterance::new("mbrola").with_outer_silences(("a", 1)),
            Expectation::reject(TypeMismatch, "onset_silence"),
        ),
        Scenario::new(
            "word too long",
            Utterance::new("a".repeat(256)),
            Expectation::reject(ConstraintViolation, "word"),
        ),
        Scenario::new(
            "word with a line break",
            Utterance::new("a b\n_ 9999"),
            Expectation::Unrenderable,
        ),
        Scenario::new(
            "empty phoneme in list",
            Utterance::new(vec!["a", ""]),
            Expectation::Unrenderable,
        ),
        Scenario::new(
            "float and boolean phonemes",
            Utterance::new(list![1.0, true]),
            Expectation::Pho("_ 1\n1.0 100 0 200 100 200\nTrue 100 0 200 100 200\n_ 1\n".into()),
        ),
        Scenario::new(
            "pitch list of wrong length with bad entries",
            Utterance::new("mbrola").with_pitch(list![200, "x"]),
            Expectation::reject(ConstraintViolation, "pitch"),
        ),
        Scenario::new(
            "word with path separator",
            Utterance::new("a/b"),
            Expectation::reject(ConstraintViolation, "word"),
        ),
        Scenario::new(
            "phonemes as a number",
            Utterance::new(Value::Int(1)),
            Expectation::reject(TypeMismatch, "phon"),
        ),
    ]
}

/// Scenarios whose outcome differs under [`ValidationConfig::lenient`]
pub fn lenient_scenarios() -> Vec<Scenario> {
    vec![Scenario::new(
        "pitch contour as tuple",
        Utterance::new("ab").with_pitch(list![tuple!(180, 220), 200]),
        Expectation::Pho("; ab\n_ 1\na 100 0 180 100 220\nb 100 0 200 100 200\n_ 1\n".into()),
    )]
}

/// Harness with the lenient validation configuration
pub fn lenient_harness() -> ScenarioHarness {
    ScenarioHarness::new(Validator::new(ValidationConfig::lenient()), PhoWriter::default())
}
