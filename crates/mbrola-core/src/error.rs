//! Error types for utterance validation

use std::fmt;

use thiserror::Error;

/// The two ways a field can be rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value's kind is not one the field accepts
    TypeMismatch,
    /// The kind is acceptable but a structural or numeric rule is broken
    ConstraintViolation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeMismatch => write!(f, "type mismatch"),
            ErrorKind::ConstraintViolation => write!(f, "constraint violation"),
        }
    }
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MbrolaError {
    #[error("`{field}` must be {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{field}` {reason}")]
    ConstraintViolation { field: String, reason: String },
}

impl MbrolaError {
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        MbrolaError::TypeMismatch {
            field: field.into(),
            expected,
            found,
        }
    }

    pub fn constraint(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MbrolaError::ConstraintViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MbrolaError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            MbrolaError::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
        }
    }

    /// Name of the rejected field, with the element index when one element failed
    pub fn field(&self) -> &str {
        match self {
            MbrolaError::TypeMismatch { field, .. } => field,
            MbrolaError::ConstraintViolation { field, .. } => field,
        }
    }

    pub fn is_type_mismatch(&self) -> bool {
        self.kind() == ErrorKind::TypeMismatch
    }

    pub fn is_constraint_violation(&self) -> bool {
        self.kind() == ErrorKind::ConstraintViolation
    }

    pub(crate) fn logged(self) -> Self {
        tracing::debug!(field = self.field(), kind = %self.kind(), "rejected: {}", self);
        self
    }
}

/// Result type for validation
pub type MbrolaResult<T> = Result<T, MbrolaError>;
