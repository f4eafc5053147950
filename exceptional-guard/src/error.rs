//! Error types for the exceptional-guard library.
//!
//! Every checked operation reports failure through [`GuardError`], a closed
//! set of variants that mirror the [`FailureKind`] taxonomy. Argument failures
//! carry a [`Failure`] whose `Display` renders a fixed template, so callers can
//! match messages exactly:
//!
//! ```text
//! [<method>() ][<param> ]argument <<value>> <reason>
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The kind of a checked-operation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// An argument had the wrong type or shape
    InvalidArgument,
    /// A finite number fell outside the accepted interval, or a number was not finite
    OutOfRange,
    /// A search, match or extraction produced no usable result
    NotFound,
    /// A graft would overwrite an existing namespace member
    ConfigurationConflict,
}

impl FailureKind {
    /// Returns the snake_case name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidArgument => "invalid_argument",
            FailureKind::OutOfRange => "out_of_range",
            FailureKind::NotFound => "not_found",
            FailureKind::ConfigurationConflict => "configuration_conflict",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The details of a rejected argument or result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Failure {
    /// The offending value rendered as text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// The name of the parameter that carried the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    /// The name of the operation that rejected it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Human-readable reason clause, e.g. "must be at least 0"
    pub reason: String,
}

impl Failure {
    /// Creates a failure with only a reason clause.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            ..Self::default()
        }
    }

    /// Sets the offending value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the parameter name.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    /// Sets the operation name.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(method) = &self.method {
            write!(f, "{method}() ")?;
        }
        if let Some(param) = &self.param {
            write!(f, "{param} ")?;
        }
        match &self.value {
            Some(value) => write!(f, "argument <{value}> {}", self.reason),
            None if self.param.is_some() => write!(f, "argument {}", self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

/// The main error type for the exceptional-guard library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// Wrong type or shape, e.g. a string where a number was required.
    #[error("{0}")]
    InvalidArgument(Failure),

    /// Numeric domain or bounds violation.
    #[error("{0}")]
    OutOfRange(Failure),

    /// The underlying primitive found nothing usable.
    #[error("{0}")]
    NotFound(Failure),

    /// A graft would overwrite a member the target already defines.
    #[error("cannot augment {domain} with method {member} as that would {reason}")]
    ConfigurationConflict {
        /// Domain being grafted
        domain: String,
        /// Derived member name that collided
        member: String,
        /// Reason clause
        reason: String,
    },
}

/// A type alias for `Result<T, GuardError>`.
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(failure: Failure) -> Self {
        Self::InvalidArgument(failure)
    }

    /// Creates an out-of-range error.
    pub fn out_of_range(failure: Failure) -> Self {
        Self::OutOfRange(failure)
    }

    /// Creates a not-found error.
    pub fn not_found(failure: Failure) -> Self {
        Self::NotFound(failure)
    }

    /// Creates the error raised when a graft would overwrite `member`.
    pub fn configuration_conflict(domain: impl Into<String>, member: impl Into<String>) -> Self {
        Self::ConfigurationConflict {
            domain: domain.into(),
            member: member.into(),
            reason: "overwrite an existing method".to_string(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            GuardError::InvalidArgument(_) => FailureKind::InvalidArgument,
            GuardError::OutOfRange(_) => FailureKind::OutOfRange,
            GuardError::NotFound(_) => FailureKind::NotFound,
            GuardError::ConfigurationConflict { .. } => FailureKind::ConfigurationConflict,
        }
    }

    /// Returns the argument details, if this is an argument failure.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            GuardError::InvalidArgument(failure)
            | GuardError::OutOfRange(failure)
            | GuardError::NotFound(failure) => Some(failure),
            GuardError::ConfigurationConflict { .. } => None,
        }
    }

    /// Returns true if this is an [`FailureKind::OutOfRange`] error.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, GuardError::OutOfRange(_))
    }

    /// Returns true if this is a [`FailureKind::NotFound`] error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GuardError::NotFound(_))
    }

    /// Returns true if this is an [`FailureKind::InvalidArgument`] error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, GuardError::InvalidArgument(_))
    }
}
