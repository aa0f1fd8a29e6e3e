//! Error types for the cdscheck library.

use thiserror::Error;

use crate::validation::{MessageKey, Severity, ValidationMessage};

/// Errors that can occur while reading inputs or configuring a run.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// A validation constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// A file format error was detected.
    #[error("{0}")]
    Format(String),

    /// A location refers to a sequence that is not available locally.
    #[error("remote sequence not available: {0}")]
    RemoteSegment(String),
}

/// A translation failure that stops the current translation attempt.
///
/// Carries the stable message key consumers match on, plus positional
/// parameters. The caller decides which severity the failure gets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{key}: {}", .params.join(", "))]
pub struct TranslationError {
    pub key: MessageKey,
    pub params: Vec<String>,
}

impl TranslationError {
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            params: Vec::new(),
        }
    }

    /// Append one positional parameter.
    #[must_use]
    pub fn with(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }

    #[must_use]
    pub fn into_message(self, severity: Severity) -> ValidationMessage {
        ValidationMessage::new(severity, self.key).with_params(self.params)
    }
}
