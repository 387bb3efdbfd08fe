use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A formula that failed to lex, parse, or resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("formula error at byte {offset}: {message}")]
pub struct FormulaError {
    pub offset: usize,
    pub message: String,
}

impl FormulaError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}
