use std::path::PathBuf;
use thiserror::Error;

/// Invariant violations raised by the mortgage entity.
///
/// The messages are part of the user-visible report and must not change.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Loan Amount must be positive.")]
    LoanAmount,
    #[error("Rate provided is invalid.")]
    Rate,
    #[error("Frequency provided is invalid.")]
    Frequency,
    #[error("Amortization provided is invalid.")]
    Amortization,
}

#[derive(Error, Debug)]
pub enum MortgageError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{kind} has no member '{name}'")]
    Lookup { kind: &'static str, name: String },
    #[error("could not convert {field} '{value}': {reason}")]
    Conversion {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("Calculation error: {0}")]
    Calculation(String),
    #[error("Input source {} could not be opened: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MortgageError {
    /// True for failures scoped to a single input record.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            MortgageError::Validation(_)
                | MortgageError::Lookup { .. }
                | MortgageError::Conversion { .. }
                | MortgageError::Calculation(_)
                | MortgageError::CsvError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MortgageError>;
