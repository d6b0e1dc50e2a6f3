use super::mortgage::Mortgage;
use super::record::MortgageRecord;
use crate::error::MortgageError;
use rust_decimal::Decimal;
use std::io;

/// Result of processing one input record.
#[derive(Debug)]
pub enum RecordOutcome {
    Processed {
        record: MortgageRecord,
        mortgage: Mortgage,
        payment: Decimal,
    },
    /// `record` is `None` when the line itself could not be read.
    Rejected {
        record: Option<MortgageRecord>,
        error: MortgageError,
    },
}

impl RecordOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, RecordOutcome::Processed { .. })
    }
}

/// Destination for batch results, written as each record completes.
pub trait ReportSink {
    fn begin(&mut self) -> io::Result<()>;
    fn outcome(&mut self, outcome: &RecordOutcome) -> io::Result<()>;
}
