use crate::domain::lookup::{Frequency, Rate};
use crate::domain::mortgage::{Mortgage, RateConvention};
use crate::domain::ports::{RecordOutcome, ReportSink};
use crate::domain::record::MortgageRecord;
use crate::error::{MortgageError, Result, ValidationError};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, warn};

/// Counts of records seen by a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.processed + self.rejected
    }
}

/// Turns raw records into mortgages, one record at a time.
///
/// Each record is fully handled before the next is read, and a failing
/// record is reported without affecting the rest of the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchProcessor {
    convention: RateConvention,
}

impl BatchProcessor {
    pub fn new(convention: RateConvention) -> Self {
        Self { convention }
    }

    pub fn convention(&self) -> RateConvention {
        self.convention
    }

    /// Processes a single record into a tagged outcome.
    pub fn process(&self, record: MortgageRecord) -> RecordOutcome {
        let built = self.build(&record).and_then(|mortgage| {
            let payment = mortgage.calculate_payment_with(self.convention)?;
            Ok((mortgage, payment))
        });

        match built {
            Ok((mortgage, payment)) => {
                debug!(line = ?record.line(), %payment, "mortgage processed");
                RecordOutcome::Processed {
                    record,
                    mortgage,
                    payment,
                }
            }
            Err(error) => {
                warn!(
                    line = ?record.line(),
                    data = %record.raw(),
                    %error,
                    "mortgage rejected"
                );
                RecordOutcome::Rejected {
                    record: Some(record),
                    error,
                }
            }
        }
    }

    /// Drives every record through [`BatchProcessor::process`] and hands
    /// each outcome to `sink` as soon as it is ready.
    ///
    /// Record-level failures, including lines the csv layer cannot split,
    /// are reported and skipped. A failure to read the source or to write
    /// to the sink stops the run.
    pub fn run<I, S>(&self, records: I, sink: &mut S) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = Result<MortgageRecord>>,
        S: ReportSink + ?Sized,
    {
        let mut summary = BatchSummary::default();
        sink.begin()?;

        for record in records {
            let outcome = match record {
                Ok(record) => self.process(record),
                Err(error) if error.is_record_error() => {
                    warn!(%error, "error reading record");
                    RecordOutcome::Rejected {
                        record: None,
                        error,
                    }
                }
                Err(error) => return Err(error),
            };

            if outcome.is_processed() {
                summary.processed += 1;
            } else {
                summary.rejected += 1;
            }
            sink.outcome(&outcome)?;
        }

        Ok(summary)
    }

    fn build(&self, record: &MortgageRecord) -> Result<Mortgage> {
        let loan_amount = parse_loan_amount(record.loan_amount()?)?;
        let rate = Rate::from_str(record.rate_name()?)?;
        let amortization = parse_amortization(record.amortization()?)?;
        let frequency = Frequency::from_str(record.frequency_name()?)?;

        Ok(Mortgage::new(loan_amount, rate, frequency, amortization)?)
    }
}

fn parse_loan_amount(raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| MortgageError::Conversion {
            field: "loan amount",
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Any integer parses; values that are not a valid year count (negative or
/// out of range) are reported as invalid amortization.
fn parse_amortization(raw: &str) -> Result<u32> {
    let years = raw.parse::<i64>().map_err(|e| MortgageError::Conversion {
        field: "amortization",
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    u32::try_from(years)
        .map_err(|_| ValidationError::Amortization.into())
}
