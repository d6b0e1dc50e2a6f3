use crate::domain::mortgage::{Mortgage, RateConvention};
use crate::domain::ports::{RecordOutcome, ReportSink};
use crate::error::MortgageError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{self, Write};

/// Separator printed before the first record and after every record.
pub const BANNER: &str = "**************************************************";

/// Shown when the input source does not exist.
pub const SOURCE_MISSING: &str = "File not found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Multi-line human readable summary.
    #[default]
    Display,
    /// Bracketed list of the raw values.
    Compact,
    /// One JSON object per record.
    Json,
}

#[derive(Serialize)]
struct ProcessedRow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u64>,
    #[serde(flatten)]
    mortgage: &'a Mortgage,
    payment: Decimal,
}

#[derive(Serialize)]
struct RejectedRow<'a> {
    data: Option<&'a str>,
    line: Option<u64>,
    error: &'a str,
}

/// Writes batch outcomes as a plain-text report.
pub struct ReportWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    convention: RateConvention,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            format: OutputFormat::default(),
            convention: RateConvention::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_convention(mut self, convention: RateConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn write_source_missing(&mut self) -> io::Result<()> {
        writeln!(self.writer, "{SOURCE_MISSING}")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_processed(
        &mut self,
        line: Option<u64>,
        mortgage: &Mortgage,
        payment: Decimal,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Display => {
                let text = mortgage
                    .render_display_with(self.convention)
                    .map_err(io::Error::other)?;
                writeln!(self.writer, "{text}")
            }
            OutputFormat::Compact => writeln!(self.writer, "{}", mortgage.render_compact()),
            OutputFormat::Json => {
                let row = ProcessedRow {
                    line,
                    mortgage,
                    payment,
                };
                serde_json::to_writer(&mut self.writer, &row)?;
                writeln!(self.writer)
            }
        }
    }

    fn write_rejected(
        &mut self,
        data: Option<&str>,
        line: Option<u64>,
        error: &MortgageError,
    ) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let message = error.to_string();
                let row = RejectedRow {
                    data,
                    line,
                    error: &message,
                };
                serde_json::to_writer(&mut self.writer, &row)?;
                writeln!(self.writer)
            }
            _ => match data {
                Some(data) => writeln!(self.writer, "Data: {data} caused Exception: {error}"),
                None => writeln!(self.writer, "Error reading record: {error}"),
            },
        }
    }
}

impl<W: Write> ReportSink for ReportWriter<W> {
    fn begin(&mut self) -> io::Result<()> {
        if self.format != OutputFormat::Json {
            writeln!(self.writer, "{BANNER}")?;
        }
        Ok(())
    }

    fn outcome(&mut self, outcome: &RecordOutcome) -> io::Result<()> {
        match outcome {
            RecordOutcome::Processed {
                record,
                mortgage,
                payment,
            } => self.write_processed(record.line(), mortgage, *payment)?,
            RecordOutcome::Rejected { record, error } => {
                let data = record.as_ref().map(|record| record.raw());
                let line = record.as_ref().and_then(|record| record.line());
                self.write_rejected(data, line, error)?;
            }
        }

        if self.format != OutputFormat::Json {
            writeln!(self.writer, "{BANNER}")?;
        }
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lookup::{Frequency, Rate};
    use crate::domain::record::MortgageRecord;
    use crate::error::ValidationError;
    use rust_decimal_macros::dec;

    fn scenario(frequency: Frequency) -> Mortgage {
        let loan = dec!(682912.45);
        Mortgage::new(loan, Rate::Fixed1, frequency, 30).unwrap()
    }

    fn processed() -> RecordOutcome {
        let mortgage = scenario(Frequency::Monthly);
        let fields = ["682912.45", "FIXED_1", "30", "MONTHLY"];
        RecordOutcome::Processed {
            record: MortgageRecord::new(fields).with_line(1),
            payment: mortgage.calculate_payment().unwrap(),
            mortgage,
        }
    }

    fn rejected() -> RecordOutcome {
        let fields = ["0", "FIXED_1", "30", "MONTHLY"];
        RecordOutcome::Rejected {
            record: Some(MortgageRecord::new(fields).with_line(2)),
            error: ValidationError::LoanAmount.into(),
        }
    }

    fn render(format: OutputFormat, outcomes: &[RecordOutcome]) -> String {
        let mut writer = ReportWriter::new(Vec::new()).with_format(format);
        writer.begin().unwrap();
        for outcome in outcomes {
            writer.outcome(outcome).unwrap();
        }
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_display_report() {
        let output = render(OutputFormat::Display, &[processed(), rejected()]);
        let expected = format!(
            "{BANNER}\n\
             Mortgage Amount: $682,912.45\n\
             Rate: 5.89%\n\
             Amortization: 30\n\
             Frequency: Monthly -- Calculated Payment: $4,046.23\n\
             {BANNER}\n\
             Data: 0,FIXED_1,30,MONTHLY caused Exception: Loan Amount must be positive.\n\
             {BANNER}\n"
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_rejected_line_quotes_source_text() {
        let fields = vec!["450,000".to_string(), "FIXED_2".to_string()];
        let record = MortgageRecord::from_parts(fields, "\"450,000\" , FIXED_2");
        let outcome = RecordOutcome::Rejected {
            record: Some(record),
            error: ValidationError::Rate.into(),
        };

        let output = render(OutputFormat::Display, &[outcome]);
        let expected = "Data: \"450,000\" , FIXED_2 caused Exception: \
                        Rate provided is invalid.\n";
        assert!(output.contains(expected));
    }

    #[test]
    fn test_compact_report() {
        let output = render(OutputFormat::Compact, &[processed()]);
        let expected = format!("{BANNER}\n[682912.45, 0.0589, 30, 12]\n{BANNER}\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_json_report() {
        let output = render(OutputFormat::Json, &[processed(), rejected()]);
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["line"], 1);
        assert_eq!(lines[0]["loan_amount"], "682912.45");
        assert_eq!(lines[0]["rate"], "FIXED_1");
        assert_eq!(lines[0]["frequency"], "MONTHLY");
        assert_eq!(lines[0]["amortization"], 30);
        assert_eq!(lines[0]["payment"], "4046.23");
        assert_eq!(lines[1]["data"], "0,FIXED_1,30,MONTHLY");
        assert_eq!(lines[1]["line"], 2);
        assert_eq!(lines[1]["error"], "Loan Amount must be positive.");
    }

    #[test]
    fn test_json_row_without_line_number() {
        let mortgage = scenario(Frequency::Monthly);
        let outcome = RecordOutcome::Processed {
            record: MortgageRecord::new(["682912.45", "FIXED_1", "30", "MONTHLY"]),
            payment: mortgage.calculate_payment().unwrap(),
            mortgage,
        };

        let output = render(OutputFormat::Json, &[outcome]);
        let row: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert!(row.get("line").is_none());
        assert_eq!(row["payment"], "4046.23");
    }

    #[test]
    fn test_unreadable_record() {
        let outcome = RecordOutcome::Rejected {
            record: None,
            error: MortgageError::Calculation("bad bytes".to_string()),
        };
        let output = render(OutputFormat::Display, &[outcome]);
        let expected = "Error reading record: Calculation error: bad bytes\n";
        assert!(output.contains(expected));
    }

    #[test]
    fn test_source_missing() {
        let mut writer = ReportWriter::new(Vec::new());
        writer.write_source_missing().unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, "File not found.\n");
    }

    #[test]
    fn test_display_uses_convention() {
        let convention = RateConvention::PerPayment;
        let mortgage = scenario(Frequency::BiWeekly);
        let payment = mortgage.calculate_payment_with(convention).unwrap();
        let outcome = RecordOutcome::Processed {
            record: MortgageRecord::new(["682912.45", "FIXED_1", "30", "BI_WEEKLY"]),
            payment,
            mortgage,
        };

        let mut writer = ReportWriter::new(Vec::new()).with_convention(convention);
        writer.outcome(&outcome).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.contains("Calculated Payment: $1,866.60"));
    }
}
