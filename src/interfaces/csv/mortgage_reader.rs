use crate::domain::record::MortgageRecord;
use crate::error::{MortgageError, Result};
use std::io::{BufRead, BufReader, Read};

/// Reads mortgage records from comma-delimited text, one record per line.
///
/// The source has no header row and blank lines are skipped. Each record
/// keeps the text of its line so that failures can quote it verbatim.
pub struct MortgageReader<R: Read> {
    source: BufReader<R>,
}

impl<R: Read> MortgageReader<R> {
    /// Creates a new `MortgageReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            source: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads records one line at a time.
    pub fn records(self) -> impl Iterator<Item = Result<MortgageRecord>> {
        self.source
            .split(b'\n')
            .zip(1u64..)
            .filter_map(|(line, number)| match line {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    let text = text.trim();
                    if text.is_empty() {
                        None
                    } else {
                        Some(parse_line(text).map(|record| record.with_line(number)))
                    }
                }
                Err(e) => Some(Err(MortgageError::from(e))),
            })
    }
}

/// Splits one line into trimmed fields. Short lines are kept so that the
/// missing field can be reported against the record.
fn parse_line(text: &str) -> Result<MortgageRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;
    let fields = record.iter().map(str::to_string).collect();
    Ok(MortgageRecord::from_parts(fields, text))
}
