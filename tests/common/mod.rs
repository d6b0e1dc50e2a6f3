use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes `records` as comma-delimited lines to a temporary file.
pub fn mortgages_file(records: &[[&str; 4]]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    let mut wtr = csv::WriterBuilder::new().from_writer(&mut file);
    for record in records {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    drop(wtr);
    file.flush()?;
    Ok(file)
}
