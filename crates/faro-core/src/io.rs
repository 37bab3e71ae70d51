//! JSON and JSONL persistence.
//!
//! Raw provider records are stored one per line (`data.jsonl`); derived
//! series and reports are stored as pretty-printed JSON documents.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// Parse JSONL from a reader.
///
/// Blank lines are skipped. A line that does not decode is skipped with a
/// warning naming its line number; the rest of the input is still read.
///
/// # Errors
///
/// Returns an error only when reading from `reader` fails.
pub fn parse_jsonl<T: DeserializeOwned, R: BufRead>(reader: R) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(item) => items.push(item),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "skipping invalid JSON line");
            }
        }
    }
    Ok(items)
}

/// Read a JSONL file. See [`parse_jsonl`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn read_jsonl<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let file = File::open(path.as_ref())?;
    parse_jsonl(BufReader::new(file))
}

/// Write items as JSONL, one compact JSON document per line.
///
/// # Errors
///
/// Returns an error if the file cannot be created or an item fails to
/// serialize.
pub fn write_jsonl<T: Serialize>(path: impl AsRef<Path>, items: &[T]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    for item in items {
        serde_json::to_writer(&mut writer, item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a JSON document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode as `T`.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let file = File::open(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write a pretty-printed JSON document.
///
/// # Errors
///
/// Returns an error if the file cannot be created or `value` fails to
/// serialize.
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawCompany;

    #[test]
    fn test_parse_jsonl_skips_blank_and_invalid_lines() {
        let input = "{\"symbol\":\"AAPL\",\"data\":{}}\n\n{not json}\n{\"symbol\":\"MSFT\"}\n";
        let items: Vec<RawCompany> = parse_jsonl(input.as_bytes()).unwrap();

        let symbols: Vec<&str> = items.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let result: Result<Vec<RawCompany>> = read_jsonl("/nonexistent/faro/data.jsonl");
        assert!(matches!(result, Err(crate::FaroError::Io(_))));
    }
}
