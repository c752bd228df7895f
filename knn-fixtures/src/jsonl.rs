//! # JSONL module
//!
//! Newline-delimited JSON: one complete object per line.

use super::FixtureError;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Write each record as one line of JSON.
///
/// # Errors
///
/// Returns [`Json`](FixtureError::Json) if a record cannot be encoded, or [`Io`](FixtureError::Io) if writing fails.
pub fn write<W, T>(mut writer: W, records: &[T]) -> Result<(), FixtureError>
where
    W: Write,
    T: Serialize,
{
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(())
}

/// Write records to a file, replacing it if exists.
///
/// # Errors
///
/// See [`write`].
pub fn write_file<P, T>(path: P, records: &[T]) -> Result<(), FixtureError>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let file = File::create(path)?;
    write(BufWriter::new(file), records)
}

/// Parse one record per line, skipping blank lines.
///
/// # Errors
///
/// Returns [`Read`](FixtureError::Read) if a line cannot be read, or [`Parse`](FixtureError::Parse) if it
/// cannot be parsed, both with the offending line number.
pub fn read<R, T>(reader: R) -> Result<Vec<T>, FixtureError>
where
    R: BufRead,
    T: DeserializeOwned,
{
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| FixtureError::Read {
            line: index + 1,
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|source| FixtureError::Parse {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Parse records from a file.
///
/// # Errors
///
/// See [`read`].
pub fn read_file<P, T>(path: P) -> Result<Vec<T>, FixtureError>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let file = File::open(path)?;
    read(BufReader::new(file))
}
