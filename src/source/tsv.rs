// src/source/tsv.rs
use std::{fs::File, io::Read, path::PathBuf};

use csv::ReaderBuilder;

use super::RowSource;
use crate::config::consts::TAB_DELIMITER;
use crate::error::{Error, Result};
use crate::row::Row;

/// Tab-separated file whose first line is the header.
pub struct TsvSource {
    path: PathBuf,
}

impl TsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RowSource for TsvSource {
    fn describe(&self) -> String {
        format!("TSV file {}", self.path.display())
    }

    fn rows(&mut self) -> Result<Vec<Row>> {
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        read_rows(file)
    }
}

/// Parse TSV from any reader. Short records just lack the trailing keys;
/// cells past the header width are dropped.
pub fn read_rows<R: Read>(mut reader: R) -> Result<Vec<Row>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(csv::Error::from)?;

    let mut rdr = ReaderBuilder::new()
        .delimiter(TAB_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(buf.as_slice());

    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| line_at(&buf, p.byte()));
        let row = Row::from_pairs(line, headers.iter().zip(record.iter()));
        rows.push(row);
    }
    Ok(rows)
}

/// 1-based line of the record starting at `byte`. The reported start can sit
/// before line terminators (`\n` of a CRLF, blank lines), so skip those first.
fn line_at(buf: &[u8], byte: u64) -> usize {
    let start = usize::try_from(byte).map_or(buf.len(), |b| b.min(buf.len()));
    let skip = buf[start..]
        .iter()
        .take_while(|&&b| matches!(b, b'\r' | b'\n'))
        .count();
    1 + buf[..start + skip].iter().filter(|&&b| b == b'\n').count()
}
