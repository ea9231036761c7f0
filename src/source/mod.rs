// src/source/mod.rs
//! Row sources.
//!
//! Everything upstream of the mapper lives here: reading a local TSV export,
//! or fetching a cell range from Google Sheets (and the credentials that
//! takes). Sources hand back plain [`Row`]s in their original order; the
//! mapper and writer never learn which source or credential strategy was used.

pub mod auth;
pub mod sheets;
pub mod tsv;

use crate::config::options::SourceOptions;
use crate::error::Result;
use crate::row::Row;

pub use sheets::SheetsSource;
pub use tsv::TsvSource;

pub trait RowSource {
    /// Short human description for logs.
    fn describe(&self) -> String;

    /// Produce every row, in source order.
    fn rows(&mut self) -> Result<Vec<Row>>;
}

/// Build the configured source.
pub fn open(opts: &SourceOptions) -> Result<Box<dyn RowSource>> {
    let src: Box<dyn RowSource> = match opts {
        SourceOptions::Tsv { path } => Box::new(TsvSource::new(path.clone())),
        SourceOptions::Sheets(sheets) => {
            let auth = auth::from_credentials(&sheets.credentials)?;
            Box::new(SheetsSource::new(sheets.clone(), auth))
        }
    };
    Ok(src)
}
