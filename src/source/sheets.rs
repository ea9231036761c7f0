// src/source/sheets.rs
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::auth::TokenProvider;
use super::RowSource;
use crate::config::consts::SHEETS_API;
use crate::config::options::SheetsOptions;
use crate::error::{Error, Result};
use crate::row::Row;

/// Fixed cell range of a Google spreadsheet. First row is the header.
pub struct SheetsSource {
    opts: SheetsOptions,
    auth: Box<dyn TokenProvider>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl SheetsSource {
    pub fn new(opts: SheetsOptions, auth: Box<dyn TokenProvider>) -> Self {
        Self { opts, auth }
    }

    fn url(&self) -> String {
        values_url(&self.opts.spreadsheet_id, &self.opts.range)
    }
}

impl RowSource for SheetsSource {
    fn describe(&self) -> String {
        format!("spreadsheet {} range {}", self.opts.spreadsheet_id, self.opts.range)
    }

    fn rows(&mut self) -> Result<Vec<Row>> {
        let token = self.auth.access_token()?;
        let url = self.url();
        debug!(%url, "fetching sheet values");

        let resp = ureq::get(&url)
            .set("Authorization", &join!("Bearer ", &token))
            .call()
            .map_err(|e| Error::http(&url, e))?;
        let body: ValueRange = resp.into_json().map_err(|e| Error::Http {
            url: url.clone(),
            message: format!("unreadable values response: {e}"),
        })?;

        Ok(rows_from_values(body.values))
    }
}

pub fn values_url(spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{SHEETS_API}/{}/values/{}",
        urlencoding::encode(spreadsheet_id),
        urlencoding::encode(range)
    )
}

/// Header row zipped against each data row. A data row shorter than the
/// header only carries the leading columns. Row numbers are 1-based sheet rows
/// relative to the start of the range.
pub fn rows_from_values(values: Vec<Vec<Value>>) -> Vec<Row> {
    let mut it = values.into_iter();
    let Some(header) = it.next() else {
        return Vec::new();
    };
    let header: Vec<String> = header.into_iter().map(cell_text).collect();

    it.enumerate()
        .map(|(i, cells)| {
            let pairs = header.iter().cloned().zip(cells.into_iter().map(cell_text));
            Row::from_pairs(i + 2, pairs)
        })
        .collect()
}

fn cell_text(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => s!(),
        other => other.to_string(),
    }
}
