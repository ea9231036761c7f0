// src/convert.rs
use tracing::{debug, warn};

use crate::config::options::{ConvertOptions, OnInvalidRow};
use crate::error::{Error, Result, RowError};
use crate::feature::{convert_row, FeatureCollection};
use crate::row::Row;

/// A row dropped under `OnInvalidRow::SkipAndReport`.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRow {
    pub line: usize,
    pub swim: String,
    pub reason: RowError,
}

#[derive(Clone, Debug)]
pub struct Conversion {
    pub collection: FeatureCollection,
    pub skipped: Vec<SkippedRow>,
}

/// Map every row, applying the invalid-row policy. Order is preserved.
pub fn convert_rows<I>(rows: I, opts: &ConvertOptions) -> Result<Conversion>
where
    I: IntoIterator<Item = Row>,
{
    let mut features = Vec::new();
    let mut skipped = Vec::new();

    for row in rows {
        match convert_row(&row, opts.year) {
            Ok(f) => features.push(f),
            Err(reason) => {
                let line = row.line();
                let swim = row.swim_label();
                match opts.on_invalid_row {
                    OnInvalidRow::Abort => {
                        return Err(Error::InvalidRow { line, swim, source: reason });
                    }
                    OnInvalidRow::SkipAndReport => {
                        warn!(line, "skipping swim #{swim}: {reason}");
                        skipped.push(SkippedRow { line, swim, reason });
                    }
                }
            }
        }
    }

    debug!(features = features.len(), skipped = skipped.len(), "conversion done");
    Ok(Conversion { collection: FeatureCollection::new(features), skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::YearPolicy;
    use crate::row::{COL_COORDINATES, COL_DAY, COL_MONTH, COL_SWIM, COL_YEAR};

    fn row(line: usize, coords: &str, swim: &str) -> Row {
        Row::from_pairs(line, [
            (COL_COORDINATES, coords),
            (COL_YEAR, "2003"),
            (COL_MONTH, "July"),
            (COL_DAY, "4"),
            (COL_SWIM, swim),
        ])
    }

    fn rows() -> Vec<Row> {
        vec![row(2, "40.7,-74.0", "1"), row(3, "bad", "2"), row(4, "41.0,-73.5", "3")]
    }

    #[test]
    fn skip_keeps_going_and_records_row() {
        let out = convert_rows(rows(), &ConvertOptions::default()).unwrap();
        assert_eq!(out.collection.len(), 2);
        let numbers: Vec<u32> = out.collection.features.iter().map(|f| f.properties.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(
            out.skipped,
            vec![SkippedRow { line: 3, swim: s!("2"), reason: RowError::BadCoordinates(s!("bad")) }]
        );
    }

    #[test]
    fn abort_stops_on_first_bad_row() {
        let opts = ConvertOptions { on_invalid_row: OnInvalidRow::Abort, year: YearPolicy::FromRow };
        let err = convert_rows(rows(), &opts).unwrap_err();
        match err {
            Error::InvalidRow { line, swim, source } => {
                assert_eq!(line, 3);
                assert_eq!(swim, "2");
                assert_eq!(source, RowError::BadCoordinates(s!("bad")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_rows_no_features() {
        let out = convert_rows(Vec::new(), &ConvertOptions::default()).unwrap();
        assert!(out.collection.is_empty());
        assert!(out.skipped.is_empty());
    }
}
