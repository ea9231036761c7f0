// src/feature.rs
//! GeoJSON output types and the row → feature mapping.
//!
//! Input coordinates are `lat,lon`; GeoJSON wants `[lon, lat]`, so the pair is
//! flipped here and nowhere else. Numeric cells are trimmed before parsing.

use serde::Serialize;

use crate::config::options::YearPolicy;
use crate::error::RowError;
use crate::row::{Row, COL_COORDINATES, COL_DAY, COL_MONTH, COL_SWIM, COL_YEAR};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self { Self { features } }
    pub fn len(&self) -> usize { self.features.len() }
    pub fn is_empty(&self) -> bool { self.features.is_empty() }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub properties: SwimProperties,
    pub geometry: Point,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SwimProperties {
    pub year: i32,
    pub month: String,
    pub day: u32,
    pub number: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Point")]
pub struct Point {
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl Point {
    pub fn lon(&self) -> f64 { self.coordinates[0] }
    pub fn lat(&self) -> f64 { self.coordinates[1] }
}

/// Map one row to a feature.
pub fn convert_row(row: &Row, year: YearPolicy) -> Result<Feature, RowError> {
    let coords = require(row, COL_COORDINATES)?;
    let (lat, lon) = parse_lat_lon(coords)?;

    let year = match year {
        YearPolicy::FromRow => parse_int(COL_YEAR, require(row, COL_YEAR)?)?,
        YearPolicy::DefaultTo(y) => match row.get(COL_YEAR) {
            Some(v) if !v.trim().is_empty() => parse_int(COL_YEAR, v)?,
            _ => y,
        },
        YearPolicy::Pinned(y) => y,
    };

    Ok(Feature {
        properties: SwimProperties {
            year,
            month: s!(require(row, COL_MONTH)?),
            day: parse_int(COL_DAY, require(row, COL_DAY)?)?,
            number: parse_int(COL_SWIM, require(row, COL_SWIM)?)?,
        },
        geometry: Point { coordinates: [lon, lat] },
    })
}

fn require<'a>(row: &'a Row, key: &'static str) -> Result<&'a str, RowError> {
    row.get(key).ok_or(RowError::MissingField(key))
}

/// `"<lat>,<lon>"` → `(lat, lon)`. Exactly one comma; both halves finite.
pub fn parse_lat_lon(s: &str) -> Result<(f64, f64), RowError> {
    let bad = || RowError::BadCoordinates(s!(s));

    let mut parts = s.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(bad());
    };

    let parse = |p: &str| p.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    match (parse(lat), parse(lon)) {
        (Some(lat), Some(lon)) => Ok((lat, lon)),
        _ => Err(bad()),
    }
}

fn parse_int<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, RowError> {
    value
        .trim()
        .parse()
        .map_err(|_| RowError::BadNumber { field, value: s!(value) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swim_row(coords: &str) -> Row {
        Row::from_pairs(2, [
            (COL_COORDINATES, coords),
            (COL_YEAR, "2003"),
            (COL_MONTH, "July"),
            (COL_DAY, "4"),
            (COL_SWIM, "12"),
        ])
    }

    #[test]
    fn flips_lat_lon_and_casts_fields() {
        let f = convert_row(&swim_row("40.7,-74.0"), YearPolicy::FromRow).unwrap();
        assert_eq!(f.geometry.coordinates, [-74.0, 40.7]);
        assert_eq!(f.properties.year, 2003);
        assert_eq!(f.properties.month, "July");
        assert_eq!(f.properties.day, 4);
        assert_eq!(f.properties.number, 12);
    }

    #[test]
    fn serializes_in_geojson_shape() {
        let f = convert_row(&swim_row("40.7,-74.0"), YearPolicy::FromRow).unwrap();
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Feature","properties":{"year":2003,"month":"July","day":4,"number":12},"geometry":{"type":"Point","coordinates":[-74.0,40.7]}}"#
        );
    }

    #[test]
    fn tolerates_spaces_around_numbers() {
        let f = convert_row(&swim_row(" 51.5 , -0.12 "), YearPolicy::FromRow).unwrap();
        assert_eq!(f.geometry.lat(), 51.5);
        assert_eq!(f.geometry.lon(), -0.12);
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for bad in ["bad", "40.7", "40.7,-74.0,3", "40.7,", "nan,1.0", "inf,-inf", ""] {
            let err = convert_row(&swim_row(bad), YearPolicy::FromRow).unwrap_err();
            assert_eq!(err, RowError::BadCoordinates(s!(bad)), "input {bad:?}");
        }
    }

    #[test]
    fn rejects_non_numeric_day() {
        let mut row = swim_row("1,2");
        row.insert(COL_DAY, "fourth");
        let err = convert_row(&row, YearPolicy::FromRow).unwrap_err();
        assert_eq!(err, RowError::BadNumber { field: COL_DAY, value: s!("fourth") });
    }

    #[test]
    fn missing_month_is_reported() {
        let row = Row::from_pairs(2, [
            (COL_COORDINATES, "1,2"),
            (COL_YEAR, "2003"),
            (COL_DAY, "4"),
            (COL_SWIM, "12"),
        ]);
        let err = convert_row(&row, YearPolicy::FromRow).unwrap_err();
        assert_eq!(err, RowError::MissingField(COL_MONTH));
    }

    #[test]
    fn year_policies() {
        let mut row = swim_row("1,2");
        assert_eq!(convert_row(&row, YearPolicy::Pinned(2003)).unwrap().properties.year, 2003);

        row.insert(COL_YEAR, "2019");
        assert_eq!(convert_row(&row, YearPolicy::Pinned(2003)).unwrap().properties.year, 2003);
        assert_eq!(convert_row(&row, YearPolicy::DefaultTo(2003)).unwrap().properties.year, 2019);

        row.insert(COL_YEAR, "");
        assert_eq!(convert_row(&row, YearPolicy::DefaultTo(2003)).unwrap().properties.year, 2003);
        assert!(convert_row(&row, YearPolicy::FromRow).is_err());
    }

    #[test]
    fn year_column_optional_only_with_fallback() {
        let row = Row::from_pairs(2, [
            (COL_COORDINATES, "1,2"),
            (COL_MONTH, "May"),
            (COL_DAY, "1"),
            (COL_SWIM, "3"),
        ]);
        assert_eq!(
            convert_row(&row, YearPolicy::FromRow).unwrap_err(),
            RowError::MissingField(COL_YEAR)
        );
        assert_eq!(convert_row(&row, YearPolicy::DefaultTo(2021)).unwrap().properties.year, 2021);
    }
}
