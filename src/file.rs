// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::consts::JSON_INDENT;
use crate::config::options::ExportOptions;
use crate::error::{Error, Result};
use crate::feature::FeatureCollection;

/// Serialize the collection, compact or with a 4-space indent.
pub fn to_geojson_string(collection: &FeatureCollection, pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(serde_json::to_string(collection)?);
    }
    let mut buf: Vec<u8> = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    collection.serialize(&mut ser)?;

    String::from_utf8(buf).map_err(|e| Error::Json(serde::ser::Error::custom(e)))
}

/// Write the whole document to the export path in one go.
/// Returns the final path written to.
pub fn write_collection(export: &ExportOptions, collection: &FeatureCollection) -> Result<PathBuf> {
    let path = export.out_path().to_path_buf();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_geojson_string(collection, export.pretty)?;
    fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::other("path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_compact() {
        let s = to_geojson_string(&FeatureCollection::new(Vec::new()), false).unwrap();
        assert_eq!(s, r#"{"type":"FeatureCollection","features":[]}"#);
    }

    #[test]
    fn pretty_uses_four_spaces() {
        let s = to_geojson_string(&FeatureCollection::new(Vec::new()), true).unwrap();
        assert_eq!(s, "{\n    \"type\": \"FeatureCollection\",\n    \"features\": []\n}");
    }
}
