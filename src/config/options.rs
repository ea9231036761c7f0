// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub convert: ConvertOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    pub fn new(source: SourceOptions) -> Self {
        Self {
            source,
            convert: ConvertOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/* ---------------- Source ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceOptions {
    Tsv { path: PathBuf },
    Sheets(SheetsOptions),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialSource {
    /// Service-account key JSON passed inline.
    ServiceAccountJson(String),
    /// Path to a service-account key file.
    ServiceAccountFile(PathBuf),
    /// Authorized-user `token.json`, refreshed in place when expired.
    TokenFile(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetsOptions {
    pub spreadsheet_id: String,
    pub range: String,
    pub credentials: CredentialSource,
}

impl SheetsOptions {
    pub fn from_env(token_file: Option<PathBuf>) -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), token_file)
    }

    /// Resolve from any key → value lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F, token_file: Option<PathBuf>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("{key} is not set")))
        };

        let spreadsheet_id = required(ENV_SPREADSHEET_ID)?;
        let range = required(ENV_DATA_RANGE)?;

        let credentials = if let Some(path) = token_file {
            CredentialSource::TokenFile(path)
        } else if let Some(json) = get(ENV_SERVICE_ACCOUNT_JSON) {
            CredentialSource::ServiceAccountJson(json)
        } else if let Some(path) = get(ENV_APPLICATION_CREDENTIALS) {
            CredentialSource::ServiceAccountFile(PathBuf::from(path))
        } else {
            return Err(Error::Config(format!(
                "set {ENV_SERVICE_ACCOUNT_JSON} or {ENV_APPLICATION_CREDENTIALS}"
            )));
        };

        Ok(Self { spreadsheet_id, range, credentials })
    }
}

/* ---------------- Convert ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnInvalidRow {
    Abort,
    #[default]
    SkipAndReport,
}

impl OnInvalidRow {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Some(OnInvalidRow::Abort),
            "skip" | "skip_and_report" | "skip-and-report" => Some(OnInvalidRow::SkipAndReport),
            _ => None,
        }
    }
}

/// Where `properties.year` comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum YearPolicy {
    /// `Year` column is required.
    #[default]
    FromRow,
    /// Use the column when present and non-blank, else this year.
    DefaultTo(i32),
    /// Ignore the column entirely.
    Pinned(i32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub on_invalid_row: OnInvalidRow,
    pub year: YearPolicy,
}

/* ---------------- Export ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    out_path: PathBuf,
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DEFAULT_OUT_PATH),
            pretty: true,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    /// Blank input keeps the current path.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if !s.is_empty() {
            self.out_path = PathBuf::from(s);
        }
    }
}
