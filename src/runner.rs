// src/runner.rs
use std::path::PathBuf;

use tracing::info;

use crate::{
    config::options::AppOptions,
    convert::{convert_rows, SkippedRow},
    error::Result,
    file::write_collection,
    source::{self, RowSource},
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub out_path: PathBuf,
    pub features: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Top-level runner: open the configured source and convert it.
pub fn run(opts: &AppOptions) -> Result<RunSummary> {
    let mut src = source::open(&opts.source)?;
    run_with(src.as_mut(), opts)
}

/// Same as [`run`] with a caller-supplied source.
pub fn run_with(src: &mut dyn RowSource, opts: &AppOptions) -> Result<RunSummary> {
    info!("reading {}", src.describe());
    let rows = src.rows()?;
    info!(rows = rows.len(), "rows loaded");

    let conversion = convert_rows(rows, &opts.convert)?;
    let out_path = write_collection(&opts.export, &conversion.collection)?;
    info!(
        features = conversion.collection.len(),
        skipped = conversion.skipped.len(),
        "wrote {}",
        out_path.display()
    );

    Ok(RunSummary {
        out_path,
        features: conversion.collection.len(),
        skipped: conversion.skipped,
    })
}
