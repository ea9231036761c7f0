// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod feature;
pub mod file;
pub mod log;
pub mod row;
pub mod runner;
pub mod source;

pub use error::{Error, Result, RowError};
pub use feature::{Feature, FeatureCollection};
pub use row::Row;
