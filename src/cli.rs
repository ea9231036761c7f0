// src/cli.rs
use std::path::PathBuf;

use crate::config::options::{AppOptions, OnInvalidRow, SheetsOptions, SourceOptions, YearPolicy};
use crate::error::{Error, Result};
use crate::runner;

pub const HELP: &str = include_str!("cli_help.txt");

pub enum Command {
    Help,
    Run(AppOptions),
}

/// Parse process arguments (program name already stripped) and run.
pub fn run<I: IntoIterator<Item = String>>(args: I) -> Result<()> {
    match parse_args(args, |k| std::env::var(k).ok())? {
        Command::Help => {
            eprintln!("{HELP}");
            Ok(())
        }
        Command::Run(opts) => {
            let summary = runner::run(&opts)?;
            println!(
                "Wrote {} ({} features, {} skipped)",
                summary.out_path.display(),
                summary.features,
                summary.skipped.len()
            );
            Ok(())
        }
    }
}

/// `env` resolves Sheets configuration when `--sheets` is given.
pub fn parse_args<I, F>(args: I, env: F) -> Result<Command>
where
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> Option<String>,
{
    let mut input: Option<PathBuf> = None;
    let mut sheets = false;
    let mut token_file: Option<PathBuf> = None;
    let mut out: Option<String> = None;
    let mut pretty = true;
    let mut on_invalid_row = OnInvalidRow::default();
    let mut year = YearPolicy::default();

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-o" | "--out" => out = Some(value(&mut args, "--out")?),
            "--compact" => pretty = false,
            "--sheets" => sheets = true,
            "--token-file" => {
                token_file = Some(PathBuf::from(value(&mut args, "--token-file")?));
                sheets = true;
            }
            "--on-invalid-row" => {
                let v = value(&mut args, "--on-invalid-row")?;
                on_invalid_row = OnInvalidRow::parse(&v)
                    .ok_or_else(|| usage(format!("Unknown --on-invalid-row policy: {v}")))?;
            }
            "--default-year" => year = YearPolicy::DefaultTo(year_value(&mut args, "--default-year")?),
            "--pin-year" => year = YearPolicy::Pinned(year_value(&mut args, "--pin-year")?),
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(usage(format!("Unknown arg: {flag}")));
            }
            _ => {
                if input.is_some() {
                    return Err(usage(format!("Unexpected extra argument: {a}")));
                }
                input = Some(PathBuf::from(&a));
            }
        }
    }

    let source = match (input, sheets) {
        (Some(_), true) => return Err(usage("Give an input file or --sheets, not both")),
        (Some(path), false) => SourceOptions::Tsv { path },
        (None, true) => SourceOptions::Sheets(SheetsOptions::from_lookup(env, token_file)?),
        (None, false) => return Err(usage("Missing input file (or use --sheets)")),
    };

    let mut opts = AppOptions::new(source);
    opts.convert.on_invalid_row = on_invalid_row;
    opts.convert.year = year;
    opts.export.pretty = pretty;
    if let Some(o) = out {
        opts.export.set_path(&o);
    }
    Ok(Command::Run(opts))
}

fn usage(msg: impl Into<String>) -> Error {
    Error::Usage(msg.into())
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next().ok_or_else(|| usage(format!("Missing value for {flag}")))
}

fn year_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<i32> {
    let v = value(args, flag)?;
    v.trim().parse().map_err(|_| usage(format!("Invalid year for {flag}: {v}")))
}
