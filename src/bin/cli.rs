// src/bin/cli.rs
use swims_geojson::{cli, log};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    log::init();
    cli::run(std::env::args().skip(1))?;
    Ok(())
}
