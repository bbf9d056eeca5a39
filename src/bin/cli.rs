// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::WrapErr;

use table_alter::cli::{self, Args};
use table_alter::config::options::RunOptions;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let opts: RunOptions = Args::parse().into();
    table_alter::logging::init(opts.log_level, opts.log_file.as_deref())
        .wrap_err("could not open log file")?;

    let summary = cli::run(&opts)?;
    if !summary.is_clean() {
        log::warn!(
            "{} descriptor(s) failed, {} skipped",
            summary.failures.len(),
            summary.skipped
        );
    }
    Ok(())
}
