// src/cli.rs
use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;

use crate::config::consts::DEFAULT_CONTROL_FILE;
use crate::config::options::RunOptions;
use crate::error::AlterError;
use crate::progress::Progress;
use crate::runner::{Controller, RunSummary};

/// Alter tables in generated HTML pages as described by a control file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Control file listing the table alterations
    #[arg(default_value = DEFAULT_CONTROL_FILE)]
    pub control_file: PathBuf,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Process everything but do not write any document
    #[arg(long)]
    pub dry_run: bool,

    /// Also append log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl From<Args> for RunOptions {
    fn from(a: Args) -> Self {
        let log_level = if a.verbose {
            LevelFilter::Debug
        } else if a.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        };
        Self { control_file: a.control_file, dry_run: a.dry_run, log_level, log_file: a.log_file }
    }
}

/// Resolve the control file and process every descriptor in it.
pub fn run(opts: &RunOptions) -> Result<RunSummary, AlterError> {
    let control = opts
        .resolve_control_file()
        .ok_or_else(|| AlterError::ControlFileMissing(opts.control_file.clone()))?;
    log::info!("Using control file: {}", control.display());

    let mut controller = Controller::from_control_file(&control)?.dry_run(opts.dry_run);
    let mut progress = CliProgress::default();
    Ok(controller.run(Some(&mut progress)))
}

/// Prints one stdout line per finished descriptor.
#[derive(Debug, Default)]
pub struct CliProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl CliProgress {
    fn line(&self, n: usize, status: &str) -> String {
        format!("[{n}/{}] {status}", self.total)
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn item_done(&mut self, n: usize, path: &Path) {
        self.done += 1;
        println!("{}", self.line(n, &path.display().to_string()));
    }

    fn item_failed(&mut self, n: usize, _err: &AlterError) {
        self.failed += 1;
        println!("{}", self.line(n, "failed"));
    }

    fn finish(&mut self) {
        println!("{} of {} descriptor(s) processed, {} failed", self.done, self.total, self.failed);
    }
}
