// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};

use crate::config::consts::{DEFAULT_OUT_DIR, WORKERS};
use crate::config::options::{ExportFormat, ExportOptions, ExtractOptions, RunOptions};
use crate::progress::Progress;
use crate::store::TableSink;
use crate::{file, log, runner};

#[derive(Parser, Debug)]
#[command(name = "curling_scrape")]
#[command(about = "Extract events, games, ends, shots and stone positions from shot-by-shot summaries", long_about = None)]
pub struct Args {
    /// Root of the <event>/<game type>/<session>/*.xml tree
    pub data_root: PathBuf,

    /// Only process this event directory
    #[arg(long)]
    pub event: Option<String>,

    /// Output directory for the tables
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Games parsed in parallel
    #[arg(long, default_value_t = WORKERS)]
    pub workers: usize,

    /// JSON file overriding the diagram palette and thresholds
    #[arg(long)]
    pub palette: Option<PathBuf>,

    /// Append logs to this file as well
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Omit the header row in CSV/TSV output
    #[arg(long)]
    pub no_headers: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
    Json,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
            Format::Json => ExportFormat::Json,
        }
    }
}

impl Args {
    pub fn to_options(&self) -> color_eyre::Result<RunOptions> {
        let extract = match &self.palette {
            Some(p) => ExtractOptions::load(p)?,
            None => ExtractOptions::default(),
        };
        if self.workers == 0 {
            return Err(eyre!("--workers must be at least 1"));
        }
        Ok(RunOptions {
            data_root: self.data_root.clone(),
            event: self.event.clone(),
            workers: self.workers,
            extract,
            export: ExportOptions {
                format: self.format.into(),
                out_dir: self.out.clone(),
                include_headers: !self.no_headers,
            },
        })
    }
}

/// Event lines plus a running game counter on stderr.
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, _index: usize) {
        self.done += 1;
        eprint!("\r  {}/{} games", self.done, self.total);
    }
    fn finish(&mut self) {
        if self.total > 0 {
            eprintln!();
        }
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    log::init(args.log.as_deref(), args.verbose).wrap_err("failed to open log file")?;
    let opts = args.to_options()?;

    let mut sink = TableSink::new();
    let mut progress = CliProgress { total: 0, done: 0 };
    let report = runner::run(&opts, &mut sink, Some(&mut progress)).map_err(|e| eyre!("{e}"))?;

    let written = file::export_tables(&sink, &opts.export).map_err(|e| eyre!("{e}"))?;
    let report_path = opts.export.out_dir.join("report.json");
    file::write_json(&report_path, &report).map_err(|e| eyre!("{e}"))?;

    for p in &written {
        logf!("Wrote {}", p.display());
    }
    if !report.failures.is_empty() {
        logw!("{} game(s) failed; see {}", report.failures.len(), report_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "curling_scrape", "data", "--event", "WMCC2018", "-o", "tables",
            "--format", "tsv", "--workers", "2", "-v",
        ])
        .unwrap();
        let opts = args.to_options().unwrap();
        assert_eq!(opts.event.as_deref(), Some("WMCC2018"));
        assert_eq!(opts.workers, 2);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert_eq!(opts.export.out_dir, PathBuf::from("tables"));
        assert!(opts.export.include_headers);
        assert!(args.verbose);
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["curling_scrape", "data"]).unwrap();
        let opts = args.to_options().unwrap();
        assert_eq!(opts.workers, WORKERS);
        assert_eq!(opts.export.format, ExportFormat::Csv);
        assert_eq!(opts.export.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
    }

    #[test]
    fn zero_workers_rejected() {
        let args = Args::try_parse_from(["curling_scrape", "data", "--workers", "0"]).unwrap();
        assert!(args.to_options().is_err());
    }
}
