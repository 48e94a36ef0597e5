//! Command-line arguments and the run configuration built from them

use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use crate::core::error::ScanError;
use crate::core::model::SourceDirectory;
use crate::reporting::report_writer::ReportFormat;
use crate::scanner::image_locator::ScanOptions;

/// Log verbosity accepted by `--log-level`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[default]
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING", alias = "WARN")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    /// Same as ERROR
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qr_compare_rs")]
#[command(about = "Decode QR code images in several folders and compare the results", long_about = None)]
pub struct Cli {
    /// Source directory to scan (repeat once per folder to compare)
    #[arg(long = "src-dir", value_name = "PATH", required = true)]
    pub src_dirs: Vec<PathBuf>,

    /// Log level
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Also write log output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write a comparison report into this directory
    #[arg(long, value_name = "PATH")]
    pub report_dir: Option<PathBuf>,

    /// Report file format
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    pub report_format: ReportFormat,

    /// Only scan the top level of each source directory
    #[arg(long)]
    pub flat: bool,

    /// Number of parallel decoder threads (default: number of CPUs)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    pub batch: bool,
}

/// Logging setup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LogLevel,
    pub file: Option<PathBuf>,
}

/// Report file output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub dir: PathBuf,
    pub format: ReportFormat,
}

/// Everything a run needs, fixed before scanning starts
#[derive(Debug, Clone)]
pub struct Config {
    pub src_dirs: Vec<SourceDirectory>,
    pub logging: LogConfig,
    pub scan: ScanOptions,
    pub report: Option<ReportConfig>,
    pub workers: Option<usize>,
    pub batch: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> io::Result<Self> {
        let src_dirs = cli
            .src_dirs
            .iter()
            .map(SourceDirectory::new)
            .collect::<io::Result<Vec<_>>>()?;

        let report = match cli.report_dir {
            Some(dir) => Some(ReportConfig {
                dir: std::path::absolute(dir)?,
                format: cli.report_format,
            }),
            None => None,
        };

        Ok(Self {
            src_dirs,
            logging: LogConfig {
                level: cli.log_level,
                file: cli.log_file,
            },
            scan: ScanOptions {
                recursive: !cli.flat,
                ..ScanOptions::default()
            },
            report,
            workers: cli.workers,
            batch: cli.batch,
        })
    }

    /// Check that every directory the run touches exists
    pub fn validate(&self) -> Result<(), ScanError> {
        for source in &self.src_dirs {
            if !source.path().is_dir() {
                return Err(ScanError::DirectoryNotFound(source.path().to_path_buf()));
            }
        }
        if let Some(report) = &self.report {
            if !report.dir.is_dir() {
                return Err(ScanError::ReportDirNotFound(report.dir.clone()));
            }
        }
        Ok(())
    }
}
