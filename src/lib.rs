//! QR Compare Library
//!
//! Scans folders for QR code images, decodes them and compares the decoded
//! payloads across folders.

pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod reporting;
pub mod scanner;

pub use crate::core::comparator;
pub use crate::core::decoder;
pub use crate::reporting::report_writer;
pub use crate::scanner::image_locator;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{run, run_with_decoder, RunOutcome};
    pub use crate::config::{Cli, Config, LogConfig, LogLevel, ReportConfig};
    pub use crate::core::comparator::{compare, ComparisonResult, PayloadCounts, PayloadStatus};
    pub use crate::core::decoder::{QrDecoder, RqrrDecoder};
    pub use crate::core::error::{DecodeError, ScanError};
    pub use crate::core::model::{
        DecodedSymbol, FolderIndex, FolderIndexBuilder, SourceDirectory, Symbology,
    };
    pub use crate::reporting::report_emitter::{emit_report, render_report, ReportLine};
    pub use crate::reporting::report_writer::{
        build_table, write_csv, write_json, write_report, ReportFormat, ReportTable,
    };
    pub use crate::scanner::folder_scanner::scan_folder;
    pub use crate::scanner::image_locator::{locate_images, ScanOptions, IMAGE_EXTENSIONS};
}
