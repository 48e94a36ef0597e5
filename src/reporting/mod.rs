//! Log summaries and report files

pub mod report_emitter;
pub mod report_writer;

pub use report_emitter::{emit_report, render_report, ReportLine};
pub use report_writer::{build_table, write_report, ReportFormat, ReportRow, ReportTable};
