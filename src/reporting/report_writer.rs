//! Report file writing functionality

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::comparator::ComparisonResult;
use crate::core::model::FolderIndex;

/// Status written for images that produced no payload
pub const NO_DETECTED: &str = "NO_DETECTED";

/// Report file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub status: Vec<String>,
    pub code: Option<String>,
    pub decoded_type: Option<String>,
    /// Per source directory, the matching files relative to that directory
    pub files: Vec<Vec<String>>,
}

/// Comparison table: one row per payload, then one per undetected image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportTable {
    pub header: Vec<String>,
    pub rows: Vec<ReportRow>,
}

/// Build the comparison table
///
/// # Arguments
/// * `result` - Comparison of `indices`
/// * `indices` - Folder indices, in command-line order
pub fn build_table(result: &ComparisonResult, indices: &[FolderIndex]) -> ReportTable {
    let mut header = vec![
        "Compare Result".to_string(),
        "CODE".to_string(),
        "Decoded Type".to_string(),
    ];
    header.extend(indices.iter().map(|idx| idx.source().label().to_string()));

    let mut rows = Vec::new();
    for (payload, status) in &result.statuses {
        let decoded_type = indices
            .iter()
            .find_map(|idx| idx.symbology(payload))
            .map(|s| s.to_string());
        let files: Vec<Vec<String>> = indices
            .iter()
            .map(|idx| {
                idx.paths_for(payload)
                    .into_iter()
                    .flatten()
                    .map(|p| idx.source().relative(p).display().to_string())
                    .collect()
            })
            .collect();

        rows.push(ReportRow {
            status: status.labels().into_iter().map(String::from).collect(),
            code: Some(payload.clone()),
            decoded_type,
            files,
        });
    }

    for (owner, index) in indices.iter().enumerate() {
        for path in index.undetected() {
            let files: Vec<Vec<String>> = (0..indices.len())
                .map(|i| {
                    if i == owner {
                        vec![index.source().relative(path).display().to_string()]
                    } else {
                        Vec::new()
                    }
                })
                .collect();
            rows.push(ReportRow {
                status: vec![NO_DETECTED.to_string()],
                code: None,
                decoded_type: None,
                files,
            });
        }
    }

    ReportTable { header, rows }
}

/// Write the table as CSV. Multi-valued cells are joined with newlines,
/// status flags with `|`.
pub fn write_csv<W: Write>(writer: W, table: &ReportTable) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&table.header)?;

    for row in &table.rows {
        let mut record = vec![
            row.status.join("|"),
            row.code.clone().unwrap_or_default(),
            row.decoded_type.clone().unwrap_or_default(),
        ];
        record.extend(row.files.iter().map(|files| files.join("\n")));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the table as pretty-printed JSON
pub fn write_json<W: Write>(writer: W, table: &ReportTable) -> Result<()> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}

/// `qr_comparison_report_<timestamp>.<ext>`
pub fn report_file_name(format: ReportFormat, at: DateTime<Local>) -> String {
    format!(
        "{}.{}",
        at.format("qr_comparison_report_%Y-%m-%d_%H-%M-%S"),
        format.extension()
    )
}

/// Write the comparison table to a timestamped file in `report_dir`
///
/// # Returns
/// Path of the written report
pub fn write_report(report_dir: &Path, format: ReportFormat, table: &ReportTable) -> Result<PathBuf> {
    let path = report_dir.join(report_file_name(format, Local::now()));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        ReportFormat::Csv => write_csv(&mut writer, table)?,
        ReportFormat::Json => write_json(&mut writer, table)?,
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write report file {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparator::compare;
    use crate::core::model::{DecodedSymbol, FolderIndexBuilder, SourceDirectory};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample() -> (ComparisonResult, Vec<FolderIndex>) {
        let mut a = FolderIndexBuilder::new(SourceDirectory::new("/a").unwrap());
        a.add(PathBuf::from("/a/1.png"), vec![DecodedSymbol::qr("ABC123")])
            .add(PathBuf::from("/a/2.png"), vec![DecodedSymbol::qr("XYZ999")])
            .add(PathBuf::from("/a/broken.png"), vec![]);
        let mut b = FolderIndexBuilder::new(SourceDirectory::new("/b").unwrap());
        b.add(PathBuf::from("/b/sub/1.png"), vec![DecodedSymbol::qr("ABC123")]);

        let indices = vec![a.build(), b.build()];
        (compare(&indices), indices)
    }

    #[test]
    fn test_build_table() {
        let (result, indices) = sample();
        let table = build_table(&result, &indices);

        assert_eq!(table.header, vec!["Compare Result", "CODE", "Decoded Type", "/a", "/b"]);
        assert_eq!(table.rows.len(), 3);

        let abc = &table.rows[0];
        assert_eq!(abc.status, vec!["MATCH_ALL"]);
        assert_eq!(abc.code.as_deref(), Some("ABC123"));
        assert_eq!(abc.decoded_type.as_deref(), Some("QRCODE"));
        assert_eq!(abc.files, vec![vec!["1.png".to_string()], vec!["sub/1.png".to_string()]]);

        assert_eq!(table.rows[1].status, vec!["MISSING"]);

        let undetected = &table.rows[2];
        assert_eq!(undetected.status, vec![NO_DETECTED]);
        assert_eq!(undetected.code, None);
        assert_eq!(undetected.files, vec![vec!["broken.png".to_string()], vec![]]);
    }

    #[test]
    fn test_write_csv() {
        let (result, indices) = sample();
        let mut out = Vec::new();
        write_csv(&mut out, &build_table(&result, &indices)).unwrap();

        let content = String::from_utf8(out).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Compare Result,CODE,Decoded Type,/a,/b"));
        assert_eq!(lines.next(), Some("MATCH_ALL,ABC123,QRCODE,1.png,sub/1.png"));
        assert_eq!(lines.next(), Some("MISSING,XYZ999,QRCODE,2.png,"));
        assert_eq!(lines.next(), Some("NO_DETECTED,,,broken.png,"));
    }

    #[test]
    fn test_write_json() {
        let (result, indices) = sample();
        let mut out = Vec::new();
        write_json(&mut out, &build_table(&result, &indices)).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rows"][0]["code"], "ABC123");
        assert_eq!(value["rows"][2]["status"][0], "NO_DETECTED");
        assert!(value["rows"][2]["code"].is_null());
    }

    #[test]
    fn test_report_file_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            report_file_name(ReportFormat::Csv, at),
            "qr_comparison_report_2024-03-09_14-05-07.csv"
        );
    }

    #[test]
    fn test_write_report_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let (result, indices) = sample();

        let path = write_report(temp_dir.path(), ReportFormat::Json, &build_table(&result, &indices)).unwrap();
        assert!(path.starts_with(temp_dir.path()));
        assert_eq!(path.extension().unwrap(), "json");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("XYZ999"));
    }
}
