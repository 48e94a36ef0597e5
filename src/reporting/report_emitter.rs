//! Render a comparison as log output

use tracing::{debug, info, warn, Level};

use crate::core::comparator::ComparisonResult;
use crate::core::model::FolderIndex;

/// One rendered report line and the level it is logged at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub level: Level,
    pub text: String,
}

impl ReportLine {
    fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Render the comparison summary.
///
/// INFO lines form the summary, DEBUG lines list every payload with its
/// status and files, WARN lines flag differences between folders.
pub fn render_report(result: &ComparisonResult, indices: &[FolderIndex]) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine::new(Level::INFO, "=================================================="),
        ReportLine::new(Level::INFO, "QR COMPARISON COMPLETE"),
        ReportLine::new(Level::INFO, "=================================================="),
    ];

    for index in indices {
        lines.push(ReportLine::new(
            Level::INFO,
            format!(
                "{}: {} image(s), {} payload(s), {} without QR code",
                index.source(),
                index.images_scanned(),
                index.detected().len(),
                index.undetected().len()
            ),
        ));
    }

    lines.push(ReportLine::new(
        Level::INFO,
        format!("Payloads common to all folders: {}", result.common.len()),
    ));

    for (index, unique) in indices.iter().zip(&result.unique) {
        if unique.is_empty() {
            continue;
        }
        lines.push(ReportLine::new(
            Level::WARN,
            format!(
                "{} payload(s) in {} are missing from other folders",
                unique.len(),
                index.source()
            ),
        ));
        for payload in unique {
            lines.push(ReportLine::new(Level::WARN, format!("  {}", payload)));
        }
    }

    for (payload, counts) in result.count_mismatches() {
        let per_folder: Vec<String> = indices
            .iter()
            .zip(&counts.counts)
            .map(|(index, count)| format!("{}={}", index.source(), count))
            .collect();
        lines.push(ReportLine::new(
            Level::WARN,
            format!("Count mismatch for {:?}: {}", payload, per_folder.join(", ")),
        ));
    }

    for (payload, status) in &result.statuses {
        lines.push(ReportLine::new(
            Level::DEBUG,
            format!("[{}] {:?}", status.labels().join("|"), payload),
        ));
        for index in indices {
            if let Some(paths) = index.paths_for(payload) {
                for path in paths {
                    lines.push(ReportLine::new(
                        Level::DEBUG,
                        format!("    {}: {}", index.source(), index.source().relative(path).display()),
                    ));
                }
            }
        }
    }

    let verdict = if result.is_consistent() {
        "All folders contain the same QR payloads"
    } else {
        "Folders differ"
    };
    lines.push(ReportLine::new(Level::INFO, verdict));
    lines
}

/// Log the comparison summary through `tracing`
pub fn emit_report(result: &ComparisonResult, indices: &[FolderIndex]) {
    for line in render_report(result, indices) {
        if line.level == Level::WARN {
            warn!("{}", line.text);
        } else if line.level == Level::DEBUG {
            debug!("{}", line.text);
        } else {
            info!("{}", line.text);
        }
    }
}
