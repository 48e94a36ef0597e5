//! Cross-folder comparison of decoded payloads

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::model::FolderIndex;

/// Classification of one payload across all compared folders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PayloadStatus {
    /// Absent from at least one folder
    pub missing: bool,
    /// Held by more than one file in at least one folder
    pub duplicated: bool,
}

impl PayloadStatus {
    fn from_counts(counts: &[usize]) -> Self {
        Self {
            missing: counts.iter().any(|&c| c == 0),
            duplicated: counts.iter().any(|&c| c > 1),
        }
    }

    /// Exactly one file in every folder
    pub fn is_match_all(&self) -> bool {
        !self.missing && !self.duplicated
    }

    pub fn labels(&self) -> Vec<&'static str> {
        if self.is_match_all() {
            return vec!["MATCH_ALL"];
        }
        let mut labels = Vec::with_capacity(2);
        if self.missing {
            labels.push("MISSING");
        }
        if self.duplicated {
            labels.push("DUPLICATED");
        }
        labels
    }
}

/// Per-folder occurrence counts of a payload common to all folders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadCounts {
    pub counts: Vec<usize>,
    pub mismatch: bool,
}

/// Outcome of comparing N folder indices. Folder order follows the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// Payloads present in every folder
    pub common: BTreeSet<String>,
    /// Per folder: payloads present there but absent from at least one other
    pub unique: Vec<BTreeSet<String>>,
    /// Per-folder counts for every common payload
    pub counts: BTreeMap<String, PayloadCounts>,
    /// Status of every payload seen in any folder
    pub statuses: BTreeMap<String, PayloadStatus>,
}

impl ComparisonResult {
    pub fn folder_count(&self) -> usize {
        self.unique.len()
    }

    /// Common payloads whose counts differ between folders
    pub fn count_mismatches(&self) -> impl Iterator<Item = (&String, &PayloadCounts)> {
        self.counts.iter().filter(|(_, c)| c.mismatch)
    }

    /// True when every folder holds the same payloads the same number of times
    pub fn is_consistent(&self) -> bool {
        self.unique.iter().all(BTreeSet::is_empty) && self.count_mismatches().next().is_none()
    }
}

/// Compare the payload sets of several folders.
///
/// With a single folder, `common` is everything it holds and nothing is
/// unique. A folder that decoded nothing empties `common`.
pub fn compare(indices: &[FolderIndex]) -> ComparisonResult {
    if indices.is_empty() {
        return ComparisonResult::default();
    }

    let all_payloads: BTreeSet<&str> = indices.iter().flat_map(FolderIndex::payloads).collect();

    let mut result = ComparisonResult {
        unique: vec![BTreeSet::new(); indices.len()],
        ..ComparisonResult::default()
    };

    for payload in all_payloads {
        let counts: Vec<usize> = indices.iter().map(|idx| idx.occurrences(payload)).collect();
        result
            .statuses
            .insert(payload.to_string(), PayloadStatus::from_counts(&counts));

        if counts.iter().all(|&c| c > 0) {
            let mismatch = counts.windows(2).any(|w| w[0] != w[1]);
            result.common.insert(payload.to_string());
            result
                .counts
                .insert(payload.to_string(), PayloadCounts { counts, mismatch });
        } else {
            for (unique, &count) in result.unique.iter_mut().zip(&counts) {
                if count > 0 {
                    unique.insert(payload.to_string());
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{DecodedSymbol, FolderIndexBuilder, SourceDirectory};
    use std::path::PathBuf;

    /// Build an index from (file name, payloads) pairs
    fn index(dir: &str, files: &[(&str, &[&str])]) -> FolderIndex {
        let source = SourceDirectory::new(dir).unwrap();
        let mut builder = FolderIndexBuilder::new(source);
        for (name, payloads) in files {
            let symbols = payloads.iter().map(|p| DecodedSymbol::qr(*p)).collect();
            builder.add(PathBuf::from(dir).join(name), symbols);
        }
        builder.build()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_common_and_unique() {
        let a = index("/a", &[("1.png", &["ABC123"]), ("2.png", &["XYZ999"])]);
        let b = index("/b", &[("1.png", &["ABC123"])]);

        let result = compare(&[a, b]);
        assert_eq!(result.common, set(&["ABC123"]));
        assert_eq!(result.unique[0], set(&["XYZ999"]));
        assert_eq!(result.unique[1], set(&[]));
        assert!(!result.is_consistent());
    }

    #[test]
    fn test_single_folder_compares_against_itself() {
        let a = index("/a", &[("1.png", &["P1", "P2"]), ("2.png", &["P1"])]);

        let result = compare(&[a]);
        assert_eq!(result.common, set(&["P1", "P2"]));
        assert!(result.unique[0].is_empty());
        assert_eq!(result.count_mismatches().count(), 0);
        assert!(result.is_consistent());
        // Two files in one folder is still a duplicate
        assert!(result.statuses["P1"].duplicated);
    }

    #[test]
    fn test_empty_folder_empties_common() {
        let a = index("/a", &[("1.png", &["ABC123"])]);
        let b = index("/b", &[("broken.png", &[])]);

        let result = compare(&[a, b]);
        assert!(result.common.is_empty());
        assert_eq!(result.unique[0], set(&["ABC123"]));
        assert!(result.unique[1].is_empty());
    }

    #[test]
    fn test_count_mismatch_is_flagged() {
        let a = index("/a", &[("1.png", &["ABC"]), ("2.png", &["ABC"])]);
        let b = index("/b", &[("1.png", &["ABC"])]);

        let result = compare(&[a, b]);
        let counts = &result.counts["ABC"];
        assert_eq!(counts.counts, vec![2, 1]);
        assert!(counts.mismatch);
        assert!(!result.is_consistent());
    }

    #[test]
    fn test_statuses() {
        let a = index("/a", &[("1.png", &["ONCE", "DUP"]), ("2.png", &["DUP", "HALF"])]);
        let b = index("/b", &[("1.png", &["ONCE", "DUP"])]);

        let result = compare(&[a, b]);
        assert_eq!(result.statuses["ONCE"].labels(), vec!["MATCH_ALL"]);
        assert_eq!(result.statuses["DUP"].labels(), vec!["DUPLICATED"]);
        assert_eq!(result.statuses["HALF"].labels(), vec!["MISSING"]);
    }

    #[test]
    fn test_common_is_subset_of_every_folder() {
        let folders = vec![
            index("/a", &[("1.png", &["A", "B", "C"])]),
            index("/b", &[("1.png", &["B", "C"]), ("2.png", &["D"])]),
            index("/c", &[("1.png", &["C", "B", "E"])]),
        ];

        let result = compare(&folders);
        assert_eq!(result.common, set(&["B", "C"]));
        for folder in &folders {
            assert!(result.common.iter().all(|p| folder.contains(p)));
        }
        assert_eq!(result.unique[0], set(&["A"]));
        assert_eq!(result.unique[1], set(&["D"]));
        assert_eq!(result.unique[2], set(&["E"]));
    }

    #[test]
    fn test_compare_is_idempotent() {
        let folders = vec![
            index("/a", &[("1.png", &["A", "B"])]),
            index("/b", &[("1.png", &["B"])]),
        ];
        assert_eq!(compare(&folders), compare(&folders));
    }

    #[test]
    fn test_no_folders() {
        let result = compare(&[]);
        assert_eq!(result.folder_count(), 0);
        assert!(result.common.is_empty());
    }
}
