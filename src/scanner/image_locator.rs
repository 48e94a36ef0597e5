//! Image file discovery

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::core::error::ScanError;

/// Extensions the decoder can open
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

/// How a folder is traversed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Descend into subdirectories
    pub recursive: bool,
    /// Lowercase extensions, without the leading dot
    pub extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            extensions: IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl ScanOptions {
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }
}

/// Lazy iterator over the image files of one directory tree.
///
/// Entries are yielded sorted by file name within each directory, so the
/// order is the same on every run.
pub struct ImageIter {
    walker: walkdir::IntoIter,
    options: ScanOptions,
}

impl Iterator for ImageIter {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.options.accepts(entry.path()) {
                        return Some(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    warn!("Skipping unreadable entry {}: {}", path, e);
                }
            }
        }
    }
}

/// Locate image files under `dir`
///
/// # Arguments
/// * `dir` - Directory to scan
/// * `options` - Recursion and extension filter
///
/// # Returns
/// A lazy iterator of image paths, or `DirectoryNotFound` if `dir` is not a directory
pub fn locate_images(dir: &Path, options: &ScanOptions) -> Result<ImageIter, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut walker = WalkDir::new(dir).follow_links(false).sort_by_file_name();
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    Ok(ImageIter {
        walker: walker.into_iter(),
        options: options.clone(),
    })
}
