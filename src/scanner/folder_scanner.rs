//! Build the payload index of one source directory

use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::image_locator::{locate_images, ScanOptions};
use crate::core::decoder::QrDecoder;
use crate::core::error::ScanError;
use crate::core::model::{DecodedSymbol, FolderIndex, FolderIndexBuilder, SourceDirectory};

/// Read and decode one image. Failures are logged and yield no symbols.
fn decode_file(path: &Path, decoder: &dyn QrDecoder) -> Vec<DecodedSymbol> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Skipping unreadable file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match decoder.decode(&bytes) {
        Ok(symbols) if symbols.is_empty() => {
            warn!("Detected no QR code in file {}", path.display());
            symbols
        }
        Ok(symbols) => {
            for symbol in &symbols {
                debug!(
                    file = %path.display(),
                    version = ?symbol.version,
                    ecc = ?symbol.ecc_level,
                    "Decoded {} {:?}",
                    symbol.symbology,
                    symbol.payload
                );
            }
            symbols
        }
        Err(e) => {
            warn!("Error decoding QR code in {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Scan one source directory
///
/// # Arguments
/// * `source` - Directory to scan
/// * `decoder` - QR decoder applied to every located image
/// * `options` - Traversal options
/// * `progress` - Progress bar advanced once per image (may be hidden)
///
/// # Returns
/// The folder's payload index. Only a missing directory is an error;
/// per-file problems are logged and recorded as undetected images.
pub fn scan_folder(
    source: &SourceDirectory,
    decoder: &dyn QrDecoder,
    options: &ScanOptions,
    progress: &ProgressBar,
) -> Result<FolderIndex, ScanError> {
    let images: Vec<PathBuf> = locate_images(source.path(), options)?.collect();
    info!("Found {} image file(s) in {}", images.len(), source);

    progress.set_length(images.len() as u64);
    progress.set_position(0);

    // Collect keeps locator order, so the index does not depend on scheduling
    let decoded: Vec<Vec<DecodedSymbol>> = images
        .par_iter()
        .progress_with(progress.clone())
        .map(|path| decode_file(path, decoder))
        .collect();

    let mut builder = FolderIndexBuilder::new(source.clone());
    for (path, symbols) in images.into_iter().zip(decoded) {
        builder.add(path, symbols);
    }

    let index = builder.build();
    debug!(
        "{}: {} payload(s), {} undetected image(s)",
        source,
        index.detected().len(),
        index.undetected().len()
    );
    Ok(index)
}
