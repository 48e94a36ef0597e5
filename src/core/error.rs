//! Error types shared by the scanner and decoder

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a comparison run
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Report directory does not exist: {}", .0.display())]
    ReportDirNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Per-image decode failure. Never fatal: the scanner logs it and moves on.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("cannot open image: {0}")]
    Image(#[from] image::ImageError),

    #[error("malformed image data: {0}")]
    Malformed(String),
}
