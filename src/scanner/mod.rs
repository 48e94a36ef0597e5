//! Folder traversal and per-folder indexing

pub mod folder_scanner;
pub mod image_locator;

pub use folder_scanner::scan_folder;
pub use image_locator::{locate_images, ImageIter, ScanOptions, IMAGE_EXTENSIONS};
