//! Decoding, data model and comparison

pub mod comparator;
pub mod decoder;
pub mod error;
pub mod model;

pub use comparator::{compare, ComparisonResult, PayloadCounts, PayloadStatus};
pub use decoder::{QrDecoder, RqrrDecoder};
pub use error::{DecodeError, ScanError};
pub use model::{DecodedSymbol, FolderIndex, FolderIndexBuilder, SourceDirectory, Symbology};
