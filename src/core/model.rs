//! Source directories, decoded symbols and the per-folder payload index

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A folder supplied on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDirectory {
    path: PathBuf,
    label: String,
}

impl SourceDirectory {
    /// Create a source directory from a user-supplied path.
    ///
    /// The label keeps the path as given; the stored path is made absolute
    /// so that every indexed file can be checked against it.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let given = path.as_ref();
        Ok(Self {
            path: std::path::absolute(given)?,
            label: given.display().to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Path of `file` relative to this directory, or the full path when it
    /// lies elsewhere.
    pub fn relative<'a>(&self, file: &'a Path) -> &'a Path {
        file.strip_prefix(&self.path).unwrap_or(file)
    }
}

impl fmt::Display for SourceDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Barcode symbology of a decoded symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Symbology {
    #[serde(rename = "QRCODE")]
    QrCode,
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbology::QrCode => f.write_str("QRCODE"),
        }
    }
}

/// One code found in an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    pub payload: String,
    pub symbology: Symbology,
    /// QR version (1-40), when the decoder reports it
    pub version: Option<usize>,
    /// Error correction level index, when the decoder reports it
    pub ecc_level: Option<u16>,
}

impl DecodedSymbol {
    pub fn qr(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            symbology: Symbology::QrCode,
            version: None,
            ecc_level: None,
        }
    }
}

/// Mapping from decoded payload to the files of one folder that contain it.
///
/// Built once by [`FolderIndexBuilder`] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct FolderIndex {
    source: SourceDirectory,
    detected: BTreeMap<String, BTreeSet<PathBuf>>,
    symbologies: BTreeMap<String, Symbology>,
    undetected: Vec<PathBuf>,
    images_scanned: usize,
}

impl FolderIndex {
    pub fn source(&self) -> &SourceDirectory {
        &self.source
    }

    pub fn detected(&self) -> &BTreeMap<String, BTreeSet<PathBuf>> {
        &self.detected
    }

    /// Images that yielded no payload (unreadable, or no QR code in them)
    pub fn undetected(&self) -> &[PathBuf] {
        &self.undetected
    }

    pub fn images_scanned(&self) -> usize {
        self.images_scanned
    }

    pub fn payloads(&self) -> impl Iterator<Item = &str> {
        self.detected.keys().map(String::as_str)
    }

    pub fn contains(&self, payload: &str) -> bool {
        self.detected.contains_key(payload)
    }

    /// Number of files in this folder holding `payload`
    pub fn occurrences(&self, payload: &str) -> usize {
        self.detected.get(payload).map_or(0, BTreeSet::len)
    }

    pub fn paths_for(&self, payload: &str) -> Option<&BTreeSet<PathBuf>> {
        self.detected.get(payload)
    }

    pub fn symbology(&self, payload: &str) -> Option<Symbology> {
        self.symbologies.get(payload).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.detected.is_empty()
    }
}

/// Accumulates scan results for one folder
#[derive(Debug)]
pub struct FolderIndexBuilder {
    index: FolderIndex,
}

impl FolderIndexBuilder {
    pub fn new(source: SourceDirectory) -> Self {
        Self {
            index: FolderIndex {
                source,
                detected: BTreeMap::new(),
                symbologies: BTreeMap::new(),
                undetected: Vec::new(),
                images_scanned: 0,
            },
        }
    }

    /// Record the symbols decoded from one image.
    ///
    /// An empty symbol list records the image as undetected.
    pub fn add(&mut self, path: PathBuf, symbols: Vec<DecodedSymbol>) -> &mut Self {
        debug_assert!(
            path.starts_with(self.index.source.path()),
            "{} is outside {}",
            path.display(),
            self.index.source.path().display()
        );

        self.index.images_scanned += 1;
        if symbols.is_empty() {
            self.index.undetected.push(path);
            return self;
        }

        for symbol in symbols {
            self.index
                .symbologies
                .entry(symbol.payload.clone())
                .or_insert(symbol.symbology);
            self.index
                .detected
                .entry(symbol.payload)
                .or_default()
                .insert(path.clone());
        }
        self
    }

    pub fn build(self) -> FolderIndex {
        self.index
    }
}
