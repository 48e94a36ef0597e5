//! QR decoding behind a small trait so the scanner never depends on a
//! particular decoding library

use std::collections::HashSet;
use tracing::debug;

use super::error::DecodeError;
use super::model::{DecodedSymbol, Symbology};

/// Decodes every QR code found in an encoded image (PNG, JPEG, ...)
pub trait QrDecoder: Send + Sync {
    /// Return the symbols found in `image`. An image without any code is
    /// `Ok(vec![])`, not an error.
    fn decode(&self, image: &[u8]) -> Result<Vec<DecodedSymbol>, DecodeError>;
}

/// Decoder backed by `rqrr`
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl QrDecoder for RqrrDecoder {
    fn decode(&self, image: &[u8]) -> Result<Vec<DecodedSymbol>, DecodeError> {
        let luma = image::load_from_memory(image)?.to_luma8();
        let (width, height) = luma.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::Malformed(format!(
                "empty image ({}x{})",
                width, height
            )));
        }

        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
                luma.get_pixel(x as u32, y as u32).0[0]
            });

        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((meta, content)) => {
                    if seen.insert(content.clone()) {
                        symbols.push(DecodedSymbol {
                            payload: content,
                            symbology: Symbology::QrCode,
                            version: Some(meta.version.0),
                            ecc_level: Some(meta.ecc_level),
                        });
                    }
                }
                Err(e) => debug!("Skipping undecodable QR grid: {}", e),
            }
        }

        Ok(symbols)
    }
}
