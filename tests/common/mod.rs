//! Shared fixtures: QR code images generated at test time

#![allow(dead_code)]

use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};
use std::fs;
use std::path::{Path, PathBuf};

/// Pixels per QR module
const SCALE: u32 = 6;
/// Quiet zone around each code, in modules
const QUIET_ZONE: u32 = 4;

/// Render QR codes side by side into a single image; no payloads gives a
/// blank image
pub fn qr_image(payloads: &[&str]) -> GrayImage {
    let codes: Vec<QrCode> = payloads
        .iter()
        .map(|p| QrCode::new(p.as_bytes()).unwrap())
        .collect();
    let sizes: Vec<u32> = codes
        .iter()
        .map(|c| (c.width() as u32 + 2 * QUIET_ZONE) * SCALE)
        .collect();

    let width = sizes.iter().sum::<u32>().max(64);
    let height = sizes.iter().copied().max().unwrap_or(64);
    let mut img = GrayImage::from_pixel(width, height, Luma([255]));

    let mut x0 = 0;
    for (code, size) in codes.iter().zip(&sizes) {
        let modules = code.width();
        for (i, color) in code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let mx = (i % modules) as u32;
            let my = (i / modules) as u32;
            for dy in 0..SCALE {
                for dx in 0..SCALE {
                    img.put_pixel(
                        x0 + (QUIET_ZONE + mx) * SCALE + dx,
                        (QUIET_ZONE + my) * SCALE + dy,
                        Luma([0]),
                    );
                }
            }
        }
        x0 += size;
    }

    img
}

/// Write a PNG holding `payloads` to `dir/name`
pub fn write_qr(dir: &Path, name: &str, payloads: &[&str]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    qr_image(payloads).save(&path).unwrap();
    path
}

/// Write bytes that no image decoder accepts
pub fn write_corrupt(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not really a png").unwrap();
    path
}
