//! Raster obstacle mask.
//!
//! One opacity byte per pixel; any non-zero opacity is an obstacle. The mask is
//! only ever sampled, never written, once the game is running.

use std::path::Path;

use image::RgbaImage;

use crate::common::error::MaskError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl ObstacleMask {
    /// A fully walkable mask.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; width as usize * height as usize],
        }
    }

    pub fn from_alpha(width: u32, height: u32, alpha: Vec<u8>) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize;
        if alpha.len() != expected {
            return Err(MaskError::SizeMismatch {
                width,
                height,
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self { width, height, alpha })
    }

    pub fn from_image(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let alpha = img.pixels().map(|p| p[3]).collect();
        Self { width, height, alpha }
    }

    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, MaskError> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&img.to_rgba8()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MaskError> {
        let img = image::open(path)?;
        Ok(Self::from_image(&img.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Mark a rectangle as solid. Parts outside the mask are clipped.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32) {
        let x0 = x.clamp(0, i64::from(self.width));
        let y0 = y.clamp(0, i64::from(self.height));
        let x1 = (x + i64::from(width)).clamp(0, i64::from(self.width));
        let y1 = (y + i64::from(height)).clamp(0, i64::from(self.height));

        for row in y0..y1 {
            let start = (row * i64::from(self.width) + x0) as usize;
            let end = (row * i64::from(self.width) + x1) as usize;
            self.alpha[start..end].fill(u8::MAX);
        }
    }

    /// Pixels outside the mask are never obstacles.
    pub fn is_obstacle(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return false;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.alpha[idx] > 0
    }
}
