//! Coarse shape classification of listing photos.
//!
//! Used to describe an upload without looking at its content: whether it is
//! landscape, portrait or roughly square, and whether it has enough pixels
//! for a full-size product page.

use serde::{Deserialize, Serialize};

/// Width/height ratio above which a photo is landscape.
pub const LANDSCAPE_RATIO: f64 = 1.2;

/// Width/height ratio below which a photo is portrait.
pub const PORTRAIT_RATIO: f64 = 0.8;

/// Pixel count above which resolution is high.
pub const HIGH_RESOLUTION_PIXELS: u64 = 2_000_000;

/// Pixel count below which resolution is low.
pub const LOW_RESOLUTION_PIXELS: u64 = 500_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectClass {
    Landscape,
    Portrait,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionClass {
    Low,
    Standard,
    High,
}

/// Aspect and resolution classes of an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageShape {
    pub aspect: AspectClass,
    pub resolution: ResolutionClass,
    /// Width divided by height.
    pub aspect_ratio: f64,
    pub megapixels: f64,
}

impl ImageShape {
    /// Classify an image of `width x height` pixels.
    ///
    /// A zero dimension classifies as a low-resolution square.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        let aspect_ratio = if width == 0 || height == 0 {
            1.0
        } else {
            width as f64 / height as f64
        };

        let aspect = if aspect_ratio > LANDSCAPE_RATIO {
            AspectClass::Landscape
        } else if aspect_ratio < PORTRAIT_RATIO {
            AspectClass::Portrait
        } else {
            AspectClass::Square
        };

        let pixels = width as u64 * height as u64;
        let resolution = if pixels > HIGH_RESOLUTION_PIXELS {
            ResolutionClass::High
        } else if pixels < LOW_RESOLUTION_PIXELS {
            ResolutionClass::Low
        } else {
            ResolutionClass::Standard
        };

        Self {
            aspect,
            resolution,
            aspect_ratio,
            megapixels: pixels as f64 / 1_000_000.0,
        }
    }
}
