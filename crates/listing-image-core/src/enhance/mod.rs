//! Seller-facing photo enhancement.
//!
//! A single pass over a listing photo: modulate brightness, contrast and
//! saturation, apply gamma, sharpen, optionally upscale, then encode as JPEG
//! or PNG. Each stage is skipped when its option is at the neutral value.
//!
//! Tone stages touch color only. When the upload has transparency and PNG
//! output is requested, the alpha channel is carried through unchanged
//! (resampled alongside the color on upscale).
//!
//! Defaults give a mild lift suitable for phone photos of handmade goods
//! (slightly brighter, punchier, sharper).

mod tone;

use std::str::FromStr;

use image::GrayImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::{self, DecodeError, DecodedImage, FilterType};
use crate::encode::{self, EncodeError, MAX_JPEG_QUALITY};

pub use tone::{apply_modulation, GammaLut, Modulation};

/// Largest accepted upscale factor.
pub const MAX_UPSCALE: f32 = 4.0;

/// Accepted gamma range, inclusive.
pub const GAMMA_RANGE: (f32, f32) = (1.0, 3.0);

/// Errors that can occur during enhancement.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("Cannot process image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Cannot encode enhanced image: {0}")]
    Encode(#[from] EncodeError),

    #[error("Invalid enhancement option {name}: {value}")]
    InvalidOption { name: &'static str, value: f32 },

    #[error("Invalid output format {0:?}: use png or jpeg")]
    InvalidFormat(String),
}

/// Encoded format of an enhancement result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = EnhanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            _ => Err(EnhanceError::InvalidFormat(s.to_string())),
        }
    }
}

/// Enhancement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceOptions {
    /// Brightness multiplier (1.0 = unchanged)
    pub brightness: f32,
    /// Contrast multiplier around mid-gray (1.0 = unchanged)
    pub contrast: f32,
    /// Saturation multiplier (1.0 = unchanged, 0.0 = grayscale)
    pub saturation: f32,
    /// Unsharp-mask sigma (0.0 = no sharpening)
    pub sharpness: f32,
    /// Gamma (1.0 to 3.0, 1.0 = unchanged)
    pub gamma: f32,
    /// JPEG quality (ignored for PNG)
    pub quality: u8,
    /// Scale factor (1.0 to 4.0)
    pub upscale: f32,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            brightness: 1.2,
            contrast: 1.1,
            saturation: 1.1,
            sharpness: 1.0,
            gamma: 1.0,
            quality: 90,
            upscale: 1.0,
        }
    }
}

impl EnhanceOptions {
    /// Options that leave pixels unchanged (re-encode only).
    pub fn neutral() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpness: 0.0,
            gamma: 1.0,
            quality: 90,
            upscale: 1.0,
        }
    }

    pub fn validate(&self) -> Result<(), EnhanceError> {
        let positive = [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EnhanceError::InvalidOption { name, value });
            }
        }
        if !(GAMMA_RANGE.0..=GAMMA_RANGE.1).contains(&self.gamma) {
            return Err(EnhanceError::InvalidOption {
                name: "gamma",
                value: self.gamma,
            });
        }
        if !self.sharpness.is_finite() || self.sharpness < 0.0 {
            return Err(EnhanceError::InvalidOption {
                name: "sharpness",
                value: self.sharpness,
            });
        }
        if !(1.0..=MAX_UPSCALE).contains(&self.upscale) {
            return Err(EnhanceError::InvalidOption {
                name: "upscale",
                value: self.upscale,
            });
        }
        Ok(())
    }

    fn modulation(&self) -> Modulation {
        Modulation {
            brightness: self.brightness,
            contrast: self.contrast,
            saturation: self.saturation,
        }
    }
}

/// Enhance an encoded image and re-encode it in `format`.
pub fn enhance(
    bytes: &[u8],
    options: &EnhanceOptions,
    format: OutputFormat,
) -> Result<Vec<u8>, EnhanceError> {
    options.validate()?;

    let (image, alpha) = decode::decode_image_with_alpha(bytes)?;
    debug!(
        input_bytes = bytes.len(),
        width = image.width,
        height = image.height,
        has_alpha = alpha.is_some(),
        ?format,
        "enhancing image"
    );

    let image = apply_stages(image, options)?;

    let output = match (format, alpha) {
        (OutputFormat::Jpeg, _) => encode::encode_jpeg(
            &image.pixels,
            image.width,
            image.height,
            options.quality.min(MAX_JPEG_QUALITY),
        )?,
        (OutputFormat::Png, None) => {
            encode::encode_png(&image.pixels, image.width, image.height)?
        }
        (OutputFormat::Png, Some(alpha)) => {
            let rgba = interleave_alpha(&image, &alpha);
            encode::encode_png_rgba(&rgba, image.width, image.height)?
        }
    };

    debug!(output_bytes = output.len(), "enhanced image encoded");
    Ok(output)
}

/// Apply the pixel stages of [`enhance`] to an already decoded image.
pub fn enhance_pixels(
    mut image: DecodedImage,
    options: &EnhanceOptions,
) -> Result<DecodedImage, EnhanceError> {
    options.validate()?;
    apply_stages(image, options)
}

fn apply_stages(
    mut image: DecodedImage,
    options: &EnhanceOptions,
) -> Result<DecodedImage, EnhanceError> {
    apply_modulation(&mut image.pixels, options.modulation());

    if options.gamma != 1.0 {
        GammaLut::new(options.gamma).apply(&mut image.pixels);
    }

    if options.sharpness > 0.0 {
        image = sharpen(&image, options.sharpness)?;
    }

    if options.upscale > 1.0 {
        let width = (image.width as f32 * options.upscale).round() as u32;
        let height = (image.height as f32 * options.upscale).round() as u32;
        debug!(width, height, "upscaling");
        image = decode::resize(&image, width, height, FilterType::Lanczos3)?;
    }

    Ok(image)
}

/// Merge RGB pixels with an alpha plane into RGBA, resampling the plane if
/// the color was upscaled.
fn interleave_alpha(image: &DecodedImage, alpha: &GrayImage) -> Vec<u8> {
    let resized;
    let alpha = if alpha.dimensions() == (image.width, image.height) {
        alpha
    } else {
        resized = image::imageops::resize(
            alpha,
            image.width,
            image.height,
            FilterType::Lanczos3.to_image_filter(),
        );
        &resized
    };

    image
        .pixels
        .chunks_exact(3)
        .zip(alpha.as_raw())
        .flat_map(|(rgb, &a)| [rgb[0], rgb[1], rgb[2], a])
        .collect()
}

fn sharpen(image: &DecodedImage, sigma: f32) -> Result<DecodedImage, EnhanceError> {
    let view = image.as_rgb_image().ok_or_else(|| {
        DecodeError::CorruptedFile("Pixel buffer does not match dimensions".to_string())
    })?;
    Ok(DecodedImage::from_rgb_image(image::imageops::unsharpen(
        &view, sigma, 0,
    )))
}
