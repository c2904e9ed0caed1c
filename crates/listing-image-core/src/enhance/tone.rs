//! Per-pixel tone operations for enhancement.
//!
//! ## Order
//! 1. Brightness (multiplier)
//! 2. Contrast (scale around mid-gray)
//! 3. Saturation (scale away from luminance)
//! 4. Gamma (256-entry LUT)

/// ITU-R BT.709 luminance coefficients.
const LUMINANCE_R: f32 = 0.2126;
const LUMINANCE_G: f32 = 0.7152;
const LUMINANCE_B: f32 = 0.0722;

/// Multiplicative brightness, contrast and saturation, 1.0 meaning unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulation {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl Modulation {
    pub fn is_identity(&self) -> bool {
        self.brightness == 1.0 && self.contrast == 1.0 && self.saturation == 1.0
    }
}

/// Apply brightness, contrast and saturation to RGB pixels in place.
///
/// Trailing bytes that do not form a whole pixel are left untouched.
pub fn apply_modulation(pixels: &mut [u8], modulation: Modulation) {
    if modulation.is_identity() {
        return;
    }

    for chunk in pixels.chunks_exact_mut(3) {
        let mut r = chunk[0] as f32 / 255.0;
        let mut g = chunk[1] as f32 / 255.0;
        let mut b = chunk[2] as f32 / 255.0;

        (r, g, b) = (
            r * modulation.brightness,
            g * modulation.brightness,
            b * modulation.brightness,
        );
        (r, g, b) = apply_contrast(r, g, b, modulation.contrast);
        (r, g, b) = apply_saturation(r, g, b, modulation.saturation);

        chunk[0] = to_u8(r);
        chunk[1] = to_u8(g);
        chunk[2] = to_u8(b);
    }
}

/// Formula: `output = (input - 0.5) * contrast + 0.5`
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 1.0 {
        return (r, g, b);
    }
    (
        (r - 0.5) * contrast + 0.5,
        (g - 0.5) * contrast + 0.5,
        (b - 0.5) * contrast + 0.5,
    )
}

/// Scale each channel's distance from gray; 0.0 would be fully desaturated.
#[inline]
fn apply_saturation(r: f32, g: f32, b: f32, saturation: f32) -> (f32, f32, f32) {
    if saturation == 1.0 {
        return (r, g, b);
    }
    let gray = LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b;
    (
        gray + (r - gray) * saturation,
        gray + (g - gray) * saturation,
        gray + (b - gray) * saturation,
    )
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Pre-computed gamma correction table: `lut[v] = 255 * (v / 255)^(1 / gamma)`.
#[derive(Debug, Clone)]
pub struct GammaLut {
    lut: [u8; 256],
}

impl GammaLut {
    pub fn new(gamma: f32) -> Self {
        let exponent = 1.0 / gamma;
        let mut lut = [0u8; 256];
        for (i, value) in lut.iter_mut().enumerate() {
            *value = to_u8((i as f32 / 255.0).powf(exponent));
        }
        Self { lut }
    }

    pub fn apply(&self, pixels: &mut [u8]) {
        for value in pixels.iter_mut() {
            *value = self.lut[*value as usize];
        }
    }
}
