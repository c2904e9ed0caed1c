//! Parameter progression for budget-driven compression.
//!
//! The policy is a pure state machine over `(quality, width)`: it never
//! touches pixels, so the whole attempt sequence can be reasoned about (and
//! tested) without a codec.
//!
//! Quality drops first. Once quality reaches its floor, width shrinks by one
//! step and quality resets to its starting value. When both are at their
//! floors the sequence ends.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Budget used when uploading a listing photo to the vision model.
pub const DEFAULT_BUDGET_KB: u32 = 1000;

/// JPEG quality of the first attempt.
pub const DEFAULT_INITIAL_QUALITY: u8 = 80;

/// Target width of the first attempt, in pixels.
pub const DEFAULT_INITIAL_WIDTH: u32 = 1024;

/// Quality decrement between attempts at the same width.
pub const DEFAULT_QUALITY_STEP: u8 = 10;

/// Width decrement once quality has bottomed out.
pub const DEFAULT_WIDTH_STEP: u32 = 128;

/// Quality at or below which width starts shrinking.
pub const DEFAULT_MIN_QUALITY: u8 = 20;

/// Width at or below which compression gives up.
pub const DEFAULT_MIN_WIDTH: u32 = 512;

/// A policy whose sequence would not terminate or would start out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Quality step must be non-zero")]
    ZeroQualityStep,

    #[error("Width step must be non-zero")]
    ZeroWidthStep,

    #[error("Quality range invalid: need 1 <= min ({min}) <= initial ({initial}) <= 100")]
    QualityRange { min: u8, initial: u8 },

    #[error("Width range invalid: need 1 <= min ({min}) <= initial ({initial})")]
    WidthRange { min: u32, initial: u32 },
}

/// Settings for one encode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingParameters {
    /// JPEG quality (1-100).
    pub quality: u8,
    /// Target width in pixels. The source is never upscaled to reach it.
    pub width: u32,
}

/// Start values, step sizes and floors of the compression loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionPolicy {
    pub initial_quality: u8,
    pub initial_width: u32,
    pub quality_step: u8,
    pub width_step: u32,
    pub min_quality: u8,
    pub min_width: u32,
}

impl Default for CompressionPolicy {
    fn default() -> Self {
        Self {
            initial_quality: DEFAULT_INITIAL_QUALITY,
            initial_width: DEFAULT_INITIAL_WIDTH,
            quality_step: DEFAULT_QUALITY_STEP,
            width_step: DEFAULT_WIDTH_STEP,
            min_quality: DEFAULT_MIN_QUALITY,
            min_width: DEFAULT_MIN_WIDTH,
        }
    }
}

impl CompressionPolicy {
    /// Check that the progression starts in range and always reaches the floor.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.quality_step == 0 {
            return Err(PolicyError::ZeroQualityStep);
        }
        if self.width_step == 0 {
            return Err(PolicyError::ZeroWidthStep);
        }
        if self.min_quality == 0
            || self.min_quality > self.initial_quality
            || self.initial_quality > 100
        {
            return Err(PolicyError::QualityRange {
                min: self.min_quality,
                initial: self.initial_quality,
            });
        }
        if self.min_width == 0 || self.min_width > self.initial_width {
            return Err(PolicyError::WidthRange {
                min: self.min_width,
                initial: self.initial_width,
            });
        }
        Ok(())
    }

    /// Parameters of the first attempt.
    pub fn initial(&self) -> EncodingParameters {
        EncodingParameters {
            quality: self.initial_quality,
            width: self.initial_width,
        }
    }

    /// Parameters for the attempt after `current` missed the budget.
    ///
    /// Returns `None` at the floor, where the caller keeps its last result.
    pub fn next(&self, current: EncodingParameters) -> Option<EncodingParameters> {
        if current.quality > self.min_quality {
            Some(EncodingParameters {
                quality: current.quality.saturating_sub(self.quality_step).max(1),
                width: current.width,
            })
        } else if current.width > self.min_width {
            Some(EncodingParameters {
                quality: self.initial_quality,
                width: current.width.saturating_sub(self.width_step).max(1),
            })
        } else {
            None
        }
    }

    /// Whether `params` is a floor setting (no further adjustment possible).
    pub fn is_floor(&self, params: EncodingParameters) -> bool {
        params.quality <= self.min_quality && params.width <= self.min_width
    }

    /// Upper bound on encode attempts for one call.
    ///
    /// Each width level tries every quality level, so this is the product of
    /// the two level counts: 7 x 5 = 35 with the defaults.
    pub fn max_attempts(&self) -> u32 {
        let quality_levels = levels(
            u32::from(self.initial_quality),
            u32::from(self.min_quality),
            u32::from(self.quality_step),
        );
        let width_levels = levels(self.initial_width, self.min_width, self.width_step);
        quality_levels.saturating_mul(width_levels)
    }

    /// Iterate the full attempt sequence from `initial()` to the floor.
    pub fn schedule(&self) -> impl Iterator<Item = EncodingParameters> + '_ {
        std::iter::successors(Some(self.initial()), move |p| self.next(*p))
    }
}

fn levels(initial: u32, floor: u32, step: u32) -> u32 {
    if initial <= floor || step == 0 {
        return 1;
    }
    1 + (initial - floor).div_ceil(step)
}
