//! Budget-driven JPEG compression.
//!
//! Given an encoded photo and a size budget in kilobytes, [`Compressor`]
//! produces a JPEG no larger than the budget by stepping down quality and
//! then width according to a [`CompressionPolicy`]:
//!
//! 1. Encode at the current `(quality, width)`; the source is resampled to
//!    `width` pixels wide but never upscaled.
//! 2. Return the first result that fits the budget.
//! 3. Otherwise ask the policy for the next parameters. At the floor the last
//!    result is returned even though it is over budget
//!    ([`CompressedImage::within_budget`] is `false`).
//!
//! The source is decoded once per call. Attempts at the same effective width
//! share one resampled raster; only the JPEG encode is repeated.
//!
//! # Examples
//!
//! ```ignore
//! use listing_image_core::compress::{compress, DEFAULT_BUDGET_KB};
//!
//! let upload = std::fs::read("listing.png")?;
//! let jpeg = compress(&upload, DEFAULT_BUDGET_KB)?;
//! println!("{:.2} KB at q{} ({}px)", jpeg.size_kb(), jpeg.quality, jpeg.width);
//! ```

mod cancel;
mod codec;
mod policy;

use thiserror::Error;
use tracing::{debug, info, warn};

#[cfg(not(target_arch = "wasm32"))]
pub use cancel::Deadline;
pub use cancel::{CancelSignal, NeverCancel};
pub use codec::{Codec, CodecError, ImageCodec};
pub use policy::{
    CompressionPolicy, EncodingParameters, PolicyError, DEFAULT_BUDGET_KB,
    DEFAULT_INITIAL_QUALITY, DEFAULT_INITIAL_WIDTH, DEFAULT_MIN_QUALITY, DEFAULT_MIN_WIDTH,
    DEFAULT_QUALITY_STEP, DEFAULT_WIDTH_STEP,
};

const BYTES_PER_KB: u64 = 1024;

/// Errors returned by compression.
#[derive(Debug, Error)]
pub enum CompressError {
    /// The codec could not decode, resample or encode the input.
    #[error("Image compression failed: {0}")]
    Encoding(#[from] CodecError),

    #[error("Compression budget must be positive, got {0} KB")]
    InvalidBudget(u32),

    #[error("Invalid compression policy: {0}")]
    InvalidPolicy(#[from] PolicyError),

    /// The cancel signal fired before an attempt started.
    #[error("Image compression cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },
}

/// Output of a compression call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    /// JPEG bytes.
    pub bytes: Vec<u8>,
    /// Output width after resampling.
    pub width: u32,
    /// Output height after resampling.
    pub height: u32,
    /// JPEG quality of the returned attempt.
    pub quality: u8,
    /// Number of encode attempts made, including the returned one.
    pub attempts: u32,
    /// False only when the floor was reached without meeting the budget.
    pub within_budget: bool,
}

impl CompressedImage {
    /// Size in kilobytes (1 KB = 1024 bytes).
    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / BYTES_PER_KB as f64
    }
}

/// Runs the compression loop with a codec and policy.
///
/// Holds no mutable state; one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Compressor<C = ImageCodec> {
    codec: C,
    policy: CompressionPolicy,
}

impl Compressor {
    /// Compressor using the `image` crate and the default policy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Codec> Compressor<C> {
    pub fn with_codec(codec: C) -> Self {
        Self {
            codec,
            policy: CompressionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CompressionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &CompressionPolicy {
        &self.policy
    }

    /// Compress `image` to at most `budget_kb` kilobytes.
    pub fn compress(&self, image: &[u8], budget_kb: u32) -> Result<CompressedImage, CompressError> {
        self.compress_with_cancel(image, budget_kb, &NeverCancel)
    }

    /// Like [`Compressor::compress`], polling `cancel` before every attempt.
    pub fn compress_with_cancel(
        &self,
        image: &[u8],
        budget_kb: u32,
        cancel: &dyn CancelSignal,
    ) -> Result<CompressedImage, CompressError> {
        if budget_kb == 0 {
            return Err(CompressError::InvalidBudget(budget_kb));
        }
        self.policy.validate()?;

        let budget_bytes = u64::from(budget_kb) * BYTES_PER_KB;
        let source = self.codec.decode(image)?;
        let (source_width, source_height) = self.codec.dimensions(&source);
        debug!(
            input_bytes = image.len(),
            source_width, source_height, budget_kb, "compressing image"
        );

        let mut params = self.policy.initial();
        let mut resampled: Option<(u32, C::Image)> = None;
        let mut attempts = 0u32;

        loop {
            if cancel.is_cancelled() {
                return Err(CompressError::Cancelled { attempts });
            }

            let effective_width = params.width.min(source_width);
            let frame = if effective_width >= source_width {
                &source
            } else {
                let stale = !matches!(&resampled, Some((w, _)) if *w == effective_width);
                if stale {
                    let image = self.codec.resample(&source, effective_width)?;
                    resampled = Some((effective_width, image));
                }
                match &resampled {
                    Some((_, image)) => image,
                    None => &source,
                }
            };

            let bytes = self.codec.encode_jpeg(frame, params.quality)?;
            let (width, height) = self.codec.dimensions(frame);
            attempts += 1;

            let size = bytes.len() as u64;
            let within_budget = size <= budget_bytes;
            debug!(
                attempt = attempts,
                quality = params.quality,
                width,
                size_kb = size as f64 / BYTES_PER_KB as f64,
                "compression attempt"
            );

            let next = if within_budget {
                None
            } else {
                self.policy.next(params)
            };

            match next {
                Some(next) => params = next,
                None => {
                    let result = CompressedImage {
                        bytes,
                        width,
                        height,
                        quality: params.quality,
                        attempts,
                        within_budget,
                    };
                    if within_budget {
                        info!(
                            size_kb = result.size_kb(),
                            quality = result.quality,
                            width,
                            attempts,
                            "compressed image within budget"
                        );
                    } else {
                        warn!(
                            size_kb = result.size_kb(),
                            budget_kb, attempts, "compression floor reached over budget"
                        );
                    }
                    return Ok(result);
                }
            }
        }
    }
}

/// Compress with the default codec and policy.
pub fn compress(image: &[u8], budget_kb: u32) -> Result<CompressedImage, CompressError> {
    Compressor::new().compress(image, budget_kb)
}
