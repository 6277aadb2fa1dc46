//! Raster preprocessing for thermal printing.
//!
//! Thermal heads lay down a single ink level, so continuous-tone images are
//! reduced to a halftone before framing: a luminance pass collapses color to
//! grey, then Atkinson error diffusion quantizes each sample to 0 or 255
//! while pushing the quantization error onto six downstream neighbors:
//!
//! ```text
//!         *   1/8 1/8
//! 1/8 1/8 1/8
//!     1/8
//! ```
//!
//! Both passes mutate the buffer in place and return it for chaining:
//!
//! ```
//! use labelink::dither::PixelBuffer;
//!
//! let mut image = PixelBuffer::new(vec![200; 16], 2);
//! image.to_greyscale_by_luminance().dither_atkinson(false);
//! assert!(image.samples().chunks(4).all(|px| px[0] == 0 || px[0] == 255));
//! ```

/// Samples per pixel (interleaved R, G, B, A).
const CHANNELS: usize = 4;

/// Quantization cut-off: samples at or below print black.
const QUANT_THRESHOLD: u8 = 128;

/// A mutable interleaved RGBA raster with a known pixel width.
///
/// The buffer is exclusively the caller's; neither pass retains state, so
/// independent buffers can be processed from any number of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
}

impl PixelBuffer {
    /// Wraps raw RGBA samples with the image width in pixels.
    #[must_use]
    pub const fn new(data: Vec<u8>, width: usize) -> Self {
        Self { data, width }
    }

    /// Image width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// The raw samples.
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// The raw samples, mutably.
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning the samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<u8> {
        self.data
    }

    /// Collapses every pixel to its luminance, `round(0.21*R + 0.71*G + 0.07*B)`.
    ///
    /// R, G and B are overwritten with the luminance; alpha is untouched.
    pub fn to_greyscale_by_luminance(&mut self) -> &mut Self {
        for px in self.data.chunks_exact_mut(CHANNELS) {
            let lum = (0.21 * f32::from(px[0]) + 0.71 * f32::from(px[1]) + 0.07 * f32::from(px[2]))
                .round() as u8;
            px[0] = lum;
            px[1] = lum;
            px[2] = lum;
        }
        self
    }

    /// Quantizes the raster to a two-level halftone with Atkinson diffusion.
    ///
    /// With `preserve_color` set, every sample (alpha included) is thresholded
    /// and diffused independently, so tinted stock can keep limited color.
    /// Otherwise one step per pixel quantizes the primary sample and copies it
    /// across R, G and B for a true black/white halftone.
    ///
    /// Each visited sample is cut at [`QUANT_THRESHOLD`]; an eighth of the
    /// quantization error lands on each of six neighbors (right, two right,
    /// and the lower-left/lower/lower-right/two-down positions). Neighbors
    /// past the end of the buffer are skipped; accumulation saturates into
    /// `0..=255`.
    pub fn dither_atkinson(&mut self, preserve_color: bool) -> &mut Self {
        if self.width == 0 || self.data.is_empty() {
            return self;
        }

        let step = if preserve_color { 1 } else { CHANNELS };
        let row = CHANNELS * self.width;
        let offsets = [
            CHANNELS,       // one pixel right
            2 * CHANNELS,   // two pixels right
            row - CHANNELS, // next row, one pixel left
            row,            // next row
            row + CHANNELS, // next row, one pixel right
            2 * row,        // two rows down
        ];

        let len = self.data.len();
        let mut i = 0;
        while i < len {
            let original = self.data[i];
            let output: u8 = if original <= QUANT_THRESHOLD { 0 } else { 255 };
            // round((original - output) / 8), halves rounding toward +inf
            let err = (i16::from(original) - i16::from(output) + 4) >> 3;
            self.data[i] = output;

            for off in offsets {
                if let Some(sample) = self.data.get_mut(i + off) {
                    *sample = (i16::from(*sample) + err).clamp(0, 255) as u8;
                }
            }

            if !preserve_color && i + 2 < len {
                self.data[i + 1] = output;
                self.data[i + 2] = output;
            }

            i += step;
        }
        self
    }
}
