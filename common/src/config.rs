//! Read-only face configuration and layout constants.
//!
//! A [`FaceConfig`] is assembled once by the host at engine construction and
//! never mutated afterwards. It carries everything a device host loads from
//! its resource bundle: the tap palette, the pen colors for both display
//! modes, the two logo bitmaps and the fallback timezone.
//!
//! The ratio constants below size every on-screen element relative to half
//! the viewport width, so the face scales to any square-ish display without
//! per-device tuning.

use chrono_tz::Tz;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;

use crate::colors::LOGO_COLOR_KEY;

// =============================================================================
// Layout Ratios (relative to half the viewport width)
// =============================================================================

/// Second hand length as a fraction of halfWidth.
pub const SECOND_HAND_RATIO: f32 = 0.95;

/// Minute hand length as a fraction of halfWidth.
pub const MINUTE_HAND_RATIO: f32 = 0.90;

/// Hour hand length as a fraction of halfWidth.
pub const HOUR_HAND_RATIO: f32 = 0.60;

/// Stroke width of the minute/hour outline pass.
pub const HAND_OUTLINE_STROKE_RATIO: f32 = 0.07;

/// Stroke width of the minute/hour fill pass (drawn over the outline).
pub const HAND_FILL_STROKE_RATIO: f32 = 0.04;

/// Stroke width of the second-hand outline pass.
pub const SECOND_OUTLINE_STROKE_RATIO: f32 = 0.02;

/// Stroke width of the second-hand fill pass.
pub const SECOND_FILL_STROKE_RATIO: f32 = 0.01;

/// Radius of the outline-colored hub circle (drawn beneath).
pub const HUB_OUTLINE_RADIUS_RATIO: f32 = 0.065;

/// Radius of the fill-colored hub circle (drawn on top).
pub const HUB_FILL_RADIUS_RATIO: f32 = 0.06;

/// Logo rectangle inset on each side, as a fraction of the viewport width.
pub const LOGO_INSET_RATIO: f32 = 0.05;

/// Rotation applied to the full-color logo, in degrees from its native
/// orientation. The rotation is baked into the asset by the host's resource
/// pipeline; the renderer draws the bitmap as-is.
pub const LOGO_ROTATION_DEG: i32 = 30;

// =============================================================================
// Logo Asset
// =============================================================================

/// A borrowed logo bitmap: raw big-endian RGB565 pixel data, row-major.
///
/// Pixels equal to [`LOGO_COLOR_KEY`] are transparent and skipped when
/// blitting, so a round logo does not stamp square corners over the
/// background. Producing the bytes (including the 30 degree pre-rotation of
/// the full-color variant) is the host's resource pipeline, not the engine's.
#[derive(Clone, Copy, Debug)]
pub struct LogoAsset<'a> {
    data: &'a [u8],
    width: u32,
}

impl<'a> LogoAsset<'a> {
    /// Wrap raw RGB565 big-endian pixel data with the given row width.
    pub const fn new(
        data: &'a [u8],
        width: u32,
    ) -> Self {
        Self { data, width }
    }

    /// A zero-size asset; drawing it is a no-op.
    pub const fn empty() -> LogoAsset<'static> {
        LogoAsset { data: &[], width: 0 }
    }

    /// Whether there is anything to draw.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty() || self.width == 0
    }

    /// Bitmap dimensions in pixels (height derived from the data length).
    pub const fn size(&self) -> Size {
        if self.width == 0 {
            return Size::zero();
        }
        Size::new(self.width, self.data.len() as u32 / 2 / self.width)
    }

    /// Blit the bitmap with its top-left corner at `origin`, skipping
    /// color-key pixels.
    pub fn draw_at<D>(
        &self,
        display: &mut D,
        origin: Point,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.is_empty() {
            return Ok(());
        }

        let width = self.width as usize;
        let pixels = self
            .data
            .chunks_exact(2)
            .map(|pair| Rgb565::from(RawU16::new(u16::from_be_bytes([pair[0], pair[1]]))))
            .enumerate()
            .filter(|(_, color)| *color != LOGO_COLOR_KEY)
            .map(move |(i, color)| {
                let x = (i % width) as i32;
                let y = (i / width) as i32;
                Pixel(origin + Point::new(x, y), color)
            });

        display.draw_iter(pixels)
    }
}

// =============================================================================
// Face Configuration
// =============================================================================

/// One-time, read-only configuration for a face session.
#[derive(Clone, Copy, Debug)]
pub struct FaceConfig<'a> {
    /// Ordered background palette cycled by completed taps. Index 0 is the
    /// startup background.
    pub palette: &'a [Rgb565],

    /// Minute/hour hand fill color while interactive.
    pub hand_fill: Rgb565,
    /// Minute/hour hand outline color while interactive.
    pub hand_outline: Rgb565,
    /// Minute/hour hand fill color while ambient.
    pub hand_fill_ambient: Rgb565,
    /// Minute/hour hand outline color while ambient.
    pub hand_outline_ambient: Rgb565,

    /// Second hand fill color (interactive only; the second hand is never
    /// drawn while ambient).
    pub second_fill: Rgb565,
    /// Second hand outline color.
    pub second_outline: Rgb565,

    /// Full-color logo, pre-rotated [`LOGO_ROTATION_DEG`] degrees.
    pub logo_color: LogoAsset<'a>,
    /// Monochrome logo for ambient mode (skipped on low-bit displays).
    pub logo_mono: LogoAsset<'a>,

    /// Zone used when a timezone notification carries an empty or
    /// unrecognized id, and on becoming visible. The host resolves the
    /// platform zone; the engine never guesses.
    pub default_zone: Tz,
}

// =============================================================================
// Unit Tests
// =============================================================================
