//! Time-to-angle geometry and viewport-derived metrics.
//!
//! Angle convention: radians, 0 at 12 o'clock, increasing clockwise, one
//! full revolution is 2π. A hand of length `L` at angle `a` ends at
//! `center + (L·sin a, −L·cos a)` in screen coordinates (y grows downward).
//!
//! # Bounds caching
//!
//! Hand lengths, stroke widths, hub radii and the logo rectangle depend only
//! on the viewport, so [`MetricsCache`] recomputes them only when the bounds
//! actually change. That is the single memoization in the engine: per-frame
//! work is then just three angle formulas and six trig calls.
//!
//! Trig goes through `micromath` so the same code runs under `no_std`; its
//! approximation error (~1e-3) is far below a pixel at watch resolutions.

use core::f32::consts::PI;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::clock::TimeSnapshot;
use crate::config::{
    HAND_FILL_STROKE_RATIO,
    HAND_OUTLINE_STROKE_RATIO,
    HOUR_HAND_RATIO,
    HUB_FILL_RADIUS_RATIO,
    HUB_OUTLINE_RADIUS_RATIO,
    LOGO_INSET_RATIO,
    MINUTE_HAND_RATIO,
    SECOND_FILL_STROKE_RATIO,
    SECOND_HAND_RATIO,
    SECOND_OUTLINE_STROKE_RATIO,
};

fn sinf(x: f32) -> f32 {
    micromath::F32(x).sin().0
}

fn cosf(x: f32) -> f32 {
    micromath::F32(x).cos().0
}

// =============================================================================
// Viewport Bounds
// =============================================================================

/// Drawable surface size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewportBounds {
    pub width: u32,
    pub height: u32,
}

impl ViewportBounds {
    pub const fn new(
        width: u32,
        height: u32,
    ) -> Self {
        Self { width, height }
    }

    /// Zero-area bounds carry no usable geometry.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// =============================================================================
// Hand Angles
// =============================================================================

/// Second-hand angle; 60 seconds per revolution, swept by the sub-second
/// fraction.
pub fn second_angle(t: &TimeSnapshot) -> f32 {
    (t.second as f32 + t.subsec) / 30.0 * PI
}

/// Minute-hand angle; 60 minutes per revolution, nudged by seconds.
pub fn minute_angle(t: &TimeSnapshot) -> f32 {
    (t.minute as f32 + t.second as f32 / 60.0) / 30.0 * PI
}

/// Hour-hand angle; 12 hours per revolution, nudged by minutes.
pub fn hour_angle(t: &TimeSnapshot) -> f32 {
    (t.hour12 as f32 + t.minute as f32 / 60.0) / 6.0 * PI
}

/// Endpoint offset from the center for a hand of length `len` at `angle`.
pub fn hand_offset(
    angle: f32,
    len: f32,
) -> (f32, f32) {
    (len * sinf(angle), -len * cosf(angle))
}

// =============================================================================
// Derived Metrics
// =============================================================================

/// Everything that depends only on the viewport bounds. Owned by
/// [`MetricsCache`] and invalidated together with the cached bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedMetrics {
    /// The bounds these metrics were derived from.
    pub bounds: ViewportBounds,

    /// Viewport center in pixels.
    pub center_x: f32,
    pub center_y: f32,

    /// Hand lengths, proportional to half the viewport width.
    pub second_len: f32,
    pub minute_len: f32,
    pub hour_len: f32,

    /// Stroke widths for the four pens, quantized to whole pixels (min 1).
    pub hand_outline_width: u32,
    pub hand_fill_width: u32,
    pub second_outline_width: u32,
    pub second_fill_width: u32,

    /// Hub circle radii (outline beneath, fill on top).
    pub hub_outline_radius: f32,
    pub hub_fill_radius: f32,

    /// Logo draw rectangle, inset 5% of the width on each side.
    pub logo_rect: Rectangle,
}

impl DerivedMetrics {
    /// Derive metrics for non-empty bounds.
    fn compute(bounds: ViewportBounds) -> Self {
        let half_width = bounds.width as f32 / 2.0;
        let stroke = |ratio: f32| ((half_width * ratio) as u32).max(1);

        let inset = (bounds.width as f32 * LOGO_INSET_RATIO) as i32;
        let logo_rect = Rectangle::new(
            Point::new(inset, inset),
            Size::new(
                bounds.width.saturating_sub(2 * inset as u32),
                bounds.height.saturating_sub(2 * inset as u32),
            ),
        );

        Self {
            bounds,
            center_x: bounds.width as f32 / 2.0,
            center_y: bounds.height as f32 / 2.0,
            second_len: half_width * SECOND_HAND_RATIO,
            minute_len: half_width * MINUTE_HAND_RATIO,
            hour_len: half_width * HOUR_HAND_RATIO,
            hand_outline_width: stroke(HAND_OUTLINE_STROKE_RATIO),
            hand_fill_width: stroke(HAND_FILL_STROKE_RATIO),
            second_outline_width: stroke(SECOND_OUTLINE_STROKE_RATIO),
            second_fill_width: stroke(SECOND_FILL_STROKE_RATIO),
            hub_outline_radius: half_width * HUB_OUTLINE_RADIUS_RATIO,
            hub_fill_radius: half_width * HUB_FILL_RADIUS_RATIO,
            logo_rect,
        }
    }

    /// Center point rounded to device pixels.
    pub fn center_point(&self) -> Point {
        Point::new(round_px(self.center_x), round_px(self.center_y))
    }
}

/// Round a pixel coordinate to the nearest integer (no `f32::round` in core).
pub(crate) fn round_px(v: f32) -> i32 {
    if v >= 0.0 { (v + 0.5) as i32 } else { (v - 0.5) as i32 }
}

// =============================================================================
// Metrics Cache
// =============================================================================

/// Bounds-keyed cache for [`DerivedMetrics`].
///
/// Recomputes only when the incoming bounds differ from the cached pair;
/// zero-area bounds are skipped entirely so startup draw requests with an
/// unknown surface size cannot divide by zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct MetricsCache {
    cached: Option<DerivedMetrics>,
}

impl MetricsCache {
    pub const fn new() -> Self {
        Self { cached: None }
    }

    /// Refresh the cache for the given bounds. Returns `true` iff a
    /// recomputation actually happened.
    pub fn update(
        &mut self,
        bounds: ViewportBounds,
    ) -> bool {
        if bounds.is_empty() {
            return false;
        }
        if let Some(m) = &self.cached
            && m.bounds == bounds
        {
            return false;
        }
        self.cached = Some(DerivedMetrics::compute(bounds));
        true
    }

    /// The current metrics, if any valid bounds have been observed yet.
    pub const fn metrics(&self) -> Option<&DerivedMetrics> {
        self.cached.as_ref()
    }
}

// =============================================================================
// Hand Geometry
// =============================================================================

/// Per-frame endpoint offsets for the three hands. Pure function of one
/// snapshot and the current metrics; never stored beyond the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandGeometry {
    pub hour: (f32, f32),
    pub minute: (f32, f32),
    pub second: (f32, f32),
}

impl HandGeometry {
    pub fn compute(
        t: &TimeSnapshot,
        m: &DerivedMetrics,
    ) -> Self {
        Self {
            hour: hand_offset(hour_angle(t), m.hour_len),
            minute: hand_offset(minute_angle(t), m.minute_len),
            second: hand_offset(second_angle(t), m.second_len),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
