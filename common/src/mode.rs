//! Display mode state and pen attributes.
//!
//! The face runs in one of two modes: full-power Interactive or low-power
//! Ambient. A real mode transition recolors the minute/hour pens, toggles
//! anti-aliasing on all four pens when the display is low-bit ambient, and
//! asks for a repaint; redundant signals of the current mode are ignored.
//!
//! The low-bit-ambient capability arrives once from the host at startup and
//! is immutable afterwards.

use embedded_graphics::pixelcolor::Rgb565;

use crate::config::FaceConfig;

/// Power/refresh state of the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Full-power, high-refresh state. Second hand visible, ticks running.
    #[default]
    Interactive,
    /// Low-power state with reduced detail and refresh rate.
    Ambient,
}

impl DisplayMode {
    pub const fn from_ambient(ambient: bool) -> Self {
        if ambient { Self::Ambient } else { Self::Interactive }
    }

    pub const fn is_ambient(self) -> bool {
        matches!(self, Self::Ambient)
    }
}

// =============================================================================
// Pens
// =============================================================================

/// Paint attributes for one stroke pass. Stroke widths are viewport-derived
/// and live in `DerivedMetrics`; a pen carries what survives resizes.
///
/// `anti_alias` is paint state for hosts whose canvas can smooth strokes;
/// targets without anti-aliasing (such as the simulator) ignore it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pen {
    pub color: Rgb565,
    pub anti_alias: bool,
}

impl Pen {
    const fn new(color: Rgb565) -> Self {
        Self { color, anti_alias: true }
    }
}

/// The four pens used for hand strokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PenSet {
    pub hand_outline: Pen,
    pub hand_fill: Pen,
    pub second_outline: Pen,
    pub second_fill: Pen,
}

impl PenSet {
    /// Interactive-mode pens, anti-aliased.
    pub const fn new(config: &FaceConfig<'_>) -> Self {
        Self {
            hand_outline: Pen::new(config.hand_outline),
            hand_fill: Pen::new(config.hand_fill),
            second_outline: Pen::new(config.second_outline),
            second_fill: Pen::new(config.second_fill),
        }
    }

    fn set_anti_alias(
        &mut self,
        enabled: bool,
    ) {
        self.hand_outline.anti_alias = enabled;
        self.hand_fill.anti_alias = enabled;
        self.second_outline.anti_alias = enabled;
        self.second_fill.anti_alias = enabled;
    }
}

// =============================================================================
// Mode Controller
// =============================================================================

/// Tracks the display mode and the set-once low-bit capability, and applies
/// mode transitions to a [`PenSet`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ModeController {
    mode: DisplayMode,
    low_bit: Option<bool>,
}

impl ModeController {
    pub const fn new() -> Self {
        Self {
            mode: DisplayMode::Interactive,
            low_bit: None,
        }
    }

    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Low-bit-ambient capability; false until the host reports it.
    pub const fn low_bit_ambient(&self) -> bool {
        matches!(self.low_bit, Some(true))
    }

    /// Record the capability the first time it is reported. Later reports
    /// are ignored: the flag is immutable after init.
    pub fn set_low_bit_once(
        &mut self,
        low_bit_ambient: bool,
    ) {
        if self.low_bit.is_none() {
            self.low_bit = Some(low_bit_ambient);
        }
    }

    /// Apply an ambient-mode signal. Returns `true` iff the mode actually
    /// changed (and pens were updated); a repeat of the current mode leaves
    /// everything untouched.
    pub fn set_ambient(
        &mut self,
        ambient: bool,
        pens: &mut PenSet,
        config: &FaceConfig<'_>,
    ) -> bool {
        let next = DisplayMode::from_ambient(ambient);
        if next == self.mode {
            return false;
        }
        self.mode = next;

        if self.low_bit_ambient() {
            pens.set_anti_alias(!ambient);
        }

        pens.hand_outline.color = if ambient {
            config.hand_outline_ambient
        } else {
            config.hand_outline
        };
        pens.hand_fill.color = if ambient {
            config.hand_fill_ambient
        } else {
            config.hand_fill
        };

        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
