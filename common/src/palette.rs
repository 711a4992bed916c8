//! Tap handling and background palette cycling.
//!
//! Only a completed tap mutates state: the counter increments and the
//! effective background becomes `palette[counter mod len]`. Touch-start and
//! touch-cancel phases exist so the host can still request a cosmetic redraw
//! for touch feedback, and any unrecognized phase code degrades to Cancel.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

/// Phase of a tap gesture as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapPhase {
    /// Finger down; the gesture may still become a tap.
    Start,
    /// Gesture abandoned (scroll, palm, system takeover).
    Cancel,
    /// Completed tap.
    Tap,
}

impl TapPhase {
    /// Map a raw host phase code. Unknown codes are treated as Cancel so a
    /// misbehaving host can never mutate palette state.
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Start,
            2 => Self::Tap,
            _ => Self::Cancel,
        }
    }

    /// Whether this phase advances the palette.
    pub const fn is_completed_tap(self) -> bool {
        matches!(self, Self::Tap)
    }
}

/// Monotonic tap counter selecting the effective background color.
#[derive(Clone, Copy, Debug, Default)]
pub struct PaletteState {
    taps: u32,
}

impl PaletteState {
    pub const fn new() -> Self {
        Self { taps: 0 }
    }

    /// Completed taps so far.
    pub const fn taps(&self) -> u32 {
        self.taps
    }

    /// Register a completed tap and return the new effective color.
    pub fn advance(
        &mut self,
        palette: &[Rgb565],
    ) -> Rgb565 {
        self.taps = self.taps.wrapping_add(1);
        self.current(palette)
    }

    /// Effective color for the current counter. An empty palette (a host
    /// configuration mistake) renders black rather than panicking.
    pub fn current(
        &self,
        palette: &[Rgb565],
    ) -> Rgb565 {
        if palette.is_empty() {
            return Rgb565::BLACK;
        }
        palette[self.taps as usize % palette.len()]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [Rgb565; 3] = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE];

    #[test]
    fn test_startup_color_is_first_entry() {
        let state = PaletteState::new();
        assert_eq!(state.current(&PALETTE), Rgb565::RED);
    }

    #[test]
    fn test_three_taps_select_indices_one_two_zero() {
        let mut state = PaletteState::new();
        assert_eq!(state.advance(&PALETTE), Rgb565::GREEN, "tap 1 -> index 1");
        assert_eq!(state.advance(&PALETTE), Rgb565::BLUE, "tap 2 -> index 2");
        assert_eq!(state.advance(&PALETTE), Rgb565::RED, "tap 3 wraps to index 0");
        assert_eq!(state.taps(), 3);
    }

    #[test]
    fn test_unknown_phase_codes_degrade_to_cancel() {
        assert_eq!(TapPhase::from_code(0), TapPhase::Start);
        assert_eq!(TapPhase::from_code(1), TapPhase::Cancel);
        assert_eq!(TapPhase::from_code(2), TapPhase::Tap);
        assert_eq!(TapPhase::from_code(3), TapPhase::Cancel);
        assert_eq!(TapPhase::from_code(255), TapPhase::Cancel);
    }

    #[test]
    fn test_only_completed_taps_advance() {
        assert!(TapPhase::Tap.is_completed_tap());
        assert!(!TapPhase::Start.is_completed_tap());
        assert!(!TapPhase::Cancel.is_completed_tap());
    }

    #[test]
    fn test_empty_palette_renders_black() {
        let mut state = PaletteState::new();
        assert_eq!(state.current(&[]), Rgb565::BLACK);
        assert_eq!(state.advance(&[]), Rgb565::BLACK);
    }
}
