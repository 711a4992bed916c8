//! Color constants for the watch face theme.
//!
//! These are the stand-in for the resource bundle a device host would load
//! its theme from. The host copies them into a
//! [`FaceConfig`](crate::config::FaceConfig) at construction; nothing in the
//! engine reads them directly afterwards.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Ambient background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Hand fill in both modes.
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Hand Pens
// =============================================================================

/// Hand fill color while interactive.
pub const HAND_FILL: Rgb565 = WHITE;

/// Hand outline color while interactive. Deep slate blue.
/// RGB565: (6, 16, 14) - dark enough to read as an outline on any palette color.
pub const HAND_OUTLINE: Rgb565 = Rgb565::new(6, 16, 14);

/// Hand fill color while ambient. Kept white so hands stay legible on black.
pub const HAND_FILL_AMBIENT: Rgb565 = WHITE;

/// Hand outline color while ambient. Mid gray, cheaper on OLED than color.
/// RGB565: (12, 24, 12) - roughly 40% brightness.
pub const HAND_OUTLINE_AMBIENT: Rgb565 = Rgb565::new(12, 24, 12);

/// Second hand fill. Bright red, interactive mode only.
pub const SECOND_HAND_FILL: Rgb565 = Rgb565::RED;

/// Second hand outline. Darker red beneath the fill stroke.
/// RGB565: (18, 4, 2).
pub const SECOND_HAND_OUTLINE: Rgb565 = Rgb565::new(18, 4, 2);

// =============================================================================
// Background Palette (cycled by completed taps)
// =============================================================================

/// Ordered background palette. A completed tap advances to the next entry,
/// wrapping at the end; index 0 is the color shown at startup.
pub const BACKGROUNDS: [Rgb565; 5] = [
    Rgb565::new(2, 6, 10),  // midnight blue
    Rgb565::new(4, 8, 4),   // charcoal green
    Rgb565::new(0, 18, 12), // deep teal
    Rgb565::new(10, 6, 12), // plum
    Rgb565::new(10, 18, 2), // dark olive
];

// =============================================================================
// Logo Assets
// =============================================================================

/// Color-key for logo bitmaps: pixels of this exact value are treated as
/// transparent and skipped when blitting. Magenta is the usual sacrifice.
pub const LOGO_COLOR_KEY: Rgb565 = Rgb565::MAGENTA;
