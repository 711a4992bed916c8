//! Procedurally generated logo bitmaps.
//!
//! A real device loads its logos from a resource bundle, pre-rotated and
//! pre-scaled. The simulator has no bundle, so it synthesizes equivalent
//! bitmaps at startup: a sectored disc for interactive mode (with the
//! rotation baked in, as the resource pipeline would) and a plain ring for
//! ambient mode. Everything outside the disc is the transparency key so the
//! blit leaves the background untouched.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use watchface_common::colors::LOGO_COLOR_KEY;
use watchface_common::config::LOGO_ROTATION_DEG;

/// Logo bitmap edge length in pixels.
pub const LOGO_SIZE: u32 = 96;

const SECTOR_COUNT: u32 = 12;

const SECTOR_COLORS: [Rgb565; 2] = [Rgb565::new(24, 49, 6), Rgb565::new(4, 12, 14)];

/// Big-endian RGB565 bytes for the full-color sectored disc.
pub fn color_logo() -> Vec<u8> {
    let rotation = (LOGO_ROTATION_DEG as f32).to_radians();
    render(|dx, dy, dist| {
        let radius = LOGO_SIZE as f32 / 2.0;
        if dist > radius {
            return LOGO_COLOR_KEY;
        }
        let angle = dy.atan2(dx) + rotation;
        let sector = (angle / std::f32::consts::TAU * SECTOR_COUNT as f32)
            .floor()
            .rem_euclid(SECTOR_COUNT as f32) as usize;
        SECTOR_COLORS[sector % SECTOR_COLORS.len()]
    })
}

/// Big-endian RGB565 bytes for the monochrome ambient ring.
pub fn mono_logo() -> Vec<u8> {
    render(|_, _, dist| {
        let outer = LOGO_SIZE as f32 / 2.0;
        let inner = outer * 0.8;
        if dist <= outer && dist >= inner {
            Rgb565::WHITE
        } else {
            LOGO_COLOR_KEY
        }
    })
}

fn render(pixel: impl Fn(f32, f32, f32) -> Rgb565) -> Vec<u8> {
    let mut data = Vec::with_capacity((LOGO_SIZE * LOGO_SIZE * 2) as usize);
    let center = (LOGO_SIZE as f32 - 1.0) / 2.0;
    for y in 0..LOGO_SIZE {
        for x in 0..LOGO_SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let color = pixel(dx, dy, (dx * dx + dy * dy).sqrt());
            data.extend_from_slice(&color.into_storage().to_be_bytes());
        }
    }
    data
}
