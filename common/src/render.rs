//! Per-frame composition.
//!
//! A frame is a pure function of the inputs in [`FrameParams`]; no state is
//! read or written here. Draw order matches the layering:
//!
//! 1. Background: ambient is solid black plus the monochrome logo (skipped
//!    on low-bit displays); interactive is the palette color plus the
//!    full-color logo.
//! 2. Minute hand, then hour hand, each as two passes: a wider
//!    outline-colored stroke with a narrower fill-colored stroke on top.
//! 3. Second hand, interactive only, same two-pass technique.
//! 4. Center hub: outline-colored circle beneath a fill-colored circle.
//!
//! Errors are the draw target's own and propagate unchanged.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};

use crate::colors::BLACK;
use crate::config::LogoAsset;
use crate::geometry::{DerivedMetrics, HandGeometry, round_px};
use crate::mode::{DisplayMode, PenSet};

/// Everything one frame needs. Borrowed from engine state for the duration
/// of the draw call.
pub struct FrameParams<'a> {
    pub mode: DisplayMode,
    pub low_bit_ambient: bool,
    /// Effective background color (current palette selection).
    pub background: Rgb565,
    pub pens: &'a PenSet,
    pub logo_color: &'a LogoAsset<'a>,
    pub logo_mono: &'a LogoAsset<'a>,
    pub metrics: &'a DerivedMetrics,
    pub hands: &'a HandGeometry,
}

/// Compose one frame onto the target.
pub fn compose_frame<D>(
    display: &mut D,
    frame: &FrameParams<'_>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let m = frame.metrics;
    let ambient = frame.mode.is_ambient();

    // Background fill plus logo
    let bg = if ambient { BLACK } else { frame.background };
    Rectangle::new(Point::zero(), m.bounds.size())
        .into_styled(PrimitiveStyle::with_fill(bg))
        .draw(display)?;

    if ambient {
        if !frame.low_bit_ambient {
            draw_logo(display, frame.logo_mono, m)?;
        }
    } else {
        draw_logo(display, frame.logo_color, m)?;
    }

    // Minute and hour hands, outline beneath fill
    let center = m.center_point();
    draw_hand(
        display,
        center,
        frame.hands.minute,
        frame.pens.hand_outline.color,
        m.hand_outline_width,
    )?;
    draw_hand(
        display,
        center,
        frame.hands.minute,
        frame.pens.hand_fill.color,
        m.hand_fill_width,
    )?;
    draw_hand(
        display,
        center,
        frame.hands.hour,
        frame.pens.hand_outline.color,
        m.hand_outline_width,
    )?;
    draw_hand(
        display,
        center,
        frame.hands.hour,
        frame.pens.hand_fill.color,
        m.hand_fill_width,
    )?;

    // Second hand and sub-second detail never appear while ambient
    if !ambient {
        draw_hand(
            display,
            center,
            frame.hands.second,
            frame.pens.second_outline.color,
            m.second_outline_width,
        )?;
        draw_hand(
            display,
            center,
            frame.hands.second,
            frame.pens.second_fill.color,
            m.second_fill_width,
        )?;
    }

    // Hub circles, both modes
    draw_hub_circle(display, center, m.hub_outline_radius, frame.pens.hand_outline.color)?;
    draw_hub_circle(display, center, m.hub_fill_radius, frame.pens.hand_fill.color)?;

    Ok(())
}

/// One stroke pass of a hand, from the center to its endpoint offset.
fn draw_hand<D>(
    display: &mut D,
    center: Point,
    offset: (f32, f32),
    color: Rgb565,
    width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let end = Point::new(
        center.x + round_px(offset.0),
        center.y + round_px(offset.1),
    );
    Line::new(center, end)
        .into_styled(PrimitiveStyle::with_stroke(color, width))
        .draw(display)
}

/// A filled hub circle centered on the face.
fn draw_hub_circle<D>(
    display: &mut D,
    center: Point,
    radius: f32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let diameter = (round_px(radius * 2.0)).max(1) as u32;
    Circle::with_center(center, diameter)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
}

/// Blit a logo centered in the inset logo rectangle. Oversized assets fall
/// back to the rectangle's corner rather than going negative.
fn draw_logo<D>(
    display: &mut D,
    logo: &LogoAsset<'_>,
    m: &DerivedMetrics,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if logo.is_empty() {
        return Ok(());
    }
    let rect = m.logo_rect;
    let logo_size = logo.size();
    let slack_x = (rect.size.width as i32 - logo_size.width as i32).max(0);
    let slack_y = (rect.size.height as i32 - logo_size.height as i32).max(0);
    let origin = rect.top_left + Point::new(slack_x / 2, slack_y / 2);
    logo.draw_at(display, origin)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono_tz::Tz;
    use embedded_graphics::mock_display::MockDisplay;

    use crate::clock::TimeSnapshot;
    use crate::config::FaceConfig;
    use crate::geometry::{MetricsCache, ViewportBounds};
    use crate::mode::ModeController;

    use super::*;

    const BG: Rgb565 = Rgb565::new(2, 6, 10);

    fn test_config() -> FaceConfig<'static> {
        FaceConfig {
            palette: &[BG],
            hand_fill: Rgb565::WHITE,
            hand_outline: Rgb565::BLUE,
            hand_fill_ambient: Rgb565::WHITE,
            hand_outline_ambient: Rgb565::CSS_DIM_GRAY,
            second_fill: Rgb565::RED,
            second_outline: Rgb565::CSS_DARK_RED,
            logo_color: LogoAsset::empty(),
            logo_mono: LogoAsset::empty(),
            default_zone: Tz::UTC,
        }
    }

    fn draw_at(
        mode: DisplayMode,
        snapshot: TimeSnapshot,
    ) -> MockDisplay<Rgb565> {
        let config = test_config();
        let pens = PenSet::new(&config);
        let mut cache = MetricsCache::new();
        // MockDisplay is 64x64
        cache.update(ViewportBounds::new(64, 64));
        let metrics = *cache.metrics().unwrap();
        let hands = HandGeometry::compute(&snapshot, &metrics);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        compose_frame(
            &mut display,
            &FrameParams {
                mode,
                low_bit_ambient: false,
                background: BG,
                pens: &pens,
                logo_color: &config.logo_color,
                logo_mono: &config.logo_mono,
                metrics: &metrics,
                hands: &hands,
            },
        )
        .unwrap();
        display
    }

    fn midnight() -> TimeSnapshot {
        TimeSnapshot {
            hour12: 0,
            minute: 0,
            second: 0,
            subsec: 0.0,
            zone: Tz::UTC,
        }
    }

    #[test]
    fn test_interactive_background_uses_palette_color() {
        let display = draw_at(DisplayMode::Interactive, midnight());
        assert_eq!(display.get_pixel(Point::new(1, 62)), Some(BG));
    }

    #[test]
    fn test_ambient_background_is_black() {
        let display = draw_at(DisplayMode::Ambient, midnight());
        assert_eq!(display.get_pixel(Point::new(1, 62)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_second_hand_only_drawn_interactive() {
        // 15s: second hand points right along y = center
        let mut snapshot = midnight();
        snapshot.second = 15;

        let interactive = draw_at(DisplayMode::Interactive, snapshot);
        assert_eq!(
            interactive.get_pixel(Point::new(60, 32)),
            Some(Rgb565::RED),
            "second-hand fill stroke expected right of center"
        );

        let ambient = draw_at(DisplayMode::Ambient, snapshot);
        assert_eq!(
            ambient.get_pixel(Point::new(60, 32)),
            Some(Rgb565::BLACK),
            "no second hand while ambient"
        );
    }

    #[test]
    fn test_hub_drawn_in_both_modes() {
        for mode in [DisplayMode::Interactive, DisplayMode::Ambient] {
            let display = draw_at(mode, midnight());
            assert_eq!(
                display.get_pixel(Point::new(32, 32)),
                Some(Rgb565::WHITE),
                "hub fill circle covers the center"
            );
        }
    }

    #[test]
    fn test_hands_point_up_at_midnight() {
        let display = draw_at(DisplayMode::Interactive, midnight());
        // Directly above the center, inside hour+minute strokes but outside the hub
        assert_eq!(display.get_pixel(Point::new(32, 16)), Some(Rgb565::RED));
    }
}
