//! Analog watch face simulator for desktop.
//!
//! Runs the platform-agnostic engine against a window using the
//! embedded-graphics-simulator crate, standing in for a wearable host:
//! the loop owns the wall clock, the delayed-tick queue and the timezone
//! broadcast, and feeds the engine the same events a device would.
//!
//! # Controls
//!
//! - Mouse click: tap (cycles the background palette)
//! - `A`: toggle ambient mode
//! - `V`: toggle visibility
//! - `B`: report the low-bit-ambient capability (one-shot)
//! - `Z`: cycle the system timezone (delivered only while subscribed)

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod host;
mod logo;
mod timing;

use std::thread;

use chrono::Timelike;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use profont::PROFONT_12_POINT;
use watchface_common::{
    DisplayMode,
    Engine,
    FaceConfig,
    LogoAsset,
    TapPhase,
    ViewportBounds,
    WatchEvent,
    colors,
};

use crate::host::SimHost;
use crate::logo::LOGO_SIZE;
use crate::timing::POLL_TIME;

const FACE_SIZE: u32 = 320;

const ZONES: [&str; 4] = ["UTC", "Europe/Warsaw", "Asia/Tokyo", "America/New_York"];

// Raw tap phase codes as a wearable host would deliver them; decoded
// through TapPhase::from_code like any other host input
const TAP_CODE_DOWN: u8 = 0;
const TAP_CODE_UP: u8 = 2;

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(FACE_SIZE, FACE_SIZE));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Analog Watch Face Sim", &output_settings);

    let color_logo_data = logo::color_logo();
    let mono_logo_data = logo::mono_logo();

    let config = FaceConfig {
        palette: &colors::BACKGROUNDS,
        hand_fill: colors::HAND_FILL,
        hand_outline: colors::HAND_OUTLINE,
        hand_fill_ambient: colors::HAND_FILL_AMBIENT,
        hand_outline_ambient: colors::HAND_OUTLINE_AMBIENT,
        second_fill: colors::SECOND_HAND_FILL,
        second_outline: colors::SECOND_HAND_OUTLINE,
        logo_color: LogoAsset::new(&color_logo_data, LOGO_SIZE),
        logo_mono: LogoAsset::new(&mono_logo_data, LOGO_SIZE),
        default_zone: chrono_tz::Tz::UTC,
    };

    let mut engine = Engine::new(config);
    let mut sim_host = SimHost::new();

    display.clear(colors::BLACK).ok();
    window.update(&display);

    // Desktop window is visible from the start
    let mut visible = true;
    engine.dispatch(&mut sim_host, WatchEvent::VisibilityChanged { visible });

    let mut ambient = false;
    let mut zone_index = 0usize;
    let mut last_minute = sim_host_minute();

    loop {
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => {
                    engine.dispatch(&mut sim_host, WatchEvent::Destroyed);
                    return;
                }
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::A => {
                            ambient = !ambient;
                            engine.dispatch(&mut sim_host, WatchEvent::AmbientChanged { ambient });
                        }
                        Keycode::V => {
                            visible = !visible;
                            engine.dispatch(&mut sim_host, WatchEvent::VisibilityChanged { visible });
                        }
                        Keycode::B => {
                            engine.dispatch(&mut sim_host, WatchEvent::PropertiesChanged {
                                low_bit_ambient: true,
                            });
                        }
                        Keycode::Z => {
                            zone_index = (zone_index + 1) % ZONES.len();
                            // The platform only notifies registered listeners
                            if sim_host.is_subscribed() {
                                engine.dispatch(&mut sim_host, zone_change(ZONES[zone_index]));
                            }
                        }
                        _ => {}
                    }
                }
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    engine.dispatch(&mut sim_host, tap_event(TAP_CODE_DOWN, point));
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    engine.dispatch(&mut sim_host, tap_event(TAP_CODE_UP, point));
                }
                _ => {}
            }
        }

        // Platform heartbeat: one TimeTick per minute boundary, the only
        // repaint source while ambient
        let minute = sim_host_minute();
        if minute != last_minute {
            last_minute = minute;
            engine.dispatch(&mut sim_host, WatchEvent::TimeTick);
        }

        // Deliver a due delayed tick; the engine re-arms on the 100 ms grid
        if let Some(token) = sim_host.take_due_tick() {
            engine.dispatch(&mut sim_host, WatchEvent::TickFired { token });
        }

        if sim_host.take_redraw() {
            engine
                .draw(&mut display, ViewportBounds::new(FACE_SIZE, FACE_SIZE), &sim_host)
                .ok();
            draw_status_line(&mut display, &engine, visible);
        }

        window.update(&display);
        thread::sleep(POLL_TIME);
    }
}

/// Current wall-clock minute, for heartbeat edge detection.
fn sim_host_minute() -> u32 {
    chrono::Utc::now().minute()
}

fn tap_event(
    code: u8,
    point: Point,
) -> WatchEvent {
    WatchEvent::Tap {
        phase: TapPhase::from_code(code),
        x: point.x,
        y: point.y,
        millis: chrono::Utc::now().timestamp_millis() as u64,
    }
}

fn zone_change(zone_id: &str) -> WatchEvent {
    let mut id: heapless::String<64> = heapless::String::new();
    // Every entry in ZONES fits well under 64 bytes
    id.push_str(zone_id).ok();
    WatchEvent::TimezoneChanged { zone_id: id }
}

/// Zone and mode readout along the bottom edge, outside the watch dial.
fn draw_status_line(
    display: &mut SimulatorDisplay<Rgb565>,
    engine: &Engine<'_>,
    visible: bool,
) {
    let mode = match (visible, engine.mode()) {
        (false, _) => "hidden",
        (true, DisplayMode::Ambient) => "ambient",
        (true, DisplayMode::Interactive) => "interactive",
    };
    let line = format!("{} | {}", engine.zone().name(), mode);
    let style = MonoTextStyle::new(&PROFONT_12_POINT, colors::WHITE);
    Text::new(&line, Point::new(4, FACE_SIZE as i32 - 6), style)
        .draw(display)
        .ok();
}
