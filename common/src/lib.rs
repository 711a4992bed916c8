//! Platform-agnostic analog watch face engine.
//!
//! This crate contains the full face logic; the host (simulator or a future
//! wearable target) owns the window, the wall clock and the timer queue, and
//! drives the engine through events:
//!
//! - [`clock`]: wall-clock sampling into per-frame time snapshots
//! - [`geometry`]: hand angles, viewport-derived metrics, bounds caching
//! - [`palette`]: tap-driven background color cycling
//! - [`mode`]: interactive/ambient state and pen attributes
//! - [`scheduler`]: power-aware tick state machine on a 100 ms grid
//! - [`render`]: per-frame composition onto any `DrawTarget<Color = Rgb565>`
//! - [`engine`]: the state-holding [`Engine`], host trait and event enum
//! - [`config`] / [`colors`]: read-only theme and layout constants
//!
//! # Testing
//!
//! Tests run on the host with `cargo test -p watchface-common`. The crate is
//! `no_std` outside of tests (via `cfg_attr`) so the same code can run on an
//! embedded wearable; instants are always handed in by the host, so nothing
//! here touches a system clock.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod clock;
pub mod colors;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod mode;
pub mod palette;
pub mod render;
pub mod scheduler;

// Re-export the types a host driver needs
pub use clock::{ClockState, TimeSnapshot};
pub use config::{FaceConfig, LogoAsset};
pub use engine::{Engine, WatchEvent, WatchHost};
pub use geometry::ViewportBounds;
pub use mode::DisplayMode;
pub use palette::TapPhase;
pub use scheduler::{TICK_INTERVAL_MS, TickToken};
