//! Wall-clock sampling for the watch face.
//!
//! [`ClockState`] owns the active timezone; [`TimeSnapshot`] is one sample of
//! the wall clock under that zone. Snapshots are recreated fresh for every
//! frame and never cached across frames, so a zone change can never leave a
//! stale time on screen: the swap replaces the zone first and resamples
//! immediately, and every later frame samples again anyway.
//!
//! The host supplies every instant. Nothing here reads a system clock, which
//! keeps the module total, deterministic and `no_std`-clean.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// One sample of the wall clock, in 12-hour analog terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSnapshot {
    /// Hour on the 12-hour dial, 0-11 (12 o'clock is 0).
    pub hour12: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
    /// Sub-second fraction, [0, 1). Drives the sweeping second hand.
    pub subsec: f32,
    /// Zone the sample was taken under.
    pub zone: Tz,
}

/// Holds the active timezone and samples instants under it.
#[derive(Clone, Copy, Debug)]
pub struct ClockState {
    zone: Tz,
    default_zone: Tz,
}

impl ClockState {
    /// Start in the host-provided default zone.
    pub const fn new(default_zone: Tz) -> Self {
        Self {
            zone: default_zone,
            default_zone,
        }
    }

    /// The currently active zone.
    pub const fn zone(&self) -> Tz {
        self.zone
    }

    /// Snap back to the default zone. Called on becoming visible, covering
    /// zone changes broadcast while the face was not subscribed.
    pub fn reset_to_default(&mut self) {
        self.zone = self.default_zone;
    }

    /// Replace the active zone. An empty or unrecognized id falls back to
    /// the default zone rather than failing.
    pub fn set_zone(
        &mut self,
        zone_id: &str,
    ) {
        self.zone = zone_id.parse().unwrap_or(self.default_zone);
    }

    /// Two-step zone change: swap the zone, then immediately resample the
    /// given instant so the first thing observable under the new zone is
    /// current, never a pre-change leftover.
    pub fn retarget(
        &mut self,
        zone_id: &str,
        now: DateTime<Utc>,
    ) -> TimeSnapshot {
        self.set_zone(zone_id);
        self.sample(now)
    }

    /// Sample an instant under the active zone. Total: always succeeds.
    pub fn sample(
        &self,
        now: DateTime<Utc>,
    ) -> TimeSnapshot {
        let local = now.with_timezone(&self.zone);
        TimeSnapshot {
            hour12: (local.hour() % 12) as u8,
            minute: local.minute() as u8,
            second: local.second() as u8,
            // nanosecond() can report leap-second values >= 1e9; clamp into [0, 1)
            subsec: (local.nanosecond() % 1_000_000_000) as f32 / 1_000_000_000.0,
            zone: self.zone,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
