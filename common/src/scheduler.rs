//! Power-aware tick scheduling.
//!
//! The scheduler is the only component that initiates work: while Running it
//! keeps one delayed tick in flight with the host, and each fired tick
//! requests a redraw and re-arms the next one. It is Running iff the face is
//! visible and Interactive; any visibility or mode change cancels the
//! pending tick and re-evaluates from scratch.
//!
//! # Grid alignment
//!
//! The next tick is scheduled at `INTERVAL - (epoch_ms mod INTERVAL)`, so
//! ticks land on an absolute 100 ms wall-clock grid instead of drifting by
//! dispatch latency. The delay is in (0, 100]: a tick that fires exactly on
//! the grid waits a full interval.
//!
//! # Cancellation
//!
//! Tokens carry a generation that bumps on every cancel. A fired tick whose
//! token is no longer the pending one is dropped, so after destroy (or any
//! reschedule) a tick already sitting in the host's queue can never act.

use crate::engine::WatchHost;
use crate::mode::DisplayMode;

/// Tick cadence while Running, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Identity of one scheduled tick. Stale tokens are rejected at fire time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickToken {
    generation: u32,
}

/// Delay to the next absolute 100 ms grid point, in (0, 100].
pub fn aligned_delay_ms(epoch_ms: i64) -> u64 {
    let interval = TICK_INTERVAL_MS as i64;
    (interval - epoch_ms.rem_euclid(interval)) as u64
}

/// {Stopped, Running} tick state machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderScheduler {
    generation: u32,
    pending: Option<TickToken>,
    running: bool,
}

impl RenderScheduler {
    pub const fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
            running: false,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The timer runs only while the face is visible and interactive.
    pub const fn should_run(
        visible: bool,
        mode: DisplayMode,
    ) -> bool {
        visible && !mode.is_ambient()
    }

    /// Re-evaluate the Stopped/Running transition after a visibility or mode
    /// change: cancel any pending tick (a no-op when none is pending), then
    /// arm an immediate tick when eligible.
    pub fn reschedule<H: WatchHost>(
        &mut self,
        host: &mut H,
        visible: bool,
        mode: DisplayMode,
    ) {
        self.cancel_pending(host);
        self.running = Self::should_run(visible, mode);
        if self.running {
            let token = self.arm();
            host.post_delayed(token, 0);
        }
    }

    /// Cancel everything and stop for good. No tick may fire afterwards.
    pub fn shutdown<H: WatchHost>(
        &mut self,
        host: &mut H,
    ) {
        self.cancel_pending(host);
        self.running = false;
    }

    /// Handle a tick fired by the host. A stale token (canceled, destroyed,
    /// superseded) is dropped without effect. Otherwise: request a redraw,
    /// and if still Running, arm the next tick on the 100 ms grid.
    pub fn on_tick_fired<H: WatchHost>(
        &mut self,
        host: &mut H,
        token: TickToken,
    ) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;

        host.request_redraw();

        if self.running {
            let delay = aligned_delay_ms(host.now_utc().timestamp_millis());
            let next = self.arm();
            host.post_delayed(next, delay);
        }
        true
    }

    /// Cancel the pending tick with the host and invalidate its token.
    fn cancel_pending<H: WatchHost>(
        &mut self,
        host: &mut H,
    ) {
        if let Some(token) = self.pending.take() {
            host.cancel(token);
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Mint and record the token for the next tick.
    fn arm(&mut self) -> TickToken {
        let token = TickToken {
            generation: self.generation,
        };
        self.pending = Some(token);
        token
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
