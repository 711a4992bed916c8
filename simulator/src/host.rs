//! Desktop implementation of the engine's host surface.
//!
//! The engine expects a delayed-message queue, a redraw signal and a
//! timezone-broadcast registration. On the desktop all three reduce to plain
//! state polled by the main loop: at most one tick is pending at a time (the
//! engine cancels before re-arming), a redraw is a flag, and the
//! subscription gates whether the loop forwards zone changes at all.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use watchface_common::{TickToken, WatchHost};

/// Polled host state: pending tick, redraw flag, timezone subscription.
pub struct SimHost {
    redraw: bool,
    pending: Option<(TickToken, Instant)>,
    subscribed: bool,
}

impl SimHost {
    pub const fn new() -> Self {
        Self {
            redraw: false,
            pending: None,
            subscribed: false,
        }
    }

    /// Consume the redraw flag. The main loop draws one frame per `true`.
    pub const fn take_redraw(&mut self) -> bool {
        let due = self.redraw;
        self.redraw = false;
        due
    }

    /// Take the pending tick if its deadline has passed. The token goes
    /// back to the engine, which decides whether it is still current.
    pub fn take_due_tick(&mut self) -> Option<TickToken> {
        if let Some((_, deadline)) = self.pending
            && Instant::now() >= deadline
        {
            return self.pending.take().map(|(token, _)| token);
        }
        None
    }

    /// Whether the engine is registered for timezone notifications. The
    /// loop drops zone changes while unsubscribed, as the platform would.
    pub const fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

impl WatchHost for SimHost {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn request_redraw(&mut self) {
        self.redraw = true;
    }

    fn post_delayed(
        &mut self,
        token: TickToken,
        delay_ms: u64,
    ) {
        self.pending = Some((token, Instant::now() + Duration::from_millis(delay_ms)));
    }

    fn cancel(
        &mut self,
        token: TickToken,
    ) {
        if let Some((pending, _)) = self.pending
            && pending == token
        {
            self.pending = None;
        }
    }

    fn subscribe_timezone(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe_timezone(&mut self) {
        self.subscribed = false;
    }
}
