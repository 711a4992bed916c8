//! The watch face engine: one state-holding object driven by host events.
//!
//! The host owns the window/surface, the wall clock, a delayed-message queue
//! and the timezone broadcast; it implements [`WatchHost`] and feeds the
//! engine [`WatchEvent`]s plus draw requests. All events arrive on a single
//! logical thread in FIFO order, so the engine holds no locks: a visibility
//! or mode change is always fully handled (repaint decision plus
//! rescheduling) before any tick queued after it can fire.
//!
//! Construction is the `create` callback: it fixes the read-only
//! [`FaceConfig`] (pens, palette, logos, default zone) for the session.
//! `Destroyed` cancels all pending ticks; the scheduler's generation tokens
//! guarantee no tick acts afterwards.

use chrono::{DateTime, Utc};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::clock::ClockState;
use crate::config::FaceConfig;
use crate::geometry::{HandGeometry, MetricsCache, ViewportBounds};
use crate::mode::{DisplayMode, ModeController, PenSet};
use crate::palette::{PaletteState, TapPhase};
use crate::render::{FrameParams, compose_frame};
use crate::scheduler::{RenderScheduler, TickToken};

/// Outbound surface: what the engine may ask of its host.
///
/// `post_delayed` and `cancel` are the tick primitives; the host must run
/// the delayed callback on the same logical thread as event dispatch and
/// deliver it back via [`WatchEvent::TickFired`].
pub trait WatchHost {
    /// Sample the device wall clock. Read-only, sampled fresh per tick/draw.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Schedule a draw "soon".
    fn request_redraw(&mut self);

    /// Fire `TickFired { token }` after `delay_ms` milliseconds.
    fn post_delayed(
        &mut self,
        token: TickToken,
        delay_ms: u64,
    );

    /// Best-effort cancel of a previously posted tick. The engine also
    /// rejects stale tokens at fire time, so a host that races this call is
    /// still safe.
    fn cancel(
        &mut self,
        token: TickToken,
    );

    /// Register for timezone-change notifications.
    fn subscribe_timezone(&mut self);

    /// Deregister from timezone-change notifications.
    fn unsubscribe_timezone(&mut self);
}

/// Inbound host lifecycle and input events.
#[derive(Clone, Debug, PartialEq)]
pub enum WatchEvent {
    /// Session teardown. All pending ticks are canceled; no tick may fire
    /// afterwards.
    Destroyed,
    /// The face became visible or hidden.
    VisibilityChanged { visible: bool },
    /// The display entered or left ambient mode.
    AmbientChanged { ambient: bool },
    /// One-time device capability report.
    PropertiesChanged { low_bit_ambient: bool },
    /// A tap gesture phase. Position and timestamp are reported for parity
    /// with the host API; only the phase affects state.
    Tap {
        phase: TapPhase,
        x: i32,
        y: i32,
        millis: u64,
    },
    /// Low-frequency platform heartbeat (e.g. once a minute while ambient).
    TimeTick,
    /// The system timezone changed. Only delivered while subscribed.
    TimezoneChanged { zone_id: heapless::String<64> },
    /// A previously posted delayed tick fired.
    TickFired { token: TickToken },
}

/// The engine: exclusive owner of all face state for one session.
pub struct Engine<'a> {
    config: FaceConfig<'a>,
    clock: ClockState,
    palette: PaletteState,
    background: Rgb565,
    pens: PenSet,
    mode: ModeController,
    scheduler: RenderScheduler,
    metrics: MetricsCache,
    visible: bool,
    tz_subscribed: bool,
    destroyed: bool,
}

impl<'a> Engine<'a> {
    /// One-time init: pens, palette selection and clock zone all derive from
    /// the config. The face starts hidden and interactive.
    pub fn new(config: FaceConfig<'a>) -> Self {
        let palette = PaletteState::new();
        Self {
            background: palette.current(config.palette),
            pens: PenSet::new(&config),
            clock: ClockState::new(config.default_zone),
            palette,
            mode: ModeController::new(),
            scheduler: RenderScheduler::new(),
            metrics: MetricsCache::new(),
            visible: false,
            tz_subscribed: false,
            destroyed: false,
            config,
        }
    }

    /// Process one host event. Total: no event can fail.
    pub fn dispatch<H: WatchHost>(
        &mut self,
        host: &mut H,
        event: WatchEvent,
    ) {
        if self.destroyed {
            return;
        }

        match event {
            WatchEvent::Destroyed => {
                self.scheduler.shutdown(host);
                if self.tz_subscribed {
                    host.unsubscribe_timezone();
                    self.tz_subscribed = false;
                }
                self.destroyed = true;
            }

            WatchEvent::VisibilityChanged { visible } => {
                self.visible = visible;
                if visible {
                    if !self.tz_subscribed {
                        host.subscribe_timezone();
                        self.tz_subscribed = true;
                    }
                    // Catch up on zone changes broadcast while hidden
                    self.clock.reset_to_default();
                } else if self.tz_subscribed {
                    host.unsubscribe_timezone();
                    self.tz_subscribed = false;
                }
                self.scheduler.reschedule(host, self.visible, self.mode.mode());
            }

            WatchEvent::AmbientChanged { ambient } => {
                if self.mode.set_ambient(ambient, &mut self.pens, &self.config) {
                    host.request_redraw();
                }
                self.scheduler.reschedule(host, self.visible, self.mode.mode());
            }

            WatchEvent::PropertiesChanged { low_bit_ambient } => {
                self.mode.set_low_bit_once(low_bit_ambient);
            }

            WatchEvent::Tap { phase, .. } => {
                if phase.is_completed_tap() {
                    self.background = self.palette.advance(self.config.palette);
                }
                // Every phase repaints (touch feedback), only Tap mutates
                host.request_redraw();
            }

            WatchEvent::TimeTick => {
                host.request_redraw();
            }

            WatchEvent::TimezoneChanged { zone_id } => {
                // Zone swap, then immediate resample; the repaint shows the
                // resynced time even between heartbeats
                self.clock.retarget(zone_id.as_str(), host.now_utc());
                host.request_redraw();
            }

            WatchEvent::TickFired { token } => {
                self.scheduler.on_tick_fired(host, token);
            }
        }
    }

    /// Run the full render pipeline for one draw request. Samples the wall
    /// clock fresh, refreshes viewport-derived metrics only when the bounds
    /// changed, and composes the frame. A zero-area or not-yet-known
    /// viewport skips the frame entirely.
    pub fn draw<D, H>(
        &mut self,
        display: &mut D,
        bounds: ViewportBounds,
        host: &H,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        H: WatchHost,
    {
        self.metrics.update(bounds);
        let Some(metrics) = self.metrics.metrics() else {
            return Ok(());
        };

        let snapshot = self.clock.sample(host.now_utc());
        let hands = HandGeometry::compute(&snapshot, metrics);

        compose_frame(
            display,
            &FrameParams {
                mode: self.mode.mode(),
                low_bit_ambient: self.mode.low_bit_ambient(),
                background: self.background,
                pens: &self.pens,
                logo_color: &self.config.logo_color,
                logo_mono: &self.config.logo_mono,
                metrics,
                hands: &hands,
            },
        )
    }

    // --- read-only views for hosts and tests ---

    pub const fn mode(&self) -> DisplayMode {
        self.mode.mode()
    }

    pub const fn low_bit_ambient(&self) -> bool {
        self.mode.low_bit_ambient()
    }

    pub const fn background(&self) -> Rgb565 {
        self.background
    }

    pub const fn pens(&self) -> &PenSet {
        &self.pens
    }

    pub const fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub const fn tap_count(&self) -> u32 {
        self.palette.taps()
    }

    /// Active timezone, for host status display.
    pub const fn zone(&self) -> chrono_tz::Tz {
        self.clock.zone()
    }
}

// =============================================================================
// Test Support
// =============================================================================

/// Recording mock host shared by the engine and scheduler tests.
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Kind of outbound call, for counting.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum HostCall {
        RequestRedraw,
        PostDelayed,
        Cancel,
        Subscribe,
        Unsubscribe,
    }

    pub struct MockHost {
        pub epoch_ms: i64,
        pub redraws: usize,
        pub posted: Vec<(TickToken, u64)>,
        pub canceled: Vec<TickToken>,
        pub subscribes: usize,
        pub unsubscribes: usize,
    }

    impl MockHost {
        pub fn new() -> Self {
            Self::at_epoch_ms(1_700_000_000_000)
        }

        pub fn at_epoch_ms(epoch_ms: i64) -> Self {
            Self {
                epoch_ms,
                redraws: 0,
                posted: Vec::new(),
                canceled: Vec::new(),
                subscribes: 0,
                unsubscribes: 0,
            }
        }

        pub fn last_posted(&self) -> Option<(TickToken, u64)> {
            self.posted.last().copied()
        }

        pub fn count(
            &self,
            call: HostCall,
        ) -> usize {
            match call {
                HostCall::RequestRedraw => self.redraws,
                HostCall::PostDelayed => self.posted.len(),
                HostCall::Cancel => self.canceled.len(),
                HostCall::Subscribe => self.subscribes,
                HostCall::Unsubscribe => self.unsubscribes,
            }
        }
    }

    impl WatchHost for MockHost {
        fn now_utc(&self) -> DateTime<Utc> {
            DateTime::from_timestamp_millis(self.epoch_ms).expect("valid mock epoch")
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }

        fn post_delayed(
            &mut self,
            token: TickToken,
            delay_ms: u64,
        ) {
            self.posted.push((token, delay_ms));
        }

        fn cancel(
            &mut self,
            token: TickToken,
        ) {
            self.canceled.push(token);
        }

        fn subscribe_timezone(&mut self) {
            self.subscribes += 1;
        }

        fn unsubscribe_timezone(&mut self) {
            self.unsubscribes += 1;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono_tz::Tz;
    use embedded_graphics::mock_display::MockDisplay;

    use crate::config::LogoAsset;

    use super::test_support::{HostCall, MockHost};
    use super::*;

    const PALETTE: [Rgb565; 3] = [Rgb565::new(2, 6, 10), Rgb565::new(4, 8, 4), Rgb565::new(0, 18, 12)];

    fn test_config() -> FaceConfig<'static> {
        FaceConfig {
            palette: &PALETTE,
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

    fn zone_event(id: &str) -> WatchEvent {
        let mut zone_id: heapless::String<64> = heapless::String::new();
        zone_id.push_str(id).expect("zone id fits");
        WatchEvent::TimezoneChanged { zone_id }
    }

    fn tap(phase: TapPhase) -> WatchEvent {
        WatchEvent::Tap {
            phase,
            x: 100,
            y: 100,
            millis: 0,
        }
    }

    #[test]
    fn test_starts_hidden_interactive_with_first_palette_color() {
        let engine = Engine::new(test_config());
        assert_eq!(engine.mode(), DisplayMode::Interactive);
        assert_eq!(engine.background(), PALETTE[0]);
        assert!(!engine.is_ticking());
    }

    #[test]
    fn test_visible_and_interactive_starts_ticking() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());

        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: true });
        assert!(engine.is_ticking());
        assert_eq!(host.count(HostCall::Subscribe), 1);
        let (_, delay) = host.last_posted().unwrap();
        assert_eq!(delay, 0);
    }

    #[test]
    fn test_going_ambient_stops_ticking_and_repaints() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());
        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: true });

        engine.dispatch(&mut host, WatchEvent::AmbientChanged { ambient: true });
        assert!(!engine.is_ticking());
        assert_eq!(engine.mode(), DisplayMode::Ambient);
        assert!(host.redraws >= 1, "mode change requests a repaint");
        assert_eq!(host.count(HostCall::Cancel), 1, "pending tick canceled");
    }

    #[test]
    fn test_redundant_ambient_signal_requests_no_repaint() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());

        engine.dispatch(&mut host, WatchEvent::AmbientChanged { ambient: false });
        assert_eq!(host.redraws, 0, "already interactive; nothing to repaint");
    }

    #[test]
    fn test_tick_cycle_redraws_and_stays_on_grid() {
        let mut host = MockHost::at_epoch_ms(1_700_000_000_042);
        let mut engine = Engine::new(test_config());
        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: true });

        let (token, _) = host.last_posted().unwrap();
        engine.dispatch(&mut host, WatchEvent::TickFired { token });

        assert_eq!(host.redraws, 1);
        let (_, delay) = host.last_posted().unwrap();
        assert_eq!(delay, 100 - 42);
    }

    #[test]
    fn test_no_tick_acts_after_destroy() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());
        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: true });
        let (token, _) = host.last_posted().unwrap();

        engine.dispatch(&mut host, WatchEvent::Destroyed);
        assert_eq!(host.count(HostCall::Unsubscribe), 1);

        engine.dispatch(&mut host, WatchEvent::TickFired { token });
        assert_eq!(host.redraws, 0, "tick after destroy is a no-op");
        assert_eq!(host.count(HostCall::PostDelayed), 1, "nothing re-armed");
    }

    #[test]
    fn test_taps_cycle_background_and_start_cancel_do_not() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());

        engine.dispatch(&mut host, tap(TapPhase::Start));
        engine.dispatch(&mut host, tap(TapPhase::Cancel));
        assert_eq!(engine.tap_count(), 0);
        assert_eq!(engine.background(), PALETTE[0]);
        assert_eq!(host.redraws, 2, "non-tap phases still repaint");

        engine.dispatch(&mut host, tap(TapPhase::Tap));
        engine.dispatch(&mut host, tap(TapPhase::Tap));
        engine.dispatch(&mut host, tap(TapPhase::Tap));
        assert_eq!(engine.tap_count(), 3);
        assert_eq!(engine.background(), PALETTE[0], "three taps wrap a 3-palette");

        engine.dispatch(&mut host, tap(TapPhase::Tap));
        assert_eq!(engine.background(), PALETTE[1]);
    }

    #[test]
    fn test_unknown_tap_code_never_advances_palette() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());

        // A raw host code outside the known set decodes to Cancel
        engine.dispatch(&mut host, tap(TapPhase::from_code(7)));
        assert_eq!(engine.tap_count(), 0);
        assert_eq!(engine.background(), PALETTE[0]);
        assert_eq!(host.redraws, 1, "decoded Cancel still repaints");

        engine.dispatch(&mut host, tap(TapPhase::from_code(2)));
        assert_eq!(engine.tap_count(), 1, "decoded Tap advances");
    }

    #[test]
    fn test_visibility_toggling_subscribes_once_each_way() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());

        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: true });
        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: true });
        assert_eq!(host.count(HostCall::Subscribe), 1, "double subscribe guarded");

        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: false });
        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: false });
        assert_eq!(host.count(HostCall::Unsubscribe), 1);
        assert!(!engine.is_ticking());
    }

    #[test]
    fn test_timezone_change_retargets_clock() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());

        engine.dispatch(&mut host, zone_event("Asia/Tokyo"));
        assert_eq!(engine.zone(), Tz::Asia__Tokyo);
        assert_eq!(host.redraws, 1);

        engine.dispatch(&mut host, zone_event("Not/A_Zone"));
        assert_eq!(engine.zone(), Tz::UTC, "bad id falls back to default zone");
    }

    #[test]
    fn test_becoming_visible_resets_zone_to_default() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());
        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: true });
        engine.dispatch(&mut host, zone_event("Asia/Tokyo"));

        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: false });
        engine.dispatch(&mut host, WatchEvent::VisibilityChanged { visible: true });
        assert_eq!(engine.zone(), Tz::UTC, "zone changes missed while hidden are not trusted");
    }

    #[test]
    fn test_low_bit_property_applies_on_ambient_entry() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());
        engine.dispatch(&mut host, WatchEvent::PropertiesChanged { low_bit_ambient: true });
        engine.dispatch(&mut host, WatchEvent::PropertiesChanged { low_bit_ambient: false });

        engine.dispatch(&mut host, WatchEvent::AmbientChanged { ambient: true });
        assert!(engine.low_bit_ambient(), "first report wins");
        assert!(!engine.pens().hand_outline.anti_alias);
        assert!(!engine.pens().second_fill.anti_alias);
    }

    #[test]
    fn test_time_tick_heartbeat_repaints() {
        let mut host = MockHost::new();
        let mut engine = Engine::new(test_config());
        engine.dispatch(&mut host, WatchEvent::TimeTick);
        assert_eq!(host.redraws, 1);
    }

    #[test]
    fn test_draw_skips_zero_area_viewport() {
        let host = MockHost::new();
        let mut engine = Engine::new(test_config());
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();

        engine
            .draw(&mut display, ViewportBounds::new(0, 0), &host)
            .unwrap();
        assert_eq!(display.affected_area().size, Size::zero(), "no metrics, no frame");
    }

    #[test]
    fn test_draw_composes_a_frame_for_valid_bounds() {
        let host = MockHost::new();
        let mut engine = Engine::new(test_config());
        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);

        engine
            .draw(&mut display, ViewportBounds::new(64, 64), &host)
            .unwrap();
        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(PALETTE[0]));
        assert_eq!(display.get_pixel(Point::new(32, 32)), Some(Rgb565::WHITE), "hub");
    }
}
