//! Run controller
//!
//! Sequences a run: optional center tap, reaction wait, then repeated taps
//! interleaved with burst and pause delays. The controller performs no I/O.
//! Every gesture to inject and every timer to arm is queued as an [`Effect`]
//! carrying a [`Ticket`]; the host executes effects and reports back with the
//! same ticket. Only the single outstanding ticket is honoured, so results
//! and timers left over from before a pause or stop fall through as no-ops.

use serde::{Deserialize, Serialize};

use super::observer::{ObserverId, ObserverRegistry, StateObserver};
use super::state::{RunState, RunStatus, StatusUpdate};
use crate::android::input::{Gesture, ScreenMetrics, TapKind};
use crate::config::ClickConfig;
use crate::runtime::clock::Clock;
use crate::stealth::{CadencePhase, Humanizer};

/// Delay before a cancelled gesture is dispatched again (ms)
pub const RETRY_DELAY_MS: u64 = 100;

/// Identifies one outstanding gesture or timer
///
/// `epoch` advances whenever a run is started, paused, resumed or stopped;
/// `seq` advances with every effect issued. Serialized as the packed bits
/// in a signed 64-bit integer, the same value the host hands back as a `jlong`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", from = "i64")]
pub struct Ticket {
    pub epoch: u32,
    pub seq: u32,
}

impl Ticket {
    /// Pack into 64 bits: epoch in the high half, seq in the low half
    pub fn to_bits(self) -> u64 {
        ((self.epoch as u64) << 32) | self.seq as u64
    }

    pub fn from_bits(bits: u64) -> Self {
        Self {
            epoch: (bits >> 32) as u32,
            seq: (bits & 0xFFFF_FFFF) as u32,
        }
    }
}

impl From<Ticket> for i64 {
    fn from(ticket: Ticket) -> Self {
        ticket.to_bits() as i64
    }
}

impl From<i64> for Ticket {
    fn from(bits: i64) -> Self {
        Ticket::from_bits(bits as u64)
    }
}

/// Work the host must carry out on the controller's behalf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Inject a gesture, then report its outcome with `ticket`
    Dispatch { ticket: Ticket, gesture: Gesture },
    /// Fire a timer after `delay_ms`, then report it with `ticket`
    Schedule { ticket: Ticket, delay_ms: u64 },
    /// Every previously issued ticket is void; pending timers may be dropped
    CancelPending,
}

/// How the input dispatcher finished a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureOutcome {
    Completed,
    Cancelled,
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartOutcome {
    Started,
    /// A run is already active or paused
    AlreadyRunning,
    /// The input dispatcher is not ready to inject gestures
    DispatcherUnavailable,
}

#[derive(Debug, Clone)]
enum Wait {
    Gesture(Gesture),
    Timer(Timer),
}

#[derive(Debug, Clone)]
enum Timer {
    Reaction,
    NextTap,
    Retry(Gesture),
}

#[derive(Debug)]
struct Pending {
    ticket: Ticket,
    wait: Wait,
}

/// State machine driving one clicking run at a time
pub struct RunController<C: Clock> {
    humanizer: Humanizer,
    config: ClickConfig,
    state: RunState,
    clock: C,
    epoch: u32,
    seq: u32,
    pending: Option<Pending>,
    effects: Vec<Effect>,
    observers: ObserverRegistry,
}

impl<C: Clock> RunController<C> {
    /// Create an idle controller for a screen
    pub fn new(screen: ScreenMetrics, config: ClickConfig, clock: C) -> Self {
        let humanizer = Humanizer::new(screen, &config);
        Self::with_humanizer(humanizer, config, clock)
    }

    /// Create an idle controller around an existing humanizer
    pub fn with_humanizer(humanizer: Humanizer, config: ClickConfig, clock: C) -> Self {
        Self {
            humanizer,
            config,
            state: RunState::new(),
            clock,
            epoch: 0,
            seq: 0,
            pending: None,
            effects: Vec::new(),
            observers: ObserverRegistry::new(),
        }
    }

    pub fn status(&self) -> RunStatus {
        self.state.status
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// The configuration the next tap (or next start) will use
    pub fn config(&self) -> &ClickConfig {
        &self.config
    }

    pub fn humanizer(&self) -> &Humanizer {
        &self.humanizer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Take all effects queued since the last call, oldest first
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Begin a run; only valid while idle
    pub fn start(&mut self, config: ClickConfig) -> StartOutcome {
        if self.state.status != RunStatus::Idle {
            log::debug!("Ignoring start while {:?}", self.state.status);
            return StartOutcome::AlreadyRunning;
        }

        self.config = config;
        self.humanizer.configure(&self.config);
        self.state.click_count = 0;
        self.state.start_time = Some(self.clock.now_ms());
        self.state.last_click_time = None;
        self.invalidate();

        log::info!("Starting run with config '{}'", self.config.name);

        if self.config.enable_center_tap {
            self.set_status(RunStatus::CenterTap);
            let gesture = self.humanizer.center_tap();
            self.dispatch(gesture);
        } else {
            self.set_status(RunStatus::LikeBurst);
            self.like_step();
        }

        StartOutcome::Started
    }

    /// Suspend a running run, keeping its counters
    pub fn pause(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }

        self.invalidate();
        self.set_status(RunStatus::Paused);
        log::info!("Paused after {} taps", self.state.click_count);
        true
    }

    /// Continue a paused run straight into repeated taps
    ///
    /// A supplied configuration replaces the stored one; either way the stored
    /// configuration is applied without resetting the anchor.
    pub fn resume(&mut self, config: Option<ClickConfig>) -> bool {
        if self.state.status != RunStatus::Paused {
            return false;
        }

        if let Some(config) = config {
            self.config = config;
        }
        self.humanizer.update_config(&self.config);
        self.invalidate();

        log::info!("Resuming at {} taps", self.state.click_count);
        self.set_status(RunStatus::LikeBurst);
        self.like_step();
        true
    }

    /// Abort from any state and reset the counters
    pub fn stop(&mut self) {
        self.invalidate();
        self.state.click_count = 0;
        self.state.start_time = None;
        self.state.last_click_time = None;
        self.set_status(RunStatus::Idle);
    }

    /// Store a new configuration; a running run picks it up on the next tap
    ///
    /// While paused the change waits for [`RunController::resume`].
    pub fn update_config(&mut self, config: ClickConfig) {
        self.config = config;

        if self.state.is_running() {
            self.humanizer.update_config(&self.config);
        }
    }

    /// Re-target: put the anchor back at the applied configuration's ratios
    ///
    /// Pair with [`RunController::update_config`] to move a running target.
    /// Accumulated drift is discarded; counters and status are untouched.
    pub fn reset_anchor(&mut self) {
        self.humanizer.reset_anchor();
        log::debug!("Anchor reset to {:?}", self.humanizer.coordinates().anchor());
    }

    /// Start when idle, resume when paused, pause otherwise
    pub fn toggle(&mut self, config: ClickConfig) -> RunStatus {
        match self.state.status {
            RunStatus::Idle => {
                self.start(config);
            }
            RunStatus::Paused => {
                self.resume(Some(config));
            }
            _ => {
                self.pause();
            }
        }
        self.state.status
    }

    /// Report the outcome of a dispatched gesture
    pub fn on_gesture_result(&mut self, ticket: Ticket, outcome: GestureOutcome) {
        let gesture = match self.take_pending(ticket) {
            Some(Wait::Gesture(gesture)) => gesture,
            Some(wait) => {
                self.pending = Some(Pending { ticket, wait });
                return;
            }
            None => {
                log::debug!("Dropping stale gesture result {:?}", ticket);
                return;
            }
        };

        match outcome {
            GestureOutcome::Completed => match gesture.kind {
                TapKind::Center => self.on_center_complete(),
                TapKind::Like => self.on_like_complete(),
            },
            GestureOutcome::Cancelled => {
                if self.state.is_running() {
                    log::warn!("{:?} tap cancelled, retrying in {}ms", gesture.kind, RETRY_DELAY_MS);
                    self.arm(Timer::Retry(gesture), RETRY_DELAY_MS);
                }
            }
        }
    }

    /// Report that a scheduled timer fired
    pub fn on_timer(&mut self, ticket: Ticket) {
        let timer = match self.take_pending(ticket) {
            Some(Wait::Timer(timer)) => timer,
            Some(wait) => {
                self.pending = Some(Pending { ticket, wait });
                return;
            }
            None => {
                log::debug!("Dropping stale timer {:?}", ticket);
                return;
            }
        };

        match timer {
            Timer::Reaction => {
                if self.state.status == RunStatus::ReactionWait {
                    self.set_status(RunStatus::LikeBurst);
                    self.like_step();
                }
            }
            Timer::NextTap => self.like_step(),
            Timer::Retry(gesture) => {
                if self.state.is_running() {
                    self.dispatch(gesture);
                }
            }
        }
    }

    fn on_center_complete(&mut self) {
        self.set_status(RunStatus::ReactionWait);
        let reaction = self.humanizer.reaction_time();
        log::debug!("Center tap done, reacting in {}ms", reaction);
        self.arm(Timer::Reaction, reaction);
    }

    fn on_like_complete(&mut self) {
        self.state.click_count = self.state.click_count.saturating_add(1);
        self.state.last_click_time = Some(self.clock.now_ms());
        self.observers.publish(self.state.update());

        let interval = self.humanizer.next_interval();
        let next_status = match interval.phase {
            CadencePhase::Burst => RunStatus::LikeBurst,
            CadencePhase::Pause => RunStatus::LikePause,
        };
        self.set_status(next_status);
        self.arm(Timer::NextTap, interval.duration_ms);
    }

    fn like_step(&mut self) {
        if !self.state.status.is_liking() {
            return;
        }

        let run_duration = self.state.run_duration(self.clock.now_ms());
        if self.humanizer.should_stop(self.state.click_count, run_duration) {
            log::info!(
                "Run limit reached: {} taps in {}ms",
                self.state.click_count,
                run_duration
            );
            self.finish();
            return;
        }

        let gesture = self.humanizer.like_tap();
        self.dispatch(gesture);
    }

    /// End a run that hit its limits; the final tap count stays readable
    fn finish(&mut self) {
        self.invalidate();
        self.state.start_time = None;
        self.set_status(RunStatus::Idle);
    }

    fn dispatch(&mut self, gesture: Gesture) {
        let ticket = self.next_ticket();
        log::debug!(
            "Dispatching {:?} tap at {:?} for {}ms",
            gesture.kind,
            gesture.press_point(),
            gesture.duration_ms
        );
        self.pending = Some(Pending {
            ticket,
            wait: Wait::Gesture(gesture.clone()),
        });
        self.effects.push(Effect::Dispatch { ticket, gesture });
    }

    fn arm(&mut self, timer: Timer, delay_ms: u64) {
        let ticket = self.next_ticket();
        self.pending = Some(Pending {
            ticket,
            wait: Wait::Timer(timer),
        });
        self.effects.push(Effect::Schedule { ticket, delay_ms });
    }

    fn next_ticket(&mut self) -> Ticket {
        self.seq = self.seq.wrapping_add(1);
        Ticket {
            epoch: self.epoch,
            seq: self.seq,
        }
    }

    fn take_pending(&mut self, ticket: Ticket) -> Option<Wait> {
        match self.pending.take() {
            Some(pending) if pending.ticket == ticket => Some(pending.wait),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Void every outstanding ticket
    fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.pending.take().is_some() {
            self.effects.push(Effect::CancelPending);
        }
    }

    fn set_status(&mut self, status: RunStatus) {
        if self.state.status != status {
            log::debug!("{:?} -> {:?}", self.state.status, status);
            self.state.status = status;
            self.observers.publish(self.state.update());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::runtime::clock::ManualClock;

    /// Executes controller effects by hand against a manual clock
    struct Harness {
        controller: RunController<ManualClock>,
        clock: ManualClock,
        updates: Arc<Mutex<Vec<StatusUpdate>>>,
        dispatched: Vec<(u64, Gesture)>,
        in_flight: VecDeque<Ticket>,
        timers: VecDeque<(Ticket, u64)>,
    }

    impl Harness {
        fn new(config: ClickConfig) -> Self {
            let clock = ManualClock::new();
            let humanizer = Humanizer::with_seed(ScreenMetrics::default(), &config, 99);
            let mut controller = RunController::with_humanizer(humanizer, config, clock.clone());

            let updates = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&updates);
            controller.subscribe(Box::new(move |update: StatusUpdate| {
                sink.lock().unwrap().push(update);
            }));

            Self {
                controller,
                clock,
                updates,
                dispatched: Vec::new(),
                in_flight: VecDeque::new(),
                timers: VecDeque::new(),
            }
        }

        fn collect(&mut self) {
            for effect in self.controller.drain_effects() {
                match effect {
                    Effect::Dispatch { ticket, gesture } => {
                        self.dispatched.push((self.clock.now_ms(), gesture));
                        self.in_flight.push_back(ticket);
                    }
                    Effect::Schedule { ticket, delay_ms } => self.timers.push_back((ticket, delay_ms)),
                    Effect::CancelPending => self.timers.clear(),
                }
            }
        }

        /// Answer the oldest in-flight gesture
        fn respond(&mut self, outcome: GestureOutcome) -> bool {
            self.collect();
            let Some(ticket) = self.in_flight.pop_front() else {
                return false;
            };
            self.controller.on_gesture_result(ticket, outcome);
            self.collect();
            true
        }

        /// Advance the clock to the oldest timer and fire it
        fn fire(&mut self) -> bool {
            self.collect();
            let Some((ticket, delay)) = self.timers.pop_front() else {
                return false;
            };
            self.clock.advance(delay);
            self.controller.on_timer(ticket);
            self.collect();
            true
        }

        /// Complete every gesture and fire every timer until the run ends
        fn run_to_idle(&mut self, max_steps: usize) {
            for _ in 0..max_steps {
                self.collect();
                if self.controller.status() == RunStatus::Idle {
                    return;
                }
                if !self.respond(GestureOutcome::Completed) && !self.fire() {
                    return;
                }
            }
        }

        /// Published statuses with consecutive repeats folded
        fn statuses(&self) -> Vec<RunStatus> {
            let mut statuses: Vec<RunStatus> =
                self.updates.lock().unwrap().iter().map(|u| u.status).collect();
            statuses.dedup();
            statuses
        }
    }

    fn burst_only(interval: u64) -> ClickConfig {
        ClickConfig {
            enable_center_tap: false,
            pause_probability: 0.0,
            burst_interval_min: interval,
            burst_interval_max: interval,
            ..Default::default()
        }
    }

    #[test]
    fn test_three_taps_then_idle() {
        let config = ClickConfig {
            max_click_count: 3,
            ..burst_only(50)
        };
        let mut h = Harness::new(config.clone());

        assert_eq!(h.controller.start(config), StartOutcome::Started);
        assert_eq!(h.controller.status(), RunStatus::LikeBurst);

        h.run_to_idle(100);

        let times: Vec<u64> = h.dispatched.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0, 50, 100]);
        assert_eq!(h.controller.status(), RunStatus::Idle);
        assert_eq!(h.controller.state().click_count, 3);
        assert_eq!(h.statuses(), vec![RunStatus::LikeBurst, RunStatus::Idle]);
        assert_eq!(h.updates.lock().unwrap().last().unwrap().click_count, 3);
    }

    #[test]
    fn test_start_pause_resume_stop_sequence() {
        let config = ClickConfig {
            pause_probability: 0.0,
            ..Default::default()
        };
        let mut h = Harness::new(config.clone());

        h.controller.start(config);
        assert_eq!(h.controller.status(), RunStatus::CenterTap);
        assert_eq!(h.dispatched[0].1.kind, TapKind::Center);

        h.respond(GestureOutcome::Completed);
        assert_eq!(h.controller.status(), RunStatus::ReactionWait);
        let (_, reaction) = h.timers[0];
        assert!((800..=1800).contains(&reaction));

        h.fire();
        assert_eq!(h.controller.status(), RunStatus::LikeBurst);
        h.respond(GestureOutcome::Completed);
        assert_eq!(h.controller.state().click_count, 1);

        assert!(h.controller.pause());
        let dispatched_before = h.dispatched.len();
        assert!(!h.fire());
        assert_eq!(h.dispatched.len(), dispatched_before);
        assert_eq!(h.controller.state().click_count, 1);
        assert!(h.controller.state().start_time.is_some());

        assert!(h.controller.resume(None));
        h.collect();
        assert_eq!(h.dispatched.len(), dispatched_before + 1);
        assert_eq!(h.dispatched.last().unwrap().1.kind, TapKind::Like);

        h.controller.stop();
        assert_eq!(h.controller.state().click_count, 0);
        assert!(h.controller.state().start_time.is_none());
        assert_eq!(
            h.statuses(),
            vec![
                RunStatus::CenterTap,
                RunStatus::ReactionWait,
                RunStatus::LikeBurst,
                RunStatus::Paused,
                RunStatus::LikeBurst,
                RunStatus::Idle,
            ]
        );
    }

    #[test]
    fn test_cancelled_tap_is_retried_and_counted_once() {
        let config = ClickConfig {
            max_click_count: 1,
            ..burst_only(50)
        };
        let mut h = Harness::new(config.clone());
        h.controller.start(config);

        h.respond(GestureOutcome::Cancelled);
        assert_eq!(h.controller.state().click_count, 0);
        assert_eq!(h.timers[0].1, RETRY_DELAY_MS);

        h.fire();
        assert_eq!(h.dispatched.len(), 2);
        assert_eq!(h.dispatched[1].0, RETRY_DELAY_MS);
        assert_eq!(h.dispatched[0].1, h.dispatched[1].1);

        h.run_to_idle(20);
        assert_eq!(h.controller.status(), RunStatus::Idle);
        assert_eq!(h.controller.state().click_count, 1);
        assert_eq!(h.dispatched.len(), 2);
    }

    #[test]
    fn test_late_completion_after_stop_is_ignored() {
        let config = burst_only(50);
        let mut h = Harness::new(config.clone());
        h.controller.start(config);
        h.collect();
        let ticket = h.in_flight[0];

        h.controller.stop();
        h.controller.drain_effects();
        h.controller.on_gesture_result(ticket, GestureOutcome::Completed);

        assert_eq!(h.controller.state().click_count, 0);
        assert_eq!(h.controller.status(), RunStatus::Idle);
        assert!(h.controller.drain_effects().is_empty());
    }

    #[test]
    fn test_completion_from_before_pause_is_ignored() {
        let config = burst_only(50);
        let mut h = Harness::new(config.clone());
        h.controller.start(config);
        h.collect();
        let stale = h.in_flight.pop_front().unwrap();

        h.controller.pause();
        h.controller.resume(None);
        h.collect();

        h.controller.on_gesture_result(stale, GestureOutcome::Completed);
        assert_eq!(h.controller.state().click_count, 0);

        h.respond(GestureOutcome::Completed);
        assert_eq!(h.controller.state().click_count, 1);
    }

    #[test]
    fn test_timer_from_before_pause_is_ignored() {
        let config = burst_only(50);
        let mut h = Harness::new(config.clone());
        h.controller.start(config);
        h.respond(GestureOutcome::Completed);
        let (stale, _) = h.timers[0];

        h.controller.pause();
        h.controller.on_timer(stale);
        h.collect();

        assert_eq!(h.dispatched.len(), 1);
        assert_eq!(h.controller.status(), RunStatus::Paused);
    }

    #[test]
    fn test_invalid_transitions_are_noops() {
        let mut h = Harness::new(ClickConfig::default());

        assert!(!h.controller.resume(None));
        assert!(!h.controller.pause());
        h.controller.stop();
        assert!(h.controller.drain_effects().is_empty());
        assert!(h.statuses().is_empty());

        h.controller.start(ClickConfig::default());
        assert_eq!(
            h.controller.start(ClickConfig::default()),
            StartOutcome::AlreadyRunning
        );
        h.controller.pause();
        assert_eq!(
            h.controller.start(ClickConfig::default()),
            StartOutcome::AlreadyRunning
        );
    }

    #[test]
    fn test_live_config_update_applies_to_next_tap() {
        let config = ClickConfig {
            drift_probability: 0.0,
            ..burst_only(50)
        };
        let mut h = Harness::new(config.clone());
        h.controller.start(config.clone());
        h.respond(GestureOutcome::Completed);
        let anchor = h.controller.humanizer().coordinates().anchor();

        h.controller.update_config(ClickConfig {
            like_jitter_radius: 0.0,
            ..config
        });
        h.fire();

        let press = h.dispatched.last().unwrap().1.press_point().unwrap();
        assert_eq!(press, anchor);
        assert_eq!(h.controller.humanizer().coordinates().anchor(), anchor);
    }

    #[test]
    fn test_retarget_while_running() {
        let config = ClickConfig {
            drift_probability: 1.0,
            drift_range: 30.0,
            ..burst_only(50)
        };
        let mut h = Harness::new(config.clone());
        h.controller.start(config.clone());
        h.respond(GestureOutcome::Completed);
        h.fire();
        h.respond(GestureOutcome::Completed);

        let target = config.with_scope_target(0.2, 0.3, 0.0);
        h.controller.update_config(target);
        h.controller.reset_anchor();

        let expected = ScreenMetrics::default().at_ratio(0.2, 0.3);
        assert_eq!(h.controller.humanizer().coordinates().anchor(), expected);
        assert_eq!(h.controller.state().click_count, 2);
        assert!(h.controller.status().is_liking());
    }

    #[test]
    fn test_config_update_while_paused_waits_for_resume() {
        let config = burst_only(50);
        let mut h = Harness::new(config.clone());
        h.controller.start(config.clone());
        h.controller.pause();

        h.controller.update_config(ClickConfig {
            like_jitter_radius: 0.0,
            ..config
        });
        assert_eq!(h.controller.config().like_jitter_radius, 0.0);
        assert_eq!(
            h.controller.humanizer().coordinates().config().like_jitter_radius,
            50.0
        );

        h.controller.resume(None);
        assert_eq!(
            h.controller.humanizer().coordinates().config().like_jitter_radius,
            0.0
        );
    }

    #[test]
    fn test_toggle_cycles_through_start_pause_resume() {
        let config = ClickConfig::default();
        let mut h = Harness::new(config.clone());

        assert_eq!(h.controller.toggle(config.clone()), RunStatus::CenterTap);
        assert_eq!(h.controller.toggle(config.clone()), RunStatus::Paused);
        assert_eq!(h.controller.toggle(config), RunStatus::LikeBurst);
    }

    #[test]
    fn test_run_duration_limit() {
        let config = ClickConfig {
            max_run_duration: 100,
            ..burst_only(60)
        };
        let mut h = Harness::new(config.clone());
        h.controller.start(config);

        h.run_to_idle(100);

        let times: Vec<u64> = h.dispatched.iter().map(|(t, _)| *t).collect();
        assert_eq!(times, vec![0, 60]);
        assert_eq!(h.controller.state().click_count, 2);
        assert_eq!(h.controller.status(), RunStatus::Idle);
    }

    #[test]
    fn test_pause_phase_is_reported() {
        let config = ClickConfig {
            pause_probability: 1.0,
            pause_interval_min: 400,
            pause_interval_max: 400,
            max_click_count: 2,
            ..burst_only(50)
        };
        let mut h = Harness::new(config.clone());
        h.controller.start(config);

        h.respond(GestureOutcome::Completed);
        assert_eq!(h.controller.status(), RunStatus::LikePause);
        assert_eq!(h.timers[0].1, 400);

        h.run_to_idle(20);
        assert_eq!(
            h.statuses(),
            vec![RunStatus::LikeBurst, RunStatus::LikePause, RunStatus::Idle]
        );
    }

    #[test]
    fn test_ticket_bits() {
        let ticket = Ticket { epoch: 7, seq: 0xDEAD_BEEF };
        assert_eq!(Ticket::from_bits(ticket.to_bits()), ticket);
    }

    #[test]
    fn test_ticket_serializes_as_packed_bits() {
        let ticket = Ticket { epoch: 3, seq: 9 };
        assert_eq!(serde_json::to_string(&ticket).unwrap(), ((3u64 << 32) | 9).to_string());

        // High epochs wrap into negative jlongs and still come back intact
        let late = Ticket { epoch: u32::MAX, seq: 1 };
        let json = serde_json::to_string(&late).unwrap();
        assert!(json.starts_with('-'));
        assert_eq!(serde_json::from_str::<Ticket>(&json).unwrap(), late);
    }
}
