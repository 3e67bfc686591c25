//! Single-threaded run loop
//!
//! Owns a [`RunController`] on a worker thread. Host commands, gesture results
//! and timer expiries all arrive through one channel, so the controller only
//! ever sees one event at a time regardless of which thread produced it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::clock::Clock;
use super::dispatcher::GestureDispatcher;
use crate::clicker::{
    Effect, GestureOutcome, ObserverId, RunController, RunState, RunStatus, StartOutcome,
    StateObserver, Ticket,
};
use crate::config::ClickConfig;
use crate::error::{ClickerError, Result};

enum Message {
    Command(Command),
    Gesture { ticket: Ticket, outcome: GestureOutcome },
}

enum Command {
    Start(ClickConfig, Sender<StartOutcome>),
    Pause,
    Resume(Option<ClickConfig>),
    Stop,
    Toggle(ClickConfig, Sender<RunStatus>),
    UpdateConfig(ClickConfig),
    Subscribe(Box<dyn StateObserver>, Sender<ObserverId>),
    Unsubscribe(ObserverId),
    Snapshot(Sender<RunState>),
    Shutdown,
}

/// Resolves one dispatched gesture; may be sent to and used from any thread
pub struct GestureReply {
    ticket: Ticket,
    tx: Sender<Message>,
}

impl GestureReply {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn completed(self) {
        self.resolve(GestureOutcome::Completed);
    }

    pub fn cancelled(self) {
        self.resolve(GestureOutcome::Cancelled);
    }

    pub fn resolve(self, outcome: GestureOutcome) {
        // The loop may already be gone; a late result has nowhere to go
        let _ = self.tx.send(Message::Gesture {
            ticket: self.ticket,
            outcome,
        });
    }
}

/// Spawns run loops
pub struct Runner;

impl Runner {
    /// Move `controller` onto a worker thread driving `dispatcher`
    pub fn spawn<C, D>(controller: RunController<C>, dispatcher: D) -> RunnerHandle
    where
        C: Clock + 'static,
        D: GestureDispatcher + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let event_loop = EventLoop {
            controller,
            dispatcher,
            timers: BinaryHeap::new(),
            timer_seq: 0,
            tx: tx.clone(),
            rx,
        };

        let worker = thread::spawn(move || event_loop.run());

        RunnerHandle {
            tx,
            worker: Some(worker),
        }
    }
}

/// Command side of a running loop; dropping it shuts the loop down
pub struct RunnerHandle {
    tx: Sender<Message>,
    worker: Option<JoinHandle<()>>,
}

impl RunnerHandle {
    pub fn start(&self, config: ClickConfig) -> Result<StartOutcome> {
        let (reply, outcome) = mpsc::channel();
        self.send(Command::Start(config, reply))?;
        outcome.recv().map_err(|_| ClickerError::RunnerClosed)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    pub fn resume(&self, config: Option<ClickConfig>) -> Result<()> {
        self.send(Command::Resume(config))
    }

    pub fn stop(&self) -> Result<()> {
        self.send(Command::Stop)
    }

    pub fn toggle(&self, config: ClickConfig) -> Result<RunStatus> {
        let (reply, status) = mpsc::channel();
        self.send(Command::Toggle(config, reply))?;
        status.recv().map_err(|_| ClickerError::RunnerClosed)
    }

    pub fn update_config(&self, config: ClickConfig) -> Result<()> {
        self.send(Command::UpdateConfig(config))
    }

    pub fn subscribe<O>(&self, observer: O) -> Result<ObserverId>
    where
        O: StateObserver + 'static,
    {
        let (reply, id) = mpsc::channel();
        self.send(Command::Subscribe(Box::new(observer), reply))?;
        id.recv().map_err(|_| ClickerError::RunnerClosed)
    }

    pub fn unsubscribe(&self, id: ObserverId) -> Result<()> {
        self.send(Command::Unsubscribe(id))
    }

    /// Copy of the controller's run state
    pub fn snapshot(&self) -> Result<RunState> {
        let (reply, state) = mpsc::channel();
        self.send(Command::Snapshot(reply))?;
        state.recv().map_err(|_| ClickerError::RunnerClosed)
    }

    /// Stop any run and wait for the worker thread to exit
    pub fn shutdown(mut self) {
        self.close();
    }

    fn send(&self, command: Command) -> Result<()> {
        self.tx
            .send(Message::Command(command))
            .map_err(|_| ClickerError::RunnerClosed)
    }

    fn close(&mut self) {
        let _ = self.tx.send(Message::Command(Command::Shutdown));
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Runner thread panicked");
            }
        }
    }
}

impl Drop for RunnerHandle {
    fn drop(&mut self) {
        self.close();
    }
}

struct EventLoop<C: Clock, D: GestureDispatcher> {
    controller: RunController<C>,
    dispatcher: D,
    /// (deadline, insertion order, ticket bits)
    timers: BinaryHeap<Reverse<(u64, u64, u64)>>,
    timer_seq: u64,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl<C: Clock, D: GestureDispatcher> EventLoop<C, D> {
    fn run(mut self) {
        log::debug!("Runner loop started");

        loop {
            let message = match self.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_sub(self.now());
                    match self.rx.recv_timeout(Duration::from_millis(wait)) {
                        Ok(message) => Some(message),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.rx.recv() {
                    Ok(message) => Some(message),
                    Err(_) => break,
                },
            };

            match message {
                Some(Message::Command(Command::Shutdown)) => {
                    self.controller.stop();
                    self.controller.drain_effects();
                    break;
                }
                Some(message) => self.handle(message),
                None => {}
            }

            self.fire_due_timers();
            self.flush();
        }

        log::debug!("Runner loop exited");
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Gesture { ticket, outcome } => {
                self.controller.on_gesture_result(ticket, outcome);
            }
            Message::Command(command) => self.handle_command(command),
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start(config, reply) => {
                let outcome = if self.dispatcher.is_ready() {
                    self.controller.start(config)
                } else {
                    log::warn!("Gesture dispatcher not ready, not starting");
                    StartOutcome::DispatcherUnavailable
                };
                let _ = reply.send(outcome);
            }
            Command::Pause => {
                self.controller.pause();
            }
            Command::Resume(config) => {
                self.controller.resume(config);
            }
            Command::Stop => self.controller.stop(),
            Command::Toggle(config, reply) => {
                let status = if self.controller.status() == RunStatus::Idle
                    && !self.dispatcher.is_ready()
                {
                    log::warn!("Gesture dispatcher not ready, not starting");
                    RunStatus::Idle
                } else {
                    self.controller.toggle(config)
                };
                let _ = reply.send(status);
            }
            Command::UpdateConfig(config) => self.controller.update_config(config),
            Command::Subscribe(observer, reply) => {
                let _ = reply.send(self.controller.subscribe(observer));
            }
            Command::Unsubscribe(id) => {
                self.controller.unsubscribe(id);
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.controller.state().clone());
            }
            Command::Shutdown => {}
        }
    }

    fn fire_due_timers(&mut self) {
        let now = self.now();

        while let Some(Reverse((deadline, _, bits))) = self.timers.peek().copied() {
            if deadline > now {
                break;
            }
            self.timers.pop();
            self.controller.on_timer(Ticket::from_bits(bits));
        }
    }

    fn flush(&mut self) {
        for effect in self.controller.drain_effects() {
            match effect {
                Effect::Dispatch { ticket, gesture } => {
                    let reply = GestureReply {
                        ticket,
                        tx: self.tx.clone(),
                    };
                    self.dispatcher.dispatch(gesture, reply);
                }
                Effect::Schedule { ticket, delay_ms } => {
                    let deadline = self.now().saturating_add(delay_ms);
                    self.timer_seq += 1;
                    self.timers
                        .push(Reverse((deadline, self.timer_seq, ticket.to_bits())));
                }
                Effect::CancelPending => self.timers.clear(),
            }
        }
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timers.peek().map(|Reverse((deadline, _, _))| *deadline)
    }

    fn now(&self) -> u64 {
        self.controller.clock().now_ms()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::android::input::{Gesture, ScreenMetrics};
    use crate::clicker::StatusUpdate;
    use crate::runtime::clock::SystemClock;

    const WAIT: Duration = Duration::from_secs(5);

    struct ImmediateDispatcher {
        count: Arc<AtomicUsize>,
    }

    impl GestureDispatcher for ImmediateDispatcher {
        fn dispatch(&mut self, _gesture: Gesture, reply: GestureReply) {
            self.count.fetch_add(1, Ordering::SeqCst);
            reply.completed();
        }
    }

    struct HoldingDispatcher {
        held: Arc<Mutex<Vec<GestureReply>>>,
    }

    impl GestureDispatcher for HoldingDispatcher {
        fn dispatch(&mut self, _gesture: Gesture, reply: GestureReply) {
            self.held.lock().unwrap().push(reply);
        }
    }

    struct OfflineDispatcher;

    impl GestureDispatcher for OfflineDispatcher {
        fn is_ready(&self) -> bool {
            false
        }

        fn dispatch(&mut self, _gesture: Gesture, _reply: GestureReply) {
            panic!("offline dispatcher must never be used");
        }
    }

    fn fast_config(max_click_count: u32) -> ClickConfig {
        ClickConfig {
            enable_center_tap: false,
            pause_probability: 0.0,
            burst_interval_min: 1,
            burst_interval_max: 2,
            max_click_count,
            ..Default::default()
        }
    }

    fn controller(config: &ClickConfig) -> RunController<SystemClock> {
        RunController::new(ScreenMetrics::default(), config.clone(), SystemClock::new())
    }

    #[test]
    fn test_runs_to_click_limit() {
        let config = fast_config(5);
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Runner::spawn(
            controller(&config),
            ImmediateDispatcher {
                count: Arc::clone(&count),
            },
        );

        let (updates_tx, updates) = mpsc::channel();
        handle
            .subscribe(move |update: StatusUpdate| {
                let _ = updates_tx.send(update);
            })
            .unwrap();

        assert_eq!(handle.start(config).unwrap(), StartOutcome::Started);

        loop {
            let update = updates.recv_timeout(WAIT).expect("run never finished");
            if update.status == RunStatus::Idle {
                break;
            }
        }

        assert_eq!(handle.snapshot().unwrap().click_count, 5);
        assert_eq!(count.load(Ordering::SeqCst), 5);
        handle.shutdown();
    }

    #[test]
    fn test_unready_dispatcher_does_not_start() {
        let config = fast_config(0);
        let handle = Runner::spawn(controller(&config), OfflineDispatcher);

        assert_eq!(
            handle.start(config.clone()).unwrap(),
            StartOutcome::DispatcherUnavailable
        );
        assert_eq!(handle.toggle(config).unwrap(), RunStatus::Idle);
        assert_eq!(handle.snapshot().unwrap().status, RunStatus::Idle);
    }

    #[test]
    fn test_far_future_timer_does_not_overflow() {
        let config = ClickConfig {
            enable_center_tap: true,
            reaction_time_min: u64::MAX,
            reaction_time_max: u64::MAX,
            ..fast_config(0)
        };
        let count = Arc::new(AtomicUsize::new(0));
        let handle = Runner::spawn(
            controller(&config),
            ImmediateDispatcher {
                count: Arc::clone(&count),
            },
        );

        let (updates_tx, updates) = mpsc::channel();
        handle
            .subscribe(move |update: StatusUpdate| {
                let _ = updates_tx.send(update);
            })
            .unwrap();

        assert_eq!(handle.start(config).unwrap(), StartOutcome::Started);
        loop {
            let update = updates.recv_timeout(WAIT).expect("center tap never finished");
            if update.status == RunStatus::ReactionWait {
                break;
            }
        }

        handle.stop().unwrap();
        assert_eq!(handle.snapshot().unwrap().status, RunStatus::Idle);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        handle.shutdown();
    }

    #[test]
    fn test_late_reply_after_pause_is_ignored() {
        let config = fast_config(0);
        let held = Arc::new(Mutex::new(Vec::new()));
        let handle = Runner::spawn(
            controller(&config),
            HoldingDispatcher {
                held: Arc::clone(&held),
            },
        );

        handle.start(config).unwrap();
        handle.pause().unwrap();
        assert_eq!(handle.snapshot().unwrap().status, RunStatus::Paused);

        let reply = held.lock().unwrap().pop().expect("tap was dispatched");
        reply.completed();

        let state = handle.snapshot().unwrap();
        assert_eq!(state.status, RunStatus::Paused);
        assert_eq!(state.click_count, 0);

        handle.stop().unwrap();
        assert_eq!(handle.snapshot().unwrap().status, RunStatus::Idle);
    }
}
