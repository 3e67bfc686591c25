//! Entropy Clicker CLI - desktop entry point
//!
//! Drives a full run against a simulated dispatcher so the tap stream can be
//! inspected without an Android device.
//!
//! Usage: `entropy [config.json]`

use std::env;
use std::fs;
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use entropy_clicker::android::{Gesture, ScreenMetrics};
use entropy_clicker::clicker::StatusUpdate;
use entropy_clicker::runtime::{GestureDispatcher, GestureReply, SystemClock};
use entropy_clicker::{ClickConfig, RunController, RunStatus, Runner, StartOutcome};

/// Taps performed when no config file is given
const DEFAULT_TAP_LIMIT: u32 = 20;

/// Sleeps for the press duration and prints every tap
struct SimulatedDispatcher {
    taps: u32,
}

impl GestureDispatcher for SimulatedDispatcher {
    fn dispatch(&mut self, gesture: Gesture, reply: GestureReply) {
        self.taps += 1;
        if let Some(point) = gesture.press_point() {
            println!(
                "  tap #{:<4} {:?} at ({:7.1}, {:7.1}) held {} ms",
                self.taps, gesture.kind, point.x, point.y, gesture.duration_ms
            );
        }
        thread::sleep(Duration::from_millis(gesture.duration_ms));
        reply.completed();
    }
}

fn load_config() -> Result<ClickConfig, String> {
    match env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read {}: {}", path, e))?;
            ClickConfig::from_json(&json).map_err(|e| format!("Invalid config {}: {}", path, e))
        }
        None => Ok(ClickConfig {
            max_click_count: DEFAULT_TAP_LIMIT,
            ..Default::default()
        }),
    }
}

fn main() -> ExitCode {
    println!("Entropy Clicker - human-like tap simulator");
    println!("==========================================");
    println!();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Configuration:");
    println!("  - Style: {}", config.style_preset.display_name());
    println!("  - Center tap: {}", config.enable_center_tap);
    println!(
        "  - Burst interval: {}-{} ms",
        config.burst_interval_min, config.burst_interval_max
    );
    println!("  - Pause probability: {:.0}%", config.pause_probability * 100.0);
    println!("  - Max clicks: {}", config.max_click_count);
    println!("  - Max duration: {} ms", config.max_run_duration);
    println!();

    if config.max_click_count == 0 && config.max_run_duration == 0 {
        println!("Warning: no click or duration limit, press Ctrl+C to end the run.");
        println!();
    }

    let controller =
        RunController::new(ScreenMetrics::default(), config.clone(), SystemClock::new());
    let handle = Runner::spawn(controller, SimulatedDispatcher { taps: 0 });

    let (updates_tx, updates) = mpsc::channel();
    let subscribed = handle.subscribe(move |update: StatusUpdate| {
        let _ = updates_tx.send(update);
    });
    if let Err(e) = subscribed {
        eprintln!("Failed to observe run: {}", e);
        return ExitCode::FAILURE;
    }

    match handle.start(config) {
        Ok(StartOutcome::Started) => {}
        Ok(outcome) => {
            eprintln!("Run not started: {:?}", outcome);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Run not started: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let mut last = RunStatus::Idle;
    for update in updates.iter() {
        if update.status != last {
            println!("[{:?}] clicks: {}", update.status, update.click_count);
            last = update.status;
        }
        if update.status == RunStatus::Idle {
            break;
        }
    }

    match handle.snapshot() {
        Ok(state) => {
            println!();
            println!("Run finished after {} clicks.", state.click_count);
        }
        Err(e) => eprintln!("Failed to read final state: {}", e),
    }

    handle.shutdown();
    ExitCode::SUCCESS
}
