//! JNI function exports for Android integration
//!
//! These functions are called from the Kotlin accessibility service. The
//! service owns the real gesture dispatcher and main-looper handler, so the
//! core hands it work as JSON effects (`pollEffects`) and the service reports
//! outcomes back with the effect's ticket (`onGestureResult`, `onTimerFired`).
//! All calls arrive on the service's main looper, which serializes them.

use std::sync::Mutex;

use jni::objects::{JClass, JObject, JString};
use jni::sys::{jboolean, jint, jlong, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use once_cell::sync::Lazy;

use super::input::ScreenMetrics;
use crate::clicker::{GestureOutcome, RunController, RunStatus, StartOutcome, Ticket};
use crate::config::ClickConfig;
use crate::error::{ClickerError, Result};
use crate::runtime::SystemClock;

/// Host-facing wrapper around a controller
pub struct Bridge {
    controller: RunController<SystemClock>,
}

impl Bridge {
    /// Create a bridge for the given screen size
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let screen = ScreenMetrics::new(width, height)?;
        Ok(Self {
            controller: RunController::new(screen, ClickConfig::default(), SystemClock::new()),
        })
    }

    /// Start a run; `None` uses the default configuration
    pub fn start_json(&mut self, config_json: Option<&str>) -> Result<StartOutcome> {
        let config = parse_or_default(config_json)?;
        Ok(self.controller.start(config))
    }

    pub fn pause(&mut self) -> bool {
        self.controller.pause()
    }

    pub fn resume_json(&mut self, config_json: Option<&str>) -> Result<bool> {
        let config = config_json.map(ClickConfig::from_json).transpose()?;
        Ok(self.controller.resume(config))
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    /// Store `config_json` and move the anchor to its ratio position
    pub fn retarget_json(&mut self, config_json: &str) -> Result<()> {
        let config = ClickConfig::from_json(config_json)?;
        self.controller.update_config(config);
        self.controller.reset_anchor();
        Ok(())
    }

    pub fn toggle_json(&mut self, config_json: Option<&str>) -> Result<RunStatus> {
        let config = parse_or_default(config_json)?;
        Ok(self.controller.toggle(config))
    }

    pub fn update_config_json(&mut self, config_json: &str) -> Result<()> {
        let config = ClickConfig::from_json(config_json)?;
        self.controller.update_config(config);
        Ok(())
    }

    pub fn on_gesture_result(&mut self, ticket_bits: u64, completed: bool) {
        let outcome = if completed {
            GestureOutcome::Completed
        } else {
            GestureOutcome::Cancelled
        };
        self.controller
            .on_gesture_result(Ticket::from_bits(ticket_bits), outcome);
    }

    pub fn on_timer(&mut self, ticket_bits: u64) {
        self.controller.on_timer(Ticket::from_bits(ticket_bits));
    }

    /// Drain pending effects as a JSON array
    pub fn poll_effects_json(&mut self) -> Result<String> {
        Ok(serde_json::to_string(&self.controller.drain_effects())?)
    }

    /// Current run state as JSON
    pub fn state_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.controller.state())?)
    }
}

fn parse_or_default(config_json: Option<&str>) -> Result<ClickConfig> {
    match config_json {
        Some(json) => ClickConfig::from_json(json),
        None => Ok(ClickConfig::default()),
    }
}

/// Global bridge instance for JNI access
static BRIDGE: Lazy<Mutex<Option<Bridge>>> = Lazy::new(|| Mutex::new(None));

fn with_bridge<T>(f: impl FnOnce(&mut Bridge) -> Result<T>) -> Result<T> {
    let mut guard = match BRIDGE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::error!("Bridge lock poisoned, recovering");
            poisoned.into_inner()
        }
    };

    match guard.as_mut() {
        Some(bridge) => f(bridge),
        None => Err(ClickerError::NotInitialized),
    }
}

fn read_string(env: &mut JNIEnv, value: &JString) -> Option<String> {
    if value.is_null() {
        return None;
    }

    match env.get_string(value) {
        Ok(s) => Some(s.into()),
        Err(e) => {
            log::error!("Failed to read string argument: {}", e);
            None
        }
    }
}

fn to_jboolean(value: bool) -> jboolean {
    if value {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

fn new_jstring<'local>(env: &JNIEnv<'local>, value: Result<String>) -> JString<'local> {
    let value = value.unwrap_or_else(|e| {
        log::error!("Failed to encode response: {}", e);
        "null".to_string()
    });

    env.new_string(value)
        .unwrap_or_else(|_| JString::from(JObject::null()))
}

/// Initialize the clicker core for the current screen
///
/// Called from `onServiceConnected`; calling it again replaces the core.
#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_init<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    width: jint,
    height: jint,
) -> jboolean {
    // Initialize Android logger
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("EntropyClicker"),
    );

    log::info!("Initializing clicker core for {}x{}", width, height);

    let bridge = match Bridge::new(width.max(0) as u32, height.max(0) as u32) {
        Ok(bridge) => bridge,
        Err(e) => {
            log::error!("Failed to initialize: {}", e);
            return JNI_FALSE;
        }
    };

    match BRIDGE.lock() {
        Ok(mut guard) => *guard = Some(bridge),
        Err(poisoned) => *poisoned.into_inner() = Some(bridge),
    }

    JNI_TRUE
}

/// Start a run; returns one of [`start_codes`]
#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_start<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    config_json: JString<'local>,
) -> jint {
    let config = read_string(&mut env, &config_json);

    match with_bridge(|bridge| bridge.start_json(config.as_deref())) {
        Ok(outcome) => start_codes::from_outcome(outcome),
        Err(ClickerError::NotInitialized) => start_codes::DISPATCHER_UNAVAILABLE,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            start_codes::INVALID_CONFIG
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_pause<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jboolean {
    to_jboolean(with_bridge(|bridge| Ok(bridge.pause())).unwrap_or(false))
}

#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_resume<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    config_json: JString<'local>,
) -> jboolean {
    let config = read_string(&mut env, &config_json);

    match with_bridge(|bridge| bridge.resume_json(config.as_deref())) {
        Ok(resumed) => to_jboolean(resumed),
        Err(e) => {
            log::error!("Failed to resume: {}", e);
            JNI_FALSE
        }
    }
}

#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_stop<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
) {
    if let Err(e) = with_bridge(|bridge| {
        bridge.stop();
        Ok(())
    }) {
        log::debug!("Stop ignored: {}", e);
    }
}

/// Apply a re-targeted configuration and snap the anchor to it
#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_resetAnchor<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    config_json: JString<'local>,
) -> jboolean {
    let Some(config) = read_string(&mut env, &config_json) else {
        return JNI_FALSE;
    };

    match with_bridge(|bridge| bridge.retarget_json(&config)) {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            log::error!("Failed to reset anchor: {}", e);
            JNI_FALSE
        }
    }
}

/// Toggle start/pause/resume; returns the resulting status as JSON
#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_toggle<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    config_json: JString<'local>,
) -> JString<'local> {
    let config = read_string(&mut env, &config_json);
    let status = with_bridge(|bridge| bridge.toggle_json(config.as_deref()))
        .and_then(|status| Ok(serde_json::to_string(&status)?));

    new_jstring(&env, status)
}

#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_updateConfig<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    config_json: JString<'local>,
) -> jboolean {
    let Some(config) = read_string(&mut env, &config_json) else {
        return JNI_FALSE;
    };

    match with_bridge(|bridge| bridge.update_config_json(&config)) {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            log::error!("Failed to update config: {}", e);
            JNI_FALSE
        }
    }
}

/// Report a gesture outcome for the ticket of a `dispatch` effect
#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_onGestureResult<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    ticket: jlong,
    completed: jboolean,
) {
    let _ = with_bridge(|bridge| {
        bridge.on_gesture_result(ticket as u64, completed != 0);
        Ok(())
    });
}

/// Report that the timer of a `schedule` effect fired
#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_onTimerFired<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    ticket: jlong,
) {
    let _ = with_bridge(|bridge| {
        bridge.on_timer(ticket as u64);
        Ok(())
    });
}

/// Drain pending effects as a JSON array
#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_pollEffects<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> JString<'local> {
    let effects = with_bridge(|bridge| bridge.poll_effects_json());
    new_jstring(&env, Ok(effects.unwrap_or_else(|_| "[]".to_string())))
}

/// Get the current run state as JSON
#[no_mangle]
pub extern "system" fn Java_com_entropy_clicker_core_ClickerCore_getState<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> JString<'local> {
    let state = with_bridge(|bridge| bridge.state_json());
    new_jstring(&env, Ok(state.unwrap_or_else(|_| "{}".to_string())))
}

/// Start result codes (must match Kotlin side)
pub mod start_codes {
    use crate::clicker::StartOutcome;

    pub const STARTED: i32 = 0;
    pub const ALREADY_RUNNING: i32 = 1;
    pub const DISPATCHER_UNAVAILABLE: i32 = 2;
    pub const INVALID_CONFIG: i32 = -1;

    pub fn from_outcome(outcome: StartOutcome) -> i32 {
        match outcome {
            StartOutcome::Started => STARTED,
            StartOutcome::AlreadyRunning => ALREADY_RUNNING,
            StartOutcome::DispatcherUnavailable => DISPATCHER_UNAVAILABLE,
        }
    }
}
