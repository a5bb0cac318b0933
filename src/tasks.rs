//! The two periodic sender loops.
//!
//! Each task is a pure function of its immutable configuration, invoked on a
//! fixed schedule: send, sleep, repeat until the process exits. `tick()` is
//! one cycle; `run()` is the loop. Scheduling is sleep-after-send with no
//! drift correction. The tasks share only the read-only key-code table, the
//! immutable target PID, and the pause flag.

use crate::hotkey::PauseHandle;
use crate::key_sender::KeySender;
use crate::keymap::Combo;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Sleep granularity while paused.
const PAUSE_POLL: Duration = Duration::from_millis(200);

/// Repeats a modifier+key chord at a fixed interval, forever.
pub struct ComboTask {
    pid: i32,
    combo: Combo,
    interval: Duration,
}

impl ComboTask {
    pub fn new(pid: i32, combo: Combo, interval: Duration) -> Self {
        Self {
            pid,
            combo,
            interval,
        }
    }

    /// One cycle: a single combo send.
    pub fn tick(&self, sender: &KeySender) -> crate::error::Result<()> {
        sender.send_combo(self.pid, &self.combo)
    }

    /// Run until the process exits. Injection errors are logged and the
    /// schedule continues; delivery is fire-and-forget.
    pub fn run(self, sender: Arc<KeySender>, pause: PauseHandle) {
        loop {
            if pause.is_paused() {
                thread::sleep(PAUSE_POLL);
                continue;
            }
            match self.tick(&sender) {
                Ok(()) => info!("sent {}", self.combo),
                Err(e) => warn!("combo send failed: {e}"),
            }
            thread::sleep(self.interval);
        }
    }
}

/// Types a fixed message followed by Return at a fixed interval, forever.
pub struct TextTask {
    pid: i32,
    message: String,
    interval: Duration,
}

impl TextTask {
    pub fn new(pid: i32, message: String, interval: Duration) -> Self {
        Self {
            pid,
            message,
            interval,
        }
    }

    /// One cycle: type the message, then press Return.
    pub fn tick(&self, sender: &KeySender) -> crate::error::Result<()> {
        sender.send_line(self.pid, &self.message)
    }

    pub fn run(self, sender: Arc<KeySender>, pause: PauseHandle) {
        loop {
            if pause.is_paused() {
                thread::sleep(PAUSE_POLL);
                continue;
            }
            match self.tick(&sender) {
                Ok(()) => info!("typed message ({} chars)", self.message.len()),
                Err(e) => warn!("message send failed: {e}"),
            }
            thread::sleep(self.interval);
        }
    }
}
