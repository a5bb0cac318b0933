//! Keyboard event synthesis and delivery.
//!
//! Events are created through CoreGraphics and posted directly to the target
//! process (`CGEventPostToPid`), so the target does not need keyboard focus.
//! Delivery is fire-and-forget: no acknowledgment is available and none is
//! awaited. Requires the Accessibility permission on macOS.
//!
//! The OS call sits behind [`EventBackend`] so event sequences can be
//! asserted in tests without touching the system.

use crate::error::Result;
use crate::keymap::{self, Combo, KeyCode, KEY_RETURN};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Pause between the individual events of a chord or a down/up pair, to
/// satisfy OS event-ordering expectations.
const EVENT_PAUSE: Duration = Duration::from_millis(10);

/// Posts one synthesized keyboard event to a process.
pub trait EventBackend: Send + Sync {
    /// `flags` is a CGEventFlags bitmask; zero means "no modifiers", and is
    /// set explicitly so synthesized events never inherit live modifier state.
    fn post_key(&self, pid: i32, key_code: KeyCode, down: bool, flags: u64) -> Result<()>;
}

/// CoreGraphics-backed event injection.
#[cfg(target_os = "macos")]
pub struct CgEventBackend;

#[cfg(target_os = "macos")]
impl EventBackend for CgEventBackend {
    fn post_key(&self, pid: i32, key_code: KeyCode, down: bool, flags: u64) -> Result<()> {
        use crate::error::NudgeError;
        use core_graphics::event::{CGEvent, CGEventFlags};
        use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| NudgeError::event_creation("failed to create event source"))?;
        let event = CGEvent::new_keyboard_event(source, key_code, down).map_err(|_| {
            NudgeError::event_creation(format!("failed to create event for key code {key_code}"))
        })?;
        event.set_flags(CGEventFlags::from_bits_truncate(flags));
        event.post_to_pid(pid as libc::pid_t);
        Ok(())
    }
}

/// Backend that records posted events instead of delivering them. Used by
/// tests to assert exact event order, codes, and flags.
#[derive(Clone, Default)]
pub struct RecordingBackend {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

/// One event captured by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub key_code: KeyCode,
    pub down: bool,
    pub flags: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything posted so far, in order.
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().expect("recording lock poisoned").clone()
    }
}

impl EventBackend for RecordingBackend {
    fn post_key(&self, _pid: i32, key_code: KeyCode, down: bool, flags: u64) -> Result<()> {
        self.events
            .lock()
            .expect("recording lock poisoned")
            .push(RecordedEvent {
                key_code,
                down,
                flags,
            });
        Ok(())
    }
}

/// Synthesizes key, combo, and text input for a single target process.
///
/// # Example
///
/// ```no_run
/// use keynudge::{Combo, KeySender};
/// use std::time::Duration;
///
/// let sender = KeySender::new(Duration::from_millis(50)).unwrap();
/// sender.send_combo(12345, &Combo::parse("cmd+enter").unwrap()).unwrap();
/// sender.send_text(12345, "continue").unwrap();
/// ```
pub struct KeySender {
    backend: Box<dyn EventBackend>,
    /// Pause between events inside a chord or down/up pair.
    event_pause: Duration,
    /// Delay between consecutive characters while typing.
    key_delay: Duration,
}

impl KeySender {
    /// Create a sender backed by the OS event-injection API.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedPlatform` on anything but macOS.
    pub fn new(key_delay: Duration) -> Result<Self> {
        Ok(Self::with_backend(platform_backend()?, EVENT_PAUSE, key_delay))
    }

    /// Create a sender with an explicit backend and timing. Tests pass a
    /// [`RecordingBackend`] and zero pauses.
    pub fn with_backend(
        backend: Box<dyn EventBackend>,
        event_pause: Duration,
        key_delay: Duration,
    ) -> Self {
        Self {
            backend,
            event_pause,
            key_delay,
        }
    }

    /// Post a single key event to the target process.
    pub fn send_key(&self, pid: i32, key_code: KeyCode, down: bool, flags: u64) -> Result<()> {
        self.backend.post_key(pid, key_code, down, flags)
    }

    /// Press and release one key, with the fixed pause in between.
    pub fn press_key(&self, pid: i32, key_code: KeyCode) -> Result<()> {
        self.send_key(pid, key_code, true, 0)?;
        self.pause(self.event_pause);
        self.send_key(pid, key_code, false, 0)
    }

    /// Send a modifier+key chord as four events in strict order:
    /// modifier-down, key-down with the modifier flag, key-up with the
    /// modifier flag, modifier-up.
    pub fn send_combo(&self, pid: i32, combo: &Combo) -> Result<()> {
        let modifier_code = combo.modifier.key_code();
        let flags = combo.modifier.flag_bits();

        self.send_key(pid, modifier_code, true, 0)?;
        self.pause(self.event_pause);
        self.send_key(pid, combo.key, true, flags)?;
        self.pause(self.event_pause);
        self.send_key(pid, combo.key, false, flags)?;
        self.pause(self.event_pause);
        self.send_key(pid, modifier_code, false, 0)
    }

    /// Type `text` character by character.
    ///
    /// Characters are folded to ASCII lowercase before lookup. An unmapped
    /// character is skipped with a warning and replaced by an equivalent
    /// pause; the rest of the message is still sent.
    pub fn send_text(&self, pid: i32, text: &str) -> Result<()> {
        for c in text.chars() {
            match keymap::char_to_keycode(c.to_ascii_lowercase()) {
                Some(key_code) => {
                    self.press_key(pid, key_code)?;
                }
                None => {
                    warn!("character {c:?} not mapped, skipping");
                }
            }
            self.pause(self.key_delay);
        }
        Ok(())
    }

    /// Type `text`, then press Return.
    pub fn send_line(&self, pid: i32, text: &str) -> Result<()> {
        self.send_text(pid, text)?;
        self.press_key(pid, KEY_RETURN)
    }

    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

#[cfg(target_os = "macos")]
fn platform_backend() -> Result<Box<dyn EventBackend>> {
    Ok(Box::new(CgEventBackend))
}

#[cfg(not(target_os = "macos"))]
fn platform_backend() -> Result<Box<dyn EventBackend>> {
    Err(crate::error::NudgeError::unsupported_platform(
        "event injection requires macOS",
    ))
}
