//! Global pause/resume hotkey.
//!
//! Both periodic senders consult a shared pause flag before each tick. The
//! flag is toggled by a global hotkey registered through the `global-hotkey`
//! crate and polled by a blocking listener task. The switch is optional:
//! if registration fails (e.g. headless session), the program runs with a
//! permanently-unpaused handle.

use crate::error::{NudgeError, Result};
use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Read-only view of the pause flag, shared by the sender loops.
#[derive(Clone)]
pub struct PauseHandle(Arc<AtomicBool>);

impl PauseHandle {
    /// A handle that never reports paused, for runs without a hotkey.
    pub fn disabled() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Owns the hotkey registration and the pause flag.
///
/// The manager must stay alive for the registration to remain active, so the
/// switch is held by `main` for the life of the process while the listener
/// task only captures the flag.
pub struct PauseSwitch {
    _manager: GlobalHotKeyManager,
    hotkey_id: u32,
    label: String,
    flag: Arc<AtomicBool>,
}

impl PauseSwitch {
    /// Register `spec` (e.g. "ctrl+alt+p") as the global pause hotkey.
    pub fn new(spec: &str) -> Result<Self> {
        let hotkey = parse_hotkey(spec)?;
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| NudgeError::hotkey(format!("failed to create hotkey manager: {e}")))?;
        manager
            .register(hotkey)
            .map_err(|e| NudgeError::hotkey(format!("failed to register '{spec}': {e}")))?;

        Ok(Self {
            _manager: manager,
            hotkey_id: hotkey.id(),
            label: spec.to_string(),
            flag: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn handle(&self) -> PauseHandle {
        PauseHandle(Arc::clone(&self.flag))
    }

    /// Start the blocking listener that toggles the flag on each press.
    ///
    /// Only the flag and hotkey id cross the thread boundary; the manager
    /// stays on the caller's thread.
    pub fn spawn_listener(&self) {
        let flag = Arc::clone(&self.flag);
        let hotkey_id = self.hotkey_id;
        let label = self.label.clone();

        tokio::task::spawn_blocking(move || {
            let receiver = GlobalHotKeyEvent::receiver();
            loop {
                if let Ok(event) = receiver.try_recv() {
                    if event.id == hotkey_id && event.state == HotKeyState::Pressed {
                        let paused = !flag.load(Ordering::Relaxed);
                        flag.store(paused, Ordering::Relaxed);
                        if paused {
                            info!("paused (press {label} to resume)");
                        } else {
                            info!("resumed");
                        }
                    }
                }
                thread::sleep(Duration::from_millis(10));
            }
        });
    }
}

fn parse_hotkey(spec: &str) -> Result<HotKey> {
    let lowered = spec.trim().to_ascii_lowercase();
    let mut modifiers = Modifiers::empty();
    let mut code = None;

    for token in lowered.split('+').map(str::trim) {
        match token {
            "ctrl" | "control" => modifiers |= Modifiers::CONTROL,
            "alt" | "opt" | "option" => modifiers |= Modifiers::ALT,
            "shift" => modifiers |= Modifiers::SHIFT,
            "cmd" | "command" | "meta" | "super" => modifiers |= Modifiers::SUPER,
            key => {
                if code.is_some() {
                    return Err(NudgeError::hotkey(format!(
                        "multiple keys in hotkey '{spec}'"
                    )));
                }
                code = Some(key_code(key).ok_or_else(|| {
                    NudgeError::hotkey(format!("unknown key '{key}' in hotkey '{spec}'"))
                })?);
            }
        }
    }

    let code =
        code.ok_or_else(|| NudgeError::hotkey(format!("no key specified in hotkey '{spec}'")))?;
    Ok(HotKey::new(Some(modifiers), code))
}

/// Map a lowercase token to a `Code` via its canonical variant name.
fn key_code(token: &str) -> Option<Code> {
    let canonical = match token {
        t if t.len() == 1 && t.chars().all(|c| c.is_ascii_lowercase()) => {
            format!("Key{}", t.to_ascii_uppercase())
        }
        t if t.len() == 1 && t.chars().all(|c| c.is_ascii_digit()) => format!("Digit{t}"),
        t if t.starts_with('f') && t[1..].chars().all(|c| c.is_ascii_digit()) && t.len() > 1 => {
            format!("F{}", &t[1..])
        }
        "enter" | "return" => "Enter".to_string(),
        "space" => "Space".to_string(),
        "tab" => "Tab".to_string(),
        "escape" | "esc" => "Escape".to_string(),
        "backspace" => "Backspace".to_string(),
        "delete" => "Delete".to_string(),
        "home" => "Home".to_string(),
        "end" => "End".to_string(),
        "pageup" => "PageUp".to_string(),
        "pagedown" => "PageDown".to_string(),
        "up" => "ArrowUp".to_string(),
        "down" => "ArrowDown".to_string(),
        "left" => "ArrowLeft".to_string(),
        "right" => "ArrowRight".to_string(),
        _ => return None,
    };
    canonical.parse().ok()
}
