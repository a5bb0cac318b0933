//! Target process resolution.
//!
//! Resolves a human-readable application name to a PID once at startup. On
//! macOS the primary lookup asks System Events (via `osascript`) for the unix
//! id of the named process, which matches the application display name
//! exactly. If the scripting bridge yields nothing, the process table is
//! scanned with `sysinfo` using a case-insensitive name match.

use crate::error::{NudgeError, Result};
use std::thread;
use std::time::Duration;
use sysinfo::{ProcessesToUpdate, System};
use tracing::{debug, warn};

/// Delay between lookup attempts.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Resolves application names to process identifiers.
pub struct ProcessFinder {
    system: System,
}

impl Default for ProcessFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessFinder {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }

    /// Resolve `app_name` to a PID, retrying up to `max_retries` times.
    ///
    /// Fatal on exhaustion: the caller is expected to exit before starting
    /// either periodic sender.
    pub fn resolve(&mut self, app_name: &str, max_retries: u32) -> Result<i32> {
        for attempt in 1..=max_retries.max(1) {
            if let Some(pid) = self.lookup(app_name) {
                debug!(pid, app_name, "resolved target process");
                return Ok(pid);
            }
            if attempt < max_retries {
                warn!(
                    attempt,
                    max_retries, "application '{app_name}' not found, retrying"
                );
                thread::sleep(RETRY_DELAY);
            }
        }
        Err(NudgeError::process_not_found(app_name, max_retries))
    }

    fn lookup(&mut self, app_name: &str) -> Option<i32> {
        script_bridge_pid(app_name).or_else(|| self.scan_process_table(app_name))
    }

    /// Case-insensitive scan of the process table.
    fn scan_process_table(&mut self, app_name: &str) -> Option<i32> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);

        let needle = app_name.to_lowercase();
        for (pid, process) in self.system.processes() {
            let name = process.name().to_string_lossy().to_lowercase();
            if name.contains(&needle) {
                return Some(pid.as_u32() as i32);
            }
        }
        None
    }
}

/// Ask System Events for the unix id of the named process.
///
/// Contract: an integer identifier as text on stdout, or non-numeric/empty
/// output on failure.
#[cfg(target_os = "macos")]
fn script_bridge_pid(app_name: &str) -> Option<i32> {
    let script = format!(
        r#"tell application "System Events" to get unix id of process "{}""#,
        app_name.replace('\\', "\\\\").replace('"', "\\\"")
    );
    let output = std::process::Command::new("osascript")
        .arg("-e")
        .arg(&script)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout).trim().parse().ok()
}

#[cfg(not(target_os = "macos"))]
fn script_bridge_pid(_app_name: &str) -> Option<i32> {
    None
}
