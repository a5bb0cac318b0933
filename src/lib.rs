//! # keynudge
//!
//! A command-line tool that periodically injects keyboard input into a named
//! running macOS application: a modifier+key combo on one interval and a
//! typed message (followed by Return) on another.
//!
//! ## Features
//!
//! - Target an application by its display name
//! - Events posted directly to the target PID — no focus stealing
//! - Two independent periodic senders (combo and message)
//! - Global hotkey for pause/resume
//! - JSON configuration file support
//!
//! ## Example
//!
//! ```no_run
//! use keynudge::{Combo, KeySender, ProcessFinder};
//! use std::time::Duration;
//!
//! // Resolve the target once at startup
//! let mut finder = ProcessFinder::new();
//! let pid = finder.resolve("TextEdit", 10).unwrap();
//!
//! // Send one combo and one message
//! let sender = KeySender::new(Duration::from_millis(50)).unwrap();
//! sender.send_combo(pid, &Combo::parse("cmd+enter").unwrap()).unwrap();
//! sender.send_line(pid, "continue").unwrap();
//! ```
//!
//! ## Configuration
//!
//! Configuration can be provided via JSON files:
//!
//! ```json
//! {
//!   "app_name": "TextEdit",
//!   "combo": "cmd+enter",
//!   "combo_interval": "11s",
//!   "message": "continue doing what you think is best.",
//!   "message_interval": "2m"
//! }
//! ```

pub mod config;
pub mod error;
pub mod hotkey;
pub mod key_sender;
pub mod keymap;
pub mod process_finder;
pub mod tasks;

pub use config::Config;
pub use error::{NudgeError, Result};
pub use hotkey::{PauseHandle, PauseSwitch};
pub use key_sender::KeySender;
pub use keymap::{Combo, Modifier};
pub use process_finder::ProcessFinder;
pub use tasks::{ComboTask, TextTask};
