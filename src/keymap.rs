//! Character to macOS virtual key code translation.
//!
//! CGKeyCode values are position codes for the ANSI (US) keyboard layout,
//! defined in Carbon's Events.h (HIToolbox framework). The table is fixed at
//! compile time and read-only; both periodic senders share it without locks.

use crate::error::{NudgeError, Result};
use std::fmt;

/// macOS virtual key code. Matches `CGKeyCode` (u16).
pub type KeyCode = u16;

/// kVK_Return
pub const KEY_RETURN: KeyCode = 0x24;
/// kVK_Tab
pub const KEY_TAB: KeyCode = 0x30;
/// kVK_Space
pub const KEY_SPACE: KeyCode = 0x31;
/// kVK_Escape
pub const KEY_ESCAPE: KeyCode = 0x35;

/// Translates a printable character to its macOS virtual key code.
///
/// The table covers the US layout characters a target message may contain:
/// letters, digits, space, and the unshifted punctuation keys. Lookup is
/// case-sensitive; callers fold to ASCII lowercase first. Returns `None` for
/// anything else — the sender skips the keystroke and substitutes a pause.
pub fn char_to_keycode(c: char) -> Option<KeyCode> {
    let code = match c {
        'a' => 0x00, // kVK_ANSI_A
        's' => 0x01, // kVK_ANSI_S
        'd' => 0x02, // kVK_ANSI_D
        'f' => 0x03, // kVK_ANSI_F
        'h' => 0x04, // kVK_ANSI_H
        'g' => 0x05, // kVK_ANSI_G
        'z' => 0x06, // kVK_ANSI_Z
        'x' => 0x07, // kVK_ANSI_X
        'c' => 0x08, // kVK_ANSI_C
        'v' => 0x09, // kVK_ANSI_V
        'b' => 0x0B, // kVK_ANSI_B
        'q' => 0x0C, // kVK_ANSI_Q
        'w' => 0x0D, // kVK_ANSI_W
        'e' => 0x0E, // kVK_ANSI_E
        'r' => 0x0F, // kVK_ANSI_R
        'y' => 0x10, // kVK_ANSI_Y
        't' => 0x11, // kVK_ANSI_T
        '1' => 0x12, // kVK_ANSI_1
        '2' => 0x13, // kVK_ANSI_2
        '3' => 0x14, // kVK_ANSI_3
        '4' => 0x15, // kVK_ANSI_4
        '6' => 0x16, // kVK_ANSI_6
        '5' => 0x17, // kVK_ANSI_5
        '=' => 0x18, // kVK_ANSI_Equal
        '9' => 0x19, // kVK_ANSI_9
        '7' => 0x1A, // kVK_ANSI_7
        '-' => 0x1B, // kVK_ANSI_Minus
        '8' => 0x1C, // kVK_ANSI_8
        '0' => 0x1D, // kVK_ANSI_0
        ']' => 0x1E, // kVK_ANSI_RightBracket
        'o' => 0x1F, // kVK_ANSI_O
        'u' => 0x20, // kVK_ANSI_U
        '[' => 0x21, // kVK_ANSI_LeftBracket
        'i' => 0x22, // kVK_ANSI_I
        'p' => 0x23, // kVK_ANSI_P
        'l' => 0x25, // kVK_ANSI_L
        'j' => 0x26, // kVK_ANSI_J
        '\'' => 0x27, // kVK_ANSI_Quote
        'k' => 0x28, // kVK_ANSI_K
        ';' => 0x29, // kVK_ANSI_Semicolon
        '\\' => 0x2A, // kVK_ANSI_Backslash
        ',' => 0x2B, // kVK_ANSI_Comma
        '/' => 0x2C, // kVK_ANSI_Slash
        'n' => 0x2D, // kVK_ANSI_N
        'm' => 0x2E, // kVK_ANSI_M
        '.' => 0x2F, // kVK_ANSI_Period
        ' ' => 0x31, // kVK_Space
        _ => return None,
    };
    Some(code)
}

/// A held modifier key, carrying both its own virtual key code (the physical
/// key pressed and released around the combo) and the CGEvent flag bit set on
/// the inner key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Command,
    Shift,
    Option,
    Control,
}

impl Modifier {
    /// Virtual key code of the modifier key itself.
    pub fn key_code(self) -> KeyCode {
        match self {
            Self::Command => 0x37, // kVK_Command
            Self::Shift => 0x38,   // kVK_Shift
            Self::Option => 0x3A,  // kVK_Option
            Self::Control => 0x3B, // kVK_Control
        }
    }

    /// CGEventFlags bit for this modifier.
    pub fn flag_bits(self) -> u64 {
        match self {
            Self::Command => 0x0010_0000, // kCGEventFlagMaskCommand
            Self::Shift => 0x0002_0000,   // kCGEventFlagMaskShift
            Self::Option => 0x0008_0000,  // kCGEventFlagMaskAlternate
            Self::Control => 0x0004_0000, // kCGEventFlagMaskControl
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "cmd" | "command" | "meta" | "super" => Some(Self::Command),
            "shift" => Some(Self::Shift),
            "alt" | "opt" | "option" => Some(Self::Option),
            "ctrl" | "control" => Some(Self::Control),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Command => "cmd",
            Self::Shift => "shift",
            Self::Option => "alt",
            Self::Control => "ctrl",
        }
    }
}

/// A modifier+key chord, e.g. `cmd+enter`.
///
/// Sending a combo is a four-event sequence: modifier-down, key-down with the
/// modifier flag, key-up with the modifier flag, modifier-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combo {
    pub modifier: Modifier,
    pub key: KeyCode,
    key_label: String,
}

impl Combo {
    /// Parse a `"modifier+key"` specification.
    ///
    /// Exactly one modifier is accepted (cmd/command/meta, shift, alt/option,
    /// ctrl/control). The key may be a single mapped character or a named key
    /// (enter/return, space, tab, escape).
    ///
    /// # Example
    ///
    /// ```
    /// use keynudge::keymap::{Combo, Modifier};
    ///
    /// let combo = Combo::parse("cmd+enter").unwrap();
    /// assert_eq!(combo.modifier, Modifier::Command);
    /// assert_eq!(combo.key, keynudge::keymap::KEY_RETURN);
    /// ```
    pub fn parse(spec: &str) -> Result<Self> {
        let lowered = spec.trim().to_ascii_lowercase();
        let parts: Vec<&str> = lowered.split('+').map(str::trim).collect();

        if parts.len() != 2 {
            return Err(NudgeError::invalid_combo(
                spec,
                "expected exactly one modifier and one key, e.g. 'cmd+enter'",
            ));
        }

        let modifier = Modifier::parse(parts[0]).ok_or_else(|| {
            NudgeError::invalid_combo(spec, format!("unknown modifier '{}'", parts[0]))
        })?;

        let key_token = parts[1];
        let key = named_key(key_token)
            .or_else(|| {
                let mut chars = key_token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => char_to_keycode(c),
                    _ => None,
                }
            })
            .ok_or_else(|| {
                NudgeError::invalid_combo(spec, format!("unknown key '{key_token}'"))
            })?;

        Ok(Self {
            modifier,
            key,
            key_label: key_token.to_string(),
        })
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.modifier.label(), self.key_label)
    }
}

fn named_key(token: &str) -> Option<KeyCode> {
    match token {
        "enter" | "return" => Some(KEY_RETURN),
        "tab" => Some(KEY_TAB),
        "space" => Some(KEY_SPACE),
        "escape" | "esc" => Some(KEY_ESCAPE),
        _ => None,
    }
}
