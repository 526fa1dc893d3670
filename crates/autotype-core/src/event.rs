//! Directional key events handed to the platform event emitter.
//!
//! A [`KeyEvent`] is transient: it exists only for the duration of one
//! emission.  The payload is either a resolved native key code or a raw
//! Unicode scalar; the raw form bypasses physical key mapping entirely and
//! is the fallback for characters the active keyboard layout cannot
//! produce (most non-Latin scripts, emoji, supplementary-plane code
//! points).

use serde::{Deserialize, Serialize};

use crate::keymap::NativeKeyCode;

/// Whether a key event is a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
}

/// What the emitted event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyOutput {
    /// A physical key, identified by its platform-native code.
    Native(NativeKeyCode),
    /// A Unicode scalar injected directly, with no physical key involved.
    ///
    /// Platforms whose text events use 16-bit units split scalars above
    /// U+FFFF into a surrogate pair and submit both units as one logical
    /// emission.
    Unicode(char),
}

/// One directional native-code or raw-Unicode emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub output: KeyOutput,
    pub direction: Direction,
}

impl KeyEvent {
    /// A native-code event.
    pub fn native(code: NativeKeyCode, direction: Direction) -> Self {
        Self {
            output: KeyOutput::Native(code),
            direction,
        }
    }

    /// A raw-Unicode event.
    pub fn unicode(ch: char, direction: Direction) -> Self {
        Self {
            output: KeyOutput::Unicode(ch),
            direction,
        }
    }
}
