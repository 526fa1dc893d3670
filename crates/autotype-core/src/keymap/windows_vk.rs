//! Logical key to Windows Virtual Key (VK) code translation table.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h),
//! https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes
//!
//! VK codes are "virtual" rather than physical scan codes: the letter A is
//! `VK_A = 0x41` on every layout.  The numpad Enter key has no VK of its
//! own; Windows reports it as `VK_RETURN` with the extended-key flag, so it
//! shares 0x0D here and the emitter adds the flag.

use super::WindowsNativeCode;
use crate::keycode::KeyCode;

/// Translates a [`KeyCode`] to a Windows VK code.
///
/// Returns `None` if the key has no Windows VK equivalent.
pub fn key_to_vk(code: KeyCode) -> Option<WindowsNativeCode> {
    let vk: u16 = match code {
        // Letters (VK_A=0x41 .. VK_Z=0x5A)
        KeyCode::KeyA => 0x41,
        KeyCode::KeyB => 0x42,
        KeyCode::KeyC => 0x43,
        KeyCode::KeyD => 0x44,
        KeyCode::KeyE => 0x45,
        KeyCode::KeyF => 0x46,
        KeyCode::KeyG => 0x47,
        KeyCode::KeyH => 0x48,
        KeyCode::KeyI => 0x49,
        KeyCode::KeyJ => 0x4A,
        KeyCode::KeyK => 0x4B,
        KeyCode::KeyL => 0x4C,
        KeyCode::KeyM => 0x4D,
        KeyCode::KeyN => 0x4E,
        KeyCode::KeyO => 0x4F,
        KeyCode::KeyP => 0x50,
        KeyCode::KeyQ => 0x51,
        KeyCode::KeyR => 0x52,
        KeyCode::KeyS => 0x53,
        KeyCode::KeyT => 0x54,
        KeyCode::KeyU => 0x55,
        KeyCode::KeyV => 0x56,
        KeyCode::KeyW => 0x57,
        KeyCode::KeyX => 0x58,
        KeyCode::KeyY => 0x59,
        KeyCode::KeyZ => 0x5A,

        // Digit row (VK_0=0x30 .. VK_9=0x39)
        KeyCode::Digit0 => 0x30,
        KeyCode::Digit1 => 0x31,
        KeyCode::Digit2 => 0x32,
        KeyCode::Digit3 => 0x33,
        KeyCode::Digit4 => 0x34,
        KeyCode::Digit5 => 0x35,
        KeyCode::Digit6 => 0x36,
        KeyCode::Digit7 => 0x37,
        KeyCode::Digit8 => 0x38,
        KeyCode::Digit9 => 0x39,

        // Editing and whitespace
        KeyCode::Enter => 0x0D,     // VK_RETURN
        KeyCode::Escape => 0x1B,    // VK_ESCAPE
        KeyCode::Backspace => 0x08, // VK_BACK
        KeyCode::Tab => 0x09,       // VK_TAB
        KeyCode::Space => 0x20,     // VK_SPACE

        // Punctuation / symbols
        KeyCode::Minus => 0xBD,        // VK_OEM_MINUS  (- _)
        KeyCode::Equal => 0xBB,        // VK_OEM_PLUS   (= +)
        KeyCode::BracketLeft => 0xDB,  // VK_OEM_4      ([ {)
        KeyCode::BracketRight => 0xDD, // VK_OEM_6      (] })
        KeyCode::Backslash => 0xDC,    // VK_OEM_5      (\ |)
        KeyCode::Semicolon => 0xBA,    // VK_OEM_1      (; :)
        KeyCode::Quote => 0xDE,        // VK_OEM_7      (' ")
        KeyCode::Backquote => 0xC0,    // VK_OEM_3      (` ~)
        KeyCode::Comma => 0xBC,        // VK_OEM_COMMA  (, <)
        KeyCode::Period => 0xBE,       // VK_OEM_PERIOD (. >)
        KeyCode::Slash => 0xBF,        // VK_OEM_2      (/ ?)

        // Lock keys
        KeyCode::CapsLock => 0x14,   // VK_CAPITAL
        KeyCode::NumLock => 0x90,    // VK_NUMLOCK
        KeyCode::ScrollLock => 0x91, // VK_SCROLL

        // Function keys (VK_F1=0x70 .. VK_F24=0x87)
        KeyCode::F1 => 0x70,
        KeyCode::F2 => 0x71,
        KeyCode::F3 => 0x72,
        KeyCode::F4 => 0x73,
        KeyCode::F5 => 0x74,
        KeyCode::F6 => 0x75,
        KeyCode::F7 => 0x76,
        KeyCode::F8 => 0x77,
        KeyCode::F9 => 0x78,
        KeyCode::F10 => 0x79,
        KeyCode::F11 => 0x7A,
        KeyCode::F12 => 0x7B,
        KeyCode::F13 => 0x7C,
        KeyCode::F14 => 0x7D,
        KeyCode::F15 => 0x7E,
        KeyCode::F16 => 0x7F,
        KeyCode::F17 => 0x80,
        KeyCode::F18 => 0x81,
        KeyCode::F19 => 0x82,
        KeyCode::F20 => 0x83,
        KeyCode::F21 => 0x84,
        KeyCode::F22 => 0x85,
        KeyCode::F23 => 0x86,
        KeyCode::F24 => 0x87,

        // Navigation cluster
        KeyCode::PrintScreen => 0x2C, // VK_SNAPSHOT
        KeyCode::Pause => 0x13,       // VK_PAUSE
        KeyCode::Insert => 0x2D,      // VK_INSERT
        KeyCode::Home => 0x24,        // VK_HOME
        KeyCode::PageUp => 0x21,      // VK_PRIOR
        KeyCode::Delete => 0x2E,      // VK_DELETE
        KeyCode::End => 0x23,         // VK_END
        KeyCode::PageDown => 0x22,    // VK_NEXT
        KeyCode::ArrowLeft => 0x25,   // VK_LEFT
        KeyCode::ArrowUp => 0x26,     // VK_UP
        KeyCode::ArrowRight => 0x27,  // VK_RIGHT
        KeyCode::ArrowDown => 0x28,   // VK_DOWN

        // Numpad
        KeyCode::NumpadDivide => 0x6F,   // VK_DIVIDE
        KeyCode::NumpadMultiply => 0x6A, // VK_MULTIPLY
        KeyCode::NumpadSubtract => 0x6D, // VK_SUBTRACT
        KeyCode::NumpadAdd => 0x6B,      // VK_ADD
        KeyCode::NumpadEnter => 0x0D,    // VK_RETURN + extended-key flag
        KeyCode::Numpad0 => 0x60,
        KeyCode::Numpad1 => 0x61,
        KeyCode::Numpad2 => 0x62,
        KeyCode::Numpad3 => 0x63,
        KeyCode::Numpad4 => 0x64,
        KeyCode::Numpad5 => 0x65,
        KeyCode::Numpad6 => 0x66,
        KeyCode::Numpad7 => 0x67,
        KeyCode::Numpad8 => 0x68,
        KeyCode::Numpad9 => 0x69,
        KeyCode::NumpadDecimal => 0x6E, // VK_DECIMAL

        // Application key
        KeyCode::ContextMenu => 0x5D, // VK_APPS

        // Modifier keys
        KeyCode::ControlLeft => 0xA2,  // VK_LCONTROL
        KeyCode::ControlRight => 0xA3, // VK_RCONTROL
        KeyCode::ShiftLeft => 0xA0,    // VK_LSHIFT
        KeyCode::ShiftRight => 0xA1,   // VK_RSHIFT
        KeyCode::AltLeft => 0xA4,      // VK_LMENU
        KeyCode::AltRight => 0xA5,     // VK_RMENU
        KeyCode::MetaLeft => 0x5B,     // VK_LWIN
        KeyCode::MetaRight => 0x5C,    // VK_RWIN
    };
    Some(WindowsNativeCode(vk))
}
