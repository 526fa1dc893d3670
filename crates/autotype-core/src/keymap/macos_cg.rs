//! Logical key to macOS `CGKeyCode` translation table.
//!
//! CGKeyCode values are defined in Carbon Events.h (HIToolbox framework):
//! /System/Library/Frameworks/Carbon.framework/Versions/A/Frameworks/HIToolbox.framework/Headers/Events.h
//!
//! macOS key codes are ANSI key *positions*, so 0x00 is the key labelled A
//! on a US keyboard regardless of the active layout.  Keys a Mac keyboard
//! does not have (F21–F24, ScrollLock, Pause as distinct keys beyond the
//! F14/F15 aliases) return `None`.

use super::MacNativeCode;
use crate::keycode::KeyCode;

/// Translates a [`KeyCode`] to a macOS `CGKeyCode` value.
///
/// Returns `None` if the key has no macOS equivalent.
pub fn key_to_cgkeycode(code: KeyCode) -> Option<MacNativeCode> {
    let cg: u16 = match code {
        // Letters (macOS uses ANSI key position codes, not ASCII)
        KeyCode::KeyA => 0x00, // kVK_ANSI_A
        KeyCode::KeyB => 0x0B, // kVK_ANSI_B
        KeyCode::KeyC => 0x08, // kVK_ANSI_C
        KeyCode::KeyD => 0x02, // kVK_ANSI_D
        KeyCode::KeyE => 0x0E, // kVK_ANSI_E
        KeyCode::KeyF => 0x03, // kVK_ANSI_F
        KeyCode::KeyG => 0x05, // kVK_ANSI_G
        KeyCode::KeyH => 0x04, // kVK_ANSI_H
        KeyCode::KeyI => 0x22, // kVK_ANSI_I
        KeyCode::KeyJ => 0x26, // kVK_ANSI_J
        KeyCode::KeyK => 0x28, // kVK_ANSI_K
        KeyCode::KeyL => 0x25, // kVK_ANSI_L
        KeyCode::KeyM => 0x2E, // kVK_ANSI_M
        KeyCode::KeyN => 0x2D, // kVK_ANSI_N
        KeyCode::KeyO => 0x1F, // kVK_ANSI_O
        KeyCode::KeyP => 0x23, // kVK_ANSI_P
        KeyCode::KeyQ => 0x0C, // kVK_ANSI_Q
        KeyCode::KeyR => 0x0F, // kVK_ANSI_R
        KeyCode::KeyS => 0x01, // kVK_ANSI_S
        KeyCode::KeyT => 0x11, // kVK_ANSI_T
        KeyCode::KeyU => 0x20, // kVK_ANSI_U
        KeyCode::KeyV => 0x09, // kVK_ANSI_V
        KeyCode::KeyW => 0x0D, // kVK_ANSI_W
        KeyCode::KeyX => 0x07, // kVK_ANSI_X
        KeyCode::KeyY => 0x10, // kVK_ANSI_Y
        KeyCode::KeyZ => 0x06, // kVK_ANSI_Z

        // Digit row
        KeyCode::Digit0 => 0x1D, // kVK_ANSI_0
        KeyCode::Digit1 => 0x12, // kVK_ANSI_1
        KeyCode::Digit2 => 0x13, // kVK_ANSI_2
        KeyCode::Digit3 => 0x14, // kVK_ANSI_3
        KeyCode::Digit4 => 0x15, // kVK_ANSI_4
        KeyCode::Digit5 => 0x17, // kVK_ANSI_5
        KeyCode::Digit6 => 0x16, // kVK_ANSI_6
        KeyCode::Digit7 => 0x1A, // kVK_ANSI_7
        KeyCode::Digit8 => 0x1C, // kVK_ANSI_8
        KeyCode::Digit9 => 0x19, // kVK_ANSI_9

        // Editing and whitespace
        KeyCode::Enter => 0x24,     // kVK_Return
        KeyCode::Escape => 0x35,    // kVK_Escape
        KeyCode::Backspace => 0x33, // kVK_Delete
        KeyCode::Tab => 0x30,       // kVK_Tab
        KeyCode::Space => 0x31,     // kVK_Space

        // Punctuation / symbols
        KeyCode::Minus => 0x1B,        // kVK_ANSI_Minus
        KeyCode::Equal => 0x18,        // kVK_ANSI_Equal
        KeyCode::BracketLeft => 0x21,  // kVK_ANSI_LeftBracket
        KeyCode::BracketRight => 0x1E, // kVK_ANSI_RightBracket
        KeyCode::Backslash => 0x2A,    // kVK_ANSI_Backslash
        KeyCode::Semicolon => 0x29,    // kVK_ANSI_Semicolon
        KeyCode::Quote => 0x27,        // kVK_ANSI_Quote
        KeyCode::Backquote => 0x32,    // kVK_ANSI_Grave
        KeyCode::Comma => 0x2B,        // kVK_ANSI_Comma
        KeyCode::Period => 0x2F,       // kVK_ANSI_Period
        KeyCode::Slash => 0x2C,        // kVK_ANSI_Slash

        // Lock keys
        KeyCode::CapsLock => 0x39, // kVK_CapsLock
        KeyCode::NumLock => 0x47,  // kVK_ANSI_KeypadClear (NumLock position)
        KeyCode::ScrollLock => return None,

        // Function keys
        KeyCode::F1 => 0x7A,  // kVK_F1
        KeyCode::F2 => 0x78,  // kVK_F2
        KeyCode::F3 => 0x63,  // kVK_F3
        KeyCode::F4 => 0x76,  // kVK_F4
        KeyCode::F5 => 0x60,  // kVK_F5
        KeyCode::F6 => 0x61,  // kVK_F6
        KeyCode::F7 => 0x62,  // kVK_F7
        KeyCode::F8 => 0x64,  // kVK_F8
        KeyCode::F9 => 0x65,  // kVK_F9
        KeyCode::F10 => 0x6D, // kVK_F10
        KeyCode::F11 => 0x67, // kVK_F11
        KeyCode::F12 => 0x6F, // kVK_F12
        KeyCode::F13 => 0x69, // kVK_F13
        KeyCode::F14 => 0x6B, // kVK_F14
        KeyCode::F15 => 0x71, // kVK_F15
        KeyCode::F16 => 0x6A, // kVK_F16
        KeyCode::F17 => 0x40, // kVK_F17
        KeyCode::F18 => 0x4F, // kVK_F18
        KeyCode::F19 => 0x50, // kVK_F19
        KeyCode::F20 => 0x5A, // kVK_F20
        KeyCode::F21 | KeyCode::F22 | KeyCode::F23 | KeyCode::F24 => return None,

        // Navigation cluster
        KeyCode::PrintScreen => 0x69, // kVK_F13 (PrintScreen position on Mac keyboards)
        KeyCode::Pause => return None,
        KeyCode::Insert => 0x72,   // kVK_Help (Insert on PC keyboards)
        KeyCode::Home => 0x73,     // kVK_Home
        KeyCode::PageUp => 0x74,   // kVK_PageUp
        KeyCode::Delete => 0x75,   // kVK_ForwardDelete
        KeyCode::End => 0x77,      // kVK_End
        KeyCode::PageDown => 0x79, // kVK_PageDown
        KeyCode::ArrowLeft => 0x7B,  // kVK_LeftArrow
        KeyCode::ArrowRight => 0x7C, // kVK_RightArrow
        KeyCode::ArrowDown => 0x7D,  // kVK_DownArrow
        KeyCode::ArrowUp => 0x7E,    // kVK_UpArrow

        // Numpad
        KeyCode::NumpadDivide => 0x4B,   // kVK_ANSI_KeypadDivide
        KeyCode::NumpadMultiply => 0x43, // kVK_ANSI_KeypadMultiply
        KeyCode::NumpadSubtract => 0x4E, // kVK_ANSI_KeypadMinus
        KeyCode::NumpadAdd => 0x45,      // kVK_ANSI_KeypadPlus
        KeyCode::NumpadEnter => 0x4C,    // kVK_ANSI_KeypadEnter
        KeyCode::Numpad0 => 0x52,        // kVK_ANSI_Keypad0
        KeyCode::Numpad1 => 0x53,        // kVK_ANSI_Keypad1
        KeyCode::Numpad2 => 0x54,        // kVK_ANSI_Keypad2
        KeyCode::Numpad3 => 0x55,        // kVK_ANSI_Keypad3
        KeyCode::Numpad4 => 0x56,        // kVK_ANSI_Keypad4
        KeyCode::Numpad5 => 0x57,        // kVK_ANSI_Keypad5
        KeyCode::Numpad6 => 0x58,        // kVK_ANSI_Keypad6
        KeyCode::Numpad7 => 0x59,        // kVK_ANSI_Keypad7
        KeyCode::Numpad8 => 0x5B,        // kVK_ANSI_Keypad8
        KeyCode::Numpad9 => 0x5C,        // kVK_ANSI_Keypad9
        KeyCode::NumpadDecimal => 0x41,  // kVK_ANSI_KeypadDecimal

        // Application key
        KeyCode::ContextMenu => 0x6E,

        // Modifier keys
        KeyCode::ControlLeft => 0x3B,  // kVK_Control
        KeyCode::ControlRight => 0x3E, // kVK_RightControl
        KeyCode::ShiftLeft => 0x38,    // kVK_Shift
        KeyCode::ShiftRight => 0x3C,   // kVK_RightShift
        KeyCode::AltLeft => 0x3A,      // kVK_Option
        KeyCode::AltRight => 0x3D,     // kVK_RightOption
        KeyCode::MetaLeft => 0x37,     // kVK_Command
        KeyCode::MetaRight => 0x36,    // kVK_RightCommand
    };
    Some(MacNativeCode(cg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_letter_keys_have_macos_mappings() {
        for letter in [
            KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD,
            KeyCode::KeyE, KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH,
            KeyCode::KeyI, KeyCode::KeyJ, KeyCode::KeyK, KeyCode::KeyL,
            KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO, KeyCode::KeyP,
            KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
            KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX,
            KeyCode::KeyY, KeyCode::KeyZ,
        ] {
            assert!(
                key_to_cgkeycode(letter).is_some(),
                "{letter:?} should have a macOS CGKeyCode"
            );
        }
    }

    #[test]
    fn test_key_a_maps_to_zero() {
        // kVK_ANSI_A = 0x00
        assert_eq!(key_to_cgkeycode(KeyCode::KeyA), Some(MacNativeCode(0x00)));
    }

    #[test]
    fn test_enter_maps_to_kvk_return() {
        assert_eq!(key_to_cgkeycode(KeyCode::Enter), Some(MacNativeCode(0x24)));
    }

    #[test]
    fn test_arrow_keys_have_correct_cgkeycodes() {
        assert_eq!(key_to_cgkeycode(KeyCode::ArrowLeft), Some(MacNativeCode(0x7B)));
        assert_eq!(key_to_cgkeycode(KeyCode::ArrowRight), Some(MacNativeCode(0x7C)));
        assert_eq!(key_to_cgkeycode(KeyCode::ArrowDown), Some(MacNativeCode(0x7D)));
        assert_eq!(key_to_cgkeycode(KeyCode::ArrowUp), Some(MacNativeCode(0x7E)));
    }

    #[test]
    fn test_keys_absent_on_mac_keyboards_return_none() {
        for absent in [
            KeyCode::ScrollLock,
            KeyCode::Pause,
            KeyCode::F21,
            KeyCode::F22,
            KeyCode::F23,
            KeyCode::F24,
        ] {
            assert_eq!(key_to_cgkeycode(absent), None, "{absent:?} has no Mac key");
        }
    }

    #[test]
    fn test_all_modifier_keys_have_macos_mappings() {
        for modifier in [
            KeyCode::ControlLeft, KeyCode::ControlRight,
            KeyCode::ShiftLeft, KeyCode::ShiftRight,
            KeyCode::AltLeft, KeyCode::AltRight,
            KeyCode::MetaLeft, KeyCode::MetaRight,
        ] {
            assert!(
                key_to_cgkeycode(modifier).is_some(),
                "{modifier:?} should have a macOS CGKeyCode"
            );
        }
    }
}
