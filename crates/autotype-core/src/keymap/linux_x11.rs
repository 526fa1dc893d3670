//! Logical key to X11 KeySym translation table.
//!
//! X11 KeySym values are defined in X11/keysymdef.h.
//! Reference: https://gitlab.freedesktop.org/xorg/proto/xorgproto/-/blob/master/include/X11/keysymdef.h
//!
//! Unlike VK codes or CGKeyCodes, KeySyms name *symbols*: letters use their
//! ASCII value (`XK_a` = 0x0061) and special keys live in the 0xFF00 range
//! (`XK_Return` = 0xFF0D).  Letter keys map to the lowercase KeySym; the
//! XTest extension applies the Shift state when the event is synthesised,
//! so the base form is always the right one to hand to the server.
//!
//! Unicode characters with no dedicated KeySym use the convention
//! `0x0100_0000 | codepoint`; that rule lives with the X11 platform
//! services, not in this static table.

use super::X11NativeCode;
use crate::keycode::KeyCode;

/// Translates a [`KeyCode`] to an X11 KeySym value.
///
/// Returns `None` if the key has no X11 KeySym equivalent.
pub fn key_to_keysym(code: KeyCode) -> Option<X11NativeCode> {
    let keysym: u32 = match code {
        // Letters (lowercase keysyms 0x61-0x7A)
        KeyCode::KeyA => 0x0061, // XK_a
        KeyCode::KeyB => 0x0062, // XK_b
        KeyCode::KeyC => 0x0063, // XK_c
        KeyCode::KeyD => 0x0064, // XK_d
        KeyCode::KeyE => 0x0065, // XK_e
        KeyCode::KeyF => 0x0066, // XK_f
        KeyCode::KeyG => 0x0067, // XK_g
        KeyCode::KeyH => 0x0068, // XK_h
        KeyCode::KeyI => 0x0069, // XK_i
        KeyCode::KeyJ => 0x006A, // XK_j
        KeyCode::KeyK => 0x006B, // XK_k
        KeyCode::KeyL => 0x006C, // XK_l
        KeyCode::KeyM => 0x006D, // XK_m
        KeyCode::KeyN => 0x006E, // XK_n
        KeyCode::KeyO => 0x006F, // XK_o
        KeyCode::KeyP => 0x0070, // XK_p
        KeyCode::KeyQ => 0x0071, // XK_q
        KeyCode::KeyR => 0x0072, // XK_r
        KeyCode::KeyS => 0x0073, // XK_s
        KeyCode::KeyT => 0x0074, // XK_t
        KeyCode::KeyU => 0x0075, // XK_u
        KeyCode::KeyV => 0x0076, // XK_v
        KeyCode::KeyW => 0x0077, // XK_w
        KeyCode::KeyX => 0x0078, // XK_x
        KeyCode::KeyY => 0x0079, // XK_y
        KeyCode::KeyZ => 0x007A, // XK_z

        // Digit row (ASCII values)
        KeyCode::Digit0 => 0x0030, // XK_0
        KeyCode::Digit1 => 0x0031, // XK_1
        KeyCode::Digit2 => 0x0032, // XK_2
        KeyCode::Digit3 => 0x0033, // XK_3
        KeyCode::Digit4 => 0x0034, // XK_4
        KeyCode::Digit5 => 0x0035, // XK_5
        KeyCode::Digit6 => 0x0036, // XK_6
        KeyCode::Digit7 => 0x0037, // XK_7
        KeyCode::Digit8 => 0x0038, // XK_8
        KeyCode::Digit9 => 0x0039, // XK_9

        // Editing and whitespace
        KeyCode::Enter => 0xFF0D,     // XK_Return
        KeyCode::Escape => 0xFF1B,    // XK_Escape
        KeyCode::Backspace => 0xFF08, // XK_BackSpace
        KeyCode::Tab => 0xFF09,       // XK_Tab
        KeyCode::Space => 0x0020,     // XK_space

        // Punctuation / symbols (ASCII values)
        KeyCode::Minus => 0x002D,        // XK_minus
        KeyCode::Equal => 0x003D,        // XK_equal
        KeyCode::BracketLeft => 0x005B,  // XK_bracketleft
        KeyCode::BracketRight => 0x005D, // XK_bracketright
        KeyCode::Backslash => 0x005C,    // XK_backslash
        KeyCode::Semicolon => 0x003B,    // XK_semicolon
        KeyCode::Quote => 0x0027,        // XK_apostrophe
        KeyCode::Backquote => 0x0060,    // XK_grave
        KeyCode::Comma => 0x002C,        // XK_comma
        KeyCode::Period => 0x002E,       // XK_period
        KeyCode::Slash => 0x002F,        // XK_slash

        // Lock keys
        KeyCode::CapsLock => 0xFFE5,   // XK_Caps_Lock
        KeyCode::NumLock => 0xFF7F,    // XK_Num_Lock
        KeyCode::ScrollLock => 0xFF14, // XK_Scroll_Lock

        // Function keys (XK_F1=0xFFBE .. XK_F24=0xFFD5)
        KeyCode::F1 => 0xFFBE,
        KeyCode::F2 => 0xFFBF,
        KeyCode::F3 => 0xFFC0,
        KeyCode::F4 => 0xFFC1,
        KeyCode::F5 => 0xFFC2,
        KeyCode::F6 => 0xFFC3,
        KeyCode::F7 => 0xFFC4,
        KeyCode::F8 => 0xFFC5,
        KeyCode::F9 => 0xFFC6,
        KeyCode::F10 => 0xFFC7,
        KeyCode::F11 => 0xFFC8,
        KeyCode::F12 => 0xFFC9,
        KeyCode::F13 => 0xFFCA,
        KeyCode::F14 => 0xFFCB,
        KeyCode::F15 => 0xFFCC,
        KeyCode::F16 => 0xFFCD,
        KeyCode::F17 => 0xFFCE,
        KeyCode::F18 => 0xFFCF,
        KeyCode::F19 => 0xFFD0,
        KeyCode::F20 => 0xFFD1,
        KeyCode::F21 => 0xFFD2,
        KeyCode::F22 => 0xFFD3,
        KeyCode::F23 => 0xFFD4,
        KeyCode::F24 => 0xFFD5,

        // Navigation cluster
        KeyCode::PrintScreen => 0xFF61, // XK_Print
        KeyCode::Pause => 0xFF13,       // XK_Pause
        KeyCode::Insert => 0xFF63,      // XK_Insert
        KeyCode::Home => 0xFF50,        // XK_Home
        KeyCode::PageUp => 0xFF55,      // XK_Prior
        KeyCode::Delete => 0xFFFF,      // XK_Delete
        KeyCode::End => 0xFF57,         // XK_End
        KeyCode::PageDown => 0xFF56,    // XK_Next
        KeyCode::ArrowLeft => 0xFF51,   // XK_Left
        KeyCode::ArrowUp => 0xFF52,     // XK_Up
        KeyCode::ArrowRight => 0xFF53,  // XK_Right
        KeyCode::ArrowDown => 0xFF54,   // XK_Down

        // Numpad
        KeyCode::NumpadDivide => 0xFFAF,   // XK_KP_Divide
        KeyCode::NumpadMultiply => 0xFFAA, // XK_KP_Multiply
        KeyCode::NumpadSubtract => 0xFFAD, // XK_KP_Subtract
        KeyCode::NumpadAdd => 0xFFAB,      // XK_KP_Add
        KeyCode::NumpadEnter => 0xFF8D,    // XK_KP_Enter
        KeyCode::Numpad0 => 0xFFB0,
        KeyCode::Numpad1 => 0xFFB1,
        KeyCode::Numpad2 => 0xFFB2,
        KeyCode::Numpad3 => 0xFFB3,
        KeyCode::Numpad4 => 0xFFB4,
        KeyCode::Numpad5 => 0xFFB5,
        KeyCode::Numpad6 => 0xFFB6,
        KeyCode::Numpad7 => 0xFFB7,
        KeyCode::Numpad8 => 0xFFB8,
        KeyCode::Numpad9 => 0xFFB9,
        KeyCode::NumpadDecimal => 0xFFAE, // XK_KP_Decimal

        // Application key
        KeyCode::ContextMenu => 0xFF67, // XK_Menu

        // Modifier keys
        KeyCode::ControlLeft => 0xFFE3,  // XK_Control_L
        KeyCode::ControlRight => 0xFFE4, // XK_Control_R
        KeyCode::ShiftLeft => 0xFFE1,    // XK_Shift_L
        KeyCode::ShiftRight => 0xFFE2,   // XK_Shift_R
        KeyCode::AltLeft => 0xFFE9,      // XK_Alt_L
        KeyCode::AltRight => 0xFFEA,     // XK_Alt_R
        KeyCode::MetaLeft => 0xFFEB,     // XK_Super_L
        KeyCode::MetaRight => 0xFFEC,    // XK_Super_R
    };
    Some(X11NativeCode(keysym))
}
