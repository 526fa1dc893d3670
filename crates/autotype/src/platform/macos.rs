//! macOS platform services via CoreGraphics event injection.
//!
//! # What is CoreGraphics event injection? (for beginners)
//!
//! `CGEventPost` injects a synthesized event into the hardware input
//! stream at the HID (Human Interface Device) level, the same level as
//! physical keyboard input. Applications cannot distinguish these events
//! from real keystrokes. The sequence for one key event is:
//!
//! 1. `CGEventSource::new(HIDSystemState)` — an event source that mimics
//!    hardware state.
//! 2. `CGEvent::new_keyboard_event(source, cgkeycode, key_down)`.
//! 3. `event.post(CGEventTapLocation::HID)`.
//!
//! For characters with no physical key, a keyboard event can carry an
//! arbitrary UTF-16 string (`set_string_from_utf16_unencoded`); the
//! system delivers the string to the focused application regardless of
//! the active layout.
//!
//! # Layout resolution
//!
//! macOS has no "which key produces this character" call. The inverse is
//! `UCKeyTranslate`, which maps (keycode, modifiers) to the produced
//! string under a given layout. We fetch the active layout from the Text
//! Input Source service and walk all 128 hardware keycodes at the plain
//! and Shift levels, returning the first key that produces the wanted
//! character.
//!
//! # Accessibility permission
//!
//! Posting HID-level events requires the Accessibility permission
//! (System Settings → Privacy & Security → Accessibility). Without it
//! the posts are silently dropped by the system.

use std::os::raw::{c_ulong, c_void};

use core_foundation::base::TCFType;
use core_foundation::data::{CFData, CFDataRef};
use core_foundation::string::CFStringRef;
use core_graphics::event::{CGEvent, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

use tracing::warn;

use autotype_core::{
    ActiveWindowArgs, AppWindowInfo, AutoTypeError, Direction, KeyEvent, KeyOutput, Modifier,
    NativeKeyCode, Result,
};

use super::PlatformServices;

// ── Carbon / HIToolbox FFI ────────────────────────────────────────────────────
//
// The Text Input Source and UCKeyTranslate calls have no wrapper crate;
// these are their stable C signatures from HIToolbox.

#[repr(C)]
struct OpaqueTISInputSource {
    _private: [u8; 0],
}
type TISInputSourceRef = *mut OpaqueTISInputSource;

const KUC_KEY_ACTION_DOWN: u16 = 0;
const KUC_KEY_TRANSLATE_NO_DEAD_KEYS_MASK: u32 = 1;
/// `shiftKey` from Carbon's event modifiers, pre-shifted the way
/// `UCKeyTranslate` expects its `modifierKeyState` argument.
const UCKEY_SHIFT: u32 = 0x02;

const HARDWARE_KEYCODE_COUNT: u16 = 128;

#[link(name = "Carbon", kind = "framework")]
extern "C" {
    static kTISPropertyUnicodeKeyLayoutData: CFStringRef;

    fn TISCopyCurrentKeyboardInputSource() -> TISInputSourceRef;
    fn TISGetInputSourceProperty(source: TISInputSourceRef, key: CFStringRef) -> *mut c_void;
    fn LMGetKbdType() -> u8;

    fn UCKeyTranslate(
        key_layout_ptr: *const c_void,
        virtual_key_code: u16,
        key_action: u16,
        modifier_key_state: u32,
        keyboard_type: u32,
        key_translate_options: u32,
        dead_key_state: *mut u32,
        max_string_length: c_ulong,
        actual_string_length: *mut c_ulong,
        unicode_string: *mut u16,
    ) -> i32;
}

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    fn CGEventSourceKeyState(state_id: i32, keycode: u16) -> bool;
}

/// `kCGEventSourceStateCombinedSessionState`: the aggregate key state of
/// the login session, which includes the physical keyboard.
const COMBINED_SESSION_STATE: i32 = 0;

// CGKeyCodes of the modifier keys (ANSI layout positions).
const KEY_COMMAND_RIGHT: u16 = 0x36;
const KEY_COMMAND_LEFT: u16 = 0x37;
const KEY_SHIFT_LEFT: u16 = 0x38;
const KEY_OPTION_LEFT: u16 = 0x3A;
const KEY_CONTROL_LEFT: u16 = 0x3B;
const KEY_SHIFT_RIGHT: u16 = 0x3C;
const KEY_OPTION_RIGHT: u16 = 0x3D;
const KEY_CONTROL_RIGHT: u16 = 0x3E;

/// macOS platform services backed by CGEvent injection and the Text
/// Input Source layout query.
pub struct MacosPlatform {
    source: CGEventSource,
}

impl MacosPlatform {
    /// # Errors
    ///
    /// [`AutoTypeError::Platform`] when the HID event source cannot be
    /// created, which normally means the process has no access to the
    /// window server (e.g. an SSH session without a GUI login).
    pub fn new() -> Result<Self> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| AutoTypeError::Platform("cannot create HID event source".into()))?;
        Ok(Self { source })
    }

    fn post_keyboard(&self, keycode: u16, direction: Direction) -> Result<()> {
        let event =
            CGEvent::new_keyboard_event(self.source.clone(), keycode, direction == Direction::Down)
                .map_err(|_| AutoTypeError::Platform("cannot create keyboard event".into()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn post_unicode(&self, ch: char, direction: Direction) -> Result<()> {
        let event =
            CGEvent::new_keyboard_event(self.source.clone(), 0, direction == Direction::Down)
                .map_err(|_| AutoTypeError::Platform("cannot create keyboard event".into()))?;
        let mut units = [0u16; 2];
        let encoded = ch.encode_utf16(&mut units);
        event.set_string_from_utf16_unencoded(encoded);
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    /// The active layout's `uchr` data, owned so it outlives the
    /// translation calls.
    fn current_layout_data() -> Option<CFData> {
        unsafe {
            let source = TISCopyCurrentKeyboardInputSource();
            if source.is_null() {
                return None;
            }
            let data = TISGetInputSourceProperty(source, kTISPropertyUnicodeKeyLayoutData);
            // Some input sources (e.g. IMEs) carry no key layout data.
            if data.is_null() {
                return None;
            }
            Some(CFData::wrap_under_get_rule(data as CFDataRef))
        }
    }

    /// The string produced by pressing `keycode` with `modifier_state`
    /// under `layout`, ignoring dead-key composition.
    fn translate(layout: &CFData, keycode: u16, modifier_state: u32) -> Option<char> {
        let mut dead_key_state: u32 = 0;
        let mut buf = [0u16; 4];
        let mut produced: c_ulong = 0;
        let status = unsafe {
            UCKeyTranslate(
                layout.bytes().as_ptr().cast(),
                keycode,
                KUC_KEY_ACTION_DOWN,
                modifier_state,
                LMGetKbdType() as u32,
                KUC_KEY_TRANSLATE_NO_DEAD_KEYS_MASK,
                &mut dead_key_state,
                buf.len() as c_ulong,
                &mut produced,
                buf.as_mut_ptr(),
            )
        };
        if status != 0 || produced == 0 {
            return None;
        }
        char::decode_utf16(buf[..produced as usize].iter().copied())
            .next()?
            .ok()
    }
}

impl PlatformServices for MacosPlatform {
    fn emit(&mut self, event: KeyEvent) -> Result<()> {
        match event.output {
            KeyOutput::Native(code) => self.post_keyboard(code.raw(), event.direction),
            KeyOutput::Unicode(ch) => self.post_unicode(ch, event.direction),
        }
    }

    fn layout_key_for_char(&mut self, ch: char) -> Option<(NativeKeyCode, Modifier)> {
        let layout = Self::current_layout_data()?;
        for keycode in 0..HARDWARE_KEYCODE_COUNT {
            if Self::translate(&layout, keycode, 0) == Some(ch) {
                return Some((NativeKeyCode::from_raw(keycode), Modifier::NONE));
            }
            if Self::translate(&layout, keycode, UCKEY_SHIFT) == Some(ch) {
                return Some((NativeKeyCode::from_raw(keycode), Modifier::SHIFT));
            }
        }
        None
    }

    fn pressed_modifiers(&mut self) -> Modifier {
        let down = |keycode: u16| unsafe { CGEventSourceKeyState(COMBINED_SESSION_STATE, keycode) };
        let mut pressed = Modifier::NONE;
        if down(KEY_CONTROL_LEFT) || down(KEY_CONTROL_RIGHT) {
            pressed |= Modifier::CTRL;
        }
        if down(KEY_OPTION_LEFT) || down(KEY_OPTION_RIGHT) {
            pressed |= Modifier::ALT;
        }
        if down(KEY_SHIFT_LEFT) || down(KEY_SHIFT_RIGHT) {
            pressed |= Modifier::SHIFT;
        }
        if down(KEY_COMMAND_LEFT) || down(KEY_COMMAND_RIGHT) {
            pressed |= Modifier::META;
        }
        pressed
    }

    fn active_pid(&mut self) -> Option<u32> {
        window_list::frontmost().map(|w| w.pid)
    }

    fn active_window(&mut self, args: &ActiveWindowArgs) -> Option<AppWindowInfo> {
        let mut info = window_list::frontmost()?;
        if !args.get_window_title {
            info.title = None;
        }
        // Reading a browser's address bar needs the Apple Events
        // automation permission and per-browser scripting; not wired up.
        info.url = None;
        Some(info)
    }

    fn show_window(&mut self, window: &AppWindowInfo) -> bool {
        // Activating another application requires AppKit
        // (NSRunningApplication::activate), which is outside this crate's
        // framework set.
        warn!(
            window_id = window.window_id,
            "window activation is not available on macOS"
        );
        false
    }
}

/// Foreground-window lookup via the CoreGraphics window list.
///
/// The on-screen window list is ordered front to back; the first entry on
/// the normal window layer (0) belongs to the frontmost application.
mod window_list {
    use core_foundation::array::{CFArrayGetCount, CFArrayGetValueAtIndex};
    use core_foundation::base::{CFRelease, TCFType, ToVoid};
    use core_foundation::dictionary::{CFDictionaryGetValue, CFDictionaryRef};
    use core_foundation::number::CFNumber;
    use core_foundation::string::CFString;
    use core_graphics::window::{
        kCGNullWindowID, kCGWindowListExcludeDesktopElements, kCGWindowListOptionOnScreenOnly,
        CGWindowListCopyWindowInfo,
    };

    use autotype_core::AppWindowInfo;

    /// `kCGWindowLayer` of ordinary application windows; higher layers are
    /// menus, tooltips, and other overlays.
    const NORMAL_WINDOW_LAYER: i64 = 0;

    unsafe fn number(dict: CFDictionaryRef, key: &str) -> Option<i64> {
        let key = CFString::new(key);
        let value = CFDictionaryGetValue(dict, key.to_void());
        if value.is_null() {
            return None;
        }
        CFNumber::wrap_under_get_rule(value as _).to_i64()
    }

    unsafe fn string(dict: CFDictionaryRef, key: &str) -> Option<String> {
        let key = CFString::new(key);
        let value = CFDictionaryGetValue(dict, key.to_void());
        if value.is_null() {
            return None;
        }
        Some(CFString::wrap_under_get_rule(value as _).to_string())
    }

    pub fn frontmost() -> Option<AppWindowInfo> {
        unsafe {
            let options = kCGWindowListOptionOnScreenOnly | kCGWindowListExcludeDesktopElements;
            let list = CGWindowListCopyWindowInfo(options, kCGNullWindowID);
            if list.is_null() {
                return None;
            }
            let mut found = None;
            let count = CFArrayGetCount(list as _);
            for index in 0..count {
                let dict = CFArrayGetValueAtIndex(list as _, index) as CFDictionaryRef;
                if dict.is_null() {
                    continue;
                }
                if number(dict, "kCGWindowLayer") != Some(NORMAL_WINDOW_LAYER) {
                    continue;
                }
                found = Some(AppWindowInfo {
                    pid: number(dict, "kCGWindowOwnerPID").unwrap_or(0) as u32,
                    window_id: number(dict, "kCGWindowNumber").unwrap_or(0) as u64,
                    app_name: string(dict, "kCGWindowOwnerName").unwrap_or_default(),
                    title: string(dict, "kCGWindowName"),
                    url: None,
                });
                break;
            }
            CFRelease(list as *const std::ffi::c_void);
            found
        }
    }
}
