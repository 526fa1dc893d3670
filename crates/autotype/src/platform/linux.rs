//! Linux X11 platform services via the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize
//! keyboard events as if the user had physically pressed the keys. The
//! events are delivered to the focused window exactly like real input —
//! the receiving application cannot tell the difference.
//!
//! The central call is `XTestFakeKeyEvent(display, keycode, is_press,
//! time)`. It takes an X11 *keycode* (the server's number for a physical
//! key), while our native currency is the *KeySym* (the symbolic value a
//! key produces, e.g. `XK_a` = 0x0061). The conversion is
//! `XKeysymToKeycode(display, keysym)`.
//!
//! # Raw-Unicode injection
//!
//! X11 has no Unicode injection call. For a character no physical key
//! produces, we borrow a spare keycode (one the server maps to nothing),
//! temporarily bind it to the character's KeySym with
//! `XChangeKeyboardMapping`, fake the key event, and unbind it again
//! after the key-up. The KeySym for an arbitrary codepoint follows the
//! X11 convention: codepoints below 0x100 are their own KeySym (Latin-1),
//! everything else is `0x0100_0000 | codepoint`.
//!
//! # Permissions
//!
//! XTest only needs access to the X display, which a process in the same
//! user session has via `DISPLAY`. If the display cannot be opened, the
//! constructor fails with a `Platform` error.

use std::os::raw::{c_char, c_int, c_long, c_uchar, c_ulong};
use std::ptr;

use tracing::{debug, warn};
use x11::xlib;
use x11::xtest;

use autotype_core::{
    ActiveWindowArgs, AppWindowInfo, AutoTypeError, Direction, KeyEvent, KeyOutput, Modifier,
    NativeKeyCode, Result,
};

use super::PlatformServices;

// ── X11 constants ─────────────────────────────────────────────────────────────

/// `CurrentTime` (0) tells XTest to use the server's current timestamp,
/// which is correct for synthesized events.
const CURRENT_TIME: c_ulong = 0;

/// KeySym prefix for codepoints outside Latin-1, per the X11 keysym
/// encoding convention.
const UNICODE_KEYSYM_BASE: c_ulong = 0x0100_0000;

/// Only the first keyboard group (layout) and its plain/Shift levels are
/// consulted when resolving characters; additional groups and levels need
/// modifiers this engine does not press.
const SHIFT_LEVELS: usize = 2;

const SOURCE_APPLICATION: c_long = 1;

/// X11 platform services backed by XTest and EWMH window queries.
pub struct X11Platform {
    display: *mut xlib::Display,
    /// Spare keycode borrowed for raw-Unicode injection, with the KeySym
    /// currently bound to it. Bound on demand, unbound after each key-up.
    scratch: Option<(c_uchar, c_ulong)>,
}

impl X11Platform {
    /// Connects to the display named by `DISPLAY`.
    ///
    /// # Errors
    ///
    /// [`AutoTypeError::Platform`] when `DISPLAY` is unset or the X server
    /// is unreachable.
    pub fn new() -> Result<Self> {
        // Safety: XOpenDisplay(null) opens the default display; a null
        // return means no server, which we surface as an error.
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(AutoTypeError::Platform(
                "cannot open X11 display (is DISPLAY set?)".into(),
            ));
        }
        debug!("X11 display opened");
        Ok(Self {
            display,
            scratch: None,
        })
    }

    /// KeySym for an arbitrary character, per the X11 encoding rule.
    fn char_keysym(ch: char) -> c_ulong {
        let cp = ch as u32;
        if cp < 0x100 {
            cp as c_ulong
        } else {
            UNICODE_KEYSYM_BASE | cp as c_ulong
        }
    }

    fn fake_key(&mut self, keycode: c_uchar, direction: Direction) {
        let is_press = match direction {
            Direction::Down => 1,
            Direction::Up => 0,
        };
        unsafe {
            xtest::XTestFakeKeyEvent(self.display, keycode as u32, is_press, CURRENT_TIME);
            xlib::XFlush(self.display);
        }
    }

    /// Finds a keycode the server maps to no KeySym at all, suitable for
    /// temporary rebinding.
    fn find_spare_keycode(&mut self) -> Option<c_uchar> {
        let (min, max) = self.keycode_range();
        let mut per: c_int = 0;
        let count = (max - min + 1) as c_int;
        let syms =
            unsafe { xlib::XGetKeyboardMapping(self.display, min as c_uchar, count, &mut per) };
        if syms.is_null() {
            return None;
        }
        let mut spare = None;
        for keycode in min..=max {
            let base = ((keycode - min) as usize) * per as usize;
            let all_empty = (0..per as usize)
                .all(|level| unsafe { *syms.add(base + level) } == xlib::NoSymbol as c_ulong);
            if all_empty {
                spare = Some(keycode as c_uchar);
                break;
            }
        }
        unsafe {
            xlib::XFree(syms.cast());
        }
        spare
    }

    fn keycode_range(&self) -> (c_int, c_int) {
        let mut min: c_int = 0;
        let mut max: c_int = 0;
        unsafe {
            xlib::XDisplayKeycodes(self.display, &mut min, &mut max);
        }
        (min, max)
    }

    /// Binds `keysym` to the scratch keycode, borrowing one first if
    /// needed.
    fn bind_scratch(&mut self, keysym: c_ulong) -> Result<c_uchar> {
        let keycode = match self.scratch {
            Some((keycode, bound)) if bound == keysym => return Ok(keycode),
            Some((keycode, _)) => keycode,
            None => self
                .find_spare_keycode()
                .ok_or(AutoTypeError::NotSupported("no spare keycode for Unicode injection"))?,
        };
        let mut syms = [keysym; SHIFT_LEVELS];
        unsafe {
            xlib::XChangeKeyboardMapping(
                self.display,
                keycode as c_int,
                SHIFT_LEVELS as c_int,
                syms.as_mut_ptr(),
                1,
            );
            xlib::XSync(self.display, xlib::False);
        }
        self.scratch = Some((keycode, keysym));
        Ok(keycode)
    }

    /// Unbinds the scratch keycode so the borrowed slot does not leak a
    /// phantom key into the user's layout.
    fn unbind_scratch(&mut self) {
        if let Some((keycode, _)) = self.scratch.take() {
            let mut syms = [xlib::NoSymbol as c_ulong; SHIFT_LEVELS];
            unsafe {
                xlib::XChangeKeyboardMapping(
                    self.display,
                    keycode as c_int,
                    SHIFT_LEVELS as c_int,
                    syms.as_mut_ptr(),
                    1,
                );
                xlib::XSync(self.display, xlib::False);
            }
            // Remember the slot, forget the binding.
            self.scratch = Some((keycode, xlib::NoSymbol as c_ulong));
        }
    }

    fn emit_unicode(&mut self, ch: char, direction: Direction) -> Result<()> {
        let keysym = Self::char_keysym(ch);
        // An active scratch binding must be reused directly: after the
        // down, XKeysymToKeycode would report the scratch key itself as a
        // layout hit and the unbind would never run.
        if let Some((keycode, bound)) = self.scratch {
            if bound == keysym {
                self.fake_key(keycode, direction);
                if direction == Direction::Up {
                    self.unbind_scratch();
                }
                return Ok(());
            }
        }
        // A key the active layout already has needs no rebinding.
        let existing = unsafe { xlib::XKeysymToKeycode(self.display, keysym) };
        if existing != 0 {
            self.fake_key(existing, direction);
            return Ok(());
        }
        let keycode = self.bind_scratch(keysym)?;
        self.fake_key(keycode, direction);
        if direction == Direction::Up {
            self.unbind_scratch();
        }
        Ok(())
    }

    fn intern_atom(&self, name: &[u8]) -> xlib::Atom {
        unsafe { xlib::XInternAtom(self.display, name.as_ptr() as *const c_char, xlib::False) }
    }

    fn root_window(&self) -> xlib::Window {
        unsafe { xlib::XDefaultRootWindow(self.display) }
    }

    /// Reads a window property as raw bytes plus its format (8/16/32).
    fn property(
        &self,
        window: xlib::Window,
        name: &[u8],
    ) -> Option<(Vec<u8>, c_int, c_ulong)> {
        let atom = self.intern_atom(name);
        let mut actual_type: xlib::Atom = 0;
        let mut actual_format: c_int = 0;
        let mut nitems: c_ulong = 0;
        let mut bytes_after: c_ulong = 0;
        let mut prop: *mut c_uchar = ptr::null_mut();
        let status = unsafe {
            xlib::XGetWindowProperty(
                self.display,
                window,
                atom,
                0,
                1024,
                xlib::False,
                xlib::AnyPropertyType as c_ulong,
                &mut actual_type,
                &mut actual_format,
                &mut nitems,
                &mut bytes_after,
                &mut prop,
            )
        };
        if status != xlib::Success as c_int || prop.is_null() || nitems == 0 {
            if !prop.is_null() {
                unsafe { xlib::XFree(prop.cast()) };
            }
            return None;
        }
        // Format 32 items are stored as native longs regardless of the
        // declared 32-bit width.
        let item_bytes = match actual_format {
            8 => 1,
            16 => 2,
            32 => std::mem::size_of::<c_ulong>(),
            _ => 1,
        };
        let len = nitems as usize * item_bytes;
        let bytes = unsafe { std::slice::from_raw_parts(prop, len) }.to_vec();
        unsafe { xlib::XFree(prop.cast()) };
        Some((bytes, actual_format, nitems))
    }

    /// First 32-bit item of a property, widened through the native-long
    /// storage X11 uses for format-32 data.
    fn long_property(&self, window: xlib::Window, name: &[u8]) -> Option<c_ulong> {
        let (bytes, format, _) = self.property(window, name)?;
        if format != 32 || bytes.len() < std::mem::size_of::<c_ulong>() {
            return None;
        }
        let mut raw = [0u8; std::mem::size_of::<c_ulong>()];
        raw.copy_from_slice(&bytes[..std::mem::size_of::<c_ulong>()]);
        Some(c_ulong::from_ne_bytes(raw))
    }

    fn string_property(&self, window: xlib::Window, name: &[u8]) -> Option<String> {
        let (bytes, format, _) = self.property(window, name)?;
        if format != 8 {
            return None;
        }
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    fn foreground_window(&self) -> Option<xlib::Window> {
        let window = self.long_property(self.root_window(), b"_NET_ACTIVE_WINDOW\0")?;
        if window == 0 {
            None
        } else {
            Some(window as xlib::Window)
        }
    }

    /// Application name from the ICCCM class hint (the `res_class` half).
    fn window_class(&self, window: xlib::Window) -> Option<String> {
        let mut hint = xlib::XClassHint {
            res_name: ptr::null_mut(),
            res_class: ptr::null_mut(),
        };
        let status = unsafe { xlib::XGetClassHint(self.display, window, &mut hint) };
        if status == 0 {
            return None;
        }
        let class = if hint.res_class.is_null() {
            None
        } else {
            let owned = unsafe { std::ffi::CStr::from_ptr(hint.res_class) }
                .to_string_lossy()
                .into_owned();
            Some(owned)
        };
        unsafe {
            if !hint.res_name.is_null() {
                xlib::XFree(hint.res_name.cast());
            }
            if !hint.res_class.is_null() {
                xlib::XFree(hint.res_class.cast());
            }
        }
        class
    }

    fn window_title(&self, window: xlib::Window) -> Option<String> {
        // EWMH UTF-8 title first, legacy WM_NAME as the fallback.
        self.string_property(window, b"_NET_WM_NAME\0")
            .or_else(|| self.string_property(window, b"WM_NAME\0"))
    }
}

impl Drop for X11Platform {
    fn drop(&mut self) {
        self.unbind_scratch();
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
    }
}

impl PlatformServices for X11Platform {
    fn emit(&mut self, event: KeyEvent) -> Result<()> {
        match event.output {
            KeyOutput::Native(code) => {
                let keysym = code.raw() as c_ulong;
                let keycode = unsafe { xlib::XKeysymToKeycode(self.display, keysym) };
                if keycode == 0 {
                    return Err(AutoTypeError::Platform(format!(
                        "keysym {keysym:#x} has no keycode on this server"
                    )));
                }
                self.fake_key(keycode, event.direction);
                Ok(())
            }
            KeyOutput::Unicode(ch) => self.emit_unicode(ch, event.direction),
        }
    }

    fn layout_key_for_char(&mut self, ch: char) -> Option<(NativeKeyCode, Modifier)> {
        let target = Self::char_keysym(ch);
        let (min, max) = self.keycode_range();
        let mut per: c_int = 0;
        let count = max - min + 1;
        let syms =
            unsafe { xlib::XGetKeyboardMapping(self.display, min as c_uchar, count, &mut per) };
        if syms.is_null() {
            return None;
        }

        let mut found = None;
        'keys: for keycode in min..=max {
            let base = ((keycode - min) as usize) * per as usize;
            for level in 0..SHIFT_LEVELS.min(per as usize) {
                if unsafe { *syms.add(base + level) } != target {
                    continue;
                }
                let modifier = if level == 0 { Modifier::NONE } else { Modifier::SHIFT };
                // Report the key by its plain-level KeySym so emission can
                // map it back to this keycode.
                let plain = unsafe { *syms.add(base) };
                let keysym = if plain == xlib::NoSymbol as c_ulong { target } else { plain };
                found = Some((NativeKeyCode::from_raw(keysym as u32), modifier));
                break 'keys;
            }
        }
        unsafe {
            xlib::XFree(syms.cast());
        }
        found
    }

    fn pressed_modifiers(&mut self) -> Modifier {
        let mut keys = [0 as c_char; 32];
        unsafe {
            xlib::XQueryKeymap(self.display, keys.as_mut_ptr());
        }
        let is_down = |keycode: c_uchar| -> bool {
            if keycode == 0 {
                return false;
            }
            keys[(keycode / 8) as usize] as u8 & (1 << (keycode % 8)) != 0
        };
        let pairs: [(c_ulong, Modifier); 8] = [
            (0xFFE3, Modifier::CTRL),  // Control_L
            (0xFFE4, Modifier::CTRL),  // Control_R
            (0xFFE9, Modifier::ALT),   // Alt_L
            (0xFFEA, Modifier::ALT),   // Alt_R
            (0xFFE1, Modifier::SHIFT), // Shift_L
            (0xFFE2, Modifier::SHIFT), // Shift_R
            (0xFFEB, Modifier::META),  // Super_L
            (0xFFEC, Modifier::META),  // Super_R
        ];
        let mut pressed = Modifier::NONE;
        for (keysym, modifier) in pairs {
            let keycode = unsafe { xlib::XKeysymToKeycode(self.display, keysym) };
            if is_down(keycode) {
                pressed |= modifier;
            }
        }
        pressed
    }

    fn active_pid(&mut self) -> Option<u32> {
        let window = self.foreground_window()?;
        self.long_property(window, b"_NET_WM_PID\0")
            .map(|pid| pid as u32)
    }

    fn active_window(&mut self, args: &ActiveWindowArgs) -> Option<AppWindowInfo> {
        let window = self.foreground_window()?;
        let pid = self
            .long_property(window, b"_NET_WM_PID\0")
            .unwrap_or(0) as u32;
        let title = if args.get_window_title {
            self.window_title(window)
        } else {
            None
        };
        Some(AppWindowInfo {
            pid,
            window_id: window as u64,
            app_name: self.window_class(window).unwrap_or_default(),
            title,
            // Browser URL inspection is not available through X11
            // properties.
            url: None,
        })
    }

    fn show_window(&mut self, window: &AppWindowInfo) -> bool {
        if window.window_id == 0 {
            return false;
        }
        let target = window.window_id as xlib::Window;
        let mut event: xlib::XEvent = unsafe { std::mem::zeroed() };
        {
            let message = unsafe { &mut event.client_message };
            message.type_ = xlib::ClientMessage;
            message.window = target;
            message.message_type = self.intern_atom(b"_NET_ACTIVE_WINDOW\0");
            message.format = 32;
            message.data.set_long(0, SOURCE_APPLICATION);
            message.data.set_long(1, CURRENT_TIME as c_long);
        }
        let status = unsafe {
            xlib::XSendEvent(
                self.display,
                self.root_window(),
                xlib::False,
                xlib::SubstructureRedirectMask | xlib::SubstructureNotifyMask,
                &mut event,
            )
        };
        unsafe {
            xlib::XFlush(self.display);
        }
        if status == 0 {
            warn!(window_id = window.window_id, "window activation rejected");
            return false;
        }
        true
    }
}
