//! Windows platform services via `SendInput`.
//!
//! # How Windows sees synthesized input (for beginners)
//!
//! `SendInput` places keyboard events directly on the system input queue,
//! so the focused application receives them exactly like physical
//! keystrokes. Each event carries a virtual-key code (`wVk`), a hardware
//! scan code (`wScan`), and flags. We always fill both: some applications
//! (games, terminals) read the scan code and ignore the virtual key.
//!
//! Two special flags matter here:
//!
//! - `KEYEVENTF_EXTENDEDKEY` — keys that historically lived on the
//!   extended keyboard (arrows, the navigation cluster, right-side
//!   modifiers) need this flag or applications see their numpad twins.
//! - `KEYEVENTF_UNICODE` — injects a UTF-16 code unit directly, without
//!   any physical key. This is the fallback for characters the active
//!   layout cannot produce; characters outside the BMP are sent as their
//!   surrogate pair, one event per code unit.
//!
//! # Layout resolution
//!
//! `VkKeyScanExW` answers "which virtual key plus which modifiers produce
//! this character" against a specific keyboard layout. The layout is
//! re-queried from the foreground window's thread on every call, because
//! layouts are per-thread on Windows and the user can switch them at any
//! time.

use tracing::warn;
use windows::Win32::Foundation::{CloseHandle, HWND};
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
    PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, GetKeyboardLayout, MapVirtualKeyW, SendInput, VkKeyScanExW, INPUT, INPUT_0,
    INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP,
    KEYEVENTF_UNICODE, MAPVK_VK_TO_VSC, VIRTUAL_KEY, VK_CONTROL, VK_LWIN, VK_MENU, VK_RWIN,
    VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextW, GetWindowThreadProcessId, SetForegroundWindow,
};

use autotype_core::{
    ActiveWindowArgs, AppWindowInfo, AutoTypeError, Direction, KeyEvent, KeyOutput, Modifier,
    NativeKeyCode, Result,
};

use super::PlatformServices;

/// Virtual keys that need `KEYEVENTF_EXTENDEDKEY` to be interpreted as
/// themselves rather than their numpad twins.
fn is_extended_key(vk: u16) -> bool {
    matches!(
        vk,
        0x21..=0x2E // PageUp..Delete: nav cluster and arrows
        | 0x5B | 0x5C // Win keys
        | 0x6F // numpad divide
        | 0x90 // NumLock
        | 0xA3 | 0xA5 // right Ctrl, right Alt
    )
}

/// Windows platform services backed by `SendInput` and the foreground
/// window APIs.
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }

    /// Keyboard layout of the foreground window's thread, which is the
    /// layout the typed characters will be interpreted under.
    fn foreground_layout() -> windows::Win32::UI::TextServices::HKL {
        unsafe {
            let hwnd = GetForegroundWindow();
            let thread = GetWindowThreadProcessId(hwnd, None);
            GetKeyboardLayout(thread)
        }
    }

    fn send(&self, inputs: &[INPUT]) -> Result<()> {
        let sent = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(AutoTypeError::Platform(format!(
                "SendInput accepted {sent} of {} events",
                inputs.len()
            )));
        }
        Ok(())
    }

    fn key_input(vk: u16, direction: Direction) -> INPUT {
        let mut flags = KEYBD_EVENT_FLAGS(0);
        if direction == Direction::Up {
            flags |= KEYEVENTF_KEYUP;
        }
        if is_extended_key(vk) {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        let scan = unsafe { MapVirtualKeyW(vk as u32, MAPVK_VK_TO_VSC) } as u16;
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(vk),
                    wScan: scan,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    fn unicode_input(unit: u16, direction: Direction) -> INPUT {
        let mut flags = KEYEVENTF_UNICODE;
        if direction == Direction::Up {
            flags |= KEYEVENTF_KEYUP;
        }
        INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(0),
                    wScan: unit,
                    dwFlags: flags,
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    fn process_image_name(pid: u32) -> Option<String> {
        let handle =
            unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) }.ok()?;
        let mut buf = [0u16; 1024];
        let mut len = buf.len() as u32;
        let result = unsafe {
            QueryFullProcessImageNameW(
                handle,
                PROCESS_NAME_WIN32,
                windows::core::PWSTR(buf.as_mut_ptr()),
                &mut len,
            )
        };
        unsafe {
            let _ = CloseHandle(handle);
        }
        result.ok()?;
        let path = String::from_utf16_lossy(&buf[..len as usize]);
        // The executable stem is the closest Windows has to an app name.
        let name = path
            .rsplit('\\')
            .next()
            .map(|file| file.trim_end_matches(".exe").to_owned())?;
        Some(name)
    }
}

impl PlatformServices for WindowsPlatform {
    fn emit(&mut self, event: KeyEvent) -> Result<()> {
        match event.output {
            KeyOutput::Native(code) => {
                self.send(&[Self::key_input(code.raw(), event.direction)])
            }
            KeyOutput::Unicode(ch) => {
                // One event per UTF-16 code unit; non-BMP characters are
                // their surrogate pair, submitted in a single batch so
                // nothing can interleave between the halves.
                let mut units = [0u16; 2];
                let encoded = ch.encode_utf16(&mut units);
                let inputs: Vec<INPUT> = encoded
                    .iter()
                    .map(|&unit| Self::unicode_input(unit, event.direction))
                    .collect();
                self.send(&inputs)
            }
        }
    }

    fn layout_key_for_char(&mut self, ch: char) -> Option<(NativeKeyCode, Modifier)> {
        // VkKeyScanExW works on single UTF-16 units only.
        let unit = u16::try_from(ch as u32).ok()?;
        let scan = unsafe { VkKeyScanExW(unit, Self::foreground_layout()) };
        if scan == -1 {
            return None;
        }
        let vk = (scan & 0xFF) as u16;
        let shift_state = ((scan >> 8) & 0xFF) as u8;
        let mut modifier = Modifier::NONE;
        if shift_state & 0x01 != 0 {
            modifier |= Modifier::SHIFT;
        }
        if shift_state & 0x02 != 0 {
            modifier |= Modifier::CTRL;
        }
        if shift_state & 0x04 != 0 {
            modifier |= Modifier::ALT;
        }
        Some((NativeKeyCode::from_raw(vk), modifier))
    }

    fn pressed_modifiers(&mut self) -> Modifier {
        let down = |vk: VIRTUAL_KEY| unsafe { GetAsyncKeyState(vk.0 as i32) as u16 & 0x8000 != 0 };
        let mut pressed = Modifier::NONE;
        if down(VK_CONTROL) {
            pressed |= Modifier::CTRL;
        }
        if down(VK_MENU) {
            pressed |= Modifier::ALT;
        }
        if down(VK_SHIFT) {
            pressed |= Modifier::SHIFT;
        }
        if down(VK_LWIN) || down(VK_RWIN) {
            pressed |= Modifier::META;
        }
        pressed
    }

    fn active_pid(&mut self) -> Option<u32> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            return None;
        }
        let mut pid = 0u32;
        unsafe {
            GetWindowThreadProcessId(hwnd, Some(&mut pid));
        }
        (pid != 0).then_some(pid)
    }

    fn active_window(&mut self, args: &ActiveWindowArgs) -> Option<AppWindowInfo> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            return None;
        }
        let mut pid = 0u32;
        unsafe {
            GetWindowThreadProcessId(hwnd, Some(&mut pid));
        }
        let title = if args.get_window_title {
            let mut buf = [0u16; 512];
            let len = unsafe { GetWindowTextW(hwnd, &mut buf) };
            (len > 0).then(|| String::from_utf16_lossy(&buf[..len as usize]))
        } else {
            None
        };
        Some(AppWindowInfo {
            pid,
            window_id: hwnd.0 as usize as u64,
            app_name: Self::process_image_name(pid).unwrap_or_default(),
            title,
            // Reading a browser's address bar needs UI Automation, which
            // is out of scope here.
            url: None,
        })
    }

    fn show_window(&mut self, window: &AppWindowInfo) -> bool {
        if window.window_id == 0 {
            return false;
        }
        let hwnd = HWND(window.window_id as usize as *mut core::ffi::c_void);
        let accepted = unsafe { SetForegroundWindow(hwnd) }.as_bool();
        if !accepted {
            // Windows refuses foreground changes from background
            // processes without recent input; the caller can retry after
            // user interaction.
            warn!(window_id = window.window_id, "SetForegroundWindow refused");
        }
        accepted
    }
}
