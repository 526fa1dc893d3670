//! Static key code translation tables for keyboard event synthesis.
//!
//! The canonical representation inside the engine is the logical
//! [`KeyCode`]; platform-native codes are produced here, at the translation
//! boundary, and nowhere else.  Each supported platform numbers its physical
//! keys differently:
//!
//! - Windows uses Virtual Key codes (`VK_*`, winuser.h) — [`windows_vk`].
//! - macOS uses `CGKeyCode` values (`kVK_*`, Carbon Events.h) — [`macos_cg`].
//! - X11 uses KeySyms (X11/keysymdef.h) — [`linux_x11`].
//!
//! Native codes are wrapped in one opaque newtype per platform so that raw
//! integers never cross the engine boundary; [`NativeKeyCode`] is the alias
//! for the build target's newtype.
//!
//! These tables are static and layout-independent.  Resolving which native
//! code produces a given *character* under the currently active layout is a
//! live OS query and lives with the platform services, not here.

pub mod linux_x11;
pub mod macos_cg;
pub mod windows_vk;

use serde::{Deserialize, Serialize};

use crate::keycode::KeyCode;

/// Windows Virtual Key code (`VK_*`), opaque to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowsNativeCode(pub(crate) u16);

/// macOS `CGKeyCode` value (`kVK_*`), opaque to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacNativeCode(pub(crate) u16);

/// X11 KeySym value, opaque to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct X11NativeCode(pub(crate) u32);

impl WindowsNativeCode {
    /// Wraps a raw VK code.  Intended for the platform services layer only.
    pub fn from_raw(vk: u16) -> Self {
        Self(vk)
    }

    /// The raw VK value, needed when handing the code to the OS.
    pub fn raw(self) -> u16 {
        self.0
    }
}

impl MacNativeCode {
    /// Wraps a raw CGKeyCode.  Intended for the platform services layer only.
    pub fn from_raw(code: u16) -> Self {
        Self(code)
    }

    /// The raw CGKeyCode value, needed when handing the code to the OS.
    pub fn raw(self) -> u16 {
        self.0
    }
}

impl X11NativeCode {
    /// Wraps a raw KeySym.  Intended for the platform services layer only.
    pub fn from_raw(keysym: u32) -> Self {
        Self(keysym)
    }

    /// The raw KeySym value, needed when handing the code to the OS.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// The native key code newtype for the build target.
#[cfg(target_os = "windows")]
pub type NativeKeyCode = WindowsNativeCode;
/// The native key code newtype for the build target.
#[cfg(target_os = "macos")]
pub type NativeKeyCode = MacNativeCode;
/// The native key code newtype for the build target.
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub type NativeKeyCode = X11NativeCode;

/// Translates a logical key to the build target's native code.
///
/// Returns `None` only for keys the platform does not have at all.
pub fn native_code_for(code: KeyCode) -> Option<NativeKeyCode> {
    #[cfg(target_os = "windows")]
    {
        windows_vk::key_to_vk(code)
    }
    #[cfg(target_os = "macos")]
    {
        macos_cg::key_to_cgkeycode(code)
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        linux_x11::key_to_keysym(code)
    }
}
