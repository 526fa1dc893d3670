//! Platform services: the single point of OS interaction.
//!
//! The engine talks to the OS exclusively through the [`PlatformServices`]
//! trait. Each supported OS provides an implementation, selected at compile
//! time via `#[cfg(target_os = ...)]`; [`mock::MockPlatform`] is always
//! compiled and backs the test suites.
//!
//! Methods take `&mut self` deliberately: an `AutoType` instance is a
//! single-owner, non-shareable object (two instances typing into the same
//! target interleave at the OS with no ordering guarantee), so there is
//! nothing to synchronise inside the services.

use autotype_core::{ActiveWindowArgs, AppWindowInfo, KeyEvent, Modifier, NativeKeyCode, Result};

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod macos;

/// OS services consumed by the auto-type engine.
pub trait PlatformServices {
    /// Submits one key-down or key-up event to the OS input queue.
    ///
    /// Events are delivered in submission order; the OS interleaves them
    /// with the live keyboard, which is expected.
    ///
    /// # Errors
    ///
    /// [`autotype_core::AutoTypeError::NotSupported`] when the platform has
    /// no mechanism for the requested emission kind (e.g. raw-Unicode
    /// injection unavailable); [`autotype_core::AutoTypeError::Platform`]
    /// when the OS call fails.
    fn emit(&mut self, event: KeyEvent) -> Result<()>;

    /// Resolves a character to the native code and modifier set that the
    /// *currently active* keyboard layout maps it to.
    ///
    /// Consults live OS layout state on every call — layouts are
    /// user-switchable at runtime, so nothing here may be cached. Returns
    /// `None` when no physical key produces the character under the active
    /// layout; the caller falls back to raw-Unicode emission.
    fn layout_key_for_char(&mut self, ch: char) -> Option<(NativeKeyCode, Modifier)>;

    /// Queries the live OS modifier state (not any internally tracked set).
    fn pressed_modifiers(&mut self) -> Modifier;

    /// Process id of the foreground window's owner, if there is one.
    fn active_pid(&mut self) -> Option<u32>;

    /// Snapshot of the foreground window. Title and browser URL are only
    /// looked up when `args` asks for them.
    fn active_window(&mut self, args: &ActiveWindowArgs) -> Option<AppWindowInfo>;

    /// Brings the given window to the foreground. Returns `true` when the
    /// OS accepted the request.
    fn show_window(&mut self, window: &AppWindowInfo) -> bool;
}

// A mutable borrow of a platform is itself a platform, so callers (and
// tests) can lend one to an engine and keep inspecting it afterwards.
impl<P: PlatformServices + ?Sized> PlatformServices for &mut P {
    fn emit(&mut self, event: KeyEvent) -> Result<()> {
        (**self).emit(event)
    }

    fn layout_key_for_char(&mut self, ch: char) -> Option<(NativeKeyCode, Modifier)> {
        (**self).layout_key_for_char(ch)
    }

    fn pressed_modifiers(&mut self) -> Modifier {
        (**self).pressed_modifiers()
    }

    fn active_pid(&mut self) -> Option<u32> {
        (**self).active_pid()
    }

    fn active_window(&mut self, args: &ActiveWindowArgs) -> Option<AppWindowInfo> {
        (**self).active_window(args)
    }

    fn show_window(&mut self, window: &AppWindowInfo) -> bool {
        (**self).show_window(window)
    }
}

/// The platform services implementation for the build target.
#[cfg(target_os = "windows")]
pub type OsPlatform = windows::WindowsPlatform;
/// The platform services implementation for the build target.
#[cfg(target_os = "linux")]
pub type OsPlatform = linux::X11Platform;
/// The platform services implementation for the build target.
#[cfg(target_os = "macos")]
pub type OsPlatform = macos::MacosPlatform;
