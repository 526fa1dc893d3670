//! The auto-type engine: the public operation surface.
//!
//! [`AutoType`] orchestrates the key translation tables, the tracked
//! [`ModifierState`], and the platform services to turn text, logical key
//! presses, and shortcuts into ordered native key events.
//!
//! # Operation model (for beginners)
//!
//! Everything here reduces to one primitive: [`AutoType::key_move`], which
//! emits exactly one key-down *or* key-up and may press modifiers
//! beforehand. The composite operations layer on top:
//!
//! - [`AutoType::text`] resolves each character against the live keyboard
//!   layout, presses the modifier delta the character needs, emits
//!   down+up, and releases back to the caller's base modifiers. A
//!   character the layout cannot produce is injected as a raw-Unicode
//!   event instead of being dropped.
//! - [`AutoType::key_press`] is a single down+up for one character or
//!   logical key.
//! - [`AutoType::shortcut`] chords a key with the platform's canonical
//!   shortcut modifier (Command on macOS, Ctrl elsewhere).
//!
//! Every composite operation ends with its pressed modifiers released, on
//! the success path and the error path alike; only `key_move` may leave a
//! key or modifier held across calls, which is how manual chording works.
//!
//! An engine instance is deliberately not shareable. Two instances used
//! concurrently against the same foreground target interleave their events
//! at the OS with no ordering guarantee; callers who need that must
//! serialise access externally.

use tracing::debug;

use autotype_core::{
    native_code_for, ActiveWindowArgs, AppWindowInfo, AutoTypeError, Direction, KeyCode, KeyEvent,
    Modifier, NativeKeyCode, Result,
};

use crate::modifier_state::ModifierState;
use crate::platform::PlatformServices;

#[cfg(any(target_os = "windows", target_os = "linux", target_os = "macos"))]
use crate::platform::OsPlatform;

/// What a [`AutoType::key_move`] call addresses.
///
/// The original overload set (by character, by logical code, by native
/// code, modifier-only) collapses into this one discriminated input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// A logical key, resolved through the static platform table.
    Key(KeyCode),
    /// An already-resolved native code, used as-is.
    Native(NativeKeyCode),
    /// A character, resolved through the active keyboard layout, with
    /// raw-Unicode emission as the fallback on a layout miss.
    Char(char),
    /// No key at all: the operation addresses only the modifier set.
    ModifierOnly,
}

/// Keyboard auto-type engine.
///
/// Owns its [`ModifierState`] and a platform services handle. Construct
/// one per typing task; instances are cheap.
pub struct AutoType<P: PlatformServices> {
    platform: P,
    modifiers: ModifierState,
}

#[cfg(any(target_os = "windows", target_os = "linux", target_os = "macos"))]
impl AutoType<OsPlatform> {
    /// An engine backed by the build target's real platform services.
    ///
    /// # Errors
    ///
    /// [`AutoTypeError::Platform`] when the OS input subsystem is not
    /// reachable (e.g. no X11 display).
    pub fn new() -> Result<Self> {
        Ok(Self::with_platform(OsPlatform::new()?))
    }
}

impl<P: PlatformServices> AutoType<P> {
    /// An engine backed by the given platform services. Tests pass the
    /// mock platform here.
    pub fn with_platform(platform: P) -> Self {
        Self {
            platform,
            modifiers: ModifierState::new(),
        }
    }

    /// Read access to the platform services, for inspection in tests.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The platform's canonical shortcut modifier: Command on macOS,
    /// Ctrl everywhere else. Pure, no side effects.
    pub fn shortcut_modifier() -> Modifier {
        #[cfg(target_os = "macos")]
        {
            Modifier::META
        }
        #[cfg(not(target_os = "macos"))]
        {
            Modifier::CTRL
        }
    }

    /// Types `text` into the focused application.
    ///
    /// `modifier` is held for the whole sequence and released at the end
    /// (or on first failure). Per-character layout modifiers are an
    /// idempotent union with it: a bit already held is never pressed
    /// again. Characters the active layout cannot produce are injected as
    /// raw-Unicode events, bypassing modifier logic entirely.
    ///
    /// # Errors
    ///
    /// [`AutoTypeError::BadArg`] for empty input. An emission failure
    /// aborts the remaining characters but still releases every pressed
    /// modifier before the error is returned.
    pub fn text(&mut self, text: &str, modifier: Modifier) -> Result<()> {
        if text.is_empty() {
            return Err(AutoTypeError::BadArg("empty text"));
        }
        // Log length only; typed content is frequently sensitive.
        debug!(chars = text.chars().count(), "typing text");

        let Self { platform, modifiers } = self;
        let mut run = || -> Result<()> {
            modifiers.press_delta(platform, modifier)?;
            for ch in text.chars() {
                type_char(platform, modifiers, ch, modifier)?;
            }
            Ok(())
        };
        let outcome = run();
        // Release on both paths; the first error wins.
        let released = modifiers.release_all(platform);
        outcome.and(released)?;
        modifiers.ensure_not_pressed(platform)
    }

    /// Presses and releases a single key.
    ///
    /// With `code` given, the key is used directly and `character` is
    /// advisory (it feeds the raw-Unicode fallback if the key is absent on
    /// this platform). Without `code`, `character` resolves through the
    /// active layout exactly as in [`AutoType::text`].
    ///
    /// # Errors
    ///
    /// [`AutoTypeError::BadArg`] when neither a character nor a code is
    /// supplied — there is nothing to type.
    pub fn key_press(
        &mut self,
        character: Option<char>,
        code: Option<KeyCode>,
        modifier: Modifier,
    ) -> Result<()> {
        if character.is_none() && code.is_none() {
            return Err(AutoTypeError::BadArg("no character and no key code"));
        }

        let Self { platform, modifiers } = self;
        let run = press_once(platform, modifiers, character, code, modifier);
        let released = modifiers.release_all(platform);
        run.and(released)?;
        modifiers.ensure_not_pressed(platform)
    }

    /// Chords `code` with the platform shortcut modifier: modifier down,
    /// key down, key up, modifier up.
    pub fn shortcut(&mut self, code: KeyCode) -> Result<()> {
        self.key_press(None, Some(code), Self::shortcut_modifier())
    }

    /// Emits exactly one key event (down or up, never both).
    ///
    /// On `Down` the given modifier set is pressed first and *left held*;
    /// on `Up` the key is released without touching held modifiers, and a
    /// [`KeyInput::ModifierOnly`] up releases the named modifier bits.
    /// This is the only operation that leaves state behind across calls,
    /// which is what enables manual multi-key chording.
    ///
    /// # Errors
    ///
    /// [`AutoTypeError::BadArg`] for a modifier-only move with an empty
    /// modifier set, or a [`KeyInput::Key`] naming a modifier key (those
    /// must be held through the modifier argument so release tracking
    /// sees them); [`AutoTypeError::NotSupported`] when a logical key
    /// does not exist on this platform.
    pub fn key_move(
        &mut self,
        direction: Direction,
        input: KeyInput,
        modifier: Modifier,
    ) -> Result<()> {
        let Self { platform, modifiers } = self;
        match input {
            KeyInput::ModifierOnly => {
                if modifier.is_empty() {
                    return Err(AutoTypeError::BadArg("no key and no modifier"));
                }
                match direction {
                    Direction::Down => modifiers.press_delta(platform, modifier),
                    Direction::Up => {
                        let keep = remove_bits(modifiers.held(), modifier);
                        modifiers.release_delta(platform, keep)
                    }
                }
            }
            KeyInput::Key(code) => {
                if code.is_modifier() {
                    // A raw modifier key event would bypass the held-state
                    // ledger and never be released on drop.
                    return Err(AutoTypeError::BadArg(
                        "modifier keys move through KeyInput::ModifierOnly",
                    ));
                }
                let native = native_code_for(code)
                    .ok_or(AutoTypeError::NotSupported("key absent on this platform"))?;
                if direction == Direction::Down {
                    modifiers.press_delta(platform, modifier)?;
                }
                platform.emit(KeyEvent::native(native, direction))
            }
            KeyInput::Native(native) => {
                if direction == Direction::Down {
                    modifiers.press_delta(platform, modifier)?;
                }
                platform.emit(KeyEvent::native(native, direction))
            }
            KeyInput::Char(ch) => {
                match platform.layout_key_for_char(ch) {
                    Some((native, implied)) => {
                        if direction == Direction::Down {
                            modifiers.press_delta(platform, modifier | implied)?;
                        }
                        platform.emit(KeyEvent::native(native, direction))
                    }
                    // Layout miss: raw injection needs no modifiers.
                    None => platform.emit(KeyEvent::unicode(ch, direction)),
                }
            }
        }
    }

    /// Releases every modifier this engine holds and verifies the OS
    /// agrees nothing is left down.
    pub fn ensure_modifier_not_pressed(&mut self) -> Result<()> {
        let Self { platform, modifiers } = self;
        modifiers.ensure_not_pressed(platform)
    }

    /// Live OS modifier state. Includes modifiers held by the physical
    /// user, which is exactly what callers need to detect before typing.
    pub fn get_pressed_modifiers(&mut self) -> Modifier {
        self.platform.pressed_modifiers()
    }

    /// Static native code for a logical key on this platform.
    pub fn os_key_code(code: KeyCode) -> Option<NativeKeyCode> {
        native_code_for(code)
    }

    /// Native code producing `character` under the active layout, if any.
    pub fn os_key_code_for_char(&mut self, character: char) -> Option<NativeKeyCode> {
        self.platform
            .layout_key_for_char(character)
            .map(|(code, _)| code)
    }

    /// Batch form of [`AutoType::os_key_code_for_char`], one entry per
    /// character. Diagnostics only — typing uses the raw-Unicode fallback
    /// for unmapped characters rather than skipping them.
    pub fn os_key_codes_for_chars(&mut self, text: &str) -> Vec<Option<NativeKeyCode>> {
        text.chars()
            .map(|ch| self.os_key_code_for_char(ch))
            .collect()
    }

    /// Process id of the foreground window's owner.
    pub fn active_pid(&mut self) -> Option<u32> {
        self.platform.active_pid()
    }

    /// Snapshot of the foreground window; title and browser URL only when
    /// requested via `args`.
    pub fn active_window(&mut self, args: &ActiveWindowArgs) -> Option<AppWindowInfo> {
        self.platform.active_window(args)
    }

    /// Brings `window` to the foreground.
    pub fn show_window(&mut self, window: &AppWindowInfo) -> bool {
        self.platform.show_window(window)
    }
}

impl<P: PlatformServices> Drop for AutoType<P> {
    /// Best-effort release of anything still held, so a panicking or
    /// abandoned caller does not leave the keyboard stuck.
    fn drop(&mut self) {
        let Self { platform, modifiers } = self;
        let _ = modifiers.release_all(platform);
    }
}

/// Types one character: layout-resolved down+up inside the right modifier
/// delta, or a raw-Unicode pair on a layout miss.
fn type_char<P: PlatformServices>(
    platform: &mut P,
    modifiers: &mut ModifierState,
    ch: char,
    base: Modifier,
) -> Result<()> {
    // Control characters route through their physical keys; the layout
    // query has no key for them.
    let resolved = match ch {
        '\n' | '\r' => native_code_for(KeyCode::Enter).map(|c| (c, Modifier::NONE)),
        '\t' => native_code_for(KeyCode::Tab).map(|c| (c, Modifier::NONE)),
        _ => platform.layout_key_for_char(ch),
    };

    match resolved {
        Some((native, implied)) => {
            modifiers.press_delta(platform, base | implied)?;
            platform.emit(KeyEvent::native(native, Direction::Down))?;
            platform.emit(KeyEvent::native(native, Direction::Up))?;
            // Back down to the caller's base set before the next character.
            modifiers.release_delta(platform, base)
        }
        None => {
            platform.emit(KeyEvent::unicode(ch, Direction::Down))?;
            platform.emit(KeyEvent::unicode(ch, Direction::Up))
        }
    }
}

/// One down+up for `key_press`, with the explicit-code path preferred.
fn press_once<P: PlatformServices>(
    platform: &mut P,
    modifiers: &mut ModifierState,
    character: Option<char>,
    code: Option<KeyCode>,
    modifier: Modifier,
) -> Result<()> {
    let native = match code {
        Some(code) => native_code_for(code),
        None => None,
    };
    match (native, character) {
        (Some(native), _) => {
            modifiers.press_delta(platform, modifier)?;
            platform.emit(KeyEvent::native(native, Direction::Down))?;
            platform.emit(KeyEvent::native(native, Direction::Up))
        }
        (None, Some(ch)) => {
            modifiers.press_delta(platform, modifier)?;
            type_char(platform, modifiers, ch, modifier)
        }
        (None, None) => Err(AutoTypeError::NotSupported("key absent on this platform")),
    }
}

/// `held` minus the bits of `removed`.
fn remove_bits(held: Modifier, removed: Modifier) -> Modifier {
    let mut out = Modifier::NONE;
    for bit in Modifier::in_press_order() {
        if held.contains(bit) && !removed.contains(bit) {
            out |= bit;
        }
    }
    out
}
