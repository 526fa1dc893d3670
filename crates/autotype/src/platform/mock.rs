//! Mock platform services for unit testing.
//!
//! # Why a mock platform?
//!
//! The real services (`WindowsPlatform`, `X11Platform`, `MacosPlatform`)
//! make OS API calls that:
//!
//! - Require a desktop session to run.
//! - Actually press keys on the test machine.
//! - Cannot be observed directly from Rust test code.
//!
//! `MockPlatform` replaces all OS calls with in-memory recording. Every
//! emitted [`KeyEvent`] is pushed onto a `Vec` so assertions can inspect
//! exactly what was emitted and in what order, and the "active layout" is
//! a plain US-QWERTY table that tests can override per character.
//!
//! # Failure injection
//!
//! Set `fail_after = Some(n)` to make the n-th emission (0-based) fail
//! with a platform error, exercising the abort-and-release paths. Set
//! `unicode_supported = false` to make raw-Unicode emissions fail with
//! `NotSupported`.

use std::collections::HashMap;

use autotype_core::{
    native_code_for, ActiveWindowArgs, AppWindowInfo, AutoTypeError, Direction, KeyCode, KeyEvent,
    KeyOutput, Modifier, NativeKeyCode, Result,
};

use super::PlatformServices;

/// Resolves a character the way a US-QWERTY layout would: base key plus
/// the Shift state needed to produce it. `None` for anything a US layout
/// has no physical key for.
pub fn us_layout_key(ch: char) -> Option<(KeyCode, Modifier)> {
    let shifted = |key| Some((key, Modifier::SHIFT));
    let plain = |key| Some((key, Modifier::NONE));
    match ch {
        'a'..='z' => plain(letter_key(ch)),
        'A'..='Z' => shifted(letter_key(ch.to_ascii_lowercase())),
        '0' => plain(KeyCode::Digit0),
        '1' => plain(KeyCode::Digit1),
        '2' => plain(KeyCode::Digit2),
        '3' => plain(KeyCode::Digit3),
        '4' => plain(KeyCode::Digit4),
        '5' => plain(KeyCode::Digit5),
        '6' => plain(KeyCode::Digit6),
        '7' => plain(KeyCode::Digit7),
        '8' => plain(KeyCode::Digit8),
        '9' => plain(KeyCode::Digit9),
        ')' => shifted(KeyCode::Digit0),
        '!' => shifted(KeyCode::Digit1),
        '@' => shifted(KeyCode::Digit2),
        '#' => shifted(KeyCode::Digit3),
        '$' => shifted(KeyCode::Digit4),
        '%' => shifted(KeyCode::Digit5),
        '^' => shifted(KeyCode::Digit6),
        '&' => shifted(KeyCode::Digit7),
        '*' => shifted(KeyCode::Digit8),
        '(' => shifted(KeyCode::Digit9),
        ' ' => plain(KeyCode::Space),
        '-' => plain(KeyCode::Minus),
        '_' => shifted(KeyCode::Minus),
        '=' => plain(KeyCode::Equal),
        '+' => shifted(KeyCode::Equal),
        '[' => plain(KeyCode::BracketLeft),
        '{' => shifted(KeyCode::BracketLeft),
        ']' => plain(KeyCode::BracketRight),
        '}' => shifted(KeyCode::BracketRight),
        '\\' => plain(KeyCode::Backslash),
        '|' => shifted(KeyCode::Backslash),
        ';' => plain(KeyCode::Semicolon),
        ':' => shifted(KeyCode::Semicolon),
        '\'' => plain(KeyCode::Quote),
        '"' => shifted(KeyCode::Quote),
        '`' => plain(KeyCode::Backquote),
        '~' => shifted(KeyCode::Backquote),
        ',' => plain(KeyCode::Comma),
        '<' => shifted(KeyCode::Comma),
        '.' => plain(KeyCode::Period),
        '>' => shifted(KeyCode::Period),
        '/' => plain(KeyCode::Slash),
        '?' => shifted(KeyCode::Slash),
        _ => None,
    }
}

fn letter_key(ch: char) -> KeyCode {
    match ch {
        'a' => KeyCode::KeyA,
        'b' => KeyCode::KeyB,
        'c' => KeyCode::KeyC,
        'd' => KeyCode::KeyD,
        'e' => KeyCode::KeyE,
        'f' => KeyCode::KeyF,
        'g' => KeyCode::KeyG,
        'h' => KeyCode::KeyH,
        'i' => KeyCode::KeyI,
        'j' => KeyCode::KeyJ,
        'k' => KeyCode::KeyK,
        'l' => KeyCode::KeyL,
        'm' => KeyCode::KeyM,
        'n' => KeyCode::KeyN,
        'o' => KeyCode::KeyO,
        'p' => KeyCode::KeyP,
        'q' => KeyCode::KeyQ,
        'r' => KeyCode::KeyR,
        's' => KeyCode::KeyS,
        't' => KeyCode::KeyT,
        'u' => KeyCode::KeyU,
        'v' => KeyCode::KeyV,
        'w' => KeyCode::KeyW,
        'x' => KeyCode::KeyX,
        'y' => KeyCode::KeyY,
        'z' => KeyCode::KeyZ,
        _ => unreachable!("letter_key called with non-letter"),
    }
}

/// A platform that records every call without touching the OS.
pub struct MockPlatform {
    /// Every event passed to `emit`, in submission order.
    pub emitted: Vec<KeyEvent>,
    /// Per-character layout overrides consulted before the built-in
    /// US-QWERTY table. Map a character to `None` to simulate a layout
    /// miss for it.
    pub layout_overrides: HashMap<char, Option<(KeyCode, Modifier)>>,
    /// Modifiers the simulated user is physically holding, beyond
    /// whatever this platform has been asked to emit.
    pub externally_held: Modifier,
    /// When `Some(n)`, the n-th emission (0-based, counted across the
    /// platform's lifetime) fails with a platform error.
    pub fail_after: Option<usize>,
    /// When `false`, raw-Unicode emissions fail with `NotSupported`.
    pub unicode_supported: bool,
    /// Returned by the window queries.
    pub foreground: Option<AppWindowInfo>,
    /// Windows passed to `show_window`.
    pub shown_windows: Vec<AppWindowInfo>,
    emit_count: usize,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            emitted: Vec::new(),
            layout_overrides: HashMap::new(),
            externally_held: Modifier::NONE,
            fail_after: None,
            unicode_supported: true,
            foreground: None,
            shown_windows: Vec::new(),
            emit_count: 0,
        }
    }
}

impl MockPlatform {
    /// A mock with the built-in US layout and no failure injection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Native code for a logical key, panicking if the build target lacks
    /// it. Test convenience for building expected-event lists.
    pub fn code_of(key: KeyCode) -> NativeKeyCode {
        native_code_for(key).expect("key missing from build-target keymap")
    }

    /// The modifiers currently held according to the emitted event stream:
    /// every modifier key that saw a down without a matching up.
    pub fn held_from_events(&self) -> Modifier {
        let mut held = Modifier::NONE;
        for event in &self.emitted {
            let modifier = match event.output {
                KeyOutput::Native(code) => match modifier_of_code(code) {
                    Some(m) => m,
                    None => continue,
                },
                KeyOutput::Unicode(_) => continue,
            };
            match event.direction {
                Direction::Down => held |= modifier,
                Direction::Up => held &= invert(modifier),
            }
        }
        held
    }
}

fn invert(m: Modifier) -> Modifier {
    let mut out = Modifier::NONE;
    for bit in Modifier::in_press_order() {
        if !m.contains(bit) {
            out |= bit;
        }
    }
    out
}

/// Maps a native code back to the modifier bit it represents, if any.
fn modifier_of_code(code: NativeKeyCode) -> Option<Modifier> {
    let pairs = [
        (KeyCode::ControlLeft, Modifier::CTRL),
        (KeyCode::ControlRight, Modifier::CTRL),
        (KeyCode::AltLeft, Modifier::ALT),
        (KeyCode::AltRight, Modifier::ALT),
        (KeyCode::ShiftLeft, Modifier::SHIFT),
        (KeyCode::ShiftRight, Modifier::SHIFT),
        (KeyCode::MetaLeft, Modifier::META),
        (KeyCode::MetaRight, Modifier::META),
    ];
    pairs
        .into_iter()
        .find(|&(key, _)| native_code_for(key) == Some(code))
        .map(|(_, modifier)| modifier)
}

impl PlatformServices for MockPlatform {
    fn emit(&mut self, event: KeyEvent) -> Result<()> {
        let index = self.emit_count;
        self.emit_count += 1;
        if self.fail_after == Some(index) {
            return Err(AutoTypeError::Platform("mock failure".into()));
        }
        if let KeyOutput::Unicode(_) = event.output {
            if !self.unicode_supported {
                return Err(AutoTypeError::NotSupported("raw-Unicode injection"));
            }
        }
        self.emitted.push(event);
        Ok(())
    }

    fn layout_key_for_char(&mut self, ch: char) -> Option<(NativeKeyCode, Modifier)> {
        let resolved = match self.layout_overrides.get(&ch) {
            Some(entry) => *entry,
            None => us_layout_key(ch),
        };
        resolved.and_then(|(key, modifier)| Some((native_code_for(key)?, modifier)))
    }

    fn pressed_modifiers(&mut self) -> Modifier {
        self.externally_held | self.held_from_events()
    }

    fn active_pid(&mut self) -> Option<u32> {
        self.foreground.as_ref().map(|w| w.pid)
    }

    fn active_window(&mut self, args: &ActiveWindowArgs) -> Option<AppWindowInfo> {
        let mut info = self.foreground.clone()?;
        if !args.get_window_title {
            info.title = None;
        }
        if !args.get_browser_url {
            info.url = None;
        }
        Some(info)
    }

    fn show_window(&mut self, window: &AppWindowInfo) -> bool {
        self.shown_windows.push(window.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_layout_resolves_lowercase_without_shift() {
        assert_eq!(us_layout_key('c'), Some((KeyCode::KeyC, Modifier::NONE)));
    }

    #[test]
    fn test_us_layout_resolves_uppercase_with_shift() {
        assert_eq!(us_layout_key('C'), Some((KeyCode::KeyC, Modifier::SHIFT)));
    }

    #[test]
    fn test_us_layout_resolves_shifted_digit_symbols() {
        assert_eq!(us_layout_key('!'), Some((KeyCode::Digit1, Modifier::SHIFT)));
        assert_eq!(us_layout_key('('), Some((KeyCode::Digit9, Modifier::SHIFT)));
    }

    #[test]
    fn test_us_layout_misses_non_latin_characters() {
        assert_eq!(us_layout_key('é'), None);
        assert_eq!(us_layout_key('日'), None);
        assert_eq!(us_layout_key('😀'), None);
    }

    #[test]
    fn test_held_from_events_tracks_down_without_up() {
        let mut mock = MockPlatform::new();
        let shift = MockPlatform::code_of(KeyCode::ShiftLeft);
        mock.emit(KeyEvent::native(shift, Direction::Down)).unwrap();
        assert_eq!(mock.pressed_modifiers(), Modifier::SHIFT);

        mock.emit(KeyEvent::native(shift, Direction::Up)).unwrap();
        assert_eq!(mock.pressed_modifiers(), Modifier::NONE);
    }

    #[test]
    fn test_externally_held_modifiers_are_reported() {
        let mut mock = MockPlatform::new();
        mock.externally_held = Modifier::SHIFT;
        assert_eq!(mock.pressed_modifiers(), Modifier::SHIFT);
    }

    #[test]
    fn test_fail_after_fails_only_the_requested_emission() {
        let mut mock = MockPlatform::new();
        mock.fail_after = Some(1);
        let code = MockPlatform::code_of(KeyCode::KeyA);

        assert!(mock.emit(KeyEvent::native(code, Direction::Down)).is_ok());
        assert!(mock.emit(KeyEvent::native(code, Direction::Up)).is_err());
        assert!(mock.emit(KeyEvent::native(code, Direction::Down)).is_ok());
    }

    #[test]
    fn test_unicode_unsupported_reports_not_supported() {
        let mut mock = MockPlatform::new();
        mock.unicode_supported = false;
        let err = mock
            .emit(KeyEvent::unicode('é', Direction::Down))
            .unwrap_err();
        assert!(matches!(err, AutoTypeError::NotSupported(_)));
    }

    #[test]
    fn test_active_window_strips_unrequested_fields() {
        let mut mock = MockPlatform::new();
        mock.foreground = Some(AppWindowInfo {
            pid: 42,
            window_id: 7,
            app_name: "TextEdit".into(),
            title: Some("notes.txt".into()),
            url: Some("https://example.com".into()),
        });

        let bare = mock.active_window(&ActiveWindowArgs::default()).unwrap();
        assert_eq!(bare.title, None);
        assert_eq!(bare.url, None);

        let full = mock
            .active_window(&ActiveWindowArgs {
                get_window_title: true,
                get_browser_url: true,
            })
            .unwrap();
        assert_eq!(full.title.as_deref(), Some("notes.txt"));
        assert_eq!(full.url.as_deref(), Some("https://example.com"));
    }
}
