//! Integration tests for complete typing sequences.
//!
//! These tests run the engine end-to-end against the mock platform and
//! then *replay* the emitted event stream through a small editor model: a
//! US-layout text field with a cursor, a selection, and a clipboard,
//! interpreting events the way a receiving application would. If the
//! editor reproduces the intended text, the whole pipeline (layout
//! resolution, modifier deltas, Unicode fallback, event ordering) is
//! consistent.

use std::collections::HashMap;

use autotype::platform::mock::{us_layout_key, MockPlatform};
use autotype::{
    native_code_for, AutoType, Direction, KeyCode, KeyEvent, KeyInput, KeyOutput, Modifier,
    NativeKeyCode,
};

// ── Editor model ──────────────────────────────────────────────────────────────

/// Replays an emitted event stream the way a focused US-layout text field
/// would interpret it: printable keys insert at the cursor, arrows move
/// it, Shift+arrow extends the selection, and Ctrl+A/C/X/V are the usual
/// editing commands.
struct Editor {
    text: Vec<char>,
    cursor: usize,
    /// Selection anchor; the selection is `anchor..cursor` (either order).
    /// Persists across Shift release, cleared by unshifted movement and
    /// by edits.
    anchor: Option<usize>,
    clipboard: Vec<char>,
    shift_depth: u32,
    ctrl_depth: u32,
    /// Native code → (plain character, shifted character).
    keys: HashMap<NativeKeyCode, (Option<char>, Option<char>)>,
    specials: HashMap<NativeKeyCode, KeyCode>,
}

impl Editor {
    fn new() -> Self {
        // Build the reverse map native-code → characters from the same US
        // table the mock layout uses.
        let mut keys: HashMap<NativeKeyCode, (Option<char>, Option<char>)> = HashMap::new();
        let alphabet = "abcdefghijklmnopqrstuvwxyz\
                        ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                        0123456789)!@#$%^&*( \
                        -_=+[{]}\\|;:'\"`~,<.>/?";
        for ch in alphabet.chars() {
            let (key, modifier) = us_layout_key(ch).expect("alphabet char must be in US layout");
            let native = native_code_for(key).expect("US layout key must exist on this platform");
            let entry = keys.entry(native).or_insert((None, None));
            if modifier.contains(Modifier::SHIFT) {
                entry.1 = Some(ch);
            } else {
                entry.0 = Some(ch);
            }
        }
        let special_keys = [
            KeyCode::Enter,
            KeyCode::Tab,
            KeyCode::Backspace,
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
            KeyCode::ShiftLeft,
            KeyCode::ShiftRight,
            KeyCode::ControlLeft,
            KeyCode::ControlRight,
        ];
        let specials = special_keys
            .into_iter()
            .filter_map(|key| native_code_for(key).map(|native| (native, key)))
            .collect();
        Self {
            text: Vec::new(),
            cursor: 0,
            anchor: None,
            clipboard: Vec::new(),
            shift_depth: 0,
            ctrl_depth: 0,
            keys,
            specials,
        }
    }

    fn replay(&mut self, events: &[KeyEvent]) {
        for event in events {
            match event.output {
                KeyOutput::Unicode(ch) => {
                    if event.direction == Direction::Down {
                        self.insert(ch);
                    }
                }
                KeyOutput::Native(code) => self.native_key(code, event.direction),
            }
        }
    }

    fn string(&self) -> String {
        self.text.iter().collect()
    }

    fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    fn delete_selection(&mut self) {
        if let Some((start, end)) = self.selection() {
            self.text.drain(start..end);
            self.cursor = start;
        }
        self.anchor = None;
    }

    fn insert(&mut self, ch: char) {
        self.delete_selection();
        self.text.insert(self.cursor, ch);
        self.cursor += 1;
    }

    fn arrow(&mut self, key: KeyCode) {
        let target = match key {
            KeyCode::ArrowLeft => self.cursor.saturating_sub(1),
            KeyCode::ArrowRight => (self.cursor + 1).min(self.text.len()),
            // Single-line model: vertical movement jumps to the ends.
            KeyCode::ArrowUp => 0,
            KeyCode::ArrowDown => self.text.len(),
            _ => self.cursor,
        };
        if self.shift_depth > 0 {
            // Shift-movement extends the selection from the point where
            // it started.
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
            self.cursor = target;
        } else {
            // Plain movement collapses any selection toward the moved
            // edge.
            self.cursor = match self.selection() {
                Some((start, end)) => match key {
                    KeyCode::ArrowLeft | KeyCode::ArrowUp => start,
                    _ => end,
                },
                None => target,
            };
            self.anchor = None;
        }
    }

    fn command(&mut self, ch: char) {
        match ch {
            'a' => {
                self.anchor = Some(0);
                self.cursor = self.text.len();
            }
            'c' => {
                if let Some((start, end)) = self.selection() {
                    self.clipboard = self.text[start..end].to_vec();
                }
            }
            'x' => {
                if let Some((start, end)) = self.selection() {
                    self.clipboard = self.text[start..end].to_vec();
                    self.delete_selection();
                }
            }
            'v' => {
                self.delete_selection();
                let pasted = self.clipboard.clone();
                for ch in pasted {
                    self.text.insert(self.cursor, ch);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
    }

    fn native_key(&mut self, code: NativeKeyCode, direction: Direction) {
        if let Some(&key) = self.specials.get(&code) {
            match key {
                KeyCode::ShiftLeft | KeyCode::ShiftRight => {
                    match direction {
                        Direction::Down => self.shift_depth += 1,
                        Direction::Up => {
                            assert!(self.shift_depth > 0, "Shift released while not held");
                            self.shift_depth -= 1;
                        }
                    }
                    return;
                }
                KeyCode::ControlLeft | KeyCode::ControlRight => {
                    match direction {
                        Direction::Down => self.ctrl_depth += 1,
                        Direction::Up => {
                            assert!(self.ctrl_depth > 0, "Ctrl released while not held");
                            self.ctrl_depth -= 1;
                        }
                    }
                    return;
                }
                _ if direction == Direction::Up => return,
                KeyCode::Enter => self.insert('\n'),
                KeyCode::Tab => self.insert('\t'),
                KeyCode::Backspace => {
                    if self.selection().is_some() {
                        self.delete_selection();
                    } else if self.cursor > 0 {
                        self.cursor -= 1;
                        self.text.remove(self.cursor);
                    }
                }
                KeyCode::ArrowLeft
                | KeyCode::ArrowRight
                | KeyCode::ArrowUp
                | KeyCode::ArrowDown => self.arrow(key),
                _ => {}
            }
            return;
        }
        if direction == Direction::Up {
            return;
        }
        if let Some(&(plain, shifted)) = self.keys.get(&code) {
            if self.ctrl_depth > 0 {
                if let Some(ch) = plain {
                    self.command(ch);
                }
                return;
            }
            let produced = if self.shift_depth > 0 { shifted } else { plain };
            if let Some(ch) = produced {
                self.insert(ch);
            }
        }
    }
}

fn type_and_replay(text: &str) -> String {
    let mut at = AutoType::with_platform(MockPlatform::new());
    at.text(text, Modifier::NONE).expect("typing must succeed");

    let mut editor = Editor::new();
    editor.replay(&at.platform().emitted);
    assert_eq!(editor.shift_depth, 0, "Shift must be balanced at the end");
    editor.string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_plain_text_arrives_verbatim() {
    assert_eq!(type_and_replay("hello world"), "hello world");
}

#[test]
fn test_mixed_case_and_symbols_arrive_verbatim() {
    // Exercises Shift deltas around single characters and runs.
    assert_eq!(type_and_replay("Hello, World!"), "Hello, World!");
    assert_eq!(type_and_replay("1!cC"), "1!cC");
    assert_eq!(type_and_replay("A1b2C3"), "A1b2C3");
}

#[test]
fn test_password_style_text_arrives_verbatim() {
    let password = "p4$$w0rd-With_M1xed#Case!";
    assert_eq!(type_and_replay(password), password);
}

#[test]
fn test_unmapped_characters_fall_back_to_unicode() {
    // é and 日 have no key in the US layout; they must arrive through the
    // raw-Unicode path, interleaved correctly with mapped characters.
    assert_eq!(type_and_replay("café 日本"), "café 日本");
}

#[test]
fn test_supplementary_plane_characters_arrive_verbatim() {
    // Emoji live outside the Basic Multilingual Plane; they must travel
    // as single raw-Unicode scalars, not be split or dropped.
    let mut at = AutoType::with_platform(MockPlatform::new());
    at.text("a\u{1F600}b\n", Modifier::NONE)
        .expect("typing must succeed");

    let emoji_downs = at
        .platform()
        .emitted
        .iter()
        .filter(|event| {
            event.direction == Direction::Down
                && event.output == KeyOutput::Unicode('\u{1F600}')
        })
        .count();
    assert_eq!(emoji_downs, 1);

    let mut editor = Editor::new();
    editor.replay(&at.platform().emitted);
    assert_eq!(editor.string(), "a\u{1F600}b\n");
    assert_eq!(at.get_pressed_modifiers(), Modifier::NONE);
}

#[test]
fn test_control_characters_route_through_keys() {
    assert_eq!(type_and_replay("line1\nline2\tend"), "line1\nline2\tend");
}

#[test]
fn test_caller_held_shift_applies_to_whole_sequence() {
    let mut at = AutoType::with_platform(MockPlatform::new());
    // Typing lowercase with SHIFT held: each character resolves to its
    // key, and the caller's Shift turns it into the shifted output.
    at.text("abc", Modifier::SHIFT).expect("typing must succeed");

    let mut editor = Editor::new();
    editor.replay(&at.platform().emitted);
    assert_eq!(editor.string(), "ABC");
}

#[test]
fn test_copy_paste_round_trip() {
    let mut at = AutoType::with_platform(MockPlatform::new());

    // type "hello"
    at.text("hello", Modifier::NONE).unwrap();

    // select all, copy: "[hello]"
    at.shortcut(KeyCode::KeyA).unwrap();
    at.shortcut(KeyCode::KeyC).unwrap();

    // paste at the end: "hello hello "
    at.key_press(None, Some(KeyCode::ArrowRight), Modifier::NONE)
        .unwrap();
    at.text(" ", Modifier::NONE).unwrap();
    at.shortcut(KeyCode::KeyV).unwrap();
    at.text(" ", Modifier::NONE).unwrap();

    // select "hell" backwards and cut: "hello [hell]o "
    for _ in 0..2 {
        at.key_press(None, Some(KeyCode::ArrowLeft), Modifier::NONE)
            .unwrap();
    }
    for _ in 0..4 {
        at.key_press(None, Some(KeyCode::ArrowLeft), Modifier::SHIFT)
            .unwrap();
    }
    at.shortcut(KeyCode::KeyX).unwrap();

    // paste at the very end
    at.key_press(None, Some(KeyCode::ArrowDown), Modifier::NONE)
        .unwrap();
    at.shortcut(KeyCode::KeyV).unwrap();

    let mut editor = Editor::new();
    editor.replay(&at.platform().emitted);
    assert_eq!(editor.string(), "hello o hell");
    assert_eq!(at.get_pressed_modifiers(), Modifier::NONE);
}

#[test]
fn test_backspace_edits_typed_text() {
    let mut at = AutoType::with_platform(MockPlatform::new());
    at.text("hello", Modifier::NONE).unwrap();
    at.key_press(None, Some(KeyCode::Backspace), Modifier::NONE)
        .unwrap();
    at.text("p", Modifier::NONE).unwrap();

    let mut editor = Editor::new();
    editor.replay(&at.platform().emitted);
    assert_eq!(editor.string(), "hellp");
}

#[test]
fn test_manual_chord_is_invisible_to_the_editor() {
    let mut at = AutoType::with_platform(MockPlatform::new());
    // Hold Ctrl, tap A, release: a select-all chord built by hand out of
    // key_move calls instead of shortcut().
    at.key_move(Direction::Down, KeyInput::ModifierOnly, Modifier::CTRL)
        .expect("modifier down");
    at.key_move(Direction::Down, KeyInput::Key(KeyCode::KeyA), Modifier::NONE)
        .expect("key down");
    at.key_move(Direction::Up, KeyInput::Key(KeyCode::KeyA), Modifier::NONE)
        .expect("key up");
    at.key_move(Direction::Up, KeyInput::ModifierOnly, Modifier::CTRL)
        .expect("modifier up");

    assert_eq!(at.get_pressed_modifiers(), Modifier::NONE);

    // The hand-built chord must read exactly like shortcut()'s output.
    let mut hand = Editor::new();
    hand.replay(&at.platform().emitted);
    assert_eq!(hand.string(), "");
    assert_eq!(hand.ctrl_depth, 0);
    assert_eq!(at.platform().emitted.len(), 4);
}

#[test]
fn test_engine_drop_releases_held_modifiers() {
    let mut platform = MockPlatform::new();
    {
        // Lend the mock to the engine so it can be inspected after the
        // engine is dropped with modifiers still held.
        let mut at = AutoType::with_platform(&mut platform);
        at.key_move(
            Direction::Down,
            KeyInput::ModifierOnly,
            Modifier::CTRL | Modifier::SHIFT,
        )
        .expect("modifier down");
        assert_eq!(at.get_pressed_modifiers(), Modifier::CTRL | Modifier::SHIFT);
    }

    assert_eq!(platform.held_from_events(), Modifier::NONE);
    // Two downs plus the two ups added by the drop, released in reverse
    // press order.
    assert_eq!(platform.emitted.len(), 4);
    let shift = native_code_for(KeyCode::ShiftLeft).unwrap();
    let ctrl = native_code_for(KeyCode::ControlLeft).unwrap();
    assert_eq!(platform.emitted[2].output, KeyOutput::Native(shift));
    assert_eq!(platform.emitted[3].output, KeyOutput::Native(ctrl));
}

#[test]
fn test_text_with_externally_stuck_modifier_reports_it() {
    let mut platform = MockPlatform::new();
    // The user is physically holding Alt the whole time; releasing our
    // own modifiers cannot clear it.
    platform.externally_held = Modifier::ALT;
    let mut at = AutoType::with_platform(platform);

    let err = at.text("x", Modifier::NONE).unwrap_err();
    match err {
        autotype::AutoTypeError::ModifierNotReleased(still) => {
            assert!(still.contains(Modifier::ALT));
        }
        other => panic!("expected ModifierNotReleased, got {other:?}"),
    }
}
