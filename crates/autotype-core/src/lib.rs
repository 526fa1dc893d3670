//! # autotype-core
//!
//! Pure data model for the keyboard auto-type engine: logical key codes,
//! the modifier bit set, directional key events, window snapshot types,
//! the error taxonomy, and the static per-platform key translation tables.
//!
//! This crate makes no OS API calls and compiles identically on every
//! platform. Everything that must consult live OS state — the active
//! keyboard layout, the real modifier state, the foreground window —
//! belongs to the platform services in the `autotype` crate.
//!
//! # Layering (for beginners)
//!
//! Typing a character on someone's behalf involves three different ideas
//! of "a key", and this crate keeps them apart:
//!
//! - **Logical key** ([`KeyCode`]) – "the A key", independent of platform
//!   and layout.
//! - **Native key code** ([`keymap::NativeKeyCode`]) – the OS's own number
//!   for that physical key (Windows VK code, macOS CGKeyCode, X11 KeySym).
//!   Produced only by the [`keymap`] tables; callers never build one from
//!   a raw integer.
//! - **Character** – what the key produces, which depends on the active
//!   layout and modifiers. Characters are resolved to native codes at
//!   runtime by the platform services, with raw-Unicode injection as the
//!   fallback when no physical key produces the character.

pub mod error;
pub mod event;
pub mod keycode;
pub mod keymap;
pub mod modifier;
pub mod window;

// Re-export the most-used types at the crate root so callers can write
// `autotype_core::KeyCode` instead of `autotype_core::keycode::KeyCode`.
pub use error::{AutoTypeError, Result};
pub use event::{Direction, KeyEvent, KeyOutput};
pub use keycode::KeyCode;
pub use keymap::{native_code_for, NativeKeyCode};
pub use modifier::Modifier;
pub use window::{ActiveWindowArgs, AppWindowInfo};
