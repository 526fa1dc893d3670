//! Keyboard auto-type for desktop applications.
//!
//! This crate simulates keyboard input into the focused application:
//! typing text, pressing logical keys, and chording OS-level shortcuts,
//! plus the foreground-window queries auto-type workflows need (which
//! window is focused, bring a window forward before typing).
//!
//! # How the pieces fit together (for beginners)
//!
//! ```text
//!   AutoType (engine.rs)
//!     │  public operations: text / key_press / shortcut / key_move
//!     ├─ ModifierState (modifier_state.rs)
//!     │    tracks which modifiers *we* hold, presses and releases
//!     │    deltas in canonical order
//!     └─ PlatformServices (platform/)
//!          the only OS boundary: event emission, live layout lookup,
//!          live modifier state, window queries
//! ```
//!
//! The static key translation tables and the shared data model live in
//! [`autotype_core`], which is pure and compiles on every platform.
//!
//! # Quick start
//!
//! ```no_run
//! use autotype::{AutoType, KeyCode, Modifier};
//!
//! # fn main() -> autotype::Result<()> {
//! let mut at = AutoType::new()?;
//! at.text("hello, world", Modifier::NONE)?;
//! at.shortcut(KeyCode::KeyV)?; // paste
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod modifier_state;
pub mod platform;

pub use engine::{AutoType, KeyInput};
pub use platform::PlatformServices;

pub use autotype_core::{
    native_code_for, ActiveWindowArgs, AppWindowInfo, AutoTypeError, Direction, KeyCode, KeyEvent,
    KeyOutput, Modifier, NativeKeyCode, Result,
};
