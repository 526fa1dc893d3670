//! Modifier key bit set.
//!
//! A [`Modifier`] value is a set over {Ctrl, Alt, Shift, Meta}, stored as a
//! `u8` bit field.  The set is closed under union (`|`) and intersection
//! (`&`); [`Modifier::NONE`] is the identity and combination is commutative
//! and idempotent — pressing Shift twice is the same as pressing it once.
//!
//! "Meta" is the Command key on macOS and the Windows key elsewhere.  The
//! engine presses modifier deltas in the canonical order Ctrl, Alt, Shift,
//! Meta (the ordering chorded-shortcut handlers commonly expect) and
//! releases them in the reverse order; [`Modifier::in_press_order`] yields
//! the single bits in that canonical order.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Bit set of modifier keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifier(u8);

impl Modifier {
    /// The empty set; identity for `|`.
    pub const NONE: Modifier = Modifier(0);
    /// Control (both platforms).
    pub const CTRL: Modifier = Modifier(1 << 0);
    /// Alt, called Option on macOS.
    pub const ALT: Modifier = Modifier(1 << 1);
    /// Shift.
    pub const SHIFT: Modifier = Modifier(1 << 2);
    /// Meta: Command on macOS, the Windows key on Windows, Super on X11.
    pub const META: Modifier = Modifier(1 << 3);

    /// Returns `true` if every bit of `other` is present in `self`.
    pub fn contains(self, other: Modifier) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no modifier bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The single modifier bits in canonical press order: Ctrl, Alt, Shift, Meta.
    ///
    /// Releases walk this slice in reverse.
    pub fn in_press_order() -> [Modifier; 4] {
        [Modifier::CTRL, Modifier::ALT, Modifier::SHIFT, Modifier::META]
    }
}

impl BitOr for Modifier {
    type Output = Modifier;

    fn bitor(self, rhs: Modifier) -> Modifier {
        Modifier(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifier {
    fn bitor_assign(&mut self, rhs: Modifier) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Modifier {
    type Output = Modifier;

    fn bitand(self, rhs: Modifier) -> Modifier {
        Modifier(self.0 & rhs.0)
    }
}

impl BitAndAssign for Modifier {
    fn bitand_assign(&mut self, rhs: Modifier) {
        self.0 &= rhs.0;
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Modifier(NONE)");
        }
        let mut names = Vec::new();
        if self.contains(Modifier::CTRL) {
            names.push("CTRL");
        }
        if self.contains(Modifier::ALT) {
            names.push("ALT");
        }
        if self.contains(Modifier::SHIFT) {
            names.push("SHIFT");
        }
        if self.contains(Modifier::META) {
            names.push("META");
        }
        write!(f, "Modifier({})", names.join("|"))
    }
}
