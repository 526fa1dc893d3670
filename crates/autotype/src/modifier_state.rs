//! Internally tracked modifier key state.
//!
//! [`ModifierState`] records exactly which modifiers *this engine* has
//! pressed and not yet released, so every composite operation can compute a
//! minimal press/release delta and is guaranteed to end with symmetric
//! press/release pairs. The tracked set is allowed to diverge from true OS
//! keyboard state only within a single operation: at the start and end of
//! every public engine operation it must be [`Modifier::NONE`], except for
//! an explicit modifier hold through `key_move`.
//!
//! Press order across multiple bits is fixed — Ctrl, Alt, Shift, Meta —
//! to match what applications commonly expect for chorded shortcuts;
//! releases walk the same order in reverse.

use tracing::{trace, warn};

use autotype_core::{
    native_code_for, AutoTypeError, Direction, KeyCode, KeyEvent, Modifier, NativeKeyCode, Result,
};

use crate::platform::PlatformServices;

/// The set of modifiers currently held by the owning engine instance.
#[derive(Debug, Default)]
pub struct ModifierState {
    held: Modifier,
}

/// The key pressed for each modifier bit. Deltas always use the left
/// variant; the OS treats left and right as the same modifier.
fn key_for_modifier(modifier: Modifier) -> KeyCode {
    if modifier == Modifier::CTRL {
        KeyCode::ControlLeft
    } else if modifier == Modifier::ALT {
        KeyCode::AltLeft
    } else if modifier == Modifier::SHIFT {
        KeyCode::ShiftLeft
    } else {
        KeyCode::MetaLeft
    }
}

fn native_for_modifier(modifier: Modifier) -> Result<NativeKeyCode> {
    native_code_for(key_for_modifier(modifier))
        .ok_or(AutoTypeError::NotSupported("modifier key unavailable"))
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The modifiers this engine believes it is holding.
    pub fn held(&self) -> Modifier {
        self.held
    }

    /// Presses every modifier bit present in `target` but not currently
    /// held, in canonical order. Bits already held are left untouched
    /// (idempotent union — a modifier is never pressed twice).
    pub fn press_delta<P: PlatformServices>(
        &mut self,
        platform: &mut P,
        target: Modifier,
    ) -> Result<()> {
        for bit in Modifier::in_press_order() {
            if target.contains(bit) && !self.held.contains(bit) {
                trace!(?bit, "pressing modifier");
                platform.emit(KeyEvent::native(native_for_modifier(bit)?, Direction::Down))?;
                self.held |= bit;
            }
        }
        Ok(())
    }

    /// Releases every held modifier bit not present in `target`, in
    /// reverse canonical order.
    pub fn release_delta<P: PlatformServices>(
        &mut self,
        platform: &mut P,
        target: Modifier,
    ) -> Result<()> {
        for bit in Modifier::in_press_order().into_iter().rev() {
            if self.held.contains(bit) && !target.contains(bit) {
                trace!(?bit, "releasing modifier");
                platform.emit(KeyEvent::native(native_for_modifier(bit)?, Direction::Up))?;
                self.held = self.held & invert(bit);
            }
        }
        Ok(())
    }

    /// Releases every held modifier.
    pub fn release_all<P: PlatformServices>(&mut self, platform: &mut P) -> Result<()> {
        self.release_delta(platform, Modifier::NONE)
    }

    /// Releases every held modifier, then verifies against live OS state.
    ///
    /// # Errors
    ///
    /// [`AutoTypeError::ModifierNotReleased`] if the OS still reports a
    /// modifier down after all releases were issued. That means either the
    /// user is physically holding a key or an earlier release was lost;
    /// neither is retried here, the condition is surfaced as-is.
    pub fn ensure_not_pressed<P: PlatformServices>(&mut self, platform: &mut P) -> Result<()> {
        self.release_all(platform)?;
        let still_down = platform.pressed_modifiers();
        if !still_down.is_empty() {
            warn!(?still_down, "modifier still reported down after release");
            return Err(AutoTypeError::ModifierNotReleased(still_down));
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use autotype_core::KeyOutput;
    use crate::platform::mock::MockPlatform;

    fn directions(mock: &MockPlatform) -> Vec<(NativeKeyCode, Direction)> {
        mock.emitted
            .iter()
            .map(|e| match e.output {
                KeyOutput::Native(code) => (code, e.direction),
                KeyOutput::Unicode(_) => panic!("unexpected unicode event"),
            })
            .collect()
    }

    #[test]
    fn test_press_delta_presses_in_canonical_order() {
        // Arrange
        let mut mock = MockPlatform::new();
        let mut state = ModifierState::new();

        // Act – request Meta+Shift+Ctrl in one delta
        state
            .press_delta(
                &mut mock,
                Modifier::META | Modifier::SHIFT | Modifier::CTRL,
            )
            .unwrap();

        // Assert – emitted Ctrl, Shift, Meta in that order, all downs
        let expected = vec![
            (MockPlatform::code_of(KeyCode::ControlLeft), Direction::Down),
            (MockPlatform::code_of(KeyCode::ShiftLeft), Direction::Down),
            (MockPlatform::code_of(KeyCode::MetaLeft), Direction::Down),
        ];
        assert_eq!(directions(&mock), expected);
    }

    #[test]
    fn test_release_all_releases_in_reverse_order() {
        // Arrange
        let mut mock = MockPlatform::new();
        let mut state = ModifierState::new();
        state
            .press_delta(&mut mock, Modifier::CTRL | Modifier::SHIFT)
            .unwrap();
        mock.emitted.clear();

        // Act
        state.release_all(&mut mock).unwrap();

        // Assert – Shift released before Ctrl
        let expected = vec![
            (MockPlatform::code_of(KeyCode::ShiftLeft), Direction::Up),
            (MockPlatform::code_of(KeyCode::ControlLeft), Direction::Up),
        ];
        assert_eq!(directions(&mock), expected);
        assert_eq!(state.held(), Modifier::NONE);
    }

    #[test]
    fn test_press_delta_is_idempotent_for_already_held_bits() {
        let mut mock = MockPlatform::new();
        let mut state = ModifierState::new();

        state.press_delta(&mut mock, Modifier::SHIFT).unwrap();
        state
            .press_delta(&mut mock, Modifier::SHIFT | Modifier::CTRL)
            .unwrap();

        // Shift pressed exactly once, Ctrl once.
        assert_eq!(mock.emitted.len(), 2);
        assert_eq!(state.held(), Modifier::SHIFT | Modifier::CTRL);
    }

    #[test]
    fn test_release_delta_keeps_target_bits_held() {
        let mut mock = MockPlatform::new();
        let mut state = ModifierState::new();
        state
            .press_delta(&mut mock, Modifier::CTRL | Modifier::SHIFT)
            .unwrap();
        mock.emitted.clear();

        // Release down to just Ctrl.
        state.release_delta(&mut mock, Modifier::CTRL).unwrap();

        assert_eq!(
            directions(&mock),
            vec![(MockPlatform::code_of(KeyCode::ShiftLeft), Direction::Up)]
        );
        assert_eq!(state.held(), Modifier::CTRL);
    }

    #[test]
    fn test_ensure_not_pressed_succeeds_when_os_agrees() {
        let mut mock = MockPlatform::new();
        let mut state = ModifierState::new();
        state.press_delta(&mut mock, Modifier::META).unwrap();

        state.ensure_not_pressed(&mut mock).unwrap();
        assert_eq!(mock.pressed_modifiers(), Modifier::NONE);
    }

    #[test]
    fn test_ensure_not_pressed_reports_externally_held_modifier() {
        let mut mock = MockPlatform::new();
        mock.externally_held = Modifier::SHIFT; // the user is holding Shift
        let mut state = ModifierState::new();

        let err = state.ensure_not_pressed(&mut mock).unwrap_err();
        match err {
            AutoTypeError::ModifierNotReleased(still) => {
                assert_eq!(still, Modifier::SHIFT);
            }
            other => panic!("expected ModifierNotReleased, got {other:?}"),
        }
    }
}
