use crate::view::TurnView;

/// Identifier of one "my turn and able to act" period. Only uniqueness
/// matters; values are a session-local monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnWindowId(pub u64);

#[derive(Debug, Clone, Copy)]
struct OpenWindow {
    id: TurnWindowId,
    acted: bool,
    reordered: bool,
}

/// Tracks the current turn window and its per-window one-shot markers.
///
/// A window opens on the false→true edge of `is_my_turn ∧ can_act` and
/// closes only when `is_my_turn` drops. A `can_act` flicker while the turn
/// is still mine keeps the same window, so nothing fires twice.
#[derive(Debug, Default)]
pub struct TurnWindowTracker {
    minted: u64,
    open: Option<OpenWindow>,
}

impl TurnWindowTracker {
    /// Feed the latest view; opens or closes the window as needed.
    pub fn observe(&mut self, view: &TurnView) {
        if !view.is_my_turn {
            self.open = None;
            return;
        }
        if view.can_act && self.open.is_none() {
            self.minted += 1;
            self.open = Some(OpenWindow {
                id: TurnWindowId(self.minted),
                acted: false,
                reordered: false,
            });
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<TurnWindowId> {
        self.open.map(|window| window.id)
    }

    #[must_use]
    pub fn has_acted(&self) -> bool {
        self.open.is_some_and(|window| window.acted)
    }

    pub fn mark_acted(&mut self) {
        if let Some(window) = self.open.as_mut() {
            window.acted = true;
        }
    }

    #[must_use]
    pub fn has_reordered(&self) -> bool {
        self.open.is_some_and(|window| window.reordered)
    }

    pub fn mark_reordered(&mut self) {
        if let Some(window) = self.open.as_mut() {
            window.reordered = true;
        }
    }
}
