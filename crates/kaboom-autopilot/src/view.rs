use kaboom_domain::{CardKind, PlayerId, SessionSnapshot};

/// What the local player is allowed to do under the current snapshot.
/// Everything downstream of the snapshot stream is derived from this:
/// the turn window, the idle timer's run condition, and the rule pass all
/// read the same view instead of re-interrogating the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnView {
    pub my_seat: Option<usize>,
    pub is_my_turn: bool,
    /// My turn, nothing interrupting: no favor pending anywhere, the
    /// pending defuse (if any) is not mine, and I am not the one whose
    /// action is sitting in a counter window.
    pub can_act: bool,
    pub can_play_nope: bool,
}

impl TurnView {
    #[must_use]
    pub fn derive(snapshot: &SessionSnapshot, me: PlayerId) -> Self {
        let Some(my_seat) = snapshot.seat_of(me) else {
            return Self::default();
        };

        let is_my_turn = snapshot.player_at_turn() == Some(me);
        let awaiting_my_own_action = snapshot
            .pending_action
            .is_some_and(|pending| pending.initiated_by == me);
        let can_act = is_my_turn
            && snapshot.pending_favor.is_none()
            && snapshot.pending_defuse != Some(me)
            && !awaiting_my_own_action;
        let can_play_nope = snapshot
            .pending_action
            .is_some_and(|pending| pending.initiated_by != me)
            && snapshot.hand_of(me).contains(&CardKind::Cancel);

        Self {
            my_seat: Some(my_seat),
            is_my_turn,
            can_act,
            can_play_nope,
        }
    }
}
