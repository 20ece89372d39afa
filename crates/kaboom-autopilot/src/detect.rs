use kaboom_domain::{GameEventTag, LogKind, PendingAction, PlayerId, SessionSnapshot};

/// How many trailing log entries the save detector inspects.
const RECENT_LOG_WINDOW: usize = 5;

/// The canonical auto-counter case: the pending action is an attack
/// launched from the seat immediately before ours, so letting it resolve
/// hands us the extra turns. Returns the pending action so callers can key
/// their guard off it.
///
/// None when nothing is pending, we are not seated, or the room has fewer
/// than two seats.
#[must_use]
pub fn counter_worthy_attack(snapshot: &SessionSnapshot, me: PlayerId) -> Option<PendingAction> {
    let pending = snapshot.pending_action?;
    if !pending.kind.is_attack() {
        return None;
    }
    let seats = snapshot.player_order.len();
    if seats < 2 {
        return None;
    }
    let my_seat = snapshot.seat_of(me)?;
    let preceding = snapshot.player_order[(my_seat + seats - 1) % seats];
    (pending.initiated_by == preceding).then_some(pending)
}

/// True when another player neutralized an explosive very recently: the
/// trigger for an opportunistic deck shuffle before we draw into whatever
/// they buried. Reads the structured event tags, never the message text.
#[must_use]
pub fn recent_opponent_defuse(snapshot: &SessionSnapshot, me: PlayerId) -> bool {
    snapshot
        .logs
        .iter()
        .rev()
        .take(RECENT_LOG_WINDOW)
        .any(|entry| {
            entry.kind == LogKind::Action
                && entry.event == Some(GameEventTag::DefusePlayed)
                && entry.sender.is_some_and(|sender| sender != me)
        })
}
