use std::collections::HashSet;

use kaboom_domain::{CardKind, PlayerId, SessionSnapshot};

/// One discrete opportunity the engine may act on at most once. Counter
/// keys include the cancel count: the same attack re-countered by someone
/// else is a fresh opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpportunityKey {
    Counter {
        kind: CardKind,
        initiated_by: PlayerId,
        cancel_count: u32,
    },
    Favor {
        requested_by: PlayerId,
        target: PlayerId,
    },
    Defuse {
        player: PlayerId,
    },
}

/// The set of opportunities already served. Deliberately independent of
/// the turn window: favors, defuses, and counters can all land on someone
/// else's turn.
#[derive(Debug, Default)]
pub struct OpportunityLedger {
    resolved: HashSet<OpportunityKey>,
}

impl OpportunityLedger {
    pub fn resolve(&mut self, key: OpportunityKey) {
        self.resolved.insert(key);
    }

    #[must_use]
    pub fn is_resolved(&self, key: &OpportunityKey) -> bool {
        self.resolved.contains(key)
    }

    /// Release guards whose opportunity has moved on. The defuse marker
    /// only holds while the local player is still the one who must place;
    /// once the target changes away, a later defuse must fire again.
    pub fn sync(&mut self, snapshot: &SessionSnapshot, me: PlayerId) {
        if snapshot.pending_defuse != Some(me) {
            self.resolved.remove(&OpportunityKey::Defuse { player: me });
        }
    }
}
