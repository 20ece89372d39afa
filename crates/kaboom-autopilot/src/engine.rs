use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use kaboom_domain::{ActionCommand, CardKind, PlayerId, SessionSnapshot};

use crate::detect::{counter_worthy_attack, recent_opponent_defuse};
use crate::ledger::{OpportunityKey, OpportunityLedger};
use crate::policy::{AutoplayPolicies, PolicyUpdate};
use crate::view::TurnView;
use crate::window::TurnWindowTracker;

/// Card a favor target surrenders: lowest surrender rank wins, ties keep
/// hand order. An explosive is never given away, whatever else the hand
/// holds; a hand containing one at favor time is a server-side bug.
#[must_use]
pub fn pick_favor_card(hand: &[CardKind]) -> Option<CardKind> {
    hand.iter()
        .copied()
        .filter(|&card| card != CardKind::Explosive)
        .min_by_key(|card| card.surrender_rank())
}

/// The decision core. One instance per mounted room; everything here is
/// torn down with the room. Each call to [`Autopilot::observe`] or
/// [`Autopilot::reevaluate`] is one run-to-completion cycle producing at
/// most one command.
#[derive(Debug)]
pub struct Autopilot {
    me: PlayerId,
    policies: AutoplayPolicies,
    window: TurnWindowTracker,
    ledger: OpportunityLedger,
    in_flight: bool,
    rng: SmallRng,
}

impl Autopilot {
    #[must_use]
    pub fn new(me: PlayerId) -> Self {
        Self::with_rng(me, SmallRng::from_os_rng())
    }

    #[must_use]
    pub fn with_rng(me: PlayerId, rng: SmallRng) -> Self {
        Self {
            me,
            policies: AutoplayPolicies::default(),
            window: TurnWindowTracker::default(),
            ledger: OpportunityLedger::default(),
            in_flight: false,
            rng,
        }
    }

    #[must_use]
    pub fn me(&self) -> PlayerId {
        self.me
    }

    #[must_use]
    pub fn policies(&self) -> AutoplayPolicies {
        self.policies
    }

    pub fn apply_policies(&mut self, update: PolicyUpdate) {
        self.policies.apply(update);
    }

    /// A fresh authoritative snapshot arrived. Whatever we last dispatched
    /// has been observed by the server one way or the other, so the
    /// in-flight marker clears before the rule pass runs.
    pub fn observe(&mut self, snapshot: &SessionSnapshot) -> Option<ActionCommand> {
        self.in_flight = false;
        self.evaluate(snapshot)
    }

    /// Re-run the rule pass against an already-seen snapshot (timer tick
    /// or policy change). The in-flight marker is left alone.
    pub fn reevaluate(&mut self, snapshot: &SessionSnapshot) -> Option<ActionCommand> {
        self.evaluate(snapshot)
    }

    /// The transport reported a rejected or failed action. Clearing the
    /// marker is the entire retry story: the next cycle re-decides from
    /// scratch under the same rule order.
    pub fn on_exception(&mut self) {
        self.in_flight = false;
    }

    fn evaluate(&mut self, snapshot: &SessionSnapshot) -> Option<ActionCommand> {
        let view = TurnView::derive(snapshot, self.me);
        self.window.observe(&view);
        self.ledger.sync(snapshot, self.me);
        if self.in_flight {
            return None;
        }
        let command = self
            .favor_rule(snapshot)
            .or_else(|| self.defuse_rule(snapshot))
            .or_else(|| self.counter_rule(snapshot, &view))
            .or_else(|| self.turn_rules(snapshot, &view))?;
        self.in_flight = true;
        debug!(command = command.name(), "autoplay dispatching");
        Some(command)
    }

    /// Favors interrupt any turn and outrank everything else.
    fn favor_rule(&mut self, snapshot: &SessionSnapshot) -> Option<ActionCommand> {
        if !self.policies.give_favor {
            return None;
        }
        let favor = snapshot.pending_favor?;
        if favor.target != self.me {
            return None;
        }
        let key = OpportunityKey::Favor {
            requested_by: favor.requested_by,
            target: favor.target,
        };
        if self.ledger.is_resolved(&key) {
            return None;
        }
        let card = pick_favor_card(snapshot.hand_of(self.me))?;
        // Served before dispatch: a re-observed snapshot must not give twice.
        self.ledger.resolve(key);
        Some(ActionCommand::GiveFavorCard { card })
    }

    fn defuse_rule(&mut self, snapshot: &SessionSnapshot) -> Option<ActionCommand> {
        if !self.policies.resolve_defuse || snapshot.pending_defuse != Some(self.me) {
            return None;
        }
        let key = OpportunityKey::Defuse { player: self.me };
        if self.ledger.is_resolved(&key) {
            return None;
        }
        // 0 is the top of the deck, deck_size the bottom; both inclusive.
        let position = self.rng.random_range(0..=snapshot.deck_size);
        self.ledger.resolve(key);
        Some(ActionCommand::ResolveDefuse { position })
    }

    fn counter_rule(&mut self, snapshot: &SessionSnapshot, view: &TurnView) -> Option<ActionCommand> {
        if !self.policies.counter_attacks || !view.can_play_nope {
            return None;
        }
        let pending = counter_worthy_attack(snapshot, self.me)?;
        let key = OpportunityKey::Counter {
            kind: pending.kind,
            initiated_by: pending.initiated_by,
            cancel_count: pending.cancel_count,
        };
        if self.ledger.is_resolved(&key) {
            return None;
        }
        self.ledger.resolve(key);
        Some(ActionCommand::PlayCounter)
    }

    fn turn_rules(&mut self, snapshot: &SessionSnapshot, view: &TurnView) -> Option<ActionCommand> {
        if !view.can_act || self.window.current().is_none() || self.window.has_acted() {
            return None;
        }
        let hand = snapshot.hand_of(self.me);

        // An unresolved attack from the preceding seat may still be worth
        // cancelling; taking a turn action now would let it resolve.
        if self.policies.counter_attacks
            && hand.contains(&CardKind::Cancel)
            && counter_worthy_attack(snapshot, self.me).is_some()
        {
            debug!("holding turn action while an attack sits in its counter window");
            return None;
        }

        // Shuffling does not end the turn, so it neither marks the window
        // acted nor falls through to skip/draw in the same cycle.
        if self.policies.reorder_after_save
            && !self.window.has_reordered()
            && hand.contains(&CardKind::Shuffle)
            && recent_opponent_defuse(snapshot, self.me)
        {
            self.window.mark_reordered();
            return Some(ActionCommand::PlayCard {
                card: CardKind::Shuffle,
            });
        }
        if self.window.has_reordered() && !self.policies.continue_after_reorder {
            return None;
        }

        if self.policies.skip && hand.contains(&CardKind::Skip) {
            self.window.mark_acted();
            return Some(ActionCommand::PlayCard {
                card: CardKind::Skip,
            });
        }
        if self.policies.draw {
            self.window.mark_acted();
            return Some(ActionCommand::Draw);
        }
        None
    }
}
