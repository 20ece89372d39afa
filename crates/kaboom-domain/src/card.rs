use serde::{Deserialize, Serialize};

/// Every card kind the remote service deals. `Unknown` absorbs tags the
/// server introduces before the client catches up, so deserialization of a
/// snapshot never fails on a new card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    CollectionAlpha,
    CollectionBeta,
    CollectionGamma,
    CollectionDelta,
    CollectionEpsilon,
    Strike,
    TargetedStrike,
    Skip,
    Shuffle,
    Favor,
    Cancel,
    Neutralizer,
    Explosive,
    #[serde(other)]
    Unknown,
}

impl CardKind {
    #[must_use]
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            Self::CollectionAlpha
                | Self::CollectionBeta
                | Self::CollectionGamma
                | Self::CollectionDelta
                | Self::CollectionEpsilon
        )
    }

    /// Attack kinds are the only ones worth spending a cancel on.
    #[must_use]
    pub fn is_attack(self) -> bool {
        matches!(self, Self::Strike | Self::TargetedStrike)
    }

    /// How willingly the card is surrendered to a favor request. Lower
    /// ranks go first. A neutralizer only leaves the hand when nothing
    /// else is left; an explosive must never be given away, so its rank
    /// sorts behind everything a legal hand can contain.
    #[must_use]
    pub fn surrender_rank(self) -> u32 {
        match self {
            Self::CollectionAlpha
            | Self::CollectionBeta
            | Self::CollectionGamma
            | Self::CollectionDelta
            | Self::CollectionEpsilon => 1,
            Self::Strike | Self::TargetedStrike | Self::Skip | Self::Shuffle | Self::Favor => 2,
            Self::Cancel => 3,
            Self::Unknown => 5,
            Self::Neutralizer => 10,
            Self::Explosive => 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collections_are_the_most_disposable() {
        assert!(CardKind::CollectionGamma.surrender_rank() < CardKind::Skip.surrender_rank());
        assert!(CardKind::Skip.surrender_rank() < CardKind::Cancel.surrender_rank());
        assert!(CardKind::Cancel.surrender_rank() < CardKind::Neutralizer.surrender_rank());
        assert!(CardKind::Neutralizer.surrender_rank() < CardKind::Explosive.surrender_rank());
    }

    #[test]
    fn unknown_kinds_sit_between_cancel_and_neutralizer() {
        assert!(CardKind::Unknown.surrender_rank() > CardKind::Cancel.surrender_rank());
        assert!(CardKind::Unknown.surrender_rank() < CardKind::Neutralizer.surrender_rank());
    }

    #[test]
    fn only_strikes_count_as_attacks() {
        assert!(CardKind::Strike.is_attack());
        assert!(CardKind::TargetedStrike.is_attack());
        assert!(!CardKind::Skip.is_attack());
        assert!(!CardKind::Cancel.is_attack());
    }
}
