use serde::{Deserialize, Serialize};

use crate::card::CardKind;

/// The five operations the autoplay engine may ask the transport to
/// perform. Fire-and-forget: the outcome only ever shows up as the next
/// snapshot or an exception event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCommand {
    Draw,
    PlayCard { card: CardKind },
    PlayCounter,
    GiveFavorCard { card: CardKind },
    ResolveDefuse { position: usize },
}

impl ActionCommand {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::PlayCard { .. } => "play_card",
            Self::PlayCounter => "play_counter",
            Self::GiveFavorCard { .. } => "give_favor_card",
            Self::ResolveDefuse { .. } => "resolve_defuse",
        }
    }
}
