use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::CardKind;
use crate::ids::{PlayerId, RoomId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Action,
    Chat,
    System,
}

/// Structured tag carried by action log entries. Detection logic keys off
/// these tags; the free-text `message` is presentation-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEventTag {
    DefusePlayed,
    CardPlayed { card: CardKind },
    CardDrawn,
    TurnPassed,
    PlayerExploded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub kind: LogKind,
    pub event: Option<GameEventTag>,
    pub sender: Option<PlayerId>,
    /// `None` means visible to the whole room.
    pub visible_to: Option<PlayerId>,
    pub message: String,
}

/// An action sitting in its counter window, not yet resolved by the
/// server. `cancel_count` increments each time someone counters it, so a
/// re-countered action reads as a fresh opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: CardKind,
    pub initiated_by: PlayerId,
    pub target: Option<PlayerId>,
    pub cancel_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingFavor {
    pub requested_by: PlayerId,
    pub target: PlayerId,
}

/// Authoritative room state as the server last published it. Replaced
/// wholesale on every update; nothing on the client mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub room_id: RoomId,
    /// Alive seats in rotation order.
    pub player_order: Vec<PlayerId>,
    pub current_turn_index: usize,
    pub hands: BTreeMap<PlayerId, Vec<CardKind>>,
    pub pending_action: Option<PendingAction>,
    pub pending_favor: Option<PendingFavor>,
    /// Player who drew an explosive and must place a neutralizer.
    pub pending_defuse: Option<PlayerId>,
    pub deck_size: usize,
    pub logs: Vec<LogEntry>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.player_order.iter().position(|&p| p == player)
    }

    #[must_use]
    pub fn player_at_turn(&self) -> Option<PlayerId> {
        if self.player_order.is_empty() {
            return None;
        }
        self.player_order
            .get(self.current_turn_index % self.player_order.len())
            .copied()
    }

    #[must_use]
    pub fn hand_of(&self, player: PlayerId) -> &[CardKind] {
        self.hands.get(&player).map_or(&[], Vec::as_slice)
    }
}
