pub mod action;
pub mod card;
pub mod ids;
pub mod snapshot;

pub use action::ActionCommand;
pub use card::CardKind;
pub use ids::{PlayerId, RoomId};
pub use snapshot::{
    GameEventTag, LogEntry, LogKind, PendingAction, PendingFavor, SessionSnapshot,
};
