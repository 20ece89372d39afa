//! Decision core of the autoplay engine: pure, synchronous, and
//! deterministic apart from the seedable RNG used for defuse placement.
//! The async client crate feeds it snapshots, ticks, and policy changes
//! and forwards whatever single command each cycle produces.

pub mod countdown;
pub mod detect;
pub mod engine;
pub mod ledger;
pub mod policy;
pub mod view;
pub mod window;

pub use countdown::IdleCountdown;
pub use detect::{counter_worthy_attack, recent_opponent_defuse};
pub use engine::{pick_favor_card, Autopilot};
pub use ledger::{OpportunityKey, OpportunityLedger};
pub use policy::{AutoplayPolicies, PolicyUpdate};
pub use view::TurnView;
pub use window::{TurnWindowId, TurnWindowTracker};
