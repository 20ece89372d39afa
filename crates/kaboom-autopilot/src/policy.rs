use serde::{Deserialize, Serialize};

/// The seven independent automation switches. Every combination is legal;
/// mutation goes through [`AutoplayPolicies::apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoplayPolicies {
    pub draw: bool,
    pub skip: bool,
    pub reorder_after_save: bool,
    pub continue_after_reorder: bool,
    pub counter_attacks: bool,
    pub give_favor: bool,
    pub resolve_defuse: bool,
}

impl AutoplayPolicies {
    #[must_use]
    pub fn all() -> Self {
        Self {
            draw: true,
            skip: true,
            reorder_after_save: true,
            continue_after_reorder: true,
            counter_attacks: true,
            give_favor: true,
            resolve_defuse: true,
        }
    }

    /// The derived eighth flag: every switch on.
    #[must_use]
    pub fn all_enabled(&self) -> bool {
        self.draw
            && self.skip
            && self.reorder_after_save
            && self.continue_after_reorder
            && self.counter_attacks
            && self.give_favor
            && self.resolve_defuse
    }

    pub fn apply(&mut self, update: PolicyUpdate) {
        if let Some(value) = update.draw {
            self.draw = value;
        }
        if let Some(value) = update.skip {
            self.skip = value;
        }
        if let Some(value) = update.reorder_after_save {
            self.reorder_after_save = value;
        }
        if let Some(value) = update.continue_after_reorder {
            self.continue_after_reorder = value;
        }
        if let Some(value) = update.counter_attacks {
            self.counter_attacks = value;
        }
        if let Some(value) = update.give_favor {
            self.give_favor = value;
        }
        if let Some(value) = update.resolve_defuse {
            self.resolve_defuse = value;
        }
    }
}

/// Partial overwrite of the policy record; `None` fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyUpdate {
    pub draw: Option<bool>,
    pub skip: Option<bool>,
    pub reorder_after_save: Option<bool>,
    pub continue_after_reorder: Option<bool>,
    pub counter_attacks: Option<bool>,
    pub give_favor: Option<bool>,
    pub resolve_defuse: Option<bool>,
}

impl PolicyUpdate {
    #[must_use]
    pub fn set_all(enabled: bool) -> Self {
        Self {
            draw: Some(enabled),
            skip: Some(enabled),
            reorder_after_save: Some(enabled),
            continue_after_reorder: Some(enabled),
            counter_attacks: Some(enabled),
            give_favor: Some(enabled),
            resolve_defuse: Some(enabled),
        }
    }

    #[must_use]
    pub fn enable_all() -> Self {
        Self::set_all(true)
    }

    #[must_use]
    pub fn disable_all() -> Self {
        Self::set_all(false)
    }
}
