/// Idle countdown as a pure tick-counting state machine. The owning task
/// feeds it one tick per second while the run condition holds and calls
/// [`IdleCountdown::reset`] on each rising edge of "my turn started".
///
/// Stop/start without a reset does not preserve elapsed time semantics
/// beyond what `remaining_secs` already holds; the owner treats a falling
/// run condition as a cancellation point, not a pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleCountdown {
    duration_secs: u32,
    remaining_secs: u32,
    fired: bool,
}

impl IdleCountdown {
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            fired: false,
        }
    }

    /// Reload the full duration and re-arm the one-shot edge.
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.fired = false;
    }

    /// Advance one second. Returns true exactly once per reset, at the
    /// moment the countdown clamps to zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining_secs > 1 {
            self.remaining_secs -= 1;
            return false;
        }
        self.remaining_secs = 0;
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once_after_the_configured_number_of_ticks() {
        let mut countdown = IdleCountdown::new(5);
        let mut firings = 0;
        for _ in 0..10 {
            if countdown.tick() {
                firings += 1;
            }
        }
        assert_eq!(firings, 1);
        assert_eq!(countdown.remaining_secs(), 0);
        assert!(countdown.has_fired());
    }

    #[test]
    fn fifth_tick_of_a_five_second_countdown_is_the_firing_edge() {
        let mut countdown = IdleCountdown::new(5);
        for _ in 0..4 {
            assert!(!countdown.tick());
        }
        assert_eq!(countdown.remaining_secs(), 1);
        assert!(countdown.tick());
    }

    #[test]
    fn reset_rearms_the_one_shot() {
        let mut countdown = IdleCountdown::new(2);
        assert!(!countdown.tick());
        assert!(countdown.tick());
        countdown.reset();
        assert_eq!(countdown.remaining_secs(), 2);
        assert!(!countdown.has_fired());
        assert!(!countdown.tick());
        assert!(countdown.tick());
    }
}
