//! Calendar system mapping ticks to in-game days

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Calendar converts the global tick counter into a 1-based day number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    ticks_per_day: Tick,
}

impl Calendar {
    pub fn new(ticks_per_day: Tick) -> Self {
        Self {
            ticks_per_day: ticks_per_day.max(1),
        }
    }

    /// Day number for a tick; the run starts on day 1
    pub fn day_at(&self, tick: Tick) -> u64 {
        1 + tick / self.ticks_per_day
    }

    /// True if `tick` is the first tick of a new day
    pub fn is_day_start(&self, tick: Tick) -> bool {
        tick > 0 && tick % self.ticks_per_day == 0
    }

    pub fn ticks_per_day(&self) -> Tick {
        self.ticks_per_day
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_days() {
        let cal = Calendar::new(1000);
        assert_eq!(cal.day_at(0), 1);
        assert_eq!(cal.day_at(999), 1);
        assert_eq!(cal.day_at(1000), 2);
        assert!(cal.is_day_start(1000));
        assert!(!cal.is_day_start(0));
        assert!(!cal.is_day_start(1001));
    }

    #[test]
    fn test_zero_ticks_per_day_is_clamped() {
        let cal = Calendar::new(0);
        assert_eq!(cal.ticks_per_day(), 1);
        assert_eq!(cal.day_at(5), 6);
    }
}
