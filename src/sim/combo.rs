//! Combo counter
//!
//! Each defeat bumps the count and refills the window. When the window runs
//! out the combo silently drops back to zero.

use serde::{Deserialize, Serialize};

use crate::consts::COMBO_WINDOW_MS;

/// Score multiplier for a given combo count
pub fn multiplier_for(count: u32) -> u32 {
    match count {
        0..=2 => 1,
        3..=4 => 2,
        5..=9 => 3,
        10..=14 => 4,
        _ => 5,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combo {
    pub count: u32,
    pub multiplier: u32,
    /// Remaining window (ms)
    pub timer: f32,
}

impl Default for Combo {
    fn default() -> Self {
        Self {
            count: 0,
            multiplier: 1,
            timer: 0.0,
        }
    }
}

impl Combo {
    /// Count a defeat and return the new multiplier
    pub fn register_kill(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.multiplier = multiplier_for(self.count);
        self.timer = COMBO_WINDOW_MS;
        self.multiplier
    }

    /// Run the window down. Returns true on the tick the combo expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.timer <= 0.0 {
            return false;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.reset();
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_multiplier_steps() {
        assert_eq!(multiplier_for(0), 1);
        assert_eq!(multiplier_for(2), 1);
        assert_eq!(multiplier_for(3), 2);
        assert_eq!(multiplier_for(5), 3);
        assert_eq!(multiplier_for(10), 4);
        assert_eq!(multiplier_for(15), 5);
        assert_eq!(multiplier_for(1000), 5);
    }

    #[test]
    fn test_register_refills_window() {
        let mut combo = Combo::default();
        combo.register_kill();
        combo.tick(2500.0);
        assert_eq!(combo.count, 1);
        combo.register_kill();
        assert_eq!(combo.timer, COMBO_WINDOW_MS);
        assert_eq!(combo.count, 2);
    }

    #[test]
    fn test_expiry_resets() {
        let mut combo = Combo::default();
        for _ in 0..5 {
            combo.register_kill();
        }
        assert_eq!(combo.multiplier, 3);
        assert!(!combo.tick(2999.0));
        assert!(combo.tick(1.0));
        assert_eq!(combo, Combo::default());
        // Idle combo stays put
        assert!(!combo.tick(16.0));
    }

    proptest! {
        #[test]
        fn multiplier_is_monotonic(a in 0u32..100, b in 0u32..100) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(multiplier_for(lo) <= multiplier_for(hi));
            prop_assert!((1..=5).contains(&multiplier_for(a)));
        }

        #[test]
        fn kills_track_step_function(kills in 1u32..40) {
            let mut combo = Combo::default();
            for _ in 0..kills {
                combo.register_kill();
            }
            prop_assert_eq!(combo.count, kills);
            prop_assert_eq!(combo.multiplier, multiplier_for(kills));
        }
    }
}
