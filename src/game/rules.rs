//! Game Rules
//!
//! Fixed parameters of the ladder game. Nothing here is configurable at
//! runtime: changing a constant changes the game.

use crate::core::fixed::Multiplier;
use crate::game::types::{Leg, LineCount, Side};

/// Smallest stake accepted, in whole credits.
pub const MIN_STAKE: u64 = 100;

/// Per-leg multiplier for the start side: 1.8x
pub const START_MULTIPLIER: Multiplier = Multiplier::from_milli(1800);

/// Per-leg multiplier for the rung count: 1.8x
pub const LINES_MULTIPLIER: Multiplier = Multiplier::from_milli(1800);

/// Per-leg multiplier for the end side: 1.8x
pub const END_MULTIPLIER: Multiplier = Multiplier::from_milli(1800);

/// Flat multiplier for a COMBO3 bet: 6.8x
pub const COMBO3_MULTIPLIER: Multiplier = Multiplier::from_milli(6800);

/// Valid rails.
pub const SIDE_VALUES: [Side; 2] = [Side::Left, Side::Right];

/// Valid rung counts.
pub const LINE_VALUES: [LineCount; 2] = [LineCount::Three, LineCount::Four];

/// Rows on a ladder board. Each row holds at most one rung.
pub const LADDER_ROWS: usize = 7;

/// Multiplier contributed by one picked leg of a SINGLE bet.
#[inline]
pub const fn leg_multiplier(leg: Leg) -> Multiplier {
    match leg {
        Leg::Start => START_MULTIPLIER,
        Leg::Lines => LINES_MULTIPLIER,
        Leg::End => END_MULTIPLIER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_constants() {
        assert_eq!(MIN_STAKE, 100);
        assert_eq!(START_MULTIPLIER.to_f64(), 1.8);
        assert_eq!(LINES_MULTIPLIER.to_f64(), 1.8);
        assert_eq!(END_MULTIPLIER.to_f64(), 1.8);
        assert_eq!(COMBO3_MULTIPLIER.to_f64(), 6.8);
        assert_eq!(LADDER_ROWS, 7);
    }

    #[test]
    fn test_combo3_beats_three_singles() {
        let three_legs = Leg::ALL
            .iter()
            .fold(Multiplier::ONE, |acc, leg| acc.compound(leg_multiplier(*leg)));

        assert_eq!(three_legs.milli(), 5832);
        assert!(COMBO3_MULTIPLIER > three_legs);
    }

    #[test]
    fn test_value_sets() {
        assert_eq!(SIDE_VALUES.len(), 2);
        assert_eq!(LINE_VALUES.map(LineCount::get), [3, 4]);
        // Every rung count fits on the board
        assert!(LINE_VALUES.iter().all(|lines| (lines.get() as usize) <= LADDER_ROWS));
    }
}
