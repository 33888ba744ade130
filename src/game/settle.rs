//! Bet Settlement
//!
//! The sole authority for win/lose and payout of one bet against one
//! revealed round. Pure: no state, no clock, no randomness, no floats.
//!
//! ```text
//! Bet ──┐   check_bet      ┌─> CheckedBet ──┐
//!       ├─────────────────>┤                ├─> settle_checked ─> Settlement
//! Result┘   check_result   └─> Outcome ─────┘
//! ```
//!
//! ## Rules
//!
//! - A leg is *matched* when it was picked and equals the result.
//! - The bet wins when every picked leg matched; unpicked legs are ignored.
//! - SINGLE pays the product of per-leg multipliers, COMBO3 a flat one.
//! - Payout is `stake * multiplier` on a win and zero otherwise.

use serde::Serialize;

use crate::core::fixed::{Multiplier, Payout, MILLI_SCALE};
use crate::core::hash::{compute_settlement_hash, SettlementHash};
use crate::game::rules::{leg_multiplier, COMBO3_MULTIPLIER};
use crate::game::types::{Bet, BetType, CheckedBet, Leg, Outcome, RoundResult};
use crate::game::validate::{check_bet, check_result, ValidationError};

/// Per-leg match flags. An unpicked leg reports `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Matched {
    /// Start pick equals the result.
    pub start: bool,
    /// Lines pick equals the result.
    pub lines: bool,
    /// End pick equals the result.
    pub end: bool,
}

impl Matched {
    /// Flag for one leg.
    pub fn get(&self, leg: Leg) -> bool {
        match leg {
            Leg::Start => self.start,
            Leg::Lines => self.lines,
            Leg::End => self.end,
        }
    }
}

/// How one leg of a bet fared, distinguishing "not picked" from "missed".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegOutcome {
    /// The bettor did not wager on this leg.
    NotPicked,
    /// Picked and correct.
    Hit,
    /// Picked and wrong.
    Miss,
}

/// Computed outcome of one bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Settlement {
    /// Every picked leg matched.
    pub win: bool,
    /// Applicable multiplier, reported for wins and losses alike.
    pub multiplier: Multiplier,
    /// `stake * multiplier` on a win, zero otherwise.
    pub payout: Payout,
    /// Per-leg match flags.
    pub matched: Matched,
    #[serde(skip)]
    legs: [LegOutcome; 3],
}

impl Settlement {
    /// Tri-state outcome for one leg.
    pub fn leg(&self, leg: Leg) -> LegOutcome {
        match leg {
            Leg::Start => self.legs[0],
            Leg::Lines => self.legs[1],
            Leg::End => self.legs[2],
        }
    }

    /// Signed credit delta of this bet in milli-credits (`payout - stake`).
    pub fn net(&self, stake: u64) -> i128 {
        let staked = stake as i128 * MILLI_SCALE as i128;
        self.payout.milli() as i128 - staked
    }
}

/// A settlement with its deterministic receipt digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// The settled bet.
    pub settlement: Settlement,
    /// SHA-256 over bet, result and settlement.
    pub digest: SettlementHash,
}

impl Receipt {
    /// Digest as lowercase hex.
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

// =============================================================================
// SETTLEMENT
// =============================================================================

/// Picked value for a leg, as a comparable byte (side code or rung count).
fn pick_code(bet: &CheckedBet, leg: Leg) -> Option<u8> {
    match leg {
        Leg::Start => bet.start.map(|side| side.code()),
        Leg::Lines => bet.lines.map(|lines| lines.get()),
        Leg::End => bet.end.map(|side| side.code()),
    }
}

/// Revealed value for a leg, in the same encoding as [`pick_code`].
fn outcome_code(outcome: &Outcome, leg: Leg) -> u8 {
    match leg {
        Leg::Start => outcome.start.code(),
        Leg::Lines => outcome.lines.get(),
        Leg::End => outcome.end.code(),
    }
}

fn leg_outcome(bet: &CheckedBet, outcome: &Outcome, leg: Leg) -> LegOutcome {
    match pick_code(bet, leg) {
        None => LegOutcome::NotPicked,
        Some(pick) if pick == outcome_code(outcome, leg) => LegOutcome::Hit,
        Some(_) => LegOutcome::Miss,
    }
}

/// Multiplier for a checked bet.
///
/// COMBO3 is flat; SINGLE compounds the per-leg multiplier of every picked leg.
pub fn multiplier_for(bet: &CheckedBet) -> Multiplier {
    match bet.bet_type {
        BetType::Combo3 => COMBO3_MULTIPLIER,
        BetType::Single => Leg::ALL
            .iter()
            .filter(|leg| bet.is_picked(**leg))
            .fold(Multiplier::ONE, |acc, leg| acc.compound(leg_multiplier(*leg))),
    }
}

/// Settle a bet that already passed validation. Infallible.
pub fn settle_checked(bet: &CheckedBet, outcome: &Outcome) -> Settlement {
    let legs = Leg::ALL.map(|leg| leg_outcome(bet, outcome, leg));

    let matched = Matched {
        start: legs[0] == LegOutcome::Hit,
        lines: legs[1] == LegOutcome::Hit,
        end: legs[2] == LegOutcome::Hit,
    };

    let win = legs.iter().all(|leg| *leg != LegOutcome::Miss);
    let multiplier = multiplier_for(bet);
    let payout = if win {
        Payout::of_stake(bet.stake, multiplier)
    } else {
        Payout::ZERO
    };

    Settlement {
        win,
        multiplier,
        payout,
        matched,
        legs,
    }
}

/// Settle one bet against one revealed round.
///
/// Re-validates both inputs first. Fails with [`ValidationError::InvalidBet`]
/// or [`ValidationError::InvalidResult`] naming every violated rule; no
/// settlement is produced for invalid input.
pub fn settle_bet(bet: &Bet, result: &RoundResult) -> Result<Settlement, ValidationError> {
    let bet = check_bet(bet)?;
    let outcome = check_result(result)?;
    Ok(settle_checked(&bet, &outcome))
}

/// Receipt digest for a settled bet.
///
/// Field order: bet type, stake, picks (presence + value), result legs,
/// win, multiplier, payout, matched flags.
pub fn settlement_digest(bet: &CheckedBet, outcome: &Outcome, settlement: &Settlement) -> SettlementHash {
    compute_settlement_hash(|hasher| {
        hasher.update_u8(bet.bet_type.code());
        hasher.update_u64(bet.stake);
        for leg in Leg::ALL {
            hasher.update_opt_u8(pick_code(bet, leg));
        }
        for leg in Leg::ALL {
            hasher.update_u8(outcome_code(outcome, leg));
        }
        hasher.update_bool(settlement.win);
        hasher.update_u64(settlement.multiplier.milli());
        hasher.update_u128(settlement.payout.milli());
        for leg in Leg::ALL {
            hasher.update_bool(settlement.matched.get(leg));
        }
    })
}

/// Settle a bet and attach its receipt digest.
pub fn settle_with_receipt(bet: &Bet, result: &RoundResult) -> Result<Receipt, ValidationError> {
    let bet = check_bet(bet)?;
    let outcome = check_result(result)?;
    let settlement = settle_checked(&bet, &outcome);
    let digest = settlement_digest(&bet, &outcome, &settlement);
    Ok(Receipt { settlement, digest })
}

// =============================================================================
// TESTS
// =============================================================================
