//! Milli Fixed-Point Arithmetic
//!
//! Odds and payouts are decimal quantities ("1.8x", "3.24x"), so they are
//! stored as integer thousandths. No floats are used in settlement logic;
//! conversion to a JSON number happens only at the serialization boundary.
//!
//! ## Format: Milli
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Value = raw / 1000                                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  1.8x   -> 1800                                             │
//! │  3.24x  -> 3240     (1800 * 1800 / 1000)                    │
//! │  5.832x -> 5832     (3240 * 1800 / 1000)                    │
//! │  6.8x   -> 6800                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every leg product reachable under the ladder rules has at most three
//! decimal places, so compounding never truncates.

use std::fmt;

use serde::{Serialize, Serializer};

/// Raw milli value: thousandths of a unit.
pub type Milli = u64;

/// Number of milli units per whole unit (1000)
pub const MILLI_SCALE: Milli = 1000;

/// 1.0 in milli (1000)
pub const MILLI_ONE: Milli = MILLI_SCALE;

/// Multiply two milli values.
///
/// Uses a u128 intermediate, then divides by the scale (truncating).
/// Saturates at `Milli::MAX` instead of wrapping.
#[inline]
pub fn milli_mul(a: Milli, b: Milli) -> Milli {
    let wide = (a as u128) * (b as u128) / (MILLI_SCALE as u128);
    Milli::try_from(wide).unwrap_or(Milli::MAX)
}

/// Render a milli quantity as a trimmed decimal ("1.8", "3.24", "1800").
fn fmt_milli(raw: u128, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let scale = MILLI_SCALE as u128;
    let whole = raw / scale;
    let frac = raw % scale;
    if frac == 0 {
        return write!(f, "{}", whole);
    }
    let digits = format!("{:03}", frac);
    write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
}

/// Serialize a milli quantity as a JSON number: an integer when whole
/// (`1800`), a decimal otherwise (`181.8`).
fn serialize_milli<S: Serializer>(raw: u128, serializer: S) -> Result<S::Ok, S::Error> {
    let scale = MILLI_SCALE as u128;
    match u64::try_from(raw / scale) {
        Ok(whole) if raw % scale == 0 => serializer.serialize_u64(whole),
        _ => serializer.serialize_f64(raw as f64 / scale as f64),
    }
}

// =============================================================================
// MULTIPLIER
// =============================================================================

/// Payout multiplier in thousandths (1.8x = 1800).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Multiplier(Milli);

impl Multiplier {
    /// 1.0x, the identity for compounding.
    pub const ONE: Self = Self(MILLI_ONE);

    /// Create from raw thousandths.
    #[inline]
    pub const fn from_milli(raw: Milli) -> Self {
        Self(raw)
    }

    /// Raw thousandths.
    #[inline]
    pub const fn milli(self) -> Milli {
        self.0
    }

    /// Compound this multiplier with one more leg.
    #[inline]
    pub fn compound(self, leg: Multiplier) -> Self {
        Self(milli_mul(self.0, leg.0))
    }

    /// Convert to float for display and JSON output.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MILLI_SCALE as f64
    }
}

impl fmt::Debug for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multiplier(")?;
        fmt_milli(self.0 as u128, f)?;
        write!(f, "x)")
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_milli(self.0 as u128, f)
    }
}

impl Serialize for Multiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_milli(self.0 as u128, serializer)
    }
}

// =============================================================================
// PAYOUT
// =============================================================================

/// Credits paid out for a bet, in thousandths of a credit.
///
/// `stake * multiplier` is always representable exactly: stake is a whole
/// number of credits and the multiplier has at most three decimals.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Payout(u128);

impl Payout {
    /// Nothing paid.
    pub const ZERO: Self = Self(0);

    /// Payout of `stake` credits at `multiplier`.
    #[inline]
    pub fn of_stake(stake: u64, multiplier: Multiplier) -> Self {
        Self(stake as u128 * multiplier.milli() as u128)
    }

    /// Create from raw milli-credits.
    #[inline]
    pub const fn from_milli(raw: u128) -> Self {
        Self(raw)
    }

    /// Raw milli-credits.
    #[inline]
    pub const fn milli(self) -> u128 {
        self.0
    }

    /// Whole credits, rounding down.
    #[inline]
    pub const fn whole_credits(self) -> u128 {
        self.0 / MILLI_SCALE as u128
    }

    /// True when nothing is paid.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert to float for display and JSON output.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MILLI_SCALE as f64
    }
}

impl fmt::Debug for Payout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payout(")?;
        fmt_milli(self.0, f)?;
        write!(f, ")")
    }
}

impl fmt::Display for Payout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_milli(self.0, f)
    }
}

impl Serialize for Payout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_milli(self.0, serializer)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milli_constants() {
        assert_eq!(MILLI_SCALE, 1000);
        assert_eq!(MILLI_ONE, 1000);
        assert_eq!(Multiplier::ONE.milli(), 1000);
    }

    #[test]
    fn test_milli_mul() {
        assert_eq!(milli_mul(1800, 1800), 3240);
        assert_eq!(milli_mul(3240, 1800), 5832);
        assert_eq!(milli_mul(MILLI_ONE, 6800), 6800);
        assert_eq!(milli_mul(0, 1800), 0);

        // Saturates instead of wrapping
        assert_eq!(milli_mul(Milli::MAX, Milli::MAX), Milli::MAX);
    }

    #[test]
    fn test_compound_is_exact() {
        let leg = Multiplier::from_milli(1800);
        let two = Multiplier::ONE.compound(leg).compound(leg);
        let three = two.compound(leg);

        assert_eq!(two.milli(), 3240);
        assert_eq!(three.milli(), 5832);
        assert_eq!(two.to_f64(), 3.24);
        assert_eq!(three.to_f64(), 5.832);
    }

    #[test]
    fn test_display_trims_zeros() {
        assert_eq!(Multiplier::from_milli(1800).to_string(), "1.8");
        assert_eq!(Multiplier::from_milli(3240).to_string(), "3.24");
        assert_eq!(Multiplier::from_milli(5832).to_string(), "5.832");
        assert_eq!(Multiplier::from_milli(7000).to_string(), "7");
        assert_eq!(Multiplier::from_milli(1050).to_string(), "1.05");
        assert_eq!(format!("{:?}", Multiplier::from_milli(6800)), "Multiplier(6.8x)");
    }

    #[test]
    fn test_payout_of_stake() {
        let payout = Payout::of_stake(1000, Multiplier::from_milli(3240));
        assert_eq!(payout.milli(), 3_240_000);
        assert_eq!(payout.whole_credits(), 3240);
        assert_eq!(payout.to_f64(), 3240.0);

        // Fractional credits stay exact
        let odd = Payout::of_stake(101, Multiplier::from_milli(1800));
        assert_eq!(odd.milli(), 181_800);
        assert_eq!(odd.whole_credits(), 181);
        assert_eq!(odd.to_string(), "181.8");

        // Large stakes do not overflow
        let huge = Payout::of_stake(u64::MAX, Multiplier::from_milli(6800));
        assert_eq!(huge.milli(), u64::MAX as u128 * 6800);
    }

    #[test]
    fn test_payout_zero() {
        assert!(Payout::ZERO.is_zero());
        assert!(!Payout::from_milli(1).is_zero());
        assert_eq!(Payout::ZERO.to_string(), "0");
    }

    #[test]
    fn test_serialize_as_plain_numbers() {
        let multiplier = serde_json::to_value(Multiplier::from_milli(3240)).unwrap();
        let payout = serde_json::to_value(Payout::of_stake(1000, Multiplier::from_milli(1800))).unwrap();

        assert_eq!(multiplier, serde_json::json!(3.24));
        assert_eq!(payout, serde_json::json!(1800));
        assert_eq!(serde_json::to_string(&Payout::of_stake(1000, Multiplier::from_milli(6800))).unwrap(), "6800");
        assert_eq!(serde_json::to_string(&Multiplier::from_milli(7000)).unwrap(), "7");
    }

    #[test]
    fn test_serialize_fractional_payout() {
        let payout = Payout::of_stake(101, Multiplier::from_milli(1800));
        assert_eq!(serde_json::to_value(payout).unwrap(), serde_json::json!(181.8));
        assert_eq!(serde_json::to_value(Payout::ZERO).unwrap(), serde_json::json!(0));
    }
}
