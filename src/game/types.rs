//! Bet and Result Types
//!
//! Two layers of types live here:
//!
//! - **Submitted** types (`Bet`, `Picks`, `RoundResult`) mirror what a caller
//!   sends. Enumerated fields are wrapped in [`Submitted`] so an out-of-domain
//!   value (`"lines": 5`, `"type": "TRIPLE"`) survives deserialization and can
//!   be named by the validator.
//! - **Checked** types (`CheckedBet`, `Outcome`) only exist after validation
//!   and hold plain enums. Settlement math works on these.

use std::fmt;

use serde::de::{self, DeserializeOwned, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::game::rules::LINE_VALUES;

// =============================================================================
// ENUMERATED DOMAINS
// =============================================================================

/// Which rail a path starts or ends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Left rail.
    Left,
    /// Right rail.
    Right,
}

impl Side {
    /// The other rail.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Wire name ("LEFT" / "RIGHT").
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }

    /// Lowercase label used in prediction entries.
    pub const fn slug(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Stable byte code for hashing.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of rungs connecting the rails in one round.
///
/// Serialized as the bare integer `3` or `4`. Deserializes from any integral
/// JSON number, so `3.0` reads as `3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum LineCount {
    /// Three rungs.
    Three,
    /// Four rungs.
    Four,
}

impl LineCount {
    /// Numeric value (3 or 4).
    #[inline]
    pub const fn get(self) -> u8 {
        match self {
            LineCount::Three => 3,
            LineCount::Four => 4,
        }
    }
}

/// A rung count outside {3, 4}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("line count must be 3 or 4, got {0}")]
pub struct InvalidLineCount(pub u8);

impl TryFrom<u8> for LineCount {
    type Error = InvalidLineCount;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        LINE_VALUES
            .into_iter()
            .find(|lines| lines.get() == value)
            .ok_or(InvalidLineCount(value))
    }
}

struct LineCountVisitor;

impl<'de> Visitor<'de> for LineCountVisitor {
    type Value = LineCount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the number 3 or 4")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<LineCount, E> {
        u8::try_from(value)
            .ok()
            .and_then(|n| LineCount::try_from(n).ok())
            .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<LineCount, E> {
        match u64::try_from(value) {
            Ok(value) => self.visit_u64(value),
            Err(_) => Err(E::invalid_value(Unexpected::Signed(value), &self)),
        }
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<LineCount, E> {
        LINE_VALUES
            .into_iter()
            .find(|lines| f64::from(lines.get()) == value)
            .ok_or_else(|| E::invalid_value(Unexpected::Float(value), &self))
    }
}

impl<'de> Deserialize<'de> for LineCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LineCountVisitor)
    }
}

impl From<LineCount> for u8 {
    fn from(lines: LineCount) -> u8 {
        lines.get()
    }
}

impl fmt::Display for LineCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Kind of wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BetType {
    /// Any non-empty subset of legs, paying the product of leg odds.
    Single,
    /// All three legs, paying one flat combo multiplier.
    Combo3,
}

impl BetType {
    /// Stable byte code for hashing.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            BetType::Single => 0,
            BetType::Combo3 => 1,
        }
    }
}

/// One predictable attribute of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    /// Starting rail.
    Start,
    /// Rung count.
    Lines,
    /// Final rail.
    End,
}

impl Leg {
    /// All legs in canonical order.
    pub const ALL: [Leg; 3] = [Leg::Start, Leg::Lines, Leg::End];

    /// Field name on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Leg::Start => "start",
            Leg::Lines => "lines",
            Leg::End => "end",
        }
    }
}

// =============================================================================
// SUBMITTED VALUES
// =============================================================================

/// A value as the caller sent it.
///
/// `Valid` when it parsed into its domain, `Invalid` carrying the raw JSON
/// otherwise. A missing mandatory field is `Invalid(Value::Null)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Submitted<T> {
    /// In-domain value.
    Valid(T),
    /// Anything else, kept verbatim for error reporting.
    Invalid(Value),
}

impl<T> Submitted<T> {
    /// Placeholder for a field the caller left out.
    pub fn missing() -> Self {
        Submitted::Invalid(Value::Null)
    }

    /// Borrow the in-domain value, if any.
    pub fn valid(&self) -> Option<&T> {
        match self {
            Submitted::Valid(value) => Some(value),
            Submitted::Invalid(_) => None,
        }
    }

    /// True when the value is in its domain.
    pub fn is_valid(&self) -> bool {
        matches!(self, Submitted::Valid(_))
    }
}

impl<T: Copy> Submitted<T> {
    /// Copy out the in-domain value, if any.
    pub fn get(&self) -> Option<T> {
        self.valid().copied()
    }
}

impl<T> From<T> for Submitted<T> {
    fn from(value: T) -> Self {
        Submitted::Valid(value)
    }
}

impl Submitted<u64> {
    /// Stake as a whole number of credits.
    ///
    /// Also accepts integral floats (`1000.0`), which JSON producers emit
    /// for whole numbers; rejects fractions, negatives and non-numbers.
    pub fn whole(&self) -> Option<u64> {
        match self {
            Submitted::Valid(stake) => Some(*stake),
            Submitted::Invalid(Value::Number(number)) => {
                let float = number.as_f64()?;
                let in_range = float >= 0.0 && float < u64::MAX as f64;
                (float.fract() == 0.0 && in_range).then(|| float as u64)
            }
            Submitted::Invalid(_) => None,
        }
    }

    /// True for a whole number too large to count in credits (>= 2^64).
    pub fn is_oversized(&self) -> bool {
        match self {
            Submitted::Invalid(Value::Number(number)) => number
                .as_f64()
                .is_some_and(|float| float.fract() == 0.0 && float >= u64::MAX as f64),
            _ => false,
        }
    }
}

/// Deserialize a JSON object as `T`; anything else (`null`, a string, an
/// array) as `T::default()`.
fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        object @ Value::Object(_) => T::deserialize(object).map_err(de::Error::custom),
        _ => Ok(T::default()),
    }
}

// =============================================================================
// PICKS / BET / RESULT
// =============================================================================

/// Legs the bettor wagers on. Absent (or `null`) legs are not wagered on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Picks {
    /// Predicted starting rail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Submitted<Side>>,
    /// Predicted rung count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Submitted<LineCount>>,
    /// Predicted final rail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Submitted<Side>>,
}

impl Picks {
    /// No legs picked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the starting rail.
    pub fn with_start(mut self, side: Side) -> Self {
        self.start = Some(side.into());
        self
    }

    /// Pick the rung count.
    pub fn with_lines(mut self, lines: LineCount) -> Self {
        self.lines = Some(lines.into());
        self
    }

    /// Pick the final rail.
    pub fn with_end(mut self, side: Side) -> Self {
        self.end = Some(side.into());
        self
    }

    /// Whether a leg is present, valid or not.
    pub fn is_picked(&self, leg: Leg) -> bool {
        match leg {
            Leg::Start => self.start.is_some(),
            Leg::Lines => self.lines.is_some(),
            Leg::End => self.end.is_some(),
        }
    }

    /// True when at least one leg is present.
    pub fn has_any(&self) -> bool {
        Leg::ALL.iter().any(|leg| self.is_picked(*leg))
    }

    /// True when every leg is present.
    pub fn has_all(&self) -> bool {
        Leg::ALL.iter().all(|leg| self.is_picked(*leg))
    }

    /// Compact prediction list in leg order, e.g. `["start:left", "count:3"]`.
    ///
    /// Only in-domain picks are listed.
    pub fn prediction_entries(&self) -> Vec<String> {
        let mut entries = Vec::new();
        if let Some(side) = self.start.as_ref().and_then(Submitted::get) {
            entries.push(format!("start:{}", side.slug()));
        }
        if let Some(lines) = self.lines.as_ref().and_then(Submitted::get) {
            entries.push(format!("count:{}", lines));
        }
        if let Some(side) = self.end.as_ref().and_then(Submitted::get) {
            entries.push(format!("end:{}", side.slug()));
        }
        entries
    }
}

/// A wager as submitted by the caller. Never mutated by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    /// SINGLE or COMBO3.
    #[serde(rename = "type", default = "Submitted::missing")]
    pub bet_type: Submitted<BetType>,
    /// Legs wagered on.
    #[serde(default, deserialize_with = "object_or_default")]
    pub picks: Picks,
    /// Credits wagered.
    #[serde(default = "Submitted::missing")]
    pub stake: Submitted<u64>,
}

impl Bet {
    /// A SINGLE bet on the given picks.
    pub fn single(picks: Picks, stake: u64) -> Self {
        Self {
            bet_type: BetType::Single.into(),
            picks,
            stake: stake.into(),
        }
    }

    /// A bet with every field missing.
    pub fn missing() -> Self {
        Self {
            bet_type: Submitted::missing(),
            picks: Picks::default(),
            stake: Submitted::missing(),
        }
    }

    /// A COMBO3 bet on all three legs.
    pub fn combo3(start: Side, lines: LineCount, end: Side, stake: u64) -> Self {
        Self {
            bet_type: BetType::Combo3.into(),
            picks: Picks::new().with_start(start).with_lines(lines).with_end(end),
            stake: stake.into(),
        }
    }
}

/// A revealed round as submitted by the caller. All three legs are mandatory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Rail the path started on.
    #[serde(default = "Submitted::missing")]
    pub start: Submitted<Side>,
    /// Rungs on the board.
    #[serde(default = "Submitted::missing")]
    pub lines: Submitted<LineCount>,
    /// Rail the path ended on.
    #[serde(default = "Submitted::missing")]
    pub end: Submitted<Side>,
}

impl RoundResult {
    /// A fully valid result.
    pub fn new(start: Side, lines: LineCount, end: Side) -> Self {
        Self {
            start: start.into(),
            lines: lines.into(),
            end: end.into(),
        }
    }

    /// A result with every leg missing.
    pub fn unrevealed() -> Self {
        Self {
            start: Submitted::missing(),
            lines: Submitted::missing(),
            end: Submitted::missing(),
        }
    }
}

impl From<Outcome> for RoundResult {
    fn from(outcome: Outcome) -> Self {
        Self::new(outcome.start, outcome.lines, outcome.end)
    }
}

// =============================================================================
// CHECKED TYPES
// =============================================================================

/// A bet that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CheckedBet {
    /// Kind of wager.
    pub bet_type: BetType,
    /// Picked starting rail.
    pub start: Option<Side>,
    /// Picked rung count.
    pub lines: Option<LineCount>,
    /// Picked final rail.
    pub end: Option<Side>,
    /// Credits wagered (>= MIN_STAKE).
    pub stake: u64,
}

impl CheckedBet {
    /// Whether a leg is wagered on.
    pub fn is_picked(&self, leg: Leg) -> bool {
        match leg {
            Leg::Start => self.start.is_some(),
            Leg::Lines => self.lines.is_some(),
            Leg::End => self.end.is_some(),
        }
    }

    /// Number of legs wagered on.
    pub fn picked_count(&self) -> usize {
        Leg::ALL.iter().filter(|leg| self.is_picked(**leg)).count()
    }
}

/// A fully revealed, valid round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Outcome {
    /// Rail the path started on.
    pub start: Side,
    /// Rungs on the board.
    pub lines: LineCount,
    /// Rail the path ended on.
    pub end: Side,
}

// =============================================================================
// TESTS
// =============================================================================
