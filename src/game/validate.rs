//! Bet and Result Validation
//!
//! Validation is an ordered table of named rules. Every rule runs; each one
//! contributes at most one message, so a caller sees all problems at once.
//!
//! ```text
//! validate_bet(bet)          -> ValidationResult { ok, errors }   (never fails)
//! validate_result(result)    -> ValidationResult { ok, errors }   (never fails)
//! check_bet(bet)             -> Result<CheckedBet, ValidationError>
//! check_result(result)       -> Result<Outcome, ValidationError>
//! ```

use std::fmt;

use serde::Serialize;

use crate::game::rules::{LINE_VALUES, MIN_STAKE, SIDE_VALUES};
use crate::game::types::{Bet, BetType, CheckedBet, Outcome, RoundResult, Submitted};

/// A named predicate over an input.
///
/// `check` returns `Some(message)` when the rule is violated.
pub struct Rule<T> {
    /// Stable identifier, used in logs.
    pub name: &'static str,
    /// The predicate.
    pub check: fn(&T) -> Option<String>,
}

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule identifier.
    pub rule: &'static str,
    /// Human-readable message.
    pub message: String,
}

/// Outcome of a standalone validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub ok: bool,
    /// One message per violated rule, in rule order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Build from a list of messages.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }
}

/// Input rejected by the settlement engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The bet broke one or more rules.
    #[error("Invalid bet: {}", .0.join(", "))]
    InvalidBet(Vec<String>),

    /// The result broke one or more rules.
    #[error("Invalid result: {}", .0.join(", "))]
    InvalidResult(Vec<String>),
}

impl ValidationError {
    /// Every violated-rule message carried by this error.
    pub fn errors(&self) -> &[String] {
        match self {
            ValidationError::InvalidBet(errors) | ValidationError::InvalidResult(errors) => errors,
        }
    }
}

// =============================================================================
// RULE TABLES
// =============================================================================

/// Bet rules, in reporting order.
pub static BET_RULES: &[Rule<Bet>] = &[
    Rule { name: "bet_type", check: bet_type_known },
    Rule { name: "stake_range", check: stake_in_range },
    Rule { name: "picks_non_empty", check: picks_non_empty },
    Rule { name: "pick_start_domain", check: pick_start_domain },
    Rule { name: "pick_lines_domain", check: pick_lines_domain },
    Rule { name: "pick_end_domain", check: pick_end_domain },
    Rule { name: "combo3_complete", check: combo3_complete },
];

/// Result rules, in reporting order.
pub static RESULT_RULES: &[Rule<RoundResult>] = &[
    Rule { name: "result_start_domain", check: result_start_domain },
    Rule { name: "result_lines_domain", check: result_lines_domain },
    Rule { name: "result_end_domain", check: result_end_domain },
];

fn bet_type_known(bet: &Bet) -> Option<String> {
    (!bet.bet_type.is_valid()).then(|| "type must be SINGLE or COMBO3".to_string())
}

fn stake_in_range(bet: &Bet) -> Option<String> {
    match bet.stake.whole() {
        Some(stake) if stake >= MIN_STAKE => None,
        None if bet.stake.is_oversized() => Some(format!("stake must be integer <= {}", u64::MAX)),
        _ => Some(format!("stake must be integer >= {}", MIN_STAKE)),
    }
}

fn picks_non_empty(bet: &Bet) -> Option<String> {
    (!bet.picks.has_any())
        .then(|| "picks must include at least one of start/lines/end".to_string())
}

/// "must be A or B" for a value domain.
fn domain_message<T: fmt::Display>(domain: &[T]) -> String {
    let names: Vec<String> = domain.iter().map(ToString::to_string).collect();
    format!("must be {}", names.join(" or "))
}

fn in_domain<T: PartialEq>(value: &Submitted<T>, domain: &[T]) -> bool {
    value.valid().is_some_and(|value| domain.contains(value))
}

/// Message for a present-but-invalid pick.
fn pick_domain<T>(field: &str, pick: &Option<Submitted<T>>, domain: &[T]) -> Option<String>
where
    T: PartialEq + fmt::Display,
{
    match pick {
        Some(value) if !in_domain(value, domain) => {
            Some(format!("picks.{} {}", field, domain_message(domain)))
        }
        _ => None,
    }
}

fn pick_start_domain(bet: &Bet) -> Option<String> {
    pick_domain("start", &bet.picks.start, &SIDE_VALUES)
}

fn pick_lines_domain(bet: &Bet) -> Option<String> {
    pick_domain("lines", &bet.picks.lines, &LINE_VALUES)
}

fn pick_end_domain(bet: &Bet) -> Option<String> {
    pick_domain("end", &bet.picks.end, &SIDE_VALUES)
}

fn combo3_complete(bet: &Bet) -> Option<String> {
    let is_combo = bet.bet_type.get() == Some(BetType::Combo3);
    (is_combo && !bet.picks.has_all())
        .then(|| "COMBO3 requires start, lines, and end picks".to_string())
}

/// Message for a missing or invalid result leg.
fn result_domain<T>(field: &str, value: &Submitted<T>, domain: &[T]) -> Option<String>
where
    T: PartialEq + fmt::Display,
{
    (!in_domain(value, domain)).then(|| format!("result.{} {}", field, domain_message(domain)))
}

fn result_start_domain(result: &RoundResult) -> Option<String> {
    result_domain("start", &result.start, &SIDE_VALUES)
}

fn result_lines_domain(result: &RoundResult) -> Option<String> {
    result_domain("lines", &result.lines, &LINE_VALUES)
}

fn result_end_domain(result: &RoundResult) -> Option<String> {
    result_domain("end", &result.end, &SIDE_VALUES)
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Run every rule of a table against an input.
pub fn violations<T>(rules: &[Rule<T>], input: &T) -> Vec<Violation> {
    rules
        .iter()
        .filter_map(|rule| {
            (rule.check)(input).map(|message| Violation {
                rule: rule.name,
                message,
            })
        })
        .collect()
}

fn collect_messages(violations: Vec<Violation>) -> Vec<String> {
    violations.into_iter().map(|v| v.message).collect()
}

/// Validate a bet against every bet rule.
pub fn validate_bet(bet: &Bet) -> ValidationResult {
    ValidationResult::from_errors(collect_messages(violations(BET_RULES, bet)))
}

/// Validate a result against every result rule.
pub fn validate_result(result: &RoundResult) -> ValidationResult {
    ValidationResult::from_errors(collect_messages(violations(RESULT_RULES, result)))
}

/// Validate a bet and convert it to its checked form.
pub fn check_bet(bet: &Bet) -> Result<CheckedBet, ValidationError> {
    let validation = validate_bet(bet);
    if !validation.ok {
        return Err(ValidationError::InvalidBet(validation.errors));
    }

    let (Some(bet_type), Some(stake)) = (bet.bet_type.get(), bet.stake.whole()) else {
        return Err(ValidationError::InvalidBet(vec![
            "type and stake must be present".to_string(),
        ]));
    };

    Ok(CheckedBet {
        bet_type,
        start: bet.picks.start.as_ref().and_then(Submitted::get),
        lines: bet.picks.lines.as_ref().and_then(Submitted::get),
        end: bet.picks.end.as_ref().and_then(Submitted::get),
        stake,
    })
}

/// Validate a result and convert it to its checked form.
pub fn check_result(result: &RoundResult) -> Result<Outcome, ValidationError> {
    let validation = validate_result(result);
    if !validation.ok {
        return Err(ValidationError::InvalidResult(validation.errors));
    }

    match (result.start.get(), result.lines.get(), result.end.get()) {
        (Some(start), Some(lines), Some(end)) => Ok(Outcome { start, lines, end }),
        _ => Err(ValidationError::InvalidResult(vec![
            "result must reveal start, lines, and end".to_string(),
        ])),
    }
}

// =============================================================================
// TESTS
// =============================================================================
