//! Ladder Betting Logic
//!
//! Validation and settlement of ladder bets. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `rules`: Minimum stake, multipliers, value sets
//! - `types`: Submitted and checked bet/result types
//! - `validate`: Rule tables and validation entry points
//! - `settle`: Settlement engine and receipts
//! - `board`: Ladder board tracing (rungs to revealed result)

pub mod rules;
pub mod types;
pub mod validate;
pub mod settle;
pub mod board;

// Re-export key types
pub use board::{BoardError, LadderBoard};
pub use settle::{settle_bet, settle_with_receipt, LegOutcome, Matched, Receipt, Settlement};
pub use types::{Bet, BetType, Leg, LineCount, Picks, RoundResult, Side, Submitted};
pub use validate::{validate_bet, validate_result, ValidationError, ValidationResult};
