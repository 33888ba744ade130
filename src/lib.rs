//! # Ladder Settlement
//!
//! Deterministic validation and settlement of ladder-game bets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    LADDER SETTLEMENT                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── fixed.rs    - Exact thousandths for odds and payouts    │
//! │  └── hash.rs     - Settlement receipt hashing                │
//! │                                                              │
//! │  game/           - Betting logic (deterministic)             │
//! │  ├── rules.rs    - Minimum stake and multipliers             │
//! │  ├── types.rs    - Bets, picks, round results                │
//! │  ├── validate.rs - Rule tables for bets and results          │
//! │  ├── settle.rs   - Settlement engine                         │
//! │  └── board.rs    - Ladder board tracing                      │
//! │                                                              │
//! │  adapter/        - JSON boundary (logging, config)           │
//! │  ├── config.rs   - Environment settings                      │
//! │  ├── protocol.rs - Request/response types                    │
//! │  ├── handler.rs  - Request -> status + body                  │
//! │  └── stdio.rs    - Line-delimited JSON loop                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are pure:
//! - No floating-point arithmetic in settlement (odds are integer thousandths)
//! - No system time, randomness or I/O
//! - No balances; stakes and payouts are figures handed back to the caller
//!
//! Settling the same bet against the same result always produces the same
//! settlement and the same receipt digest.
//!
//! ## Example
//!
//! ```
//! use ladder_settlement::{settle_bet, Bet, LineCount, Picks, RoundResult, Side};
//!
//! let bet = Bet::single(Picks::new().with_start(Side::Left).with_end(Side::Right), 1000);
//! let result = RoundResult::new(Side::Left, LineCount::Three, Side::Right);
//!
//! let settlement = settle_bet(&bet, &result).unwrap();
//! assert!(settlement.win);
//! assert_eq!(settlement.multiplier.to_f64(), 3.24);
//! assert_eq!(settlement.payout.whole_credits(), 3240);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod adapter;

// Re-export commonly used types
pub use core::fixed::{Multiplier, Payout, MILLI_ONE, MILLI_SCALE};
pub use game::board::{BoardError, LadderBoard};
pub use game::settle::{settle_bet, settle_with_receipt, LegOutcome, Matched, Receipt, Settlement};
pub use game::types::{Bet, BetType, Leg, LineCount, Picks, RoundResult, Side, Submitted};
pub use game::validate::{validate_bet, validate_result, ValidationError, ValidationResult};
pub use adapter::{handle_bet_request, AdapterConfig, HandlerResponse};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
