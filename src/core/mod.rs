//! Core deterministic primitives.
//!
//! Integer-only arithmetic and hashing shared by the settlement engine.
//! Nothing in this module reads the clock, the environment or a float.

pub mod fixed;
pub mod hash;

// Re-export core types
pub use fixed::{Multiplier, Payout, Milli, MILLI_ONE, MILLI_SCALE};
pub use hash::{compute_settlement_hash, SettlementHash, SettlementHasher};
