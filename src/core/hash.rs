//! Settlement Hashing for Verification
//!
//! Provides deterministic hashing of settled bets for:
//! - Receipts that a caller can store or compare
//! - Replay validation (same inputs must give the same digest)

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type SettlementHash = [u8; 32];

/// Domain separator for settlement receipts.
pub const SETTLEMENT_DOMAIN: &[u8] = b"LADDER_SETTLEMENT_V1";

/// Deterministic hasher for settlement data.
///
/// Wraps SHA-256 with fixed-width little-endian helpers.
/// Order of updates is part of the receipt format.
pub struct SettlementHasher {
    hasher: Sha256,
}

impl SettlementHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for settlement receipts.
    pub fn for_settlement() -> Self {
        Self::new(SETTLEMENT_DOMAIN)
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u128 value (little-endian).
    #[inline]
    pub fn update_u128(&mut self, value: u128) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with an optional byte: presence flag, then value (0 if absent).
    #[inline]
    pub fn update_opt_u8(&mut self, value: Option<u8>) {
        self.update_bool(value.is_some());
        self.update_u8(value.unwrap_or(0));
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> SettlementHash {
        self.hasher.finalize().into()
    }
}

/// Compute hash with domain separator.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> SettlementHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute a settlement hash.
///
/// The closure adds the bet, result and settlement fields in receipt order.
pub fn compute_settlement_hash<F>(add_fields: F) -> SettlementHash
where
    F: FnOnce(&mut SettlementHasher),
{
    let mut hasher = SettlementHasher::for_settlement();
    add_fields(&mut hasher);
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
