//! Protocol constants for committee sizing, staking and slashing.

/// Committee sizes per round index. Even indexes are normal-round sizes,
/// odd indexes are appeal-round sizes.
pub const ROUND_SIZES: [u64; 17] = [
    5, 7, 11, 13, 23, 25, 47, 49, 95, 97, 191, 193, 383, 385, 767, 769, 1000,
];

/// Multiplier applied to the validator timeout when burning minority voters.
pub const PENALTY_REWARD_COEFFICIENT: u64 = 1;

/// Stake credited to every known address at the start of a computation when
/// the budget uses the constant staking distribution.
pub const DEFAULT_STAKE: u64 = 2_000_000;

/// Display sentinel for "no hash supplied".
pub const DEFAULT_HASH: &str = "0xdefault";

/// Basis points denominator shared by the slash rates below.
pub const BPS_DENOM: u64 = 10_000;

/// Slash rate for an idle validator (1% of current stake).
pub const IDLE_SLASH_BPS: u64 = 100;

/// Slash rate for a validator in the hash minority (1% of current stake).
pub const VALIDATOR_VIOLATION_SLASH_BPS: u64 = 100;

/// Slash rate for a leader in the hash minority (5% of current stake).
pub const LEADER_VIOLATION_SLASH_BPS: u64 = 500;
