//! Core data model for the Agora fee distribution engine.
//!
//! An optimistic-democracy transaction produces a transcript of rounds, each
//! holding one or more validator rotations. This crate defines the typed
//! representation of that transcript (addresses, votes, rotations, budgets)
//! and of the monetary event log the engine emits over it.
//!
//! All identifiers are validated at construction: an [`Address`] or
//! [`VoteHash`] that exists is well-formed, so downstream code never
//! re-checks formats.

pub mod address;
pub mod budget;
pub mod constants;
pub mod event;
pub mod hash;
pub mod label;
pub mod rotation;
pub mod vote;

pub use address::{Address, AddressError, ADDRESS_BYTES, ADDRESS_STRING_LENGTH};
pub use budget::{Appeal, BudgetError, StakeDistribution, TransactionBudget};
pub use constants::{
    DEFAULT_HASH, DEFAULT_STAKE, IDLE_SLASH_BPS, LEADER_VIOLATION_SLASH_BPS,
    PENALTY_REWARD_COEFFICIENT, ROUND_SIZES, VALIDATOR_VIOLATION_SLASH_BPS,
};
pub use event::{EventSequence, FeeEvent, Role};
pub use hash::{HashError, VoteHash};
pub use label::RoundLabel;
pub use rotation::{Rotation, Round, TransactionRoundResults};
pub use vote::{Vote, VoteKind};

/// Module version for API introspection
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
