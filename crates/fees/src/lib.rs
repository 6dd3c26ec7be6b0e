//! # Agora Fees - Optimistic Democracy Fee Distribution
//!
//! This crate computes the fee, reward, penalty and slashing distribution
//! produced by a single optimistic-democracy consensus transaction. Given the
//! finished round transcript, the transaction budget and the posted appeals,
//! it emits an ordered, append-only log of monetary events per participant
//! such that value is conserved and no honest party can be made worse off
//! than the adversary could force.
//!
//! ## Core Concepts
//!
//! - **Round labeling**: a two-pass state machine classifies every round
//!   into one of fourteen semantic outcomes
//! - **Majority engine**: vote majority over a ternary-plus-idle space, with
//!   a parallel hash majority for catching deterministic violations
//! - **Bond arithmetic**: appeal bonds derived from the committee size table
//! - **Conserved ledger**: appellant bonds, sender pre-payment and validator
//!   rewards close to zero, checked by the invariant suite
//!
//! ## Key Components
//!
//! - [`process_transaction`]: the whole pipeline, transcript in, events out
//! - [`labeling::label_rounds`]: the round classifier on its own
//! - [`metrics`]: read-only per-address and aggregate views of an event log
//! - [`invariants`]: the property checks every distribution must satisfy

pub mod bond;
pub mod errors;
pub mod idleness;
pub mod invariants;
pub mod labeling;
pub mod majority;
pub mod math;
pub mod metrics;
pub mod pipeline;
pub mod refund;
pub mod rounds;
pub mod stakes;
pub mod violations;

pub use bond::compute_appeal_bond;
pub use errors::FeeEngineError;
pub use labeling::label_rounds;
pub use pipeline::{process_transaction, process_transaction_seeded, total_transaction_cost};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::errors::FeeEngineError;
    pub use crate::pipeline::{process_transaction, process_transaction_seeded};
    pub use agora_types::constants::{DEFAULT_STAKE, PENALTY_REWARD_COEFFICIENT, ROUND_SIZES};
    pub use agora_types::{
        Address, Appeal, EventSequence, FeeEvent, Role, Rotation, Round, RoundLabel,
        StakeDistribution, TransactionBudget, TransactionRoundResults, Vote, VoteHash, VoteKind,
    };
}
