//! Error types for the fee distribution engine.

use agora_types::{Address, BudgetError, FeeEvent};
use thiserror::Error;

/// Errors that can occur while distributing fees over a transcript.
///
/// All of these are structural: they mean the inputs do not describe a legal
/// transaction or the engine has diverged from its invariants. There are no
/// retries and no partial outputs.
#[derive(Error, Debug)]
pub enum FeeEngineError {
    #[error("invalid budget: {0}")]
    InvalidBudget(#[from] BudgetError),

    #[error("invalid normal round index: {index}")]
    InvalidRoundIndex { index: usize },

    #[error("transcript has {rounds} rounds but the budget allows at most {max}")]
    TooManyRounds { rounds: usize, max: usize },

    #[error("appeal round {round_index} has no appeal in the budget")]
    MissingAppeal { round_index: usize },

    #[error(
        "sender {sender} paid out more than it cost: cost={sender_cost}, paid={paid_out} \
         (event log attached)"
    )]
    NegativeRefund {
        sender: Address,
        sender_cost: u64,
        paid_out: u64,
        events: Vec<FeeEvent>,
    },
}
