//! Per-label fee transformers.
//!
//! Each round label maps to a pure function over the transcript, the round
//! index, the budget and the event sequence. Dispatch is a total match, so
//! an unhandled label cannot exist.

mod appeal_leader;
mod appeal_validator;
mod leader_timeout;
mod normal;
mod split_bond;

pub use appeal_leader::{apply_appeal_leader_successful, apply_appeal_leader_timeout_successful};
pub use appeal_validator::{
    apply_appeal_validator_successful, apply_appeal_validator_unsuccessful,
};
pub use leader_timeout::{
    apply_leader_timeout_150_previous_normal_round, apply_leader_timeout_50_percent,
    apply_leader_timeout_50_previous_appeal_bond,
};
pub use normal::apply_normal_round;
pub use split_bond::apply_split_previous_appeal_bond;

use crate::errors::FeeEngineError;
use agora_types::{EventSequence, FeeEvent, RoundLabel, TransactionBudget, TransactionRoundResults};

/// Emit the fee events of a single round according to its label.
pub fn distribute_round(
    results: &TransactionRoundResults,
    round_index: usize,
    label: RoundLabel,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Result<Vec<FeeEvent>, FeeEngineError> {
    match label {
        RoundLabel::NormalRound => Ok(apply_normal_round(results, round_index, budget, seq)),
        RoundLabel::EmptyRound | RoundLabel::SkipRound => Ok(Vec::new()),
        // Consumed by the contextual rewrites; a bare leader timeout pays
        // nothing on its own.
        RoundLabel::LeaderTimeout => Ok(Vec::new()),
        RoundLabel::LeaderTimeout50Percent => {
            Ok(apply_leader_timeout_50_percent(results, round_index, budget, seq))
        }
        RoundLabel::LeaderTimeout50PreviousAppealBond => {
            apply_leader_timeout_50_previous_appeal_bond(results, round_index, budget, seq)
        }
        RoundLabel::LeaderTimeout150PreviousNormalRound => {
            apply_leader_timeout_150_previous_normal_round(results, round_index, budget, seq)
        }
        RoundLabel::AppealLeaderSuccessful => {
            apply_appeal_leader_successful(results, round_index, budget, seq)
        }
        RoundLabel::AppealLeaderTimeoutSuccessful => {
            apply_appeal_leader_timeout_successful(results, round_index, budget, seq)
        }
        // The forfeited bond is accounted for by the conservation-closing
        // rewrites (bond split or trailing-round payouts).
        RoundLabel::AppealLeaderUnsuccessful | RoundLabel::AppealLeaderTimeoutUnsuccessful => {
            Ok(Vec::new())
        }
        RoundLabel::AppealValidatorSuccessful => {
            apply_appeal_validator_successful(results, round_index, budget, seq)
        }
        RoundLabel::AppealValidatorUnsuccessful => {
            apply_appeal_validator_unsuccessful(results, round_index, budget, seq)
        }
        RoundLabel::SplitPreviousAppealBond => {
            apply_split_previous_appeal_bond(results, round_index, budget, seq)
        }
    }
}
