use crate::bond::bond_for_appeal_round;
use crate::errors::FeeEngineError;
use agora_types::{
    EventSequence, FeeEvent, Role, RoundLabel, TransactionBudget, TransactionRoundResults,
    VoteKind,
};

/// Successful leader appeal: the appellant recovers the bond plus the full
/// leader timeout as reward.
pub fn apply_appeal_leader_successful(
    _results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Result<Vec<FeeEvent>, FeeEngineError> {
    let appeal = budget
        .appeal_for_round(round_index)
        .ok_or(FeeEngineError::MissingAppeal { round_index })?;
    let bond = bond_for_appeal_round(round_index, budget)?;

    Ok(vec![FeeEvent {
        earned: bond + budget.leader_timeout,
        role: Some(Role::Appealant),
        vote: Some(VoteKind::Na),
        round_index: Some(round_index),
        round_label: Some(RoundLabel::AppealLeaderSuccessful),
        ..FeeEvent::base(seq.next_id(), appeal.appealant_address)
    }])
}

/// Successful appeal against a timed-out leader: the appellant recovers the
/// bond plus half the leader timeout.
pub fn apply_appeal_leader_timeout_successful(
    _results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Result<Vec<FeeEvent>, FeeEngineError> {
    let appeal = budget
        .appeal_for_round(round_index)
        .ok_or(FeeEngineError::MissingAppeal { round_index })?;
    let bond = bond_for_appeal_round(round_index, budget)?;

    Ok(vec![FeeEvent {
        earned: bond + budget.leader_timeout / 2,
        role: Some(Role::Appealant),
        vote: Some(VoteKind::Na),
        round_index: Some(round_index),
        round_label: Some(RoundLabel::AppealLeaderTimeoutSuccessful),
        ..FeeEvent::base(seq.next_id(), appeal.appealant_address)
    }])
}
