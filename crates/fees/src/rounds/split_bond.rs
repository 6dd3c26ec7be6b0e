use crate::bond::compute_appeal_bond;
use crate::errors::FeeEngineError;
use crate::majority::{compute_majority, who_is_in_vote_majority, MajorityOutcome};
use crate::math::split_amount;
use agora_types::constants::PENALTY_REWARD_COEFFICIENT;
use agora_types::{
    EventSequence, FeeEvent, Role, RoundLabel, TransactionBudget, TransactionRoundResults,
};

/// A normal round that follows an unsuccessful appeal over an unresolved
/// round inherits the forfeited bond: the leader takes its timeout out of
/// the bond and the rest is spread over the committee.
pub fn apply_split_previous_appeal_bond(
    results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Result<Vec<FeeEvent>, FeeEngineError> {
    let challenged = round_index
        .checked_sub(2)
        .ok_or(FeeEngineError::InvalidRoundIndex { index: round_index })?;
    let bond = compute_appeal_bond(challenged, budget.leader_timeout, budget.validators_timeout)?;

    let Some(rotation) = results.rounds.get(round_index).and_then(|r| r.tail()) else {
        return Ok(Vec::new());
    };
    let votes = &rotation.votes;
    let mut events = Vec::new();

    let majority = compute_majority(votes);
    if majority == MajorityOutcome::Undetermined {
        // Bond minus the leader's cut, split evenly across the committee.
        let share = split_amount(bond - budget.leader_timeout, votes.len());
        for (addr, vote) in votes {
            events.push(FeeEvent {
                earned: share,
                role: Some(Role::Validator),
                vote: Some(vote.kind()),
                round_index: Some(round_index),
                round_label: Some(RoundLabel::SplitPreviousAppealBond),
                ..FeeEvent::base(seq.next_id(), *addr)
            });
        }
    } else {
        let (majority_addresses, minority_addresses) = who_is_in_vote_majority(votes, majority);
        let share = split_amount(bond, majority_addresses.len());
        for addr in majority_addresses {
            events.push(FeeEvent {
                earned: share,
                role: Some(Role::Validator),
                vote: Some(votes[&addr].kind()),
                round_index: Some(round_index),
                round_label: Some(RoundLabel::SplitPreviousAppealBond),
                ..FeeEvent::base(seq.next_id(), addr)
            });
        }
        for addr in minority_addresses {
            events.push(FeeEvent {
                burned: PENALTY_REWARD_COEFFICIENT * budget.validators_timeout,
                role: Some(Role::Validator),
                vote: Some(votes[&addr].kind()),
                round_index: Some(round_index),
                round_label: Some(RoundLabel::SplitPreviousAppealBond),
                ..FeeEvent::base(seq.next_id(), addr)
            });
        }
    }

    if let Some((leader, vote)) = rotation.leader() {
        events.push(FeeEvent {
            earned: budget.leader_timeout,
            role: Some(Role::Leader),
            vote: Some(vote.kind()),
            round_index: Some(round_index),
            round_label: Some(RoundLabel::SplitPreviousAppealBond),
            ..FeeEvent::base(seq.next_id(), *leader)
        });
    }

    Ok(events)
}
