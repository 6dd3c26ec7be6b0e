use crate::majority::{compute_majority, who_is_in_vote_majority, MajorityOutcome};
use agora_types::constants::PENALTY_REWARD_COEFFICIENT;
use agora_types::{
    Address, EventSequence, FeeEvent, Role, RoundLabel, TransactionBudget,
    TransactionRoundResults, Vote,
};
use indexmap::IndexMap;

/// Normal round: the leader earns its timeout; a determined majority earns
/// the validator timeout while the minority burns the penalty; an
/// undetermined round pays every validator.
pub fn apply_normal_round(
    results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Vec<FeeEvent> {
    let Some(rotation) = results.rounds.get(round_index).and_then(|r| r.tail()) else {
        return Vec::new();
    };
    distribute_normal_style(
        &rotation.votes,
        round_index,
        RoundLabel::NormalRound,
        budget,
        seq,
    )
}

/// The normal-round payment shape over an arbitrary vote map, reused by the
/// merged committee of a successful validator appeal.
pub(crate) fn distribute_normal_style(
    votes: &IndexMap<Address, Vote>,
    round_index: usize,
    label: RoundLabel,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Vec<FeeEvent> {
    let mut events = Vec::new();
    let Some((leader, leader_vote)) = votes.first() else {
        return events;
    };

    let majority = compute_majority(votes);
    if majority == MajorityOutcome::Undetermined {
        events.push(FeeEvent {
            earned: budget.leader_timeout,
            role: Some(Role::Leader),
            vote: Some(leader_vote.kind()),
            round_index: Some(round_index),
            round_label: Some(label),
            ..FeeEvent::base(seq.next_id(), *leader)
        });
        for (addr, vote) in votes {
            events.push(FeeEvent {
                earned: budget.validators_timeout,
                role: Some(Role::Validator),
                vote: Some(vote.kind()),
                round_index: Some(round_index),
                round_label: Some(label),
                ..FeeEvent::base(seq.next_id(), *addr)
            });
        }
    } else {
        let (majority_addresses, minority_addresses) = who_is_in_vote_majority(votes, majority);
        for addr in majority_addresses {
            events.push(FeeEvent {
                earned: budget.validators_timeout,
                role: Some(Role::Validator),
                vote: Some(votes[&addr].kind()),
                round_index: Some(round_index),
                round_label: Some(label),
                ..FeeEvent::base(seq.next_id(), addr)
            });
        }
        for addr in minority_addresses {
            events.push(FeeEvent {
                burned: PENALTY_REWARD_COEFFICIENT * budget.validators_timeout,
                role: Some(Role::Validator),
                vote: Some(votes[&addr].kind()),
                round_index: Some(round_index),
                round_label: Some(label),
                ..FeeEvent::base(seq.next_id(), addr)
            });
        }
        events.push(FeeEvent {
            earned: budget.leader_timeout,
            role: Some(Role::Leader),
            vote: Some(leader_vote.kind()),
            round_index: Some(round_index),
            round_label: Some(label),
            ..FeeEvent::base(seq.next_id(), *leader)
        });
    }

    events
}

/// Validator payments without a leader fee: a determined majority earns the
/// validator timeout and the minority burns; an undetermined map pays every
/// voter. Used by the rounds whose leader fee comes from elsewhere.
pub(crate) fn distribute_validator_fees(
    votes: &IndexMap<Address, Vote>,
    round_index: usize,
    label: RoundLabel,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
    events: &mut Vec<FeeEvent>,
) {
    let majority = compute_majority(votes);
    if majority == MajorityOutcome::Undetermined {
        for (addr, vote) in votes {
            events.push(FeeEvent {
                earned: budget.validators_timeout,
                role: Some(Role::Validator),
                vote: Some(vote.kind()),
                round_index: Some(round_index),
                round_label: Some(label),
                ..FeeEvent::base(seq.next_id(), *addr)
            });
        }
        return;
    }

    let (majority_addresses, minority_addresses) = who_is_in_vote_majority(votes, majority);
    for addr in majority_addresses {
        events.push(FeeEvent {
            earned: budget.validators_timeout,
            role: Some(Role::Validator),
            vote: Some(votes[&addr].kind()),
            round_index: Some(round_index),
            round_label: Some(label),
            ..FeeEvent::base(seq.next_id(), addr)
        });
    }
    for addr in minority_addresses {
        events.push(FeeEvent {
            burned: PENALTY_REWARD_COEFFICIENT * budget.validators_timeout,
            role: Some(Role::Validator),
            vote: Some(votes[&addr].kind()),
            round_index: Some(round_index),
            round_label: Some(label),
            ..FeeEvent::base(seq.next_id(), addr)
        });
    }
}
