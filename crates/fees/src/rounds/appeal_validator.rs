use crate::bond::bond_for_appeal_round;
use crate::errors::FeeEngineError;
use crate::majority::{compute_majority, who_is_in_vote_majority};
use crate::rounds::normal::distribute_normal_style;
use agora_types::constants::PENALTY_REWARD_COEFFICIENT;
use agora_types::{
    Address, EventSequence, FeeEvent, Role, RoundLabel, TransactionBudget,
    TransactionRoundResults, Vote, VoteKind,
};
use indexmap::IndexMap;

fn tail_votes(
    results: &TransactionRoundResults,
    round_index: usize,
) -> Option<&IndexMap<Address, Vote>> {
    results
        .rounds
        .get(round_index)
        .and_then(|r| r.tail())
        .map(|rotation| &rotation.votes)
}

/// Successful validator appeal: the appellant recovers the bond plus the
/// leader timeout, and the appeal committee is merged with the overturned
/// round's committee for the validator payments. The merged map keeps the
/// overturned round's ordering, so its leader stays first.
pub fn apply_appeal_validator_successful(
    results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Result<Vec<FeeEvent>, FeeEngineError> {
    let appeal = budget
        .appeal_for_round(round_index)
        .ok_or(FeeEngineError::MissingAppeal { round_index })?;
    let bond = bond_for_appeal_round(round_index, budget)?;

    let mut events = vec![FeeEvent {
        earned: bond + budget.leader_timeout,
        role: Some(Role::Appealant),
        vote: Some(VoteKind::Na),
        round_index: Some(round_index),
        round_label: Some(RoundLabel::AppealValidatorSuccessful),
        ..FeeEvent::base(seq.next_id(), appeal.appealant_address)
    }];

    let mut merged: IndexMap<Address, Vote> = IndexMap::new();
    if let Some(previous) = tail_votes(results, round_index - 1) {
        merged.extend(previous.iter().map(|(a, v)| (*a, v.clone())));
    }
    if let Some(own) = tail_votes(results, round_index) {
        merged.extend(own.iter().map(|(a, v)| (*a, v.clone())));
    }

    events.extend(distribute_normal_style(
        &merged,
        round_index,
        RoundLabel::AppealValidatorSuccessful,
        budget,
        seq,
    ));

    Ok(events)
}

/// Unsuccessful validator appeal: the appeal committee is still paid by
/// majority, and whatever part of the bond those payments do not consume is
/// burned against the appellant.
pub fn apply_appeal_validator_unsuccessful(
    results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Result<Vec<FeeEvent>, FeeEngineError> {
    let appeal = budget
        .appeal_for_round(round_index)
        .ok_or(FeeEngineError::MissingAppeal { round_index })?;
    let bond = bond_for_appeal_round(round_index, budget)?;

    let mut events = Vec::new();
    if let Some(votes) = tail_votes(results, round_index) {
        // On an undetermined appeal the majority partition is empty and the
        // whole committee burns: failing to resolve an appeal is penalised.
        let majority = compute_majority(votes);
        let (majority_addresses, minority_addresses) = who_is_in_vote_majority(votes, majority);
        for addr in majority_addresses {
            events.push(FeeEvent {
                earned: budget.validators_timeout,
                role: Some(Role::Validator),
                vote: Some(votes[&addr].kind()),
                round_index: Some(round_index),
                round_label: Some(RoundLabel::AppealValidatorUnsuccessful),
                ..FeeEvent::base(seq.next_id(), addr)
            });
        }
        for addr in minority_addresses {
            events.push(FeeEvent {
                burned: PENALTY_REWARD_COEFFICIENT * budget.validators_timeout,
                role: Some(Role::Validator),
                vote: Some(votes[&addr].kind()),
                round_index: Some(round_index),
                round_label: Some(RoundLabel::AppealValidatorUnsuccessful),
                ..FeeEvent::base(seq.next_id(), addr)
            });
        }
    }

    let earned_this_round: u64 = events.iter().map(|e| e.earned).sum();
    events.push(FeeEvent {
        burned: bond.saturating_sub(earned_this_round),
        role: Some(Role::Appealant),
        vote: Some(VoteKind::Na),
        round_index: Some(round_index),
        round_label: Some(RoundLabel::AppealValidatorUnsuccessful),
        ..FeeEvent::base(seq.next_id(), appeal.appealant_address)
    });

    Ok(events)
}
