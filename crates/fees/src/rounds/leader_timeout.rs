use crate::bond::compute_appeal_bond;
use crate::errors::FeeEngineError;
use crate::rounds::normal::distribute_validator_fees;
use agora_types::{
    EventSequence, FeeEvent, Role, RoundLabel, TransactionBudget, TransactionRoundResults,
    VoteKind,
};

/// A leader that timed out with no appeal in sight still earns half its
/// timeout for showing up.
pub fn apply_leader_timeout_50_percent(
    results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Vec<FeeEvent> {
    let Some(rotation) = results.rounds.get(round_index).and_then(|r| r.tail()) else {
        return Vec::new();
    };
    let Some((leader, vote)) = rotation.leader() else {
        return Vec::new();
    };

    vec![FeeEvent {
        earned: budget.leader_timeout / 2,
        role: Some(Role::Leader),
        vote: Some(vote.kind()),
        round_index: Some(round_index),
        round_label: Some(RoundLabel::LeaderTimeout50Percent),
        ..FeeEvent::base(seq.next_id(), *leader)
    }]
}

/// After an unsuccessful leader-timeout appeal, the forfeited bond is split
/// between this round's leader and the sender.
pub fn apply_leader_timeout_50_previous_appeal_bond(
    results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Result<Vec<FeeEvent>, FeeEngineError> {
    let challenged = round_index
        .checked_sub(2)
        .ok_or(FeeEngineError::InvalidRoundIndex { index: round_index })?;
    let bond = compute_appeal_bond(challenged, budget.leader_timeout, budget.validators_timeout)?;

    let mut events = Vec::new();
    if let Some(rotation) = results.rounds.get(round_index).and_then(|r| r.tail()) {
        if let Some((leader, vote)) = rotation.leader() {
            events.push(FeeEvent {
                earned: bond / 2,
                role: Some(Role::Leader),
                vote: Some(vote.kind()),
                round_index: Some(round_index),
                round_label: Some(RoundLabel::LeaderTimeout50PreviousAppealBond),
                ..FeeEvent::base(seq.next_id(), *leader)
            });
        }
    }

    // The sender's half carries any rounding remainder so the whole bond is
    // accounted for.
    events.push(FeeEvent {
        earned: bond - bond / 2,
        role: Some(Role::Sender),
        vote: Some(VoteKind::Na),
        round_index: Some(round_index),
        round_label: Some(RoundLabel::LeaderTimeout50PreviousAppealBond),
        ..FeeEvent::base(seq.next_id(), budget.sender_address)
    });

    Ok(events)
}

/// After a successful leader-timeout appeal, the replacement leader that
/// completed the round earns 150% of the leader timeout, the sender recovers
/// the other half, and the validators are paid as in a normal round.
pub fn apply_leader_timeout_150_previous_normal_round(
    results: &TransactionRoundResults,
    round_index: usize,
    budget: &TransactionBudget,
    seq: &mut EventSequence,
) -> Result<Vec<FeeEvent>, FeeEngineError> {
    let Some(rotation) = results.rounds.get(round_index).and_then(|r| r.tail()) else {
        return Ok(Vec::new());
    };

    let mut events = Vec::new();
    if let Some((leader, vote)) = rotation.leader() {
        events.push(FeeEvent {
            earned: budget.leader_timeout + budget.leader_timeout / 2,
            role: Some(Role::Leader),
            vote: Some(vote.kind()),
            round_index: Some(round_index),
            round_label: Some(RoundLabel::LeaderTimeout150PreviousNormalRound),
            ..FeeEvent::base(seq.next_id(), *leader)
        });
    }

    events.push(FeeEvent {
        earned: budget.leader_timeout / 2,
        role: Some(Role::Sender),
        vote: Some(VoteKind::Na),
        round_index: Some(round_index),
        round_label: Some(RoundLabel::LeaderTimeout150PreviousNormalRound),
        ..FeeEvent::base(seq.next_id(), budget.sender_address)
    });

    distribute_validator_fees(
        &rotation.votes,
        round_index,
        RoundLabel::LeaderTimeout150PreviousNormalRound,
        budget,
        seq,
        &mut events,
    );

    Ok(events)
}
