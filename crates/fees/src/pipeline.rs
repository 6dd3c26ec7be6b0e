//! Top-level transaction processing pipeline.
//!
//! Data flows linearly through the stages: stake initialisation, sender
//! pre-payment, idle replacement, deterministic-violation slashing, round
//! labeling, per-label fee transformation, sender refund. The event list is
//! owned by this frame and threaded through each stage; every stage extends
//! it and nothing mutates past entries.

use crate::bond::bond_for_appeal_round;
use crate::errors::FeeEngineError;
use crate::idleness::replace_idle_participants;
use crate::labeling::label_rounds;
use crate::refund::compute_sender_refund;
use crate::rounds::distribute_round;
use crate::stakes::initialize_stakes;
use crate::violations::handle_deterministic_violations;
use agora_types::constants::ROUND_SIZES;
use agora_types::{
    Address, EventSequence, FeeEvent, Role, RoundLabel, TransactionBudget,
    TransactionRoundResults,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

/// Worst-case cost the sender pre-pays for a transaction: every possible
/// round at its full committee price (normal rounds once per allowed
/// rotation), plus a leader-timeout surcharge per allowed appeal.
pub fn total_transaction_cost(budget: &TransactionBudget) -> u64 {
    let mut total = (budget.appeal_rounds as u64).saturating_mul(budget.leader_timeout);

    for r in 0..=(2 * budget.appeal_rounds) {
        let committee = ROUND_SIZES.get(r).copied().unwrap_or(0);
        let round_price = budget
            .leader_timeout
            .saturating_add(committee.saturating_mul(budget.validators_timeout));
        if r % 2 == 0 {
            let rotations = budget.rotations.get(r / 2).copied().unwrap_or(0) as u64;
            total = total.saturating_add((rotations + 1).saturating_mul(round_price));
        } else {
            total = total.saturating_add(round_price);
        }
    }

    total
}

/// Process a transaction transcript into its fee event log and round labels
/// using the default RNG seed.
pub fn process_transaction(
    addresses: &[Address],
    results: &TransactionRoundResults,
    budget: &TransactionBudget,
) -> Result<(Vec<FeeEvent>, Vec<RoundLabel>), FeeEngineError> {
    process_transaction_seeded(addresses, results, budget, 0)
}

/// Process a transaction transcript with an explicit RNG seed.
///
/// The seed only matters when the budget uses the normal staking
/// distribution; two runs over the same inputs and seed produce identical
/// event logs.
pub fn process_transaction_seeded(
    addresses: &[Address],
    results: &TransactionRoundResults,
    budget: &TransactionBudget,
    seed: u64,
) -> Result<(Vec<FeeEvent>, Vec<RoundLabel>), FeeEngineError> {
    budget.validate()?;

    let max_rounds = 2 * budget.appeal_rounds + 1;
    if results.rounds.len() > max_rounds {
        return Err(FeeEngineError::TooManyRounds {
            rounds: results.rounds.len(),
            max: max_rounds,
        });
    }

    let mut seq = EventSequence::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut events = initialize_stakes(&mut seq, addresses, &budget.staking, &mut rng);

    events.push(FeeEvent {
        cost: total_transaction_cost(budget),
        role: Some(Role::Sender),
        ..FeeEvent::base(seq.next_id(), budget.sender_address)
    });

    let (results, events) = replace_idle_participants(&mut seq, events, results);
    let mut events = handle_deterministic_violations(&mut seq, events, &results);

    let labels = label_rounds(&results);
    debug!(rounds = results.rounds.len(), ?labels, "distributing round fees");

    for round_index in 0..results.rounds.len() {
        if round_index % 2 == 1 {
            let appeal = budget
                .appeal_for_round(round_index)
                .ok_or(FeeEngineError::MissingAppeal { round_index })?;
            let bond = bond_for_appeal_round(round_index, budget)?;
            events.push(FeeEvent {
                cost: bond,
                role: Some(Role::Appealant),
                round_index: Some(round_index),
                ..FeeEvent::base(seq.next_id(), appeal.appealant_address)
            });
        }

        let round_events =
            distribute_round(&results, round_index, labels[round_index], budget, &mut seq)?;
        events.extend(round_events);
    }

    let refund = compute_sender_refund(&budget.sender_address, &events, budget)?;
    events.push(FeeEvent {
        earned: refund,
        role: Some(Role::Sender),
        ..FeeEvent::base(seq.next_id(), budget.sender_address)
    });

    info!(
        events = events.len(),
        rounds = results.rounds.len(),
        refund,
        "processed transaction"
    );
    Ok((events, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::{Appeal, StakeDistribution, ADDRESS_BYTES};

    fn addr(byte: u8) -> Address {
        Address([byte; ADDRESS_BYTES])
    }

    fn budget(appeal_rounds: usize) -> TransactionBudget {
        TransactionBudget {
            leader_timeout: 100,
            validators_timeout: 200,
            appeal_rounds,
            rotations: vec![0; appeal_rounds + 1],
            sender_address: addr(199),
            appeals: vec![Appeal::new(addr(23)); appeal_rounds],
            staking: StakeDistribution::Constant,
        }
    }

    #[test]
    fn total_cost_single_round_no_appeals() {
        // 1 rotation allowance of round 0: (0+1) * (100 + 5*200)
        assert_eq!(total_transaction_cost(&budget(0)), 1_100);
    }

    #[test]
    fn total_cost_counts_rotations_appeals_and_surcharge() {
        let mut b = budget(1);
        b.rotations = vec![1, 0];
        // round 0 twice: 2*(100 + 5*200) = 2200
        // round 1 once:  100 + 7*200    = 1500
        // round 2 once:  100 + 11*200   = 2300
        // surcharge:     1*100
        assert_eq!(total_transaction_cost(&b), 2_200 + 1_500 + 2_300 + 100);
    }

    #[test]
    fn transcript_longer_than_budget_is_rejected() {
        use agora_types::{Rotation, Round, Vote, VoteKind};
        let rounds = vec![
            Round::new(vec![Rotation::new(
                [(addr(0), Vote::Plain(VoteKind::Agree))].into_iter().collect(),
            )]);
            2
        ];
        let results = TransactionRoundResults::new(rounds);
        let err = process_transaction(&[addr(0)], &results, &budget(0)).unwrap_err();
        assert!(matches!(
            err,
            FeeEngineError::TooManyRounds { rounds: 2, max: 1 }
        ));
    }

    #[test]
    fn appeal_round_without_appeal_is_rejected() {
        use agora_types::{Rotation, Round, Vote, VoteKind};
        let round = Round::new(vec![Rotation::new(
            [(addr(0), Vote::Plain(VoteKind::Agree))].into_iter().collect(),
        )]);
        let results = TransactionRoundResults::new(vec![round.clone(), round]);
        let mut b = budget(1);
        b.appeals.clear();
        let err = process_transaction(&[addr(0)], &results, &b).unwrap_err();
        assert!(matches!(
            err,
            FeeEngineError::MissingAppeal { round_index: 1 }
        ));
    }
}
