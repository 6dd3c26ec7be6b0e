//! Property checks every computed distribution must satisfy.
//!
//! These functions panic with a descriptive message on violation; they are
//! meant to be called from tests and simulations, not from the pipeline
//! itself.

use crate::metrics::{
    compute_agg_appealant_burnt, compute_agg_burnt, compute_agg_costs, compute_agg_earnings,
    compute_total_costs, compute_total_earnings,
};
use agora_types::{Address, FeeEvent, RoundLabel, TransactionBudget, TransactionRoundResults};
use std::collections::HashMap;

/// Integer tolerance absorbing floor-division artefacts in proportional
/// splits.
pub const CONSERVATION_TOLERANCE: i128 = 5;

/// Conservation: costs equal earnings plus appellant burns.
pub fn check_conservation(events: &[FeeEvent]) {
    let costs = compute_agg_costs(events) as i128;
    let earnings = compute_agg_earnings(events) as i128;
    let appealant_burnt = compute_agg_appealant_burnt(events) as i128;
    let drift = costs - earnings - appealant_burnt;
    assert!(
        drift.abs() < CONSERVATION_TOLERANCE,
        "conservation violated: costs={costs}, earnings={earnings}, \
         appellant burns={appealant_burnt}, drift={drift}"
    );
}

/// No free burn: the system cannot destroy more value than was paid in.
pub fn check_no_free_burn(events: &[FeeEvent]) {
    let costs = compute_agg_costs(events);
    let burnt = compute_agg_burnt(events);
    assert!(
        burnt < costs || (burnt == 0 && costs == 0),
        "burnt {burnt} is not below costs {costs}"
    );
}

/// Party safety: a coalition never strictly profits from the transaction.
pub fn check_party_safety(events: &[FeeEvent], party: &[Address]) {
    let mut costs: u64 = 0;
    let mut earnings: u64 = 0;
    for address in party {
        costs += compute_total_costs(events, address);
        earnings += compute_total_earnings(events, address);
    }
    assert!(
        costs >= earnings,
        "party {party:?} profits: costs={costs}, earnings={earnings}"
    );
}

/// Sequence density: ids form the contiguous range `1..=len`.
pub fn check_sequence_density(events: &[FeeEvent]) {
    for (position, event) in events.iter().enumerate() {
        assert_eq!(
            event.sequence_id,
            position as u64 + 1,
            "sequence ids are not dense at position {position}"
        );
    }
}

/// Label totality: one label per round.
pub fn check_label_totality(labels: &[RoundLabel], results: &TransactionRoundResults) {
    assert_eq!(
        labels.len(),
        results.rounds.len(),
        "label count does not match round count"
    );
}

/// Stake non-negativity: no prefix of the log drives a stake below zero.
pub fn check_stake_non_negative(events: &[FeeEvent]) {
    let mut stakes: HashMap<Address, i128> = HashMap::new();
    for event in events {
        let stake = stakes.entry(event.address).or_insert(0);
        *stake += event.staked as i128;
        *stake -= event.slashed as i128;
        assert!(
            *stake >= 0,
            "stake of {} went negative at sequence {}",
            event.address,
            event.sequence_id
        );
    }
}

/// Label-emission consistency: an event that names a round label names the
/// label the classifier assigned to that round.
pub fn check_label_consistency(events: &[FeeEvent], labels: &[RoundLabel]) {
    for event in events {
        if let Some(label) = event.round_label {
            let round_index = event
                .round_index
                .unwrap_or_else(|| panic!("event {} has a label but no round", event.sequence_id));
            assert_eq!(
                labels.get(round_index),
                Some(&label),
                "event {} carries label {label} but round {round_index} is {:?}",
                event.sequence_id,
                labels.get(round_index)
            );
        }
    }
}

/// Every address that ever voted in the transcript, in first-seen order.
pub fn transcript_addresses(results: &TransactionRoundResults) -> Vec<Address> {
    let mut seen = Vec::new();
    for round in &results.rounds {
        for rotation in &round.rotations {
            for addr in rotation.votes.keys() {
                if !seen.contains(addr) {
                    seen.push(*addr);
                }
            }
        }
    }
    seen
}

/// Run the whole suite: conservation, burn bound, sequence density, label
/// totality and consistency, stake non-negativity, and party safety for the
/// sender-plus-appellants coalition extended by every validator pair.
pub fn check_all(
    events: &[FeeEvent],
    budget: &TransactionBudget,
    results: &TransactionRoundResults,
    labels: &[RoundLabel],
) {
    check_conservation(events);
    check_no_free_burn(events);
    check_sequence_density(events);
    check_label_totality(labels, results);
    check_label_consistency(events, labels);
    check_stake_non_negative(events);

    let mut base_party = vec![budget.sender_address];
    base_party.extend(budget.appeals.iter().map(|a| a.appealant_address));

    let validators = transcript_addresses(results);
    for (i, first) in validators.iter().enumerate() {
        let mut party = base_party.clone();
        party.push(*first);
        check_party_safety(events, &party);

        for second in validators.iter().skip(i + 1) {
            let mut pair_party = base_party.clone();
            pair_party.push(*first);
            pair_party.push(*second);
            check_party_safety(events, &pair_party);
        }
    }
}
