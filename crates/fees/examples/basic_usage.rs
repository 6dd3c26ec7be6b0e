//! Basic usage example for the Agora fee distribution engine
//!
//! This example demonstrates how to:
//! - Build a transaction transcript with an appeal
//! - Run the fee pipeline over it
//! - Inspect the resulting event log through the metric aggregators

use agora_fees::metrics::{
    compute_total_balance, compute_total_burnt, compute_total_costs, compute_total_earnings,
};
use agora_fees::prelude::*;
use agora_fees::total_transaction_cost;

fn addr(index: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = index;
    Address(bytes)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("Agora Fees - Basic Usage Example\n");

    let pool: Vec<Address> = (0..40).map(addr).collect();
    let sender = addr(39);
    let appellant = addr(23);

    let budget = TransactionBudget {
        leader_timeout: 100,
        validators_timeout: 200,
        appeal_rounds: 1,
        rotations: vec![0, 0],
        sender_address: sender,
        appeals: vec![Appeal::new(appellant)],
        staking: StakeDistribution::Constant,
    };

    // Round 0: the committee splits and nothing is resolved.
    let round0 = Round::new(vec![Rotation::new(
        [
            (
                addr(0),
                Vote::LeaderReceipt {
                    vote: VoteKind::Agree,
                    hash: None,
                },
            ),
            (addr(1), Vote::Plain(VoteKind::Agree)),
            (addr(2), Vote::Plain(VoteKind::Disagree)),
            (addr(3), Vote::Plain(VoteKind::Disagree)),
            (addr(4), Vote::Plain(VoteKind::Timeout)),
        ]
        .into_iter()
        .collect(),
    )]);

    // Round 1: an appellant challenges the undetermined outcome.
    let round1 = Round::new(vec![Rotation::new(
        (5..12)
            .map(|i| (addr(i), Vote::Plain(VoteKind::Na)))
            .collect(),
    )]);

    // Round 2: a fresh committee resolves the transaction.
    let round2 = Round::new(vec![Rotation::new(
        [
            (
                addr(5),
                Vote::LeaderReceipt {
                    vote: VoteKind::Agree,
                    hash: None,
                },
            ),
            (addr(1), Vote::Plain(VoteKind::Agree)),
            (addr(2), Vote::Plain(VoteKind::Agree)),
            (addr(3), Vote::Plain(VoteKind::Agree)),
            (addr(4), Vote::Plain(VoteKind::Agree)),
            (addr(6), Vote::Plain(VoteKind::Agree)),
            (addr(7), Vote::Plain(VoteKind::Agree)),
            (addr(8), Vote::Plain(VoteKind::Disagree)),
            (addr(9), Vote::Plain(VoteKind::Timeout)),
            (addr(10), Vote::Plain(VoteKind::Agree)),
            (addr(11), Vote::Plain(VoteKind::Agree)),
        ]
        .into_iter()
        .collect(),
    )]);

    let results = TransactionRoundResults::new(vec![round0, round1, round2]);

    println!("Worst-case sender cost: {}", total_transaction_cost(&budget));

    let (events, labels) = process_transaction(&pool, &results, &budget)?;

    println!("\nRound labels:");
    for (i, label) in labels.iter().enumerate() {
        println!("  round {i}: {label}");
    }

    println!("\nPer-address totals (participants only):");
    for address in pool
        .iter()
        .filter(|a| compute_total_balance(&events, a) != 0 || compute_total_burnt(&events, a) != 0)
    {
        println!(
            "  {address}: cost={} earned={} burned={} net={}",
            compute_total_costs(&events, address),
            compute_total_earnings(&events, address),
            compute_total_burnt(&events, address),
            compute_total_balance(&events, address),
        );
    }

    println!("\nEvent log ({} events), first five:", events.len());
    for event in events.iter().take(5) {
        println!("  {}", serde_json::to_string(event)?);
    }

    Ok(())
}
