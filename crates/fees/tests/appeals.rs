//! Validator and leader appeals: bond recovery, merged-committee payments,
//! forfeited-bond burns and splits.

mod common;

use agora_fees::compute_appeal_bond;
use agora_fees::invariants::check_all;
use agora_fees::metrics::{
    compute_agg_appealant_burnt, compute_all_zeros, compute_total_burnt, compute_total_costs,
    compute_total_earnings,
};
use agora_fees::prelude::*;
use agora_fees::total_transaction_cost;
use common::*;

fn bond() -> u64 {
    compute_appeal_bond(0, LEADER_TIMEOUT, VALIDATORS_TIMEOUT).unwrap()
}

#[test]
fn successful_validator_appeal_pays_merged_committee() {
    let pool = addresses_pool(200);
    let budget = default_budget(1);
    let transcript = results(vec![
        round(vec![
            (0, receipt(VoteKind::Agree)),
            (1, plain(VoteKind::Agree)),
            (2, plain(VoteKind::Agree)),
            (3, plain(VoteKind::Disagree)),
            (4, plain(VoteKind::Timeout)),
        ]),
        round((5..12).map(|i| (i, plain(VoteKind::Disagree))).collect()),
        round(vec![
            (5, receipt(VoteKind::Agree)),
            (2, plain(VoteKind::Agree)),
            (3, plain(VoteKind::Agree)),
            (4, plain(VoteKind::Agree)),
            (1, plain(VoteKind::Agree)),
            (6, plain(VoteKind::Agree)),
            (7, plain(VoteKind::Agree)),
            (8, plain(VoteKind::Agree)),
            (9, plain(VoteKind::Disagree)),
            (10, plain(VoteKind::Timeout)),
            (11, plain(VoteKind::Timeout)),
        ]),
    ]);

    let (events, labels) = process_transaction(&pool, &transcript, &budget).unwrap();

    assert_eq!(
        labels,
        vec![
            RoundLabel::SkipRound,
            RoundLabel::AppealValidatorSuccessful,
            RoundLabel::NormalRound,
        ]
    );
    check_all(&events, &budget, &transcript, &labels);

    // The appellant recovers the bond plus the full leader timeout.
    assert_eq!(
        compute_total_earnings(&events, &addr(23)),
        bond() + LEADER_TIMEOUT
    );
    assert_eq!(compute_total_costs(&events, &addr(23)), bond());

    // The overturned round is skipped, but its leader is paid through the
    // merged appeal committee.
    assert_eq!(
        compute_total_earnings(&events, &addr(0)),
        LEADER_TIMEOUT + VALIDATORS_TIMEOUT
    );

    // The merged committee is undetermined (a disagree supermajority), so
    // every merged voter earns one validator fee; the final round pays its
    // majority a second one.
    assert_eq!(
        compute_total_earnings(&events, &addr(5)),
        LEADER_TIMEOUT + 2 * VALIDATORS_TIMEOUT
    );
    for i in [1, 2, 3, 4, 6, 7, 8] {
        assert_eq!(
            compute_total_earnings(&events, &addr(i)),
            2 * VALIDATORS_TIMEOUT
        );
    }
    for i in [9, 10, 11] {
        assert_eq!(
            compute_total_burnt(&events, &addr(i)),
            PENALTY_REWARD_COEFFICIENT * VALIDATORS_TIMEOUT
        );
    }

    assert_eq!(
        compute_total_costs(&events, &budget.sender_address),
        total_transaction_cost(&budget)
    );
    assert!((12..199).all(|i| i == 23 || compute_all_zeros(&events, &addr(i))));
}

#[test]
fn unsuccessful_validator_appeal_burns_unspent_bond() {
    let pool = addresses_pool(200);
    let budget = default_budget(1);
    let transcript = results(vec![
        round(vec![
            (0, receipt(VoteKind::Agree)),
            (1, plain(VoteKind::Agree)),
            (2, plain(VoteKind::Agree)),
            (3, plain(VoteKind::Disagree)),
            (4, plain(VoteKind::Timeout)),
        ]),
        round((5..12).map(|i| (i, plain(VoteKind::Agree))).collect()),
    ]);

    let (events, labels) = process_transaction(&pool, &transcript, &budget).unwrap();

    assert_eq!(
        labels,
        vec![
            RoundLabel::NormalRound,
            RoundLabel::AppealValidatorUnsuccessful,
        ]
    );
    check_all(&events, &budget, &transcript, &labels);

    // The appeal confirmed the original outcome: the appellant loses the
    // bond, the appeal committee is paid out of it and the rest burns.
    assert_eq!(compute_total_costs(&events, &addr(23)), bond());
    assert_eq!(compute_total_earnings(&events, &addr(23)), 0);
    assert_eq!(
        compute_agg_appealant_burnt(&events),
        bond() - 7 * VALIDATORS_TIMEOUT
    );

    assert_eq!(
        compute_total_earnings(&events, &addr(0)),
        LEADER_TIMEOUT + VALIDATORS_TIMEOUT
    );
    for i in [1, 2] {
        assert_eq!(compute_total_earnings(&events, &addr(i)), VALIDATORS_TIMEOUT);
    }
    for i in [3, 4] {
        assert_eq!(
            compute_total_burnt(&events, &addr(i)),
            PENALTY_REWARD_COEFFICIENT * VALIDATORS_TIMEOUT
        );
    }
    for i in 5..=11 {
        assert_eq!(compute_total_earnings(&events, &addr(i)), VALIDATORS_TIMEOUT);
    }
}

#[test]
fn successful_leader_appeal_rewards_appellant_only() {
    let pool = addresses_pool(200);
    let budget = default_budget(1);
    let transcript = results(vec![
        round(vec![
            (0, receipt(VoteKind::Agree)),
            (1, plain(VoteKind::Agree)),
            (2, plain(VoteKind::Disagree)),
            (3, plain(VoteKind::Disagree)),
            (4, plain(VoteKind::Timeout)),
        ]),
        na_round(&[5, 6, 7, 8, 9, 10, 11]),
        round(vec![
            (5, receipt(VoteKind::Agree)),
            (1, plain(VoteKind::Agree)),
            (2, plain(VoteKind::Agree)),
            (3, plain(VoteKind::Agree)),
            (4, plain(VoteKind::Agree)),
            (6, plain(VoteKind::Agree)),
            (7, plain(VoteKind::Agree)),
            (8, plain(VoteKind::Agree)),
            (9, plain(VoteKind::Agree)),
            (10, plain(VoteKind::Disagree)),
            (11, plain(VoteKind::Timeout)),
        ]),
    ]);

    let (events, labels) = process_transaction(&pool, &transcript, &budget).unwrap();

    assert_eq!(
        labels,
        vec![
            RoundLabel::SkipRound,
            RoundLabel::AppealLeaderSuccessful,
            RoundLabel::NormalRound,
        ]
    );
    check_all(&events, &budget, &transcript, &labels);

    assert_eq!(
        compute_total_earnings(&events, &addr(23)),
        bond() + LEADER_TIMEOUT
    );
    assert_eq!(compute_total_costs(&events, &addr(23)), bond());

    // The undetermined round was skipped: its members only earn through
    // the final round.
    assert_eq!(compute_total_earnings(&events, &addr(0)), 0);
    assert_eq!(
        compute_total_earnings(&events, &addr(5)),
        LEADER_TIMEOUT + VALIDATORS_TIMEOUT
    );
    for i in [1, 2, 3, 4, 6, 7, 8, 9] {
        assert_eq!(compute_total_earnings(&events, &addr(i)), VALIDATORS_TIMEOUT);
    }
    for i in [10, 11] {
        assert_eq!(
            compute_total_burnt(&events, &addr(i)),
            PENALTY_REWARD_COEFFICIENT * VALIDATORS_TIMEOUT
        );
    }
}

#[test]
fn unsuccessful_leader_appeal_splits_bond_into_trailing_round() {
    let pool = addresses_pool(200);
    let budget = default_budget(1);
    let transcript = results(vec![
        round(vec![
            (0, receipt(VoteKind::Agree)),
            (1, plain(VoteKind::Agree)),
            (2, plain(VoteKind::Disagree)),
            (3, plain(VoteKind::Disagree)),
            (4, plain(VoteKind::Timeout)),
        ]),
        na_round(&[5, 6, 7, 8, 9, 10, 11]),
        round(vec![
            (5, receipt(VoteKind::Agree)),
            (2, plain(VoteKind::Agree)),
            (3, plain(VoteKind::Agree)),
            (4, plain(VoteKind::Agree)),
            (1, plain(VoteKind::Disagree)),
            (6, plain(VoteKind::Disagree)),
            (7, plain(VoteKind::Disagree)),
            (8, plain(VoteKind::Disagree)),
            (9, plain(VoteKind::Disagree)),
            (10, plain(VoteKind::Timeout)),
            (11, plain(VoteKind::Timeout)),
        ]),
    ]);

    let (events, labels) = process_transaction(&pool, &transcript, &budget).unwrap();

    assert_eq!(
        labels,
        vec![
            RoundLabel::NormalRound,
            RoundLabel::AppealLeaderUnsuccessful,
            RoundLabel::SplitPreviousAppealBond,
        ]
    );
    check_all(&events, &budget, &transcript, &labels);

    // The bond, less the trailing leader's fee, spreads evenly over the
    // trailing committee: (2300 - 100) / 11 voters.
    let share = (bond() - LEADER_TIMEOUT) / 11;

    assert_eq!(compute_total_costs(&events, &addr(23)), bond());
    assert_eq!(compute_total_earnings(&events, &addr(23)), 0);

    // Round 0 was undetermined: its five members each earned a validator
    // fee and the leader its timeout.
    assert_eq!(
        compute_total_earnings(&events, &addr(0)),
        LEADER_TIMEOUT + VALIDATORS_TIMEOUT
    );
    for i in [1, 2, 3, 4] {
        assert_eq!(
            compute_total_earnings(&events, &addr(i)),
            VALIDATORS_TIMEOUT + share
        );
    }
    assert_eq!(
        compute_total_earnings(&events, &addr(5)),
        LEADER_TIMEOUT + share
    );
    for i in 6..=11 {
        assert_eq!(compute_total_earnings(&events, &addr(i)), share);
    }

    assert_eq!(
        compute_total_costs(&events, &budget.sender_address),
        total_transaction_cost(&budget)
    );
}
