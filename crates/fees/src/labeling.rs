//! Two-pass round classifier.
//!
//! The first pass walks the transcript left to right and assigns each round
//! a provisional outcome from its own votes and its immediate neighbours.
//! The second pass walks right to left and rewrites the context-sensitive
//! cases where a later round decides how an earlier one is paid (bond
//! splits, voided rounds, the leader-timeout sandwich).
//!
//! The classifier is total: every round receives exactly one label.

use crate::majority::compute_majority;
use agora_types::{Address, RoundLabel, TransactionRoundResults, Vote};
use indexmap::IndexMap;
use tracing::debug;

fn is_appeal(label: RoundLabel) -> bool {
    label.is_successful_appeal() || label.is_unsuccessful_appeal()
}

/// Assign a semantic outcome to every round of the transcript.
pub fn label_rounds(results: &TransactionRoundResults) -> Vec<RoundLabel> {
    let empty = IndexMap::new();
    let votes: Vec<&IndexMap<Address, Vote>> = results
        .rounds
        .iter()
        .map(|round| round.tail().map(|r| &r.votes).unwrap_or(&empty))
        .collect();

    let mut labels = first_pass(&votes);
    second_pass(&mut labels, &votes);

    debug!(?labels, "labeled transaction rounds");
    labels
}

fn leader_vote<'a>(votes: &'a IndexMap<Address, Vote>) -> Option<&'a Vote> {
    votes.first().map(|(_, vote)| vote)
}

fn leader_timed_out(votes: &IndexMap<Address, Vote>) -> bool {
    leader_vote(votes).is_some_and(Vote::is_leader_timeout)
}

fn leader_has_receipt(votes: &IndexMap<Address, Vote>) -> bool {
    leader_vote(votes).is_some_and(Vote::is_leader_receipt)
}

fn first_pass(votes: &[&IndexMap<Address, Vote>]) -> Vec<RoundLabel> {
    let n = votes.len();
    let mut labels = Vec::with_capacity(n);
    if n == 0 {
        return labels;
    }

    if votes[0].is_empty() {
        labels.push(RoundLabel::EmptyRound);
    } else if leader_timed_out(votes[0]) {
        if n == 1 {
            return vec![RoundLabel::LeaderTimeout50Percent];
        }
        labels.push(RoundLabel::LeaderTimeout);
    } else {
        labels.push(RoundLabel::NormalRound);
    }

    for i in 1..n {
        if votes[i].is_empty() {
            labels.push(RoundLabel::EmptyRound);
            continue;
        }

        if i % 2 == 0 {
            labels.push(if leader_timed_out(votes[i]) {
                RoundLabel::LeaderTimeout
            } else {
                RoundLabel::NormalRound
            });
            continue;
        }

        labels.push(label_appeal_round(votes, i));
    }

    labels
}

fn label_appeal_round(votes: &[&IndexMap<Address, Vote>], i: usize) -> RoundLabel {
    let next = votes.get(i + 1).copied();

    if leader_timed_out(votes[i - 1]) {
        if let Some(next_votes) = next {
            if leader_timed_out(next_votes) {
                return RoundLabel::AppealLeaderTimeoutUnsuccessful;
            }
            if leader_has_receipt(next_votes) {
                return RoundLabel::AppealLeaderTimeoutSuccessful;
            }
        }
    }

    if compute_majority(votes[i - 1]).is_unresolved() {
        if let Some(next_votes) = next {
            return if compute_majority(next_votes).is_unresolved() {
                RoundLabel::AppealLeaderUnsuccessful
            } else {
                RoundLabel::AppealLeaderSuccessful
            };
        }
    }

    // Validator appeal: compare against the nearest earlier round that
    // actually resolved something, walking back over normal rounds.
    let mut ancestor = Some(i - 1);
    while let Some(j) = ancestor {
        if !votes[j].is_empty() && !compute_majority(votes[j]).is_unresolved() {
            break;
        }
        ancestor = j.checked_sub(2);
    }

    match ancestor {
        Some(j) if compute_majority(votes[i]) != compute_majority(votes[j]) => {
            RoundLabel::AppealValidatorSuccessful
        }
        _ => RoundLabel::AppealValidatorUnsuccessful,
    }
}

fn second_pass(labels: &mut [RoundLabel], votes: &[&IndexMap<Address, Vote>]) {
    for j in (0..labels.len()).rev() {
        // A trailing normal round after a successful leader-timeout appeal
        // collects 150% of the leader timeout; the timed-out round is voided.
        if j >= 2
            && labels[j] == RoundLabel::NormalRound
            && labels[j - 1] == RoundLabel::AppealLeaderTimeoutSuccessful
            && labels[j - 2] == RoundLabel::LeaderTimeout
        {
            labels[j] = RoundLabel::LeaderTimeout150PreviousNormalRound;
            labels[j - 2] = RoundLabel::SkipRound;
            continue;
        }

        // A normal round that follows an appeal over an unresolved round: a
        // failed leader appeal leaves its forfeited bond to this round's
        // committee; a successful appeal voids the challenged round instead.
        // A failed validator appeal consumes its own bond and rewrites
        // nothing.
        if j >= 2
            && labels[j] == RoundLabel::NormalRound
            && is_appeal(labels[j - 1])
            && compute_majority(votes[j - 2]).is_unresolved()
        {
            if labels[j - 1] == RoundLabel::AppealLeaderUnsuccessful {
                labels[j] = RoundLabel::SplitPreviousAppealBond;
                continue;
            }
            if labels[j - 1].is_successful_appeal() {
                labels[j - 2] = RoundLabel::SkipRound;
                continue;
            }
        }

        // A leader timeout after a failed leader appeal is paid from the
        // forfeited bond; when the challenged round was itself a leader
        // timeout (the sandwich), it keeps its half fee.
        if j >= 2
            && labels[j] == RoundLabel::LeaderTimeout
            && matches!(
                labels[j - 1],
                RoundLabel::AppealLeaderUnsuccessful
                    | RoundLabel::AppealLeaderTimeoutUnsuccessful
            )
        {
            labels[j] = RoundLabel::LeaderTimeout50PreviousAppealBond;
            if labels[j - 2] == RoundLabel::LeaderTimeout {
                labels[j - 2] = RoundLabel::LeaderTimeout50Percent;
            }
            continue;
        }

        // A successful validator appeal overturns the round it challenged;
        // that round must not pay out.
        if labels[j] == RoundLabel::AppealValidatorSuccessful && j >= 1 {
            labels[j - 1] = RoundLabel::SkipRound;
            continue;
        }
    }
}
