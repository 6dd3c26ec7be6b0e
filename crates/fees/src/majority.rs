//! Vote-majority and hash-majority computation over a rotation.
//!
//! Two independent notions: the vote majority decides the round outcome, the
//! hash majority detects validators whose execution diverged from the
//! committee's.

use agora_types::{Address, Vote, VoteHash, VoteKind};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Outcome of the vote-majority computation over a rotation.
///
/// `Disagree` is part of the outcome space but is never produced by
/// [`compute_majority`]: a DISAGREE supermajority is by construction not a
/// positive outcome and collapses to `Undetermined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorityOutcome {
    Agree,
    Disagree,
    Timeout,
    Undetermined,
}

impl MajorityOutcome {
    /// Outcomes that do not resolve the round: no majority, or a majority
    /// against the transaction.
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            MajorityOutcome::Undetermined | MajorityOutcome::Disagree
        )
    }
}

/// Votes needed for a majority over `total` voters.
fn majority_threshold(total: usize) -> usize {
    total / 2 + 1
}

/// Compute the majority vote tag of a rotation's vote map.
///
/// Leader receipts count as the leader's own vote; idle and NA votes count
/// toward the total but can never form a majority.
pub fn compute_majority(votes: &IndexMap<Address, Vote>) -> MajorityOutcome {
    if votes.is_empty() {
        return MajorityOutcome::Undetermined;
    }

    let mut agree = 0usize;
    let mut disagree = 0usize;
    let mut timeout = 0usize;
    for vote in votes.values() {
        match vote.kind() {
            VoteKind::Agree => agree += 1,
            VoteKind::Disagree => disagree += 1,
            VoteKind::Timeout => timeout += 1,
            VoteKind::Idle | VoteKind::Na => {}
        }
    }

    let threshold = majority_threshold(votes.len());
    if agree >= threshold {
        MajorityOutcome::Agree
    } else if disagree >= threshold {
        // A disagreement supermajority does not finalise anything.
        MajorityOutcome::Undetermined
    } else if timeout >= threshold {
        MajorityOutcome::Timeout
    } else {
        MajorityOutcome::Undetermined
    }
}

/// Compute the majority execution hash of a rotation, regardless of vote
/// tags. Returns `None` when no hash reaches the threshold.
pub fn compute_majority_hash(votes: &IndexMap<Address, Vote>) -> Option<VoteHash> {
    if votes.is_empty() {
        return None;
    }

    let mut counts: HashMap<&VoteHash, usize> = HashMap::new();
    for vote in votes.values() {
        if let Some(hash) = vote.hash() {
            *counts.entry(hash).or_insert(0) += 1;
        }
    }

    let threshold = majority_threshold(votes.len());
    counts
        .into_iter()
        .find(|(_, count)| *count >= threshold)
        .map(|(hash, _)| hash.clone())
}

/// Partition a rotation's addresses by whether their normalised vote matches
/// the majority outcome. Returns `(majority, minority)`.
pub fn who_is_in_vote_majority(
    votes: &IndexMap<Address, Vote>,
    majority: MajorityOutcome,
) -> (Vec<Address>, Vec<Address>) {
    let matches_majority = |kind: VoteKind| match majority {
        MajorityOutcome::Agree => kind == VoteKind::Agree,
        MajorityOutcome::Disagree => kind == VoteKind::Disagree,
        MajorityOutcome::Timeout => kind == VoteKind::Timeout,
        MajorityOutcome::Undetermined => false,
    };

    let mut majority_addresses = Vec::new();
    let mut minority_addresses = Vec::new();
    for (addr, vote) in votes {
        if matches_majority(vote.kind()) {
            majority_addresses.push(*addr);
        } else {
            minority_addresses.push(*addr);
        }
    }
    (majority_addresses, minority_addresses)
}

/// Partition a rotation's addresses by whether their vote carries the
/// majority hash. Returns `(majority, minority)`; hashless votes land in the
/// minority.
pub fn who_is_in_hash_majority(
    votes: &IndexMap<Address, Vote>,
    majority_hash: &VoteHash,
) -> (Vec<Address>, Vec<Address>) {
    let mut majority_addresses = Vec::new();
    let mut minority_addresses = Vec::new();
    for (addr, vote) in votes {
        if vote.hash() == Some(majority_hash) {
            majority_addresses.push(*addr);
        } else {
            minority_addresses.push(*addr);
        }
    }
    (majority_addresses, minority_addresses)
}
