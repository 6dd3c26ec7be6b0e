//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use agora_fees::prelude::*;

pub const LEADER_TIMEOUT: u64 = 100;
pub const VALIDATORS_TIMEOUT: u64 = 200;

/// Deterministic address pool; index `i` maps to a fixed address.
pub fn addr(index: u16) -> Address {
    let mut bytes = [0u8; 20];
    bytes[18..].copy_from_slice(&index.to_be_bytes());
    Address(bytes)
}

pub fn addresses_pool(len: u16) -> Vec<Address> {
    (0..len).map(addr).collect()
}

/// The budget every scenario uses: one appeal allowed, sender at pool slot
/// 199, appellant at pool slot 23.
pub fn default_budget(appeal_rounds: usize) -> TransactionBudget {
    TransactionBudget {
        leader_timeout: LEADER_TIMEOUT,
        validators_timeout: VALIDATORS_TIMEOUT,
        appeal_rounds,
        rotations: vec![0; appeal_rounds + 1],
        sender_address: addr(199),
        appeals: if appeal_rounds > 0 {
            vec![Appeal::new(addr(23)); appeal_rounds]
        } else {
            Vec::new()
        },
        staking: StakeDistribution::Constant,
    }
}

pub fn plain(kind: VoteKind) -> Vote {
    Vote::Plain(kind)
}

pub fn receipt(kind: VoteKind) -> Vote {
    Vote::LeaderReceipt {
        vote: kind,
        hash: None,
    }
}

pub fn rotation(entries: Vec<(u16, Vote)>) -> Rotation {
    Rotation::new(entries.into_iter().map(|(i, v)| (addr(i), v)).collect())
}

pub fn rotation_with_reserves(
    entries: Vec<(u16, Vote)>,
    reserves: Vec<(u16, Vote)>,
) -> Rotation {
    Rotation::with_reserves(
        entries.into_iter().map(|(i, v)| (addr(i), v)).collect(),
        reserves.into_iter().map(|(i, v)| (addr(i), v)).collect(),
    )
}

pub fn round(entries: Vec<(u16, Vote)>) -> Round {
    Round::new(vec![rotation(entries)])
}

/// An all-NA appeal committee, as posted when challenging a timed-out round.
pub fn na_round(members: &[u16]) -> Round {
    round(
        members
            .iter()
            .map(|i| (*i, plain(VoteKind::Na)))
            .collect(),
    )
}

pub fn results(rounds: Vec<Round>) -> TransactionRoundResults {
    TransactionRoundResults::new(rounds)
}

/// Hash helper for deterministic-violation scenarios.
pub fn vote_hash(s: &str) -> VoteHash {
    VoteHash::new(s).unwrap()
}

pub fn hashed(kind: VoteKind, hash: &str) -> Vote {
    Vote::WithHash(kind, vote_hash(hash))
}
