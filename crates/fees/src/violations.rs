//! Deterministic-violation slashing.
//!
//! A validator whose execution hash disagrees with the rotation's hash
//! majority has provably diverged from the deterministic execution and is
//! slashed directly, leaders at a higher rate than validators.

use crate::majority::{compute_majority_hash, who_is_in_hash_majority};
use crate::math::apply_bps;
use crate::metrics::compute_current_stake;
use agora_types::constants::{LEADER_VIOLATION_SLASH_BPS, VALIDATOR_VIOLATION_SLASH_BPS};
use agora_types::{EventSequence, FeeEvent, TransactionRoundResults};
use tracing::warn;

/// Slash every non-idle address in the hash minority of each round's tail
/// rotation: 5% of current stake for the rotation's leader, 1% for anyone
/// else. Idle voters were already slashed and substituted by the idleness
/// stage and are skipped here.
pub fn handle_deterministic_violations(
    seq: &mut EventSequence,
    events: Vec<FeeEvent>,
    results: &TransactionRoundResults,
) -> Vec<FeeEvent> {
    let mut events = events;

    for round in &results.rounds {
        let Some(rotation) = round.tail() else {
            continue;
        };
        let Some(majority_hash) = compute_majority_hash(&rotation.votes) else {
            continue;
        };

        let leader = rotation.leader().map(|(addr, _)| *addr);
        let (_, minority) = who_is_in_hash_majority(&rotation.votes, &majority_hash);

        for addr in minority {
            let vote = &rotation.votes[&addr];
            if vote.is_idle() {
                continue;
            }

            let rate = if Some(addr) == leader {
                LEADER_VIOLATION_SLASH_BPS
            } else {
                VALIDATOR_VIOLATION_SLASH_BPS
            };
            let current_stake = compute_current_stake(&addr, &events);
            let slashed = apply_bps(current_stake, rate);

            warn!(
                address = %addr,
                slashed,
                leader = Some(addr) == leader,
                "deterministic violation: hash disagrees with committee majority"
            );
            events.push(FeeEvent {
                slashed,
                hash: vote.hash().cloned(),
                ..FeeEvent::base(seq.next_id(), addr)
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::constants::DEFAULT_STAKE;
    use agora_types::{Address, Rotation, Round, Vote, VoteHash, VoteKind, ADDRESS_BYTES};

    fn addr(byte: u8) -> Address {
        Address([byte; ADDRESS_BYTES])
    }

    fn hash(s: &str) -> VoteHash {
        VoteHash::new(s).unwrap()
    }

    fn staked_pool(n: u8) -> (EventSequence, Vec<FeeEvent>) {
        let mut seq = EventSequence::new();
        let events = (0..n)
            .map(|i| FeeEvent {
                staked: DEFAULT_STAKE,
                ..FeeEvent::base(seq.next_id(), addr(i))
            })
            .collect();
        (seq, events)
    }

    fn single_round(votes: Vec<(Address, Vote)>) -> TransactionRoundResults {
        TransactionRoundResults::new(vec![Round::new(vec![Rotation::new(
            votes.into_iter().collect(),
        )])])
    }

    #[test]
    fn minority_validator_slashed_one_percent() {
        let (mut seq, events) = staked_pool(4);
        let results = single_round(vec![
            (addr(0), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(1), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(2), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(3), Vote::WithHash(VoteKind::Agree, hash("0xbb"))),
        ]);

        let events = handle_deterministic_violations(&mut seq, events, &results);
        let slashes: Vec<_> = events.iter().filter(|e| e.slashed > 0).collect();
        assert_eq!(slashes.len(), 1);
        assert_eq!(slashes[0].address, addr(3));
        assert_eq!(slashes[0].slashed, DEFAULT_STAKE / 100);
    }

    #[test]
    fn minority_leader_slashed_five_percent() {
        let (mut seq, events) = staked_pool(4);
        let results = single_round(vec![
            (addr(0), Vote::WithHash(VoteKind::Agree, hash("0xbb"))),
            (addr(1), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(2), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(3), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
        ]);

        let events = handle_deterministic_violations(&mut seq, events, &results);
        let slashes: Vec<_> = events.iter().filter(|e| e.slashed > 0).collect();
        assert_eq!(slashes.len(), 1);
        assert_eq!(slashes[0].address, addr(0));
        assert_eq!(slashes[0].slashed, DEFAULT_STAKE / 20);
    }

    #[test]
    fn hashless_votes_count_as_minority() {
        let (mut seq, events) = staked_pool(4);
        let results = single_round(vec![
            (addr(0), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(1), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(2), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(3), Vote::Plain(VoteKind::Agree)),
        ]);

        let events = handle_deterministic_violations(&mut seq, events, &results);
        let slashes: Vec<_> = events.iter().filter(|e| e.slashed > 0).collect();
        assert_eq!(slashes.len(), 1);
        assert_eq!(slashes[0].address, addr(3));
    }

    #[test]
    fn no_majority_hash_no_slashing() {
        let (mut seq, events) = staked_pool(3);
        let results = single_round(vec![
            (addr(0), Vote::WithHash(VoteKind::Agree, hash("0xaa"))),
            (addr(1), Vote::WithHash(VoteKind::Agree, hash("0xbb"))),
            (addr(2), Vote::Plain(VoteKind::Agree)),
        ]);

        let events = handle_deterministic_violations(&mut seq, events, &results);
        assert!(events.iter().all(|e| e.slashed == 0));
    }
}
