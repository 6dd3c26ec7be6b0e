//! Idle validator slashing and reserve substitution.

use crate::math::apply_bps;
use crate::metrics::compute_current_stake;
use agora_types::constants::IDLE_SLASH_BPS;
use agora_types::{EventSequence, FeeEvent, Rotation, Round, TransactionRoundResults};
use indexmap::IndexMap;
use tracing::debug;

/// Slash idle voters and substitute them with reserves.
///
/// For every address in a round's tail rotation whose normalised vote is
/// idle, a `slashed` event of 1% of that address's current stake (as of the
/// events accumulated so far, this stage's own emissions included) is
/// appended. Idle voters are then removed from the effective vote map and
/// reserves are substituted in insertion order until the idle slots are
/// filled or the reserves run out; with no reserves left the rotation simply
/// shrinks.
///
/// Returns the rewritten transcript and the extended event log.
pub fn replace_idle_participants(
    seq: &mut EventSequence,
    events: Vec<FeeEvent>,
    results: &TransactionRoundResults,
) -> (TransactionRoundResults, Vec<FeeEvent>) {
    let mut events = events;
    let mut new_rounds = Vec::with_capacity(results.rounds.len());

    for round in &results.rounds {
        let Some(rotation) = round.tail() else {
            new_rounds.push(round.clone());
            continue;
        };

        let idle_addresses: Vec<_> = rotation
            .votes
            .iter()
            .filter(|(_, vote)| vote.is_idle())
            .map(|(addr, _)| *addr)
            .collect();

        if idle_addresses.is_empty() {
            new_rounds.push(round.clone());
            continue;
        }

        for addr in &idle_addresses {
            let current_stake = compute_current_stake(addr, &events);
            events.push(FeeEvent {
                slashed: apply_bps(current_stake, IDLE_SLASH_BPS),
                ..FeeEvent::base(seq.next_id(), *addr)
            });
        }

        let mut new_votes: IndexMap<_, _> = rotation
            .votes
            .iter()
            .filter(|(_, vote)| !vote.is_idle())
            .map(|(addr, vote)| (*addr, vote.clone()))
            .collect();

        let substitutes: Vec<_> = rotation
            .reserve_votes
            .iter()
            .filter(|(addr, _)| !new_votes.contains_key(*addr))
            .take(idle_addresses.len())
            .map(|(addr, vote)| (*addr, vote.clone()))
            .collect();
        for (addr, vote) in substitutes {
            new_votes.insert(addr, vote);
        }

        debug!(
            idle = idle_addresses.len(),
            effective = new_votes.len(),
            "replaced idle validators with reserves"
        );

        new_rounds.push(Round::new(vec![Rotation::with_reserves(
            new_votes,
            rotation.reserve_votes.clone(),
        )]));
    }

    (TransactionRoundResults::new(new_rounds), events)
}
