//! Read-only aggregations over an event log.
//!
//! Consumed by the invariant suite, the tests and any display layer; none of
//! these mutate or extend the log.

use agora_types::{Address, FeeEvent, Role};

/// Current stake of an address: everything staked minus everything slashed,
/// over the whole log.
pub fn compute_current_stake(address: &Address, events: &[FeeEvent]) -> u64 {
    let mut stake: u64 = 0;
    for event in events.iter().filter(|e| &e.address == address) {
        stake += event.staked;
        stake = stake.saturating_sub(event.slashed);
    }
    stake
}

pub fn compute_total_costs(events: &[FeeEvent], address: &Address) -> u64 {
    events
        .iter()
        .filter(|e| &e.address == address)
        .map(|e| e.cost)
        .sum()
}

pub fn compute_total_earnings(events: &[FeeEvent], address: &Address) -> u64 {
    events
        .iter()
        .filter(|e| &e.address == address)
        .map(|e| e.earned)
        .sum()
}

pub fn compute_total_burnt(events: &[FeeEvent], address: &Address) -> u64 {
    events
        .iter()
        .filter(|e| &e.address == address)
        .map(|e| e.burned)
        .sum()
}

pub fn compute_total_slashed(events: &[FeeEvent], address: &Address) -> u64 {
    events
        .iter()
        .filter(|e| &e.address == address)
        .map(|e| e.slashed)
        .sum()
}

/// Net balance of an address: earnings minus costs. Negative when the
/// address paid more into the transaction than it got back.
pub fn compute_total_balance(events: &[FeeEvent], address: &Address) -> i128 {
    compute_total_earnings(events, address) as i128 - compute_total_costs(events, address) as i128
}

/// True when the address has no monetary activity besides its initial stake.
pub fn compute_all_zeros(events: &[FeeEvent], address: &Address) -> bool {
    compute_total_costs(events, address) == 0
        && compute_total_earnings(events, address) == 0
        && compute_total_burnt(events, address) == 0
        && compute_total_slashed(events, address) == 0
}

pub fn compute_agg_costs(events: &[FeeEvent]) -> u64 {
    events.iter().map(|e| e.cost).sum()
}

pub fn compute_agg_earnings(events: &[FeeEvent]) -> u64 {
    events.iter().map(|e| e.earned).sum()
}

pub fn compute_agg_burnt(events: &[FeeEvent]) -> u64 {
    events.iter().map(|e| e.burned).sum()
}

pub fn compute_agg_staked(events: &[FeeEvent]) -> u64 {
    events.iter().map(|e| e.staked).sum()
}

pub fn compute_agg_slashed(events: &[FeeEvent]) -> u64 {
    events.iter().map(|e| e.slashed).sum()
}

/// Burns recorded against appellants only; these are the burns that the
/// conservation identity accounts for.
pub fn compute_agg_appealant_burnt(events: &[FeeEvent]) -> u64 {
    events
        .iter()
        .filter(|e| e.role == Some(Role::Appealant))
        .map(|e| e.burned)
        .sum()
}
