//! Initial stake assignment for the address pool.

use agora_types::constants::DEFAULT_STAKE;
use agora_types::{Address, EventSequence, FeeEvent, StakeDistribution};
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

/// Emit one `staked` event per known address.
///
/// The constant distribution credits [`DEFAULT_STAKE`] everywhere. The
/// normal distribution samples `Normal(mean, √variance)` per address from
/// the supplied RNG, clamped at zero and floored to whole units, so a run is
/// reproducible from its seed.
pub fn initialize_stakes(
    seq: &mut EventSequence,
    addresses: &[Address],
    staking: &StakeDistribution,
    rng: &mut StdRng,
) -> Vec<FeeEvent> {
    let events: Vec<FeeEvent> = addresses
        .iter()
        .map(|addr| FeeEvent {
            staked: sample_stake(staking, rng),
            ..FeeEvent::base(seq.next_id(), *addr)
        })
        .collect();

    debug!(
        addresses = addresses.len(),
        "initialised stakes for address pool"
    );
    events
}

fn sample_stake(staking: &StakeDistribution, rng: &mut StdRng) -> u64 {
    match staking {
        StakeDistribution::Constant => DEFAULT_STAKE,
        StakeDistribution::Normal { mean, variance } => {
            let std_dev = variance.sqrt();
            match Normal::new(*mean, std_dev) {
                Ok(normal) => normal.sample(rng).max(0.0) as u64,
                Err(_) => mean.max(0.0) as u64,
            }
        }
    }
}
