//! Appeal bond derivation.

use crate::errors::FeeEngineError;
use agora_types::constants::ROUND_SIZES;
use agora_types::TransactionBudget;

/// Compute the bond an appellant must post to appeal the normal round at
/// `normal_round_index`.
///
/// The bond covers the leader timeout plus the validator timeouts of the
/// normal round that would follow the appeal; committee sizes beyond the
/// table contribute nothing.
///
/// Fails with [`FeeEngineError::InvalidRoundIndex`] when the index is odd or
/// outside the committee size table: appeals only ever close normal rounds,
/// so an odd index here is a labeling bug, not an input problem.
pub fn compute_appeal_bond(
    normal_round_index: usize,
    leader_timeout: u64,
    validators_timeout: u64,
) -> Result<u64, FeeEngineError> {
    if normal_round_index % 2 != 0 || normal_round_index >= ROUND_SIZES.len() {
        return Err(FeeEngineError::InvalidRoundIndex {
            index: normal_round_index,
        });
    }

    let next_normal_size = ROUND_SIZES
        .get(normal_round_index + 2)
        .copied()
        .unwrap_or(0);

    Ok(leader_timeout + validators_timeout * next_normal_size)
}

/// The bond closing the normal round just before appeal round `round_index`.
pub fn bond_for_appeal_round(
    round_index: usize,
    budget: &TransactionBudget,
) -> Result<u64, FeeEngineError> {
    if round_index == 0 || round_index % 2 != 1 {
        return Err(FeeEngineError::InvalidRoundIndex { index: round_index });
    }
    compute_appeal_bond(
        round_index - 1,
        budget.leader_timeout,
        budget.validators_timeout,
    )
}
