//! Fixed-point helpers for proportional splits.

/// Scale used for intermediate fixed-point arithmetic in proportional splits.
const SPLIT_SCALE: u128 = 1_000_000_000_000_000_000;

/// Evenly split `amount` across `recipients`, flooring the per-recipient
/// share. Computed as `amount × 10¹⁸ / n / 10¹⁸` in 128-bit arithmetic so the
/// scaling cannot overflow for any 64-bit amount.
///
/// Returns 0 for zero recipients; the callers treat an empty recipient set as
/// "nothing to distribute".
pub fn split_amount(amount: u64, recipients: usize) -> u64 {
    if recipients == 0 {
        return 0;
    }
    let scaled = amount as u128 * SPLIT_SCALE / recipients as u128;
    (scaled / SPLIT_SCALE) as u64
}

/// `amount · bps / 10_000`, floored, for the basis-point slash rates.
pub fn apply_bps(amount: u64, bps: u64) -> u64 {
    (amount as u128 * bps as u128 / agora_types::constants::BPS_DENOM as u128) as u64
}
