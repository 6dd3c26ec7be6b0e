//! Sender refund computation, the conservation-closing step.

use crate::bond::bond_for_appeal_round;
use crate::errors::FeeEngineError;
use agora_types::{Address, FeeEvent, Role, TransactionBudget};
use tracing::debug;

/// Compute what remains of the sender's pre-payment once every round is
/// settled.
///
/// Earnings funded by a forfeited appeal bond (unsuccessful-appeal rounds
/// and the bond-split rounds) never came out of the sender's pocket and are
/// excluded. An appellant's recovery is the bond plus a reward; only the
/// reward part is sender-funded.
///
/// A negative refund means a transformer paid out money nobody provided;
/// that is a fatal engine bug and the error carries the full event log.
pub fn compute_sender_refund(
    sender: &Address,
    events: &[FeeEvent],
    budget: &TransactionBudget,
) -> Result<u64, FeeEngineError> {
    let mut sender_cost: u64 = 0;
    let mut paid_out: u64 = 0;

    for event in events {
        if event.role == Some(Role::Appealant) {
            if event.earned > 0 {
                let Some(round_index) = event.round_index else {
                    continue;
                };
                let bond = bond_for_appeal_round(round_index, budget)?;
                paid_out += event.earned.saturating_sub(bond);
            }
            continue;
        }

        if let Some(label) = event.round_label {
            if label.is_unsuccessful_appeal() || label.is_bond_funded() {
                continue;
            }
        }

        if &event.address == sender {
            sender_cost += event.cost;
            paid_out += event.earned;
            continue;
        }

        paid_out += event.earned;
    }

    if paid_out > sender_cost {
        return Err(FeeEngineError::NegativeRefund {
            sender: *sender,
            sender_cost,
            paid_out,
            events: events.to_vec(),
        });
    }

    debug!(sender_cost, paid_out, refund = sender_cost - paid_out, "computed sender refund");
    Ok(sender_cost - paid_out)
}
