use crate::address::Address;
use crate::constants::ROUND_SIZES;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An on-chain challenge to the outcome of the previous normal round. The
/// bond amount is derived from the budget, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appeal {
    pub appealant_address: Address,
}

impl Appeal {
    pub fn new(appealant_address: Address) -> Self {
        Appeal { appealant_address }
    }
}

/// How initial stakes are assigned to the address pool.
///
/// The mean/variance parameters only exist for the normal distribution, so
/// the "constant forbids them, normal requires them" rule is structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StakeDistribution {
    Constant,
    Normal { mean: f64, variance: f64 },
}

impl Default for StakeDistribution {
    fn default() -> Self {
        StakeDistribution::Constant
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    #[error("number of rotations ({rotations}) must be appeal_rounds + 1 ({expected})")]
    RotationCountMismatch { rotations: usize, expected: usize },
    #[error("appeal_rounds ({appeal_rounds}) exceeds the committee size table (max {max})")]
    TooManyAppealRounds { appeal_rounds: usize, max: usize },
    #[error("staking distribution parameter out of range: {param}")]
    InvalidStakingParameter { param: &'static str },
}

/// Budget and parameters for a transaction: per-role timeouts, the rotation
/// allowance per normal round, the sender, and the appeals actually posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionBudget {
    pub leader_timeout: u64,
    pub validators_timeout: u64,
    pub appeal_rounds: usize,
    pub rotations: Vec<u32>,
    pub sender_address: Address,
    #[serde(default)]
    pub appeals: Vec<Appeal>,
    #[serde(default)]
    pub staking: StakeDistribution,
}

impl TransactionBudget {
    /// Check the structural invariants the engine relies on.
    pub fn validate(&self) -> Result<(), BudgetError> {
        let expected = self.appeal_rounds + 1;
        if self.rotations.len() != expected {
            return Err(BudgetError::RotationCountMismatch {
                rotations: self.rotations.len(),
                expected,
            });
        }

        let max = (ROUND_SIZES.len() - 1) / 2;
        if self.appeal_rounds > max {
            return Err(BudgetError::TooManyAppealRounds {
                appeal_rounds: self.appeal_rounds,
                max,
            });
        }

        if let StakeDistribution::Normal { mean, variance } = self.staking {
            if !mean.is_finite() || mean < 0.0 {
                return Err(BudgetError::InvalidStakingParameter { param: "mean" });
            }
            if !variance.is_finite() || variance < 0.0 {
                return Err(BudgetError::InvalidStakingParameter { param: "variance" });
            }
        }

        Ok(())
    }

    /// The appeal covering the given odd round index, if one was posted.
    pub fn appeal_for_round(&self, round_index: usize) -> Option<&Appeal> {
        if round_index % 2 == 0 {
            return None;
        }
        self.appeals.get(round_index / 2)
    }
}
