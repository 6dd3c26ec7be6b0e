use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic outcome assigned to each round by the labeler. Every round ends
/// up with exactly one label, and the fee transformer for that label decides
/// what the round pays, burns and refunds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundLabel {
    NormalRound,
    EmptyRound,
    LeaderTimeout,
    LeaderTimeout50Percent,
    LeaderTimeout50PreviousAppealBond,
    LeaderTimeout150PreviousNormalRound,
    SkipRound,
    AppealLeaderSuccessful,
    AppealLeaderUnsuccessful,
    AppealLeaderTimeoutSuccessful,
    AppealLeaderTimeoutUnsuccessful,
    AppealValidatorSuccessful,
    AppealValidatorUnsuccessful,
    SplitPreviousAppealBond,
}

impl RoundLabel {
    pub const ALL: [RoundLabel; 14] = [
        RoundLabel::NormalRound,
        RoundLabel::EmptyRound,
        RoundLabel::LeaderTimeout,
        RoundLabel::LeaderTimeout50Percent,
        RoundLabel::LeaderTimeout50PreviousAppealBond,
        RoundLabel::LeaderTimeout150PreviousNormalRound,
        RoundLabel::SkipRound,
        RoundLabel::AppealLeaderSuccessful,
        RoundLabel::AppealLeaderUnsuccessful,
        RoundLabel::AppealLeaderTimeoutSuccessful,
        RoundLabel::AppealLeaderTimeoutUnsuccessful,
        RoundLabel::AppealValidatorSuccessful,
        RoundLabel::AppealValidatorUnsuccessful,
        RoundLabel::SplitPreviousAppealBond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundLabel::NormalRound => "NORMAL_ROUND",
            RoundLabel::EmptyRound => "EMPTY_ROUND",
            RoundLabel::LeaderTimeout => "LEADER_TIMEOUT",
            RoundLabel::LeaderTimeout50Percent => "LEADER_TIMEOUT_50_PERCENT",
            RoundLabel::LeaderTimeout50PreviousAppealBond => {
                "LEADER_TIMEOUT_50_PREVIOUS_APPEAL_BOND"
            }
            RoundLabel::LeaderTimeout150PreviousNormalRound => {
                "LEADER_TIMEOUT_150_PREVIOUS_NORMAL_ROUND"
            }
            RoundLabel::SkipRound => "SKIP_ROUND",
            RoundLabel::AppealLeaderSuccessful => "APPEAL_LEADER_SUCCESSFUL",
            RoundLabel::AppealLeaderUnsuccessful => "APPEAL_LEADER_UNSUCCESSFUL",
            RoundLabel::AppealLeaderTimeoutSuccessful => "APPEAL_LEADER_TIMEOUT_SUCCESSFUL",
            RoundLabel::AppealLeaderTimeoutUnsuccessful => "APPEAL_LEADER_TIMEOUT_UNSUCCESSFUL",
            RoundLabel::AppealValidatorSuccessful => "APPEAL_VALIDATOR_SUCCESSFUL",
            RoundLabel::AppealValidatorUnsuccessful => "APPEAL_VALIDATOR_UNSUCCESSFUL",
            RoundLabel::SplitPreviousAppealBond => "SPLIT_PREVIOUS_APPEAL_BOND",
        }
    }

    /// True for the appeal outcomes where the appellant forfeits the bond.
    pub fn is_unsuccessful_appeal(&self) -> bool {
        matches!(
            self,
            RoundLabel::AppealLeaderUnsuccessful
                | RoundLabel::AppealLeaderTimeoutUnsuccessful
                | RoundLabel::AppealValidatorUnsuccessful
        )
    }

    /// True for the appeal outcomes where the appellant recovers the bond.
    pub fn is_successful_appeal(&self) -> bool {
        matches!(
            self,
            RoundLabel::AppealLeaderSuccessful
                | RoundLabel::AppealLeaderTimeoutSuccessful
                | RoundLabel::AppealValidatorSuccessful
        )
    }

    /// True for rounds whose payouts are funded by a forfeited appeal bond
    /// rather than by the sender.
    pub fn is_bond_funded(&self) -> bool {
        matches!(
            self,
            RoundLabel::SplitPreviousAppealBond | RoundLabel::LeaderTimeout50PreviousAppealBond
        )
    }
}

impl fmt::Display for RoundLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels_have_distinct_names() {
        let names: HashSet<_> = RoundLabel::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(names.len(), RoundLabel::ALL.len());
    }

    #[test]
    fn appeal_classification_is_disjoint() {
        for label in RoundLabel::ALL {
            assert!(!(label.is_successful_appeal() && label.is_unsuccessful_appeal()));
        }
        assert_eq!(
            RoundLabel::ALL
                .iter()
                .filter(|l| l.is_successful_appeal() || l.is_unsuccessful_appeal())
                .count(),
            6
        );
    }
}
