use crate::hash::VoteHash;
use serde::{Deserialize, Serialize};

/// The plain vote tags a participant can cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteKind {
    Agree,
    Disagree,
    Timeout,
    Idle,
    Na,
}

impl VoteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteKind::Agree => "AGREE",
            VoteKind::Disagree => "DISAGREE",
            VoteKind::Timeout => "TIMEOUT",
            VoteKind::Idle => "IDLE",
            VoteKind::Na => "NA",
        }
    }
}

/// A vote as recorded in a rotation.
///
/// The four shapes mirror what the wire transcript can carry: a bare tag, a
/// tag with the voter's execution hash, the leader's receipt (its own vote
/// plus an optional hash), and the leader-timeout marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vote {
    Plain(VoteKind),
    WithHash(VoteKind, VoteHash),
    LeaderReceipt {
        vote: VoteKind,
        hash: Option<VoteHash>,
    },
    LeaderTimeout,
}

impl Vote {
    /// Normalise to the underlying vote tag. A leader receipt collapses to
    /// the leader's own vote; a leader timeout carries no vote and reads as
    /// [`VoteKind::Na`].
    pub fn kind(&self) -> VoteKind {
        match self {
            Vote::Plain(kind) | Vote::WithHash(kind, _) => *kind,
            Vote::LeaderReceipt { vote, .. } => *vote,
            Vote::LeaderTimeout => VoteKind::Na,
        }
    }

    /// The execution hash attached to this vote, if any.
    pub fn hash(&self) -> Option<&VoteHash> {
        match self {
            Vote::WithHash(_, hash) => Some(hash),
            Vote::LeaderReceipt { hash, .. } => hash.as_ref(),
            Vote::Plain(_) | Vote::LeaderTimeout => None,
        }
    }

    pub fn is_leader_timeout(&self) -> bool {
        matches!(self, Vote::LeaderTimeout)
    }

    pub fn is_leader_receipt(&self) -> bool {
        matches!(self, Vote::LeaderReceipt { .. })
    }

    pub fn is_idle(&self) -> bool {
        self.kind() == VoteKind::Idle
    }
}
