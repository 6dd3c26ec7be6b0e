use crate::address::Address;
use crate::vote::Vote;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One attempt by a committee to finalise a round.
///
/// Insertion order of `votes` is semantic: the first key is the rotation's
/// leader. `reserve_votes` holds pre-committed substitute votes consumed when
/// an original voter turns out idle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    pub votes: IndexMap<Address, Vote>,
    #[serde(default)]
    pub reserve_votes: IndexMap<Address, Vote>,
}

impl Rotation {
    pub fn new(votes: IndexMap<Address, Vote>) -> Self {
        Rotation {
            votes,
            reserve_votes: IndexMap::new(),
        }
    }

    pub fn with_reserves(
        votes: IndexMap<Address, Vote>,
        reserve_votes: IndexMap<Address, Vote>,
    ) -> Self {
        Rotation {
            votes,
            reserve_votes,
        }
    }

    /// The first-keyed address, if the rotation is non-empty.
    pub fn leader(&self) -> Option<(&Address, &Vote)> {
        self.votes.first()
    }
}

/// A round is one or more rotations; the tail rotation is the authoritative
/// one for labeling and fee effects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub rotations: Vec<Rotation>,
}

impl Round {
    pub fn new(rotations: Vec<Rotation>) -> Self {
        Round { rotations }
    }

    pub fn tail(&self) -> Option<&Rotation> {
        self.rotations.last()
    }
}

/// All rounds of a transaction, in execution order. Round 0 is always a
/// normal round; thereafter even indexes are normal rounds and odd indexes
/// are appeal rounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRoundResults {
    pub rounds: Vec<Round>,
}

impl TransactionRoundResults {
    pub fn new(rounds: Vec<Round>) -> Self {
        TransactionRoundResults { rounds }
    }
}
