use crate::address::Address;
use crate::hash::VoteHash;
use crate::label::RoundLabel;
use crate::vote::VoteKind;
use serde::{Deserialize, Serialize};

/// Capacity in which an address appears in a fee event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Leader,
    Validator,
    Sender,
    Appealant,
    /// Reserved for users that top up a transaction; never emitted today.
    Topper,
}

/// One immutable entry of the monetary event log.
///
/// Exactly one of the monetary fields (`cost`, `staked`, `earned`, `slashed`,
/// `burned`) is non-zero in a well-formed emission; `vote`, `hash`, `role`
/// and the round references are metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEvent {
    pub sequence_id: u64,
    pub address: Address,
    pub round_index: Option<usize>,
    pub round_label: Option<RoundLabel>,
    pub role: Option<Role>,
    pub vote: Option<VoteKind>,
    pub hash: Option<VoteHash>,
    pub cost: u64,
    pub staked: u64,
    pub earned: u64,
    pub slashed: u64,
    pub burned: u64,
}

impl FeeEvent {
    /// A zeroed event for the given id and address; callers fill in the one
    /// meaningful field with struct-update syntax.
    pub fn base(sequence_id: u64, address: Address) -> Self {
        FeeEvent {
            sequence_id,
            address,
            round_index: None,
            round_label: None,
            role: None,
            vote: None,
            hash: None,
            cost: 0,
            staked: 0,
            earned: 0,
            slashed: 0,
            burned: 0,
        }
    }
}

/// Auto-incrementing sequence counter for [`FeeEvent`] ids.
///
/// Owned by one transaction computation and threaded by exclusive reference
/// through the pipeline stages; ids are dense and start at 1.
#[derive(Debug)]
pub struct EventSequence {
    counter: u64,
}

impl EventSequence {
    pub fn new() -> Self {
        EventSequence { counter: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let current = self.counter;
        self.counter += 1;
        current
    }
}

impl Default for EventSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::ADDRESS_BYTES;

    #[test]
    fn sequence_is_dense_from_one() {
        let mut seq = EventSequence::new();
        assert_eq!(seq.next_id(), 1);
        assert_eq!(seq.next_id(), 2);
        assert_eq!(seq.next_id(), 3);
    }

    #[test]
    fn base_event_is_zeroed() {
        let event = FeeEvent::base(7, Address([1; ADDRESS_BYTES]));
        assert_eq!(event.sequence_id, 7);
        assert_eq!(
            event.cost + event.staked + event.earned + event.slashed + event.burned,
            0
        );
        assert!(event.round_label.is_none());
    }
}
