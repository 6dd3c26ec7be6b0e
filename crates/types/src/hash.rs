use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur when parsing a vote hash string.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("hash must start with '0x'")]
    InvalidPrefix,
    #[error("hash payload must be non-empty hexadecimal")]
    InvalidPayload,
}

/// Opaque execution hash attached to a vote, of the form `0x` + hex digits.
///
/// Absence of a hash is represented as `Option::None`; there is no sentinel
/// value inside the type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoteHash(String);

impl VoteHash {
    pub fn new(value: impl Into<String>) -> Result<Self, HashError> {
        let value = value.into();
        let payload = value.strip_prefix("0x").ok_or(HashError::InvalidPrefix)?;
        if payload.is_empty() || !payload.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HashError::InvalidPayload);
        }
        Ok(VoteHash(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoteHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<VoteHash> for String {
    fn from(value: VoteHash) -> Self {
        value.0
    }
}

impl TryFrom<String> for VoteHash {
    type Error = HashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VoteHash::new(value)
    }
}
