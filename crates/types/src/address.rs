use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of raw bytes in an account identifier.
pub const ADDRESS_BYTES: usize = 20;
/// Length of the canonical text form: `0x` plus two digits per byte.
pub const ADDRESS_STRING_LENGTH: usize = 2 + 2 * ADDRESS_BYTES;

/// Why a string was rejected as an account address.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// Not `0x` followed by exactly forty hex digits.
    #[error("address must be `0x` followed by {} hex digits", 2 * ADDRESS_BYTES)]
    WrongShape,
    /// A character in the digit region is not hexadecimal.
    #[error("address has a non-hex digit at offset {0}")]
    InvalidDigit(usize),
}

/// A participant's account identifier.
///
/// Twenty raw bytes, compared by value; ordering carries no meaning. The
/// text form is `0x` plus forty hex digits, accepted in either case and
/// always rendered lowercase. Serde goes through the text form, so an
/// address deserialized from JSON has already been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(pub [u8; ADDRESS_BYTES]);

impl Address {
    /// Parse the canonical text form.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let digits = text
            .strip_prefix("0x")
            .filter(|digits| digits.len() == 2 * ADDRESS_BYTES)
            .ok_or(AddressError::WrongShape)?;

        let mut raw = [0u8; ADDRESS_BYTES];
        hex::decode_to_slice(digits, &mut raw).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { index, .. } => {
                AddressError::InvalidDigit(index + 2)
            }
            _ => AddressError::WrongShape,
        })?;

        Ok(Address(raw))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(raw: [u8; ADDRESS_BYTES]) -> Self {
        Address(raw)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Address::parse(&text)
    }
}
