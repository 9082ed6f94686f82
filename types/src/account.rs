//! Opaque 20-byte account identifier.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An account key into the balance ledger and exclusion registry.
///
/// The all-zero account is the null account: it never holds a balance and
/// is rejected wherever a real counterparty is required.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Account([u8; 20]);

impl Account {
    /// The null account.
    pub const ZERO: Self = Self([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an account whose trailing eight bytes hold `n` (big-endian).
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account({self})")
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Account {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| TypesError::InvalidAccount(format!("{s}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_account_is_null() {
        assert!(Account::ZERO.is_zero());
        assert!(!Account::from_low_u64(1).is_zero());
    }

    #[test]
    fn display_parse_round_trip() {
        let account = Account::from_low_u64(0xdead_beef);
        let text = account.to_string();
        assert_eq!(text, "0x00000000000000000000000000000000deadbeef");
        assert_eq!(text.parse::<Account>().unwrap(), account);
    }

    #[test]
    fn parse_accepts_missing_prefix() {
        let parsed: Account = "00000000000000000000000000000000000000ff".parse().unwrap();
        assert_eq!(parsed, Account::from_low_u64(0xff));
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!("0x1234".parse::<Account>().is_err());
        assert!("0xzz00000000000000000000000000000000000000".parse::<Account>().is_err());
    }
}
