//! Domain primitives: AccountKey, Side, and the on-chain USD scale.

use std::fmt;

/// Number of implied decimal places in on-chain USD amounts and entry prices.
pub const USD_SCALE: u32 = 6;

/// Base58-encoded account key (position, custody, or oracle account).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountKey(pub String);

impl AccountKey {
    /// Create an AccountKey from a base58 string.
    pub fn new(key: String) -> Self {
        AccountKey(key)
    }

    /// Get the key as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Long,
    Short,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "LONG"),
            Side::Short => write!(f, "SHORT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_display() {
        assert_eq!(Side::Long.to_string(), "LONG");
        assert_eq!(Side::Short.to_string(), "SHORT");
    }

    #[test]
    fn test_account_key_display() {
        let key = AccountKey::new("7xS2gz2bTp3fwCC7knJvUWTEU9Tycczu6VhJYKgi1wdz".to_string());
        assert_eq!(
            key.to_string(),
            "7xS2gz2bTp3fwCC7knJvUWTEU9Tycczu6VhJYKgi1wdz"
        );
        assert_eq!(key.as_str(), key.0);
    }
}
