//! Static custody-to-instrument lookup table.

use std::collections::HashMap;

/// Display name and oracle feed account for one instrument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentInfo {
    pub display_name: String,
    pub oracle_address: String,
}

/// Maps custody accounts to instrument metadata.
///
/// Positions whose custody is not in the table are skipped with a warning;
/// an unknown custody never aborts a poll cycle.
#[derive(Debug, Clone)]
pub struct InstrumentTable {
    entries: HashMap<String, InstrumentInfo>,
}

impl InstrumentTable {
    pub fn new(entries: impl IntoIterator<Item = (String, InstrumentInfo)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The Jupiter Perpetuals mainnet custodies and their Doves oracle feeds.
    pub fn jupiter_mainnet() -> Self {
        let entries = [
            (
                "7xS2gz2bTp3fwCC7knJvUWTEU9Tycczu6VhJYKgi1wdz",
                "SOL",
                "39cWjvHrpHNz2SbXv6ME4NPhqBDBd4KsjUYv5JkHEAJU",
            ),
            (
                "AQCGyheWPLeo6Qp9WpYS9m3Qj479t7R636N9ey1rEjEn",
                "ETH",
                "5URYohbPy32nxK1t3jAHVNfdWY2xTubHiFvLrE3VhXEp",
            ),
            (
                "5Pv3gM9JrFFH883SWAhvJC9RPYmo8UNxuFtv5bMMALkm",
                "BTC",
                "4HBbPx9QJdjJ7GUe6bsiJjGybvfpDhQMMPXP1UEa7VT5",
            ),
            (
                "G18jKKXQwBbrHeiK3C9MRXhkHsLHf7XgCSisykV46EZa",
                "USDC",
                "A28T5pKtscnhDo6C1Sz786Tup88aTjt8uyKewjVvPrGk",
            ),
            (
                "4vkNeXiYEUizLdrpdPS1eC2mccyM4NUPRtERrk6ZETkk",
                "USDT",
                "AGW7q2a3WxCzh5TB2Q6yNde1Nf41g3HLaaXdybz7cbBU",
            ),
        ];

        Self::new(entries.into_iter().map(|(custody, name, oracle)| {
            (
                custody.to_string(),
                InstrumentInfo {
                    display_name: name.to_string(),
                    oracle_address: oracle.to_string(),
                },
            )
        }))
    }

    /// Look up the instrument held by a custody account.
    pub fn get(&self, custody: &str) -> Option<&InstrumentInfo> {
        self.entries.get(custody)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
