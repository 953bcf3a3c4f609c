//! Read-only venue interface
//!
//! The validation core needs exactly three things from the exchange it is
//! checking responses for: its identifier (diagnostics only), currency
//! membership, and market membership. Everything else about an exchange
//! adapter stays behind this seam.
//!
//! Every method takes `&self` and implementations are expected to be safe
//! for concurrent reads; validations for different methods run in parallel
//! against the same venue.

use std::collections::HashSet;

/// Membership lookups and identity for one exchange
pub trait Venue {
    /// Identifier threaded into every diagnostic message.
    fn id(&self) -> &str;

    /// Whether `code` is a currency known to this venue.
    fn has_currency(&self, code: &str) -> bool;

    /// Whether `symbol` is a market listed on this venue.
    fn has_market(&self, symbol: &str) -> bool;
}

/// Set-backed venue for fixtures and tests
#[derive(Debug, Clone, Default)]
pub struct StaticVenue {
    id: String,
    currencies: HashSet<String>,
    markets: HashSet<String>,
}

impl StaticVenue {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            currencies: HashSet::new(),
            markets: HashSet::new(),
        }
    }

    pub fn with_currencies<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.currencies.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn with_markets<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markets.extend(symbols.into_iter().map(Into::into));
        self
    }
}

impl Venue for StaticVenue {
    fn id(&self) -> &str {
        &self.id
    }

    fn has_currency(&self, code: &str) -> bool {
        self.currencies.contains(code)
    }

    fn has_market(&self, symbol: &str) -> bool {
        self.markets.contains(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_lookups() {
        let venue = StaticVenue::new("coinbase")
            .with_currencies(["BTC", "USD"])
            .with_markets(["BTC/USD"]);

        assert_eq!(venue.id(), "coinbase");
        assert!(venue.has_currency("BTC"));
        assert!(!venue.has_currency("ZZZ"));
        assert!(venue.has_market("BTC/USD"));
        assert!(!venue.has_market("ETH/USD"));
    }
}
