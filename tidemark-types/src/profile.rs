//! Symbol profiles held by the resolution catalog.

use serde::{Deserialize, Serialize};

/// Static description of how a canonical symbol may be resolved.
///
/// `alias_ids` name the same instrument under other identifiers and are tried
/// verbatim; `proxy_ids` name related instruments whose moves are damped by
/// `correlation` before being returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolProfile {
    /// Primary identifier (unique within a catalog).
    pub canonical_id: String,
    /// Human-friendly name.
    pub display_name: String,
    /// Alternate identifiers, conventionally starting with `canonical_id`.
    #[serde(default)]
    pub alias_ids: Vec<String>,
    /// Related instruments used as statistical stand-ins.
    #[serde(default)]
    pub proxy_ids: Vec<String>,
    /// Damping factor in `[0, 1]`; 1.0 means market-equivalent.
    #[serde(default = "full_correlation")]
    pub correlation: f64,
    /// Typical price level, used to seed synthetic series.
    #[serde(default)]
    pub base_price: Option<f64>,
}

const fn full_correlation() -> f64 {
    1.0
}

impl SymbolProfile {
    /// Create a profile with no aliases beyond itself, no proxies and full correlation.
    pub fn new(canonical_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        let canonical_id = canonical_id.into();
        Self {
            alias_ids: vec![canonical_id.clone()],
            canonical_id,
            display_name: display_name.into(),
            proxy_ids: vec![],
            correlation: 1.0,
            base_price: None,
        }
    }

    /// Profile used for symbols that are not in the catalog.
    pub fn unknown(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self::new(symbol.clone(), symbol)
    }

    /// Append alias identifiers.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alias_ids.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Replace the proxy list and its correlation coefficient.
    #[must_use]
    pub fn with_proxies<I, S>(mut self, proxies: I, correlation: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.proxy_ids = proxies.into_iter().map(Into::into).collect();
        self.correlation = correlation;
        self
    }

    /// Set the synthetic seed price.
    #[must_use]
    pub const fn with_base_price(mut self, price: f64) -> Self {
        self.base_price = Some(price);
        self
    }

    /// Aliases worth trying after the canonical id (the canonical id itself is skipped).
    pub fn fallback_aliases(&self) -> impl Iterator<Item = &str> {
        self.alias_ids
            .iter()
            .map(String::as_str)
            .filter(move |a| *a != self.canonical_id)
    }
}
