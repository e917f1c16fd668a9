//! Immutable registry of symbol profiles.

use std::collections::HashMap;

use crate::{SymbolProfile, TidemarkError};

/// Read-only catalog mapping canonical symbols to their resolution profiles.
///
/// Behavior:
/// - Built once (from [`SymbolCatalog::builtin`], JSON, or explicit profiles)
///   and shared by reference; there is no mutation API.
/// - Listing order is the insertion order.
/// - Lookups of unknown symbols fall back to [`SymbolProfile::unknown`].
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    order: Vec<String>,
    profiles: HashMap<String, SymbolProfile>,
}

impl SymbolCatalog {
    /// Build a catalog from profiles.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty canonical id, a duplicate canonical id,
    /// or a correlation outside `[0, 1]`.
    pub fn from_profiles<I>(profiles: I) -> Result<Self, TidemarkError>
    where
        I: IntoIterator<Item = SymbolProfile>,
    {
        let mut out = Self::default();
        for p in profiles {
            if p.canonical_id.trim().is_empty() {
                return Err(TidemarkError::InvalidArg(
                    "profile with empty canonical_id".into(),
                ));
            }
            if !(0.0..=1.0).contains(&p.correlation) {
                return Err(TidemarkError::InvalidArg(format!(
                    "correlation {} for '{}' is outside [0, 1]",
                    p.correlation, p.canonical_id
                )));
            }
            if out.profiles.contains_key(&p.canonical_id) {
                return Err(TidemarkError::InvalidArg(format!(
                    "duplicate canonical_id '{}' in catalog",
                    p.canonical_id
                )));
            }
            out.order.push(p.canonical_id.clone());
            out.profiles.insert(p.canonical_id.clone(), p);
        }
        Ok(out)
    }

    /// Parse a JSON array of profiles.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the document does not parse or fails validation.
    pub fn from_json(json: &str) -> Result<Self, TidemarkError> {
        let profiles: Vec<SymbolProfile> = serde_json::from_str(json)
            .map_err(|e| TidemarkError::InvalidArg(format!("catalog json: {e}")))?;
        Self::from_profiles(profiles)
    }

    /// Catalog of the global indices the service tracks out of the box.
    ///
    /// Several smaller ASX indices are not served reliably upstream; they carry
    /// exchange-suffixed aliases and fall back to the ASX 200 (or All
    /// Ordinaries) as proxies.
    #[must_use]
    pub fn builtin() -> Self {
        let profiles = vec![
            // Australia
            SymbolProfile::new("^AXJO", "ASX 200 (Australia)").with_base_price(8000.0),
            SymbolProfile::new("^AORD", "All Ordinaries (Australia)")
                .with_aliases(["XAO.AX"])
                .with_proxies(["^AXJO"], 0.99),
            SymbolProfile::new("^AXKO", "ASX 300 (Australia)")
                .with_aliases(["XKO.AX"])
                .with_proxies(["^AXJO"], 0.95),
            SymbolProfile::new("^AFLI", "ASX 50 (Australia)")
                .with_aliases(["XFL.AX"])
                .with_proxies(["^AXJO"], 0.98),
            SymbolProfile::new("^AXMD", "ASX 100 (Australia)")
                .with_aliases(["XTO.AX"])
                .with_proxies(["^AXJO"], 0.97),
            SymbolProfile::new("^AXSO", "ASX Small Ordinaries (Australia)")
                .with_aliases(["XSO.AX"])
                .with_proxies(["^AORD", "^AXJO"], 0.75),
            // United States
            SymbolProfile::new("^GSPC", "S&P 500 (USA)").with_base_price(5500.0),
            SymbolProfile::new("^DJI", "Dow Jones (USA)").with_base_price(40000.0),
            SymbolProfile::new("^IXIC", "NASDAQ (USA)").with_base_price(17000.0),
            // Europe
            SymbolProfile::new("^FTSE", "FTSE 100 (UK)").with_base_price(8200.0),
            SymbolProfile::new("^GDAXI", "DAX (Germany)").with_base_price(18000.0),
            SymbolProfile::new("^FCHI", "CAC 40 (France)"),
            // Asia
            SymbolProfile::new("^N225", "Nikkei 225 (Japan)").with_base_price(33000.0),
            SymbolProfile::new("^HSI", "Hang Seng (Hong Kong)"),
            SymbolProfile::new("000001.SS", "Shanghai Composite (China)"),
            SymbolProfile::new("^NSEI", "Nifty 50 (India)"),
            SymbolProfile::new("^BSESN", "BSE Sensex (India)"),
            SymbolProfile::new("^KS11", "KOSPI (South Korea)"),
            SymbolProfile::new("^TWII", "Taiwan Weighted (Taiwan)"),
            SymbolProfile::new("^JKSE", "Jakarta Composite (Indonesia)"),
        ];
        let mut out = Self::default();
        for p in profiles {
            out.order.push(p.canonical_id.clone());
            out.profiles.insert(p.canonical_id.clone(), p);
        }
        out
    }

    /// Look up a profile by canonical id.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&SymbolProfile> {
        self.profiles.get(symbol)
    }

    /// Profile for `symbol`, or the unknown-symbol profile when absent.
    #[must_use]
    pub fn profile_for(&self, symbol: &str) -> SymbolProfile {
        self.get(symbol)
            .cloned()
            .unwrap_or_else(|| SymbolProfile::unknown(symbol))
    }

    /// Display name for `symbol`, falling back to the symbol itself.
    #[must_use]
    pub fn display_name<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.get(symbol).map_or(symbol, |p| p.display_name.as_str())
    }

    /// True if `symbol` has a profile.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.profiles.contains_key(symbol)
    }

    /// Profiles in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolProfile> {
        self.order.iter().filter_map(|s| self.profiles.get(s))
    }

    /// Number of profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the catalog has no profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Canonicalize caller input: percent-decode (`%5EGSPC` → `^GSPC`) and trim.
///
/// Input that does not decode to UTF-8 is only trimmed.
#[must_use]
pub fn normalize_symbol(raw: &str) -> String {
    let decoded = urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |s| s.into_owned());
    decoded.trim().to_string()
}
