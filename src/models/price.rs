use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceLookup — What to price: a name, a Scryfall id, or both
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLookup {
    pub name: Option<String>,
    pub scryfall_id: Option<String>,
}

impl PriceLookup {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            scryfall_id: None,
        }
    }

    pub fn by_id(scryfall_id: impl Into<String>) -> Self {
        Self {
            name: None,
            scryfall_id: Some(scryfall_id.into()),
        }
    }

    /// Non-blank card name, if any.
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// Non-blank Scryfall id, if any.
    pub fn scryfall_id(&self) -> Option<&str> {
        non_blank(self.scryfall_id.as_deref())
    }

    /// Name if present, otherwise the id. Seeds the synthetic fallback.
    pub fn label(&self) -> Option<&str> {
        self.name().or_else(|| self.scryfall_id())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// PriceOrigin — Where a local price came from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceOrigin {
    /// Converted from an authoritative USD price.
    DerivedFromUsd,
    /// Deterministic synthetic price; no authoritative price was obtainable.
    SyntheticFallback,
}

// ---------------------------------------------------------------------------
// PriceEstimate — Localized price estimate for one card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub usd_price: Option<f64>,
    pub local_price: Option<f64>,
    pub is_estimated: bool,
    pub conversion_rate: f64,
    pub margin_multiplier: f64,
    pub origin: PriceOrigin,
}
