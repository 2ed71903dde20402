//! Localized price estimation.
//!
//! Prefers an authoritative USD quote converted with [`PricingConfig`];
//! when none can be obtained (missing, zero, or the source failed) the
//! estimate falls back to a deterministic synthetic price. The estimator
//! only fails when the lookup names no card at all.

pub mod fallback;

use std::sync::Arc;

use crate::config::PricingConfig;
use crate::error::{MtgManagerError, Result};
use crate::models::{PriceEstimate, PriceLookup, PriceOrigin};

pub use fallback::fallback_price;

/// An authoritative source of USD card prices.
pub trait PriceSource: Send + Sync {
    /// USD price for the card, `Ok(None)` if the source has no quote.
    fn usd_price(&self, lookup: &PriceLookup) -> Result<Option<f64>>;
}

/// A source with no quotes; every estimate takes the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPriceSource;

impl PriceSource for NoPriceSource {
    fn usd_price(&self, _lookup: &PriceLookup) -> Result<Option<f64>> {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// PriceEstimator
// ---------------------------------------------------------------------------

/// Cheap to clone; clones share the underlying source.
#[derive(Clone)]
pub struct PriceEstimator {
    source: Arc<dyn PriceSource>,
    config: PricingConfig,
}

impl PriceEstimator {
    pub fn new(source: Arc<dyn PriceSource>, config: PricingConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> PricingConfig {
        self.config
    }

    /// Estimate the local price of a card.
    ///
    /// Returns `InvalidArgument` only when the lookup has neither a name nor
    /// an id. Source errors are logged and routed to the fallback.
    pub fn estimate(&self, lookup: &PriceLookup) -> Result<PriceEstimate> {
        let label = lookup.label().ok_or_else(|| {
            MtgManagerError::InvalidArgument(
                "A card name or Scryfall id is required".to_string(),
            )
        })?;

        match self.source.usd_price(lookup) {
            Ok(Some(usd)) if usd > 0.0 => Ok(self.from_usd(usd)),
            Ok(_) => {
                log::debug!("No USD quote for {label}; using synthetic price");
                Ok(self.synthetic(label))
            }
            Err(e) => {
                log::warn!("Price source failed for {label}: {e}; using synthetic price");
                Ok(self.synthetic(label))
            }
        }
    }

    /// Convert a USD price with this estimator's rate and margin.
    pub fn convert(&self, usd: f64) -> f64 {
        fallback::round_cents(usd * self.config.conversion_rate * self.config.margin_multiplier)
    }

    fn from_usd(&self, usd: f64) -> PriceEstimate {
        let local = self.convert(usd);
        log::info!("Price computed: USD {usd} -> local {local}");
        PriceEstimate {
            usd_price: Some(usd),
            local_price: Some(local),
            is_estimated: true,
            conversion_rate: self.config.conversion_rate,
            margin_multiplier: self.config.margin_multiplier,
            origin: PriceOrigin::DerivedFromUsd,
        }
    }

    fn synthetic(&self, label: &str) -> PriceEstimate {
        PriceEstimate {
            usd_price: None,
            local_price: Some(fallback_price(label)),
            is_estimated: true,
            conversion_rate: self.config.conversion_rate,
            margin_multiplier: self.config.margin_multiplier,
            origin: PriceOrigin::SyntheticFallback,
        }
    }
}
