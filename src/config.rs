use std::path::PathBuf;
use std::time::Duration;

pub const SCRYFALL_BASE: &str = "https://api.scryfall.com";
pub const TRANSLATE_BASE: &str = "https://api.mymemory.translated.net";
pub const TRANSLATE_LANGPAIR: &str = "en|pt";
pub const USER_AGENT: &str = "MTG-Manager/1.0";
pub const DATABASE_FILE: &str = "collection.duckdb";

/// Bound applied to every outbound HTTP call. A call that exceeds it is
/// treated as failed; nothing is retried.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// USD to local currency conversion used by the price estimator.
///
/// `local = round(usd * conversion_rate * margin_multiplier, 2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingConfig {
    /// Local currency units per US dollar.
    pub conversion_rate: f64,
    /// Store markup applied on top of the converted price.
    pub margin_multiplier: f64,
}

impl PricingConfig {
    pub const DEFAULT_CONVERSION_RATE: f64 = 5.2;
    pub const DEFAULT_MARGIN_MULTIPLIER: f64 = 1.3;

    pub fn new(conversion_rate: f64, margin_multiplier: f64) -> Self {
        Self {
            conversion_rate,
            margin_multiplier,
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_CONVERSION_RATE,
            Self::DEFAULT_MARGIN_MULTIPLIER,
        )
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("mtg-manager")
    } else {
        PathBuf::from(".mtg-manager")
    }
}
