//! Price estimation: USD conversion, fallback path and failure routing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mtg_manager::pricing::fallback::{char_code_sum, fallback_price, round_cents};
use mtg_manager::pricing::NoPriceSource;
use mtg_manager::{
    MtgManagerError, PriceEstimator, PriceLookup, PriceOrigin, PriceSource, PricingConfig,
    Result, ScryfallClient,
};

// ---------------------------------------------------------------------------
// Stub sources
// ---------------------------------------------------------------------------

struct FixedUsd(Option<f64>);

impl PriceSource for FixedUsd {
    fn usd_price(&self, _lookup: &PriceLookup) -> Result<Option<f64>> {
        Ok(self.0)
    }
}

struct Failing;

impl PriceSource for Failing {
    fn usd_price(&self, _lookup: &PriceLookup) -> Result<Option<f64>> {
        Err(MtgManagerError::NotFound("upstream unavailable".to_string()))
    }
}

#[derive(Default)]
struct Counting(AtomicUsize);

impl PriceSource for Counting {
    fn usd_price(&self, _lookup: &PriceLookup) -> Result<Option<f64>> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(Some(1.0))
    }
}

fn estimator(source: impl PriceSource + 'static) -> PriceEstimator {
    PriceEstimator::new(Arc::new(source), PricingConfig::default())
}

// ---------------------------------------------------------------------------
// Authoritative path
// ---------------------------------------------------------------------------

#[test]
fn usd_price_is_converted_with_rate_and_margin() {
    let est = estimator(FixedUsd(Some(10.0)))
        .estimate(&PriceLookup::by_name("Some Card"))
        .unwrap();
    assert_eq!(est.usd_price, Some(10.0));
    assert_eq!(est.local_price, Some(67.6));
    assert!(est.is_estimated);
    assert_eq!(est.origin, PriceOrigin::DerivedFromUsd);
    assert_eq!(est.conversion_rate, 5.2);
    assert_eq!(est.margin_multiplier, 1.3);
}

#[test]
fn custom_pricing_config_is_applied() {
    let est = PriceEstimator::new(Arc::new(FixedUsd(Some(2.0))), PricingConfig::new(5.5, 1.35));
    let out = est.estimate(&PriceLookup::by_name("Opt")).unwrap();
    assert_eq!(out.local_price, Some(round_cents(2.0 * 5.5 * 1.35)));
    assert_eq!(out.conversion_rate, 5.5);
}

#[test]
fn converted_price_has_two_decimals() {
    let est = estimator(NoPriceSource);
    let local = est.convert(0.37);
    assert_eq!(local, round_cents(local));
    assert_eq!(local, 2.5);
}

#[test]
fn source_is_consulted_once_per_estimate() {
    let source = Arc::new(Counting::default());
    let est = PriceEstimator::new(source.clone(), PricingConfig::default());
    est.estimate(&PriceLookup::by_id("abc")).unwrap();
    assert_eq!(source.0.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Fallback path
// ---------------------------------------------------------------------------

#[test]
fn missing_quote_takes_fallback() {
    let est = estimator(FixedUsd(None))
        .estimate(&PriceLookup::by_name("Lightning Bolt"))
        .unwrap();
    assert_eq!(est.usd_price, None);
    assert_eq!(est.local_price, Some(2.50));
    assert!(est.is_estimated);
    assert_eq!(est.origin, PriceOrigin::SyntheticFallback);
}

#[test]
fn zero_quote_takes_fallback() {
    let est = estimator(FixedUsd(Some(0.0)))
        .estimate(&PriceLookup::by_name("Forest"))
        .unwrap();
    assert_eq!(est.origin, PriceOrigin::SyntheticFallback);
    assert_eq!(est.local_price, Some(0.50));
}

#[test]
fn failing_source_never_surfaces_an_error() {
    let est = estimator(Failing)
        .estimate(&PriceLookup::by_name("Counterspell"))
        .unwrap();
    assert_eq!(est.origin, PriceOrigin::SyntheticFallback);
    assert_eq!(est.local_price, Some(fallback_price("Counterspell")));
}

#[test]
fn unreachable_upstream_falls_back() {
    // Port 9 (discard) is closed on test hosts; the connect fails fast.
    let client = ScryfallClient::new("http://127.0.0.1:9", false, Duration::from_secs(2));
    let est = PriceEstimator::new(Arc::new(client), PricingConfig::default())
        .estimate(&PriceLookup::by_name("Island"))
        .unwrap();
    assert_eq!(est.origin, PriceOrigin::SyntheticFallback);
    assert_eq!(est.local_price, Some(0.50));
}

#[test]
fn offline_client_falls_back() {
    let client = ScryfallClient::new("http://127.0.0.1:9", true, Duration::from_secs(1));
    let est = PriceEstimator::new(Arc::new(client), PricingConfig::default())
        .estimate(&PriceLookup::by_id("0000-1111"))
        .unwrap();
    assert_eq!(est.origin, PriceOrigin::SyntheticFallback);
    assert_eq!(est.local_price, Some(fallback_price("0000-1111")));
}

#[test]
fn lookup_without_name_or_id_is_rejected() {
    let err = estimator(NoPriceSource)
        .estimate(&PriceLookup::default())
        .unwrap_err();
    assert!(matches!(err, MtgManagerError::InvalidArgument(_)));

    let blank = PriceLookup {
        name: Some("  ".to_string()),
        scryfall_id: Some(String::new()),
    };
    assert!(estimator(NoPriceSource).estimate(&blank).is_err());
}

// ---------------------------------------------------------------------------
// fallback_price rules
// ---------------------------------------------------------------------------

#[test]
fn cheap_staples_are_fixed() {
    assert_eq!(fallback_price("Lightning Bolt"), 2.50);
    assert_eq!(fallback_price("Chain Bolt"), 2.50);
}

#[test]
fn planeswalkers_fall_in_premium_range() {
    for name in ["Teferi, Hero of Dominaria", "Jace, the Mind Sculptor", "Liliana of the Veil"] {
        let price = fallback_price(name);
        assert!((50.0..150.0).contains(&price), "{name}: {price}");
        assert_eq!(price, fallback_price(name));
    }
}

#[test]
fn utility_lands_fall_in_mid_range() {
    for name in ["Fetchland Prototype", "Shockland Prototype"] {
        let price = fallback_price(name);
        assert!((20.0..60.0).contains(&price), "{name}: {price}");
    }
}

#[test]
fn basic_lands_are_cheap() {
    for name in ["Plains", "Island", "Swamp", "Mountain", "Forest", "Snow-Covered Basic"] {
        assert_eq!(fallback_price(name), 0.50, "{name}");
    }
}

#[test]
fn first_matching_rule_wins() {
    // "bolt" is checked before the basic-land names.
    assert_eq!(fallback_price("Mountain Bolt"), 2.50);
}

#[test]
fn other_names_hash_into_one_to_fifty() {
    let name = "Counterspell";
    let expected = (char_code_sum(name) % 50 + 1) as f64;
    assert_eq!(fallback_price(name), expected);
    assert!((1.0..=50.0).contains(&expected));
}

#[test]
fn fallback_is_deterministic() {
    for name in ["Sheoldred, the Apocalypse", "Tarmogoyf", "Jace Beleren"] {
        assert_eq!(fallback_price(name), fallback_price(name));
    }
}
