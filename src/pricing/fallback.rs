//! Deterministic synthetic prices for cards with no authoritative quote.
//!
//! Rules are checked in order against the lowercased name; the first match
//! wins. Ranged rules draw from an RNG seeded by the name, so the same name
//! always yields the same price.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cheap staples.
pub const CHEAP_STAPLES: &[&str] = &["lightning bolt", "bolt"];
pub const CHEAP_STAPLE_PRICE: f64 = 2.50;

/// Premium planeswalkers.
pub const PREMIUM_PLANESWALKERS: &[&str] = &["teferi", "jace", "liliana"];
pub const PREMIUM_RANGE: (f64, f64) = (50.0, 150.0);

/// Utility lands.
pub const UTILITY_LANDS: &[&str] = &["fetch", "shock"];
pub const UTILITY_RANGE: (f64, f64) = (20.0, 60.0);

pub const BASIC_LANDS: &[&str] = &["basic", "plains", "island", "swamp", "mountain", "forest"];
pub const BASIC_LAND_PRICE: f64 = 0.50;

/// Catch-all prices fall in `1..=HASH_PRICE_SPAN`.
pub const HASH_PRICE_SPAN: u64 = 50;

/// Synthetic local price for `name`. Pure: equal names give equal prices.
pub fn fallback_price(name: &str) -> f64 {
    let lower = name.to_lowercase();
    let seed = char_code_sum(name);

    if contains_any(&lower, CHEAP_STAPLES) {
        CHEAP_STAPLE_PRICE
    } else if contains_any(&lower, PREMIUM_PLANESWALKERS) {
        seeded_in_range(seed, PREMIUM_RANGE)
    } else if contains_any(&lower, UTILITY_LANDS) {
        seeded_in_range(seed, UTILITY_RANGE)
    } else if contains_any(&lower, BASIC_LANDS) {
        BASIC_LAND_PRICE
    } else {
        ((seed % HASH_PRICE_SPAN) + 1) as f64
    }
}

/// Sum of the UTF-16 code units of `name`.
pub fn char_code_sum(name: &str) -> u64 {
    name.encode_utf16().map(u64::from).sum()
}

/// Round to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn seeded_in_range(seed: u64, (low, high): (f64, f64)) -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    round_cents(rng.gen_range(low..high))
}
