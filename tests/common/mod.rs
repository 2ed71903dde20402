//! Shared test fixtures for the collection manager integration tests.
//!
//! Provides `setup_manager()` which builds an offline, in-memory
//! `MtgManager` with two users and a few cards already in the first
//! user's collection.

#![allow(dead_code)]

use std::sync::Arc;

use mtg_manager::models::{NewCollectionCard, User};
use mtg_manager::{CollectionListener, MtgManager, PriceSource};

pub struct Fixture {
    pub manager: MtgManager,
    pub alice: User,
    pub bob: User,
}

/// Offline manager with sample data.
pub fn setup_manager() -> Fixture {
    build(MtgManager::builder())
}

/// Offline manager with sample data and a listener registered.
pub fn setup_manager_with_listener(listener: Arc<dyn CollectionListener>) -> Fixture {
    build(MtgManager::builder().listener(listener))
}

/// Offline manager with no data, pricing from `source`.
pub fn manager_with_source(source: Arc<dyn PriceSource>) -> MtgManager {
    MtgManager::builder()
        .in_memory()
        .offline(true)
        .price_source(source)
        .build()
        .unwrap()
}

fn build(builder: mtg_manager::MtgManagerBuilder) -> Fixture {
    let manager = builder.in_memory().offline(true).build().unwrap();
    let alice = manager
        .users()
        .create("alice@example.com", Some("Alice"))
        .unwrap();
    let bob = manager.users().create("bob@example.com", None).unwrap();

    for card in sample_cards() {
        manager.collection().add(&alice, &card).unwrap();
    }

    Fixture {
        manager,
        alice,
        bob,
    }
}

pub fn sample_cards() -> Vec<NewCollectionCard> {
    vec![
        new_card(
            "card-bolt",
            "Lightning Bolt",
            Some("{R}"),
            "Instant",
            "common",
            "Magic 2010",
            4,
        ),
        new_card(
            "card-counterspell",
            "Counterspell",
            Some("{U}{U}"),
            "Instant",
            "uncommon",
            "Ice Age",
            2,
        ),
        new_card(
            "card-teferi",
            "Teferi, Hero of Dominaria",
            Some("{3}{W}{U}"),
            "Legendary Planeswalker — Teferi",
            "mythic",
            "Dominaria",
            1,
        ),
        new_card(
            "card-island",
            "Island",
            None,
            "Basic Land — Island",
            "common",
            "Dominaria",
            10,
        ),
    ]
}

pub fn new_card(
    id: &str,
    name: &str,
    mana_cost: Option<&str>,
    type_line: &str,
    rarity: &str,
    set_name: &str,
    quantity: i64,
) -> NewCollectionCard {
    NewCollectionCard {
        scryfall_id: id.to_string(),
        name: name.to_string(),
        type_line: Some(type_line.to_string()),
        mana_cost: mana_cost.map(str::to_string),
        rarity: Some(rarity.to_string()),
        set_name: Some(set_name.to_string()),
        quantity: Some(quantity),
        ..Default::default()
    }
}
