//! Deck integration tests against an in-memory database.

mod common;

use mtg_manager::models::NewDeck;
use mtg_manager::MtgManagerError;

fn new_deck(name: &str, format: &str) -> NewDeck {
    NewDeck {
        name: name.to_string(),
        description: None,
        format: format.to_string(),
    }
}

// ---------------------------------------------------------------------------
// create / list
// ---------------------------------------------------------------------------

#[test]
fn create_trims_and_drops_blank_description() {
    let fx = common::setup_manager();
    let deck = fx
        .manager
        .decks()
        .create(
            &fx.alice,
            &NewDeck {
                name: "  Izzet Tempo  ".to_string(),
                description: Some("   ".to_string()),
                format: "modern".to_string(),
            },
        )
        .unwrap();
    assert_eq!(deck.name, "Izzet Tempo");
    assert_eq!(deck.description, None);
    assert_eq!(deck.format, "modern");
    assert_eq!(deck.user_id, fx.alice.id);
    assert_eq!(deck.card_count, 0);
    assert!(!deck.created_at.is_empty());
}

#[test]
fn create_requires_name_and_format() {
    let fx = common::setup_manager();
    let err = fx
        .manager
        .decks()
        .create(&fx.alice, &new_deck("   ", "standard"))
        .unwrap_err();
    assert!(matches!(err, MtgManagerError::InvalidArgument(_)));

    let err = fx
        .manager
        .decks()
        .create(&fx.alice, &new_deck("Burn", ""))
        .unwrap_err();
    assert!(matches!(err, MtgManagerError::InvalidArgument(_)));
}

#[test]
fn list_is_newest_first_and_scoped() {
    let fx = common::setup_manager();
    let decks = fx.manager.decks();
    decks.create(&fx.alice, &new_deck("First", "standard")).unwrap();
    decks.create(&fx.alice, &new_deck("Second", "pioneer")).unwrap();
    decks.create(&fx.bob, &new_deck("Bob's", "modern")).unwrap();

    let names: Vec<String> = decks
        .list(&fx.alice)
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
    assert_eq!(decks.list(&fx.bob).unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// add_card / cards
// ---------------------------------------------------------------------------

#[test]
fn add_card_increments_same_board_slot() {
    let fx = common::setup_manager();
    let decks = fx.manager.decks();
    let deck = decks.create(&fx.alice, &new_deck("Burn", "modern")).unwrap();

    decks.add_card(&fx.alice, &deck.id, "card-bolt", 2, false).unwrap();
    let slot = decks.add_card(&fx.alice, &deck.id, "card-bolt", 2, false).unwrap();
    assert_eq!(slot.quantity, 4);
    assert_eq!(slot.card.name, "Lightning Bolt");

    let side = decks.add_card(&fx.alice, &deck.id, "card-bolt", 1, true).unwrap();
    assert!(side.sideboard);
    assert_eq!(side.quantity, 1);

    let cards = decks.cards(&fx.alice, &deck.id).unwrap();
    assert_eq!(cards.len(), 2);
    assert!(!cards[0].sideboard);
    assert!(cards[1].sideboard);

    let listed = decks.get(&fx.alice, &deck.id).unwrap();
    assert_eq!(listed.card_count, 2);
}

#[test]
fn add_card_checks_ownership_card_and_quantity() {
    let fx = common::setup_manager();
    let decks = fx.manager.decks();
    let deck = decks.create(&fx.alice, &new_deck("Control", "legacy")).unwrap();

    let err = decks
        .add_card(&fx.bob, &deck.id, "card-bolt", 1, false)
        .unwrap_err();
    assert!(matches!(err, MtgManagerError::NotFound(_)));

    let err = decks
        .add_card(&fx.alice, &deck.id, "no-such-card", 1, false)
        .unwrap_err();
    assert!(matches!(err, MtgManagerError::NotFound(_)));

    let err = decks
        .add_card(&fx.alice, &deck.id, "card-bolt", 0, false)
        .unwrap_err();
    assert!(matches!(err, MtgManagerError::InvalidArgument(_)));
}

#[test]
fn cards_of_foreign_deck_are_not_found() {
    let fx = common::setup_manager();
    let deck = fx
        .manager
        .decks()
        .create(&fx.alice, &new_deck("Mine", "standard"))
        .unwrap();
    assert!(fx.manager.decks().cards(&fx.bob, &deck.id).is_err());
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

#[test]
fn delete_removes_deck_and_slots() {
    let fx = common::setup_manager();
    let decks = fx.manager.decks();
    let deck = decks.create(&fx.alice, &new_deck("Temp", "standard")).unwrap();
    decks.add_card(&fx.alice, &deck.id, "card-island", 20, false).unwrap();

    decks.delete(&fx.alice, &deck.id).unwrap();
    assert!(decks.list(&fx.alice).unwrap().is_empty());
    assert_eq!(fx.manager.connection().table_count("deck_cards").unwrap(), 0);

    let err = decks.get(&fx.alice, &deck.id).unwrap_err();
    assert!(matches!(err, MtgManagerError::NotFound(_)));
}
