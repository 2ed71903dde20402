//! Collection filtering over in-memory view records.

use mtg_manager::filter::collection_totals;
use mtg_manager::models::{Card, UserCardView};
use mtg_manager::{CollectionFilterCriteria, ManaCost, Rarity};

fn view(
    id: &str,
    name: &str,
    mana_cost: Option<&str>,
    type_line: Option<&str>,
    rarity: &str,
    set_name: Option<&str>,
    quantity: i64,
) -> UserCardView {
    UserCardView {
        id: format!("uc-{id}"),
        quantity,
        condition: "NM".to_string(),
        foil: false,
        language: "en".to_string(),
        card: Card {
            id: id.to_string(),
            name: name.to_string(),
            mana_cost: mana_cost.map(ManaCost::from),
            cmc: mana_cost.map(|m| ManaCost::from(m).cmc()).unwrap_or(0),
            type_line: type_line.map(str::to_string),
            rarity: Some(rarity.to_string()),
            set_name: set_name.map(str::to_string),
            oracle_text: None,
            power: None,
            toughness: None,
            image_url: None,
        },
    }
}

fn sample() -> Vec<UserCardView> {
    vec![
        view("1", "Lightning Bolt", Some("{R}"), Some("Instant"), "common", Some("Magic 2010"), 4),
        view("2", "Counterspell", Some("{U}{U}"), Some("Instant"), "uncommon", Some("Ice Age"), 2),
        view(
            "3",
            "Teferi, Hero of Dominaria",
            Some("{3}{W}{U}"),
            Some("Legendary Planeswalker"),
            "mythic",
            Some("Dominaria"),
            1,
        ),
        view("4", "Island", None, Some("Basic Land — Island"), "common", Some("Dominaria"), 10),
        view("5", "Mystery Card", Some("{G}"), None, "rare", None, 1),
    ]
}

fn ids(out: &[&UserCardView]) -> Vec<String> {
    out.iter().map(|v| v.card.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Empty criteria
// ---------------------------------------------------------------------------

#[test]
fn empty_criteria_returns_everything_in_order() {
    let cards = sample();
    let criteria = CollectionFilterCriteria::default();
    assert!(criteria.is_empty());
    assert_eq!(criteria.active_count(), 0);
    assert_eq!(ids(&criteria.apply(&cards)), vec!["1", "2", "3", "4", "5"]);
}

// ---------------------------------------------------------------------------
// Single criteria
// ---------------------------------------------------------------------------

#[test]
fn name_match_is_case_insensitive_substring() {
    let cards = sample();
    let criteria = CollectionFilterCriteria {
        name: "BOLT".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&criteria.apply(&cards)), vec!["1"]);
}

#[test]
fn type_filter_skips_cards_without_type() {
    let cards = sample();
    let criteria = CollectionFilterCriteria {
        type_line: "instant".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&criteria.apply(&cards)), vec!["1", "2"]);

    let any_type = CollectionFilterCriteria {
        type_line: "a".to_string(),
        ..Default::default()
    };
    assert!(!ids(&any_type.apply(&cards)).contains(&"5".to_string()));
}

#[test]
fn rarity_is_exact() {
    let cards = sample();
    let criteria = CollectionFilterCriteria {
        rarity: Some(Rarity::Common),
        ..Default::default()
    };
    assert_eq!(ids(&criteria.apply(&cards)), vec!["1", "4"]);
}

#[test]
fn set_filter_skips_cards_without_set() {
    let cards = sample();
    let criteria = CollectionFilterCriteria {
        set_name: "dominaria".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&criteria.apply(&cards)), vec!["3", "4"]);
}

#[test]
fn color_filter_matches_any_requested_color() {
    let cards = sample();
    let criteria = CollectionFilterCriteria {
        colors: "WR".to_string(),
        ..Default::default()
    };
    assert_eq!(ids(&criteria.apply(&cards)), vec!["1", "3"]);
}

#[test]
fn color_filter_skips_cards_without_cost() {
    let cards = sample();
    let criteria = CollectionFilterCriteria {
        colors: "U".to_string(),
        ..Default::default()
    };
    let out = criteria.apply(&cards);
    assert_eq!(ids(&out), vec!["2", "3"]);
}

// ---------------------------------------------------------------------------
// Combined criteria
// ---------------------------------------------------------------------------

#[test]
fn criteria_combine_with_and() {
    let cards = sample();
    let criteria = CollectionFilterCriteria {
        type_line: "instant".to_string(),
        colors: "U".to_string(),
        ..Default::default()
    };
    assert_eq!(criteria.active_count(), 2);
    assert_eq!(ids(&criteria.apply(&cards)), vec!["2"]);
}

#[test]
fn no_match_yields_empty() {
    let cards = sample();
    let criteria = CollectionFilterCriteria {
        name: "bolt".to_string(),
        rarity: Some(Rarity::Mythic),
        ..Default::default()
    };
    assert!(criteria.apply(&cards).is_empty());
}

#[test]
fn criteria_deserialize_with_missing_fields() {
    let criteria: CollectionFilterCriteria =
        serde_json::from_str(r#"{"rarity":"rare","colors":"G"}"#).unwrap();
    assert_eq!(criteria.rarity, Some(Rarity::Rare));
    assert_eq!(ids(&criteria.apply(&sample())), vec!["5"]);
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

#[test]
fn totals_count_copies_and_unique_cards() {
    let cards = sample();
    assert_eq!(collection_totals(&cards), (18, 5));

    let criteria = CollectionFilterCriteria {
        set_name: "dominaria".to_string(),
        ..Default::default()
    };
    assert_eq!(collection_totals(criteria.apply(&cards)), (11, 2));
}
