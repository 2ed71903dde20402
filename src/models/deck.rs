use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Deck — A user-built deck with its card total
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub format: String,
    pub created_at: String,
    /// Number of distinct card rows in the deck.
    #[serde(default)]
    pub card_count: i64,
}

// ---------------------------------------------------------------------------
// NewDeck — Input for deck creation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDeck {
    pub name: String,
    pub description: Option<String>,
    pub format: String,
}

// ---------------------------------------------------------------------------
// DeckCard — A card slot in a deck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckCard {
    #[serde(rename = "deck_card_id")]
    pub id: String,
    pub quantity: i64,
    pub sideboard: bool,
    #[serde(flatten)]
    pub card: crate::models::Card,
}
