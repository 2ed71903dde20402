use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MtgManagerError;
use crate::mana::{self, ManaCost};

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    Bonus,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
            Rarity::Special => "special",
            Rarity::Bonus => "bonus",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = MtgManagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(Rarity::Common),
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "mythic" => Ok(Rarity::Mythic),
            "special" => Ok(Rarity::Special),
            "bonus" => Ok(Rarity::Bonus),
            other => Err(MtgManagerError::InvalidArgument(format!(
                "Unknown rarity: {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Card — A card row persisted in the local `cards` table
// ---------------------------------------------------------------------------

/// Card record as stored locally. The id is the Scryfall id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub mana_cost: Option<ManaCost>,
    #[serde(default)]
    pub cmc: u32,
    pub type_line: Option<String>,
    pub rarity: Option<String>,
    pub set_name: Option<String>,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub image_url: Option<String>,
}

impl Card {
    /// Mana cost rendered with `(x)` symbols, empty when absent.
    pub fn display_mana_cost(&self) -> String {
        self.mana_cost
            .as_ref()
            .map(|m| mana::format_mana_symbols(m.as_str()))
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// UserCardView — A user's ownership row joined with its card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCardView {
    #[serde(rename = "user_card_id")]
    pub id: String,
    pub quantity: i64,
    pub condition: String,
    pub foil: bool,
    pub language: String,
    #[serde(flatten)]
    pub card: Card,
}

// ---------------------------------------------------------------------------
// NewCollectionCard — Input for adding a card to a collection
// ---------------------------------------------------------------------------

/// Card data supplied when adding to a collection. Only `scryfall_id` and
/// `name` are required; the rest fills the card row on first sight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCollectionCard {
    pub scryfall_id: String,
    pub name: String,
    pub type_line: Option<String>,
    pub mana_cost: Option<String>,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub image_url: Option<String>,
    pub set_name: Option<String>,
    pub rarity: Option<String>,
    pub quantity: Option<i64>,
}

impl From<&ScryfallCard> for NewCollectionCard {
    fn from(card: &ScryfallCard) -> Self {
        Self {
            scryfall_id: card.id.clone(),
            name: card.name.clone(),
            type_line: card.type_line.clone(),
            mana_cost: card.mana_cost.clone(),
            oracle_text: card.oracle_text.clone(),
            power: card.power.clone(),
            toughness: card.toughness.clone(),
            image_url: card.image_url().map(str::to_string),
            set_name: card.set_name.clone(),
            rarity: card.rarity.clone(),
            quantity: None,
        }
    }
}

// ---------------------------------------------------------------------------
// CardCount — How many copies of one card a user owns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardCount {
    pub total_quantity: i64,
    pub conditions: Vec<CopyCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyCondition {
    pub condition: String,
    pub foil: bool,
    pub quantity: i64,
    pub language: String,
}

// ---------------------------------------------------------------------------
// ScryfallCard — Card payload from the Scryfall API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScryfallCard {
    pub id: String,
    pub name: String,
    pub mana_cost: Option<String>,
    pub cmc: Option<f64>,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub rarity: Option<String>,
    pub set: Option<String>,
    pub set_name: Option<String>,
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub prices: ScryfallPrices,
}

impl ScryfallCard {
    /// Preferred display image: `normal`, falling back to `large`.
    pub fn image_url(&self) -> Option<&str> {
        self.image_uris
            .as_ref()
            .and_then(|u| u.normal.as_deref().or(u.large.as_deref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
    pub large: Option<String>,
}

/// Scryfall reports prices as decimal strings (`"1.25"`) or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScryfallPrices {
    #[serde(default, deserialize_with = "decimal_string")]
    pub usd: Option<f64>,
    #[serde(default, deserialize_with = "decimal_string")]
    pub usd_foil: Option<f64>,
    #[serde(default, deserialize_with = "decimal_string")]
    pub eur: Option<f64>,
}

/// Scryfall list envelope (`/cards/search`).
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallList {
    #[serde(default)]
    pub data: Vec<ScryfallCard>,
    #[serde(default)]
    pub total_cards: Option<u64>,
    #[serde(default)]
    pub has_more: bool,
}

/// Scryfall catalog envelope (`/cards/autocomplete`).
#[derive(Debug, Clone, Deserialize)]
pub struct ScryfallCatalog {
    #[serde(default)]
    pub data: Vec<String>,
}

fn decimal_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
