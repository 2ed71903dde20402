use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MetaDeck — Tournament meta archetype with play statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDeck {
    pub id: String,
    pub name: String,
    pub format: String,
    pub archetype: String,
    pub tier: u8,
    pub win_rate: f64,
    pub popularity: f64,
    pub matches: u64,
    /// Average cost to build, in local currency.
    pub average_cost: f64,
    #[serde(default)]
    pub colors: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub key_cards: Vec<String>,
    #[serde(default)]
    pub decklist: Vec<MetaDeckEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDeckEntry {
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub sideboard: bool,
}
