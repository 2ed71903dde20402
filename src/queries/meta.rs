//! Tournament meta snapshot bundled with the crate.
//!
//! The deck list is a static JSON document keyed by lowercase format name.
//! Filtering and sorting happen in memory.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::MetaDeck;

const META_DECKS: &str = include_str!("../data/meta_decks.json");

/// Sort key for [`MetaQuery::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetaSort {
    #[default]
    WinRate,
    Popularity,
    Matches,
    AverageCost,
}

/// In-memory filter over a format's meta decks. Empty fields don't filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaDeckFilter {
    /// Case-insensitive substring of name, description or any key card.
    pub search: String,
    /// Exact archetype, case-insensitive.
    pub archetype: Option<String>,
    pub tier: Option<u8>,
    /// Deck must play at least one of these colors.
    pub colors: Vec<String>,
    pub min_win_rate: Option<f64>,
    pub sort_by: MetaSort,
    pub descending: bool,
}

impl Default for MetaDeckFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            archetype: None,
            tier: None,
            colors: Vec::new(),
            min_win_rate: None,
            sort_by: MetaSort::WinRate,
            descending: true,
        }
    }
}

impl MetaDeckFilter {
    pub fn matches(&self, deck: &MetaDeck) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let hit = deck.name.to_lowercase().contains(&needle)
                || deck.description.to_lowercase().contains(&needle)
                || deck
                    .key_cards
                    .iter()
                    .any(|c| c.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(archetype) = &self.archetype {
            if !deck.archetype.eq_ignore_ascii_case(archetype) {
                return false;
            }
        }
        if let Some(tier) = self.tier {
            if deck.tier != tier {
                return false;
            }
        }
        if !self.colors.is_empty()
            && !self
                .colors
                .iter()
                .any(|want| deck.colors.iter().any(|c| c.eq_ignore_ascii_case(want)))
        {
            return false;
        }
        if let Some(min) = self.min_win_rate {
            if deck.win_rate < min {
                return false;
            }
        }
        true
    }

    fn compare(&self, a: &MetaDeck, b: &MetaDeck) -> Ordering {
        let ord = match self.sort_by {
            MetaSort::WinRate => a.win_rate.total_cmp(&b.win_rate),
            MetaSort::Popularity => a.popularity.total_cmp(&b.popularity),
            MetaSort::Matches => a.matches.cmp(&b.matches),
            MetaSort::AverageCost => a.average_cost.total_cmp(&b.average_cost),
        };
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }
}

// ---------------------------------------------------------------------------
// MetaQuery
// ---------------------------------------------------------------------------

pub struct MetaQuery {
    decks: BTreeMap<String, Vec<MetaDeck>>,
}

impl MetaQuery {
    /// Parse the bundled snapshot.
    pub fn load() -> Result<Self> {
        Self::from_json(META_DECKS)
    }

    /// Parse a snapshot in the bundled layout: `{ "<format>": [deck, ...] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<MetaDeck>> = serde_json::from_str(json)?;
        let decks = raw
            .into_iter()
            .map(|(format, decks)| (format.to_lowercase(), decks))
            .collect::<BTreeMap<_, _>>();
        log::debug!("Loaded meta decks for {} formats", decks.len());
        Ok(Self { decks })
    }

    /// Known formats, alphabetically.
    pub fn formats(&self) -> Vec<&str> {
        self.decks.keys().map(String::as_str).collect()
    }

    /// Decks of a format in snapshot order. Unknown formats yield nothing.
    pub fn decks(&self, format: &str) -> &[MetaDeck] {
        self.decks
            .get(&format.trim().to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn get(&self, id: &str) -> Option<&MetaDeck> {
        self.decks.values().flatten().find(|d| d.id == id)
    }

    /// Filter and sort a format's decks. Ties keep snapshot order.
    pub fn search(&self, format: &str, filter: &MetaDeckFilter) -> Vec<&MetaDeck> {
        let mut out: Vec<&MetaDeck> = self
            .decks(format)
            .iter()
            .filter(|d| filter.matches(d))
            .collect();
        out.sort_by(|a, b| filter.compare(a, b));
        out
    }

    /// Distinct archetypes of a format, in first-seen order.
    pub fn archetypes(&self, format: &str) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for deck in self.decks(format) {
            if !seen.contains(&deck.archetype.as_str()) {
                seen.push(&deck.archetype);
            }
        }
        seen
    }
}
