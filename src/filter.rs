//! In-memory filtering of a user's collection.

use serde::{Deserialize, Serialize};

use crate::models::{Rarity, UserCardView};

/// Criteria for narrowing a collection. Every field is optional; empty
/// strings and `None` mean "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionFilterCriteria {
    /// Case-insensitive substring of the card name.
    #[serde(default)]
    pub name: String,
    /// Case-insensitive substring of the type line.
    #[serde(default)]
    pub type_line: String,
    /// Exact rarity.
    #[serde(default)]
    pub rarity: Option<Rarity>,
    /// Case-insensitive substring of the set name.
    #[serde(default)]
    pub set_name: String,
    /// Color letters, e.g. `"WU"`. A card matches if its mana cost contains
    /// `{W}` or `{U}`.
    #[serde(default)]
    pub colors: String,
}

impl CollectionFilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.type_line.is_empty()
            && self.rarity.is_none()
            && self.set_name.is_empty()
            && self.colors.is_empty()
    }

    /// Number of criteria in effect.
    pub fn active_count(&self) -> usize {
        [
            !self.name.is_empty(),
            !self.type_line.is_empty(),
            self.rarity.is_some(),
            !self.set_name.is_empty(),
            !self.colors.is_empty(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Whether `view` satisfies every active criterion.
    ///
    /// A missing field on the card never matches an active criterion.
    pub fn matches(&self, view: &UserCardView) -> bool {
        let card = &view.card;

        if !self.name.is_empty() && !contains_ci(Some(&card.name), &self.name) {
            return false;
        }
        if !self.type_line.is_empty() && !contains_ci(card.type_line.as_deref(), &self.type_line) {
            return false;
        }
        if let Some(rarity) = self.rarity {
            if card.rarity.as_deref() != Some(rarity.as_str()) {
                return false;
            }
        }
        if !self.set_name.is_empty() && !contains_ci(card.set_name.as_deref(), &self.set_name) {
            return false;
        }
        if !self.colors.is_empty() {
            let has_color = card
                .mana_cost
                .as_ref()
                .map(|cost| self.colors.chars().any(|c| cost.has_color(c)))
                .unwrap_or(false);
            if !has_color {
                return false;
            }
        }
        true
    }

    /// Matching records, in input order. The input is left untouched.
    pub fn apply<'a>(&self, cards: &'a [UserCardView]) -> Vec<&'a UserCardView> {
        cards.iter().filter(|c| self.matches(c)).collect()
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Total copies and distinct cards in a (possibly filtered) view.
pub fn collection_totals<'a, I>(cards: I) -> (i64, usize)
where
    I: IntoIterator<Item = &'a UserCardView>,
{
    cards
        .into_iter()
        .fold((0, 0), |(copies, unique), c| (copies + c.quantity, unique + 1))
}
