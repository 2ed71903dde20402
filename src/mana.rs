//! Mana-cost parsing.
//!
//! A mana cost is a run of brace-delimited symbols such as `{3}{W}{W}`.
//! Only generic numbers (ASCII digits), the five colors and the variable
//! markers `X`, `Y`, `Z` are recognised; hybrid and Phyrexian symbols
//! (`{W/U}`, `{G/P}`) do not match and contribute nothing to the converted
//! mana cost.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static MANA_SYMBOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([0-9]+|[WUBRG]|[XYZ])\}").expect("mana symbol pattern is valid")
});

static ANY_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").expect("brace pattern is valid"));

/// The five colors of mana, in WUBRG order.
pub const COLORS: [char; 5] = ['W', 'U', 'B', 'R', 'G'];

/// One recognised symbol of a mana cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManaSymbol {
    Generic(u32),
    Colored(char),
    Variable(char),
}

impl ManaSymbol {
    /// Contribution of this symbol to the converted mana cost.
    pub fn value(&self) -> u32 {
        match self {
            ManaSymbol::Generic(n) => *n,
            ManaSymbol::Colored(_) | ManaSymbol::Variable(_) => 1,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            // Digits beyond u32 saturate rather than fail.
            let n = token.parse::<u32>().unwrap_or(u32::MAX);
            return Some(ManaSymbol::Generic(n));
        }
        let c = token.chars().next()?;
        if COLORS.contains(&c) {
            Some(ManaSymbol::Colored(c))
        } else {
            Some(ManaSymbol::Variable(c))
        }
    }
}

/// Converted mana cost of a mana-cost string.
///
/// Absent or empty input, or input with no recognised symbols, yields 0.
/// Never fails.
///
/// ```
/// use mtg_manager::mana::converted_mana_cost;
/// assert_eq!(converted_mana_cost(Some("{3}{W}{W}")), 5);
/// assert_eq!(converted_mana_cost(None), 0);
/// ```
pub fn converted_mana_cost(mana_cost: Option<&str>) -> u32 {
    match mana_cost {
        Some(text) => symbols(text).map(|s| s.value()).fold(0u32, u32::saturating_add),
        None => 0,
    }
}

/// Iterate the recognised symbols of a mana-cost string in order.
pub fn symbols(text: &str) -> impl Iterator<Item = ManaSymbol> + '_ {
    MANA_SYMBOL
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).and_then(|m| ManaSymbol::parse(m.as_str())))
}

/// Render every `{x}` symbol as `(x)` for plain-text display.
pub fn format_mana_symbols(text: &str) -> String {
    ANY_SYMBOL.replace_all(text, "($1)").into_owned()
}

/// A card's mana cost as stored on the card record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManaCost(String);

impl ManaCost {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cmc(&self) -> u32 {
        converted_mana_cost(Some(&self.0))
    }

    pub fn symbols(&self) -> Vec<ManaSymbol> {
        symbols(&self.0).collect()
    }

    /// Whether the literal `{C}` symbol for `color` occurs in the cost.
    pub fn has_color(&self, color: char) -> bool {
        self.0
            .contains(&format!("{{{}}}", color.to_ascii_uppercase()))
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ManaCost {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
