//! Hand-curated compatibility tables for color, style and formality.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use crate::domain::item::WardrobeItem;

const COLOR_MATCHES: &[(&str, &[&str])] = &[
    ("white", &["black", "blue", "red", "green", "brown", "grey", "navy", "beige"]),
    ("black", &["white", "red", "grey", "silver", "gold", "pink", "purple"]),
    ("blue", &["white", "grey", "brown", "navy", "red", "beige"]),
    ("red", &["white", "black", "blue", "grey", "brown"]),
    ("green", &["white", "beige", "brown", "grey", "black"]),
    ("brown", &["white", "blue", "green", "beige", "grey"]),
    ("grey", &["white", "black", "blue", "red", "pink", "purple"]),
    ("navy", &["white", "blue", "grey", "red"]),
    ("beige", &["white", "blue", "green", "brown", "navy", "black"]),
    ("pink", &["black", "grey", "navy", "white"]),
    ("purple", &["white", "black", "grey"]),
    ("yellow", &["white", "blue", "grey", "navy"]),
    ("orange", &["white", "blue", "navy", "grey"]),
];

const STYLE_MATCHES: &[(&str, &[&str])] = &[
    ("casual", &["casual", "sporty", "streetwear"]),
    ("formal", &["formal", "business"]),
    ("business", &["formal", "business", "semi-formal"]),
    ("sporty", &["casual", "sporty", "streetwear"]),
    ("streetwear", &["casual", "sporty", "streetwear"]),
    ("semi-formal", &["semi-formal", "business", "formal"]),
    ("vintage", &["vintage", "casual", "formal"]),
    ("bohemian", &["bohemian", "casual"]),
    ("preppy", &["preppy", "casual", "semi-formal"]),
];

const FORMALITY_MATCHES: &[(&str, &[&str])] = &[
    ("formal", &["formal", "semi-formal"]),
    ("semi-formal", &["formal", "semi-formal", "casual"]),
    ("casual", &["casual", "semi-formal"]),
];

/// Adjacency table whose relation is the symmetric closure of its entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl RuleTable {
    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let entries = entries
            .iter()
            .map(|(key, matches)| {
                (key.to_string(), matches.iter().map(|value| value.to_string()).collect())
            })
            .collect();
        Self { entries }
    }

    /// Equal values always match; unknown values match nothing else.
    pub fn compatible(&self, a: &str, b: &str) -> bool {
        a == b || self.lists(a, b) || self.lists(b, a)
    }

    fn lists(&self, key: &str, value: &str) -> bool {
        self.entries.get(key).map(|matches| matches.contains(value)).unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompatibilityTables {
    pub colors: RuleTable,
    pub styles: RuleTable,
    pub formalities: RuleTable,
}

impl CompatibilityTables {
    /// Process-wide standard tables, built on first use.
    pub fn standard() -> &'static Self {
        static TABLES: OnceLock<CompatibilityTables> = OnceLock::new();
        TABLES.get_or_init(|| Self {
            colors: RuleTable::from_entries(COLOR_MATCHES),
            styles: RuleTable::from_entries(STYLE_MATCHES),
            formalities: RuleTable::from_entries(FORMALITY_MATCHES),
        })
    }

    pub fn colors_compatible(&self, a: &str, b: &str) -> bool {
        self.colors.compatible(a, b)
    }

    pub fn styles_compatible(&self, a: &str, b: &str) -> bool {
        self.styles.compatible(a, b)
    }

    pub fn formalities_compatible(&self, a: &str, b: &str) -> bool {
        self.formalities.compatible(a, b)
    }

    /// Filter predicate only; never used as a scoring signal.
    pub fn items_compatible(&self, first: &WardrobeItem, second: &WardrobeItem) -> bool {
        self.colors_compatible(&first.color, &second.color)
            && self.styles_compatible(&first.style, &second.style)
            && self.formalities_compatible(&first.formality, &second.formality)
    }
}

pub fn colors_compatible(a: &str, b: &str) -> bool {
    CompatibilityTables::standard().colors_compatible(a, b)
}

pub fn styles_compatible(a: &str, b: &str) -> bool {
    CompatibilityTables::standard().styles_compatible(a, b)
}

pub fn formalities_compatible(a: &str, b: &str) -> bool {
    CompatibilityTables::standard().formalities_compatible(a, b)
}

pub fn items_compatible(first: &WardrobeItem, second: &WardrobeItem) -> bool {
    CompatibilityTables::standard().items_compatible(first, second)
}
