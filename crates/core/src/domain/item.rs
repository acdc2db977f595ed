use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value stored in the open attribute and sales maps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Number(f64),
    Text(String),
}

impl SignalValue {
    /// Numeric reading of the value; text is parsed, anything unparseable is no signal.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok().filter(|value| value.is_finite()),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for SignalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for SignalValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SignalValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for SignalValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for SignalValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

pub type SignalMap = BTreeMap<String, SignalValue>;

/// Popularity tier read from the `popularity` auxiliary attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularityTier {
    Low,
    Medium,
    High,
    Trending,
}

impl PopularityTier {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "trending" => Some(Self::Trending),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Trending => "trending",
        }
    }
}

pub const POPULARITY_KEY: &str = "popularity";
const DISPLAY_ATTRIBUTES: [&str; 3] = ["pattern", "material", "fit"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: ItemId,
    pub category: String,
    pub color: String,
    pub style: String,
    pub season: String,
    pub formality: String,
    #[serde(default)]
    pub attributes: SignalMap,
    #[serde(default)]
    pub sales: SignalMap,
}

impl WardrobeItem {
    pub fn new(
        id: ItemId,
        category: &str,
        color: &str,
        style: &str,
        season: &str,
        formality: &str,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id,
            category: normalize_field("category", category)?,
            color: normalize_field("color", color)?,
            style: normalize_field("style", style)?,
            season: normalize_field("season", season)?,
            formality: normalize_field("formality", formality)?,
            attributes: SignalMap::new(),
            sales: SignalMap::new(),
        })
    }

    pub fn with_attributes(mut self, attributes: SignalMap) -> Self {
        self.attributes = normalize_keys(attributes);
        self
    }

    pub fn with_sales(mut self, sales: SignalMap) -> Self {
        self.sales = normalize_keys(sales);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&SignalValue> {
        self.attributes.get(key)
    }

    /// Numeric sales signal, `None` when missing or not a number.
    pub fn sales_number(&self, key: &str) -> Option<f64> {
        self.sales.get(key).and_then(SignalValue::as_f64)
    }

    pub fn popularity(&self) -> Option<PopularityTier> {
        match self.attributes.get(POPULARITY_KEY)? {
            SignalValue::Text(text) => PopularityTier::parse(text),
            SignalValue::Number(_) => None,
        }
    }

    /// Core field lookup by name, used by attribute search.
    pub fn core_field(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(&self.category),
            "color" => Some(&self.color),
            "style" => Some(&self.style),
            "season" => Some(&self.season),
            "formality" => Some(&self.formality),
            _ => None,
        }
    }
}

impl fmt::Display for WardrobeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({}, {})",
            self.color, self.style, self.category, self.formality, self.season
        )?;

        let details = DISPLAY_ATTRIBUTES
            .iter()
            .filter_map(|key| self.attributes.get(*key).map(|value| format!("{key}: {value}")))
            .collect::<Vec<_>>();
        if !details.is_empty() {
            write!(f, " - {}", details.join(", "))?;
        }

        if let Some(popularity) = self.attributes.get(POPULARITY_KEY) {
            write!(f, " [{popularity}]")?;
        }

        Ok(())
    }
}

pub fn normalize_value(value: &str) -> String {
    value.trim().to_lowercase()
}

fn normalize_field(field: &'static str, value: &str) -> Result<String, DomainError> {
    let normalized = normalize_value(value);
    if normalized.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(normalized)
}

fn normalize_keys(map: SignalMap) -> SignalMap {
    map.into_iter().map(|(key, value)| (normalize_value(&key), value)).collect()
}
