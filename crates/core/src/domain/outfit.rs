use serde::Serialize;

use crate::domain::item::WardrobeItem;

/// One item per required category, borrowed from the catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outfit<'a> {
    pub top: &'a WardrobeItem,
    pub bottom: &'a WardrobeItem,
    pub footwear: &'a WardrobeItem,
    pub description: String,
}

impl<'a> Outfit<'a> {
    pub fn new(
        top: &'a WardrobeItem,
        bottom: &'a WardrobeItem,
        footwear: &'a WardrobeItem,
        season: &str,
    ) -> Self {
        let description = describe(top, season);
        Self { top, bottom, footwear, description }
    }

    /// Items in wearing order: top, bottom, footwear.
    pub fn items(&self) -> [&'a WardrobeItem; 3] {
        [self.top, self.bottom, self.footwear]
    }
}

fn describe(top: &WardrobeItem, season: &str) -> String {
    format!("{} {} outfit for {}", capitalize(&top.formality), top.style, season)
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
