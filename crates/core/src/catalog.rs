use std::collections::BTreeSet;

use crate::domain::item::{normalize_value, ItemId, WardrobeItem};

/// Append-only wardrobe catalog. The category set always mirrors the items.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<WardrobeItem>,
    categories: BTreeSet<String>,
}

impl Catalog {
    pub fn new(items: Vec<WardrobeItem>) -> Self {
        let mut catalog = Self::default();
        for item in items {
            catalog.add(item);
        }
        catalog
    }

    /// Appends without an id uniqueness check.
    pub fn add(&mut self, item: WardrobeItem) -> &WardrobeItem {
        if !self.categories.contains(&item.category) {
            self.categories.insert(item.category.clone());
        }
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    pub fn next_id(&self) -> ItemId {
        ItemId(self.items.len() as u64 + 1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[WardrobeItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&WardrobeItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items_in_category(&self, category: &str) -> Vec<&WardrobeItem> {
        let category = normalize_value(category);
        self.items.iter().filter(|item| item.category == category).collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(String::as_str).collect()
    }

    /// Matches a core field or, failing that, an auxiliary attribute.
    pub fn search(&self, attribute: &str, value: &str) -> Vec<&WardrobeItem> {
        let attribute = normalize_value(attribute);
        let value = normalize_value(value);

        self.items
            .iter()
            .filter(|item| match item.core_field(&attribute) {
                Some(field) => field == value,
                None => item
                    .attribute(&attribute)
                    .map(|candidate| candidate.as_text() == value)
                    .unwrap_or(false),
            })
            .collect()
    }
}
