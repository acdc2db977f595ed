use crate::catalog::Catalog;
use crate::domain::item::{PopularityTier, WardrobeItem};

pub const DEFAULT_POPULAR_LIMIT: usize = 10;

/// Deterministic popularity score used for the popular-items listing.
pub fn popularity_score(item: &WardrobeItem) -> f64 {
    let tier = match item.popularity() {
        Some(PopularityTier::Trending) => 4.0,
        Some(PopularityTier::High) => 3.0,
        Some(PopularityTier::Medium) => 2.0,
        Some(PopularityTier::Low) | None => 0.0,
    };
    let rating = item.sales_number("rating").map(|rating| rating * 0.5).unwrap_or(0.0);
    let purchases =
        item.sales_number("purchases").map(|purchases| (purchases / 100.0).min(5.0)).unwrap_or(0.0);
    let reviews = item.sales_number("reviews").map(|reviews| (reviews / 50.0).min(3.0)).unwrap_or(0.0);

    tier + rating + purchases + reviews
}

/// Highest scoring items first; ties keep catalog order.
pub fn rank_by_popularity(catalog: &Catalog, limit: usize) -> Vec<(&WardrobeItem, f64)> {
    let mut ranked =
        catalog.items().iter().map(|item| (item, popularity_score(item))).collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{ItemId, SignalMap, SignalValue};

    fn item(id: u64, popularity: Option<&str>, sales: &[(&str, f64)]) -> WardrobeItem {
        let mut attributes = SignalMap::new();
        if let Some(popularity) = popularity {
            attributes.insert("popularity".to_owned(), popularity.into());
        }
        let sales = sales
            .iter()
            .map(|(key, value)| (key.to_string(), SignalValue::Number(*value)))
            .collect();

        WardrobeItem::new(ItemId(id), "dress", "red", "vintage", "summer", "casual")
            .expect("valid item")
            .with_attributes(attributes)
            .with_sales(sales)
    }

    #[test]
    fn score_combines_tier_and_capped_sales_signals() {
        let candidate = item(
            1,
            Some("high"),
            &[("rating", 4.0), ("purchases", 900.0), ("reviews", 100.0)],
        );
        // 3 + 2.0 + min(9, 5) + min(2, 3)
        assert!((popularity_score(&candidate) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn missing_signals_score_zero() {
        assert_eq!(popularity_score(&item(1, None, &[])), 0.0);
    }

    #[test]
    fn ranking_sorts_descending_and_truncates() {
        let catalog = Catalog::new(vec![
            item(1, Some("medium"), &[]),
            item(2, Some("trending"), &[]),
            item(3, None, &[("rating", 1.0)]),
            item(4, Some("high"), &[]),
        ]);

        let ranked = rank_by_popularity(&catalog, 3);

        assert_eq!(ranked.iter().map(|(item, _)| item.id).collect::<Vec<_>>(), vec![ItemId(2), ItemId(4), ItemId(1)]);
    }

    #[test]
    fn ranking_keeps_catalog_order_for_ties() {
        let catalog = Catalog::new(vec![item(1, None, &[]), item(2, None, &[])]);
        let ranked = rank_by_popularity(&catalog, DEFAULT_POPULAR_LIMIT);
        assert_eq!(ranked.iter().map(|(item, _)| item.id).collect::<Vec<_>>(), vec![ItemId(1), ItemId(2)]);
    }
}
