use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::domain::item::{SignalMap, WardrobeItem};
use crate::errors::DomainError;
use crate::styling::{
    rank_by_popularity, CompatibilityTables, ItemScorer, OutfitAssembler, RecommendationBatch,
    RequiredCategories, DEFAULT_ATTEMPT_MULTIPLIER,
};

/// Fields supplied when adding an item by hand.
#[derive(Clone, Debug, Default)]
pub struct NewItem {
    pub category: String,
    pub color: String,
    pub style: String,
    pub season: String,
    pub formality: String,
    pub attributes: SignalMap,
    pub sales: SignalMap,
}

/// Owns the catalog and the engine settings for one session.
pub struct StylistService {
    catalog: Catalog,
    tables: &'static CompatibilityTables,
    scorer: ItemScorer,
    categories: RequiredCategories,
    attempt_multiplier: usize,
}

impl StylistService {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            tables: CompatibilityTables::standard(),
            scorer: ItemScorer::new(),
            categories: RequiredCategories::default(),
            attempt_multiplier: DEFAULT_ATTEMPT_MULTIPLIER,
        }
    }

    pub fn from_config(catalog: Catalog, config: &AppConfig) -> Self {
        Self {
            scorer: ItemScorer::with_weights(config.scoring.weights())
                .with_top_k(config.scoring.top_k),
            categories: config.outfit.required_categories(),
            attempt_multiplier: config.outfit.attempt_multiplier.max(1),
            ..Self::new(catalog)
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn required_categories(&self) -> &RequiredCategories {
        &self.categories
    }

    /// Appends a new item with id = catalog size + 1.
    pub fn add_item(&mut self, new_item: NewItem) -> Result<&WardrobeItem, DomainError> {
        let item = WardrobeItem::new(
            self.catalog.next_id(),
            &new_item.category,
            &new_item.color,
            &new_item.style,
            &new_item.season,
            &new_item.formality,
        )?
        .with_attributes(new_item.attributes)
        .with_sales(new_item.sales);

        debug!(event_name = "catalog.item.added", item_id = %item.id, category = %item.category, "item added");
        Ok(self.catalog.add(item))
    }

    pub fn recommend(&self, season: &str, count: usize) -> RecommendationBatch<'_> {
        self.recommend_with_rng(season, count, &mut rand::thread_rng())
    }

    pub fn recommend_with_rng<R>(&self, season: &str, count: usize, rng: &mut R) -> RecommendationBatch<'_>
    where
        R: Rng + ?Sized,
    {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("recommend", request_id = %request_id, season = %season, count);
        let _entered = span.enter();

        let batch = self.assembler().recommend(&self.catalog, season, count, rng);

        info!(
            event_name = "recommend.completed",
            request_id = %request_id,
            requested = count,
            produced = batch.outfits.len(),
            failed = batch.failures.len(),
            attempts = batch.attempts,
            "recommendation request completed"
        );
        batch
    }

    pub fn search(&self, attribute: &str, value: &str) -> Vec<&WardrobeItem> {
        self.catalog.search(attribute, value)
    }

    pub fn popular(&self, limit: usize) -> Vec<(&WardrobeItem, f64)> {
        rank_by_popularity(&self.catalog, limit)
    }

    fn assembler(&self) -> OutfitAssembler<'static> {
        OutfitAssembler::new(self.tables, self.scorer.clone())
            .with_categories(self.categories.clone())
            .with_attempt_multiplier(self.attempt_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::domain::item::ItemId;
    use crate::ingest::{build_catalog, SampleSource};
    use crate::styling::AssemblyFailure;

    fn new_item(category: &str, color: &str, style: &str, season: &str, formality: &str) -> NewItem {
        NewItem {
            category: category.to_owned(),
            color: color.to_owned(),
            style: style.to_owned(),
            season: season.to_owned(),
            formality: formality.to_owned(),
            ..NewItem::default()
        }
    }

    fn casual_service() -> StylistService {
        let mut service = StylistService::new(Catalog::default());
        service.add_item(new_item("Shirt", "White", "casual", "all-season", "casual")).expect("shirt");
        service.add_item(new_item("pants", "blue", "casual", "all-season", "casual")).expect("pants");
        service.add_item(new_item("shoes", "white", "casual", "all-season", "casual")).expect("shoes");
        service
    }

    #[test]
    fn added_items_get_sequential_ids() {
        let service = casual_service();
        let ids = service.catalog().items().iter().map(|item| item.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![ItemId(1), ItemId(2), ItemId(3)]);
        assert_eq!(service.catalog().items()[0].category, "shirt");
    }

    #[test]
    fn invalid_item_is_rejected_and_not_added() {
        let mut service = casual_service();
        let error = service.add_item(new_item("shirt", "", "casual", "summer", "casual")).expect_err("blank");
        assert_eq!(error, DomainError::EmptyField { field: "color" });
        assert_eq!(service.catalog().len(), 3);
    }

    #[test]
    fn casual_trio_recommends_the_full_outfit() {
        let service = casual_service();
        let mut rng = StdRng::seed_from_u64(4);

        let batch = service.recommend_with_rng("summer", 1, &mut rng);

        assert_eq!(batch.attempts, 1);
        let outfit = &batch.outfits[0];
        assert_eq!(outfit.items().map(|item| item.id), [ItemId(1), ItemId(2), ItemId(3)]);
        assert!(outfit.description.contains("casual"));
        assert!(outfit.description.contains("summer"));
    }

    #[test]
    fn single_valid_outfit_fills_count_with_repeats() {
        let service = casual_service();
        let batch = service.recommend("summer", 3);

        assert_eq!(batch.outfits.len(), 3);
        assert!(batch.failures.is_empty());
    }

    #[test]
    fn tops_only_catalog_reports_missing_bottom() {
        let mut service = StylistService::new(Catalog::default());
        service.add_item(new_item("shirt", "white", "casual", "all-season", "casual")).expect("shirt");

        let batch = service.recommend("summer", 1);

        assert!(batch.is_empty());
        assert_eq!(batch.attempts, 3);
        assert!(matches!(
            &batch.failures[0],
            AssemblyFailure::MissingCategories { missing } if missing.contains(&"pants".to_owned())
        ));
    }

    #[test]
    fn configured_categories_are_used() {
        let mut config = AppConfig::default();
        config.outfit.top_category = "jacket".to_owned();
        let mut service = StylistService::from_config(Catalog::default(), &config);
        service.add_item(new_item("jacket", "black", "formal", "all-season", "formal")).expect("jacket");
        service.add_item(new_item("pants", "grey", "formal", "all-season", "formal")).expect("pants");
        service.add_item(new_item("shoes", "black", "formal", "all-season", "formal")).expect("shoes");

        let batch = service.recommend("winter", 1);

        assert_eq!(batch.outfits.len(), 1);
        assert_eq!(batch.outfits[0].top.category, "jacket");
    }

    #[test]
    fn search_and_popular_delegate_to_catalog() {
        let mut service = casual_service();
        let mut attributes = SignalMap::new();
        attributes.insert("popularity".to_owned(), "trending".into());
        attributes.insert("material".to_owned(), "Silk".into());
        service
            .add_item(NewItem { attributes, ..new_item("dress", "red", "vintage", "summer", "formal") })
            .expect("dress");

        let silk = service.search("Material", "SILK");
        assert_eq!(silk.len(), 1);
        assert_eq!(silk[0].id, ItemId(4));
        assert_eq!(service.search("color", "white").len(), 2);

        let popular = service.popular(2);
        assert_eq!(popular.len(), 2);
        assert_eq!(popular[0].0.id, ItemId(4));
    }

    #[test]
    fn sample_wardrobe_summer_outfits_are_valid() {
        let service = StylistService::new(build_catalog(&SampleSource).expect("sample"));
        let tables = CompatibilityTables::standard();
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..20 {
            let batch = service.recommend_with_rng("summer", 2, &mut rng);
            assert!(batch.attempts <= 6);
            for outfit in &batch.outfits {
                let [top, bottom, footwear] = outfit.items();
                assert!(tables.items_compatible(top, bottom));
                assert!(tables.items_compatible(top, footwear));
                assert!(tables.items_compatible(bottom, footwear));
            }
        }
    }
}
