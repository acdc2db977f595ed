pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ingest;
pub mod service;
pub mod styling;

pub use catalog::Catalog;
pub use config::{AppConfig, ConfigError, ConfigOverrides, FallbackSource, LoadOptions, LogFormat};
pub use domain::item::{ItemId, PopularityTier, SignalMap, SignalValue, WardrobeItem};
pub use domain::outfit::Outfit;
pub use domain::season::{season_eligible, season_for_date, ALL_SEASON, SEASONS};
pub use errors::{ApplicationError, DomainError, IngestError};
pub use ingest::{load_catalog, ItemRecord, ItemSource, LoadedCatalog, RecordsSource};
pub use service::{NewItem, StylistService};
pub use styling::{
    AssemblyFailure, CompatibilityTables, ItemScorer, OutfitAssembler, RecommendationBatch,
    RequiredCategories, ScoringWeights,
};
