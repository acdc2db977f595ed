//! Catalog ingestion adapters
//!
//! Every adapter yields `ItemRecord`s. `load_catalog` tries the tabular file,
//! then the record file, then the configured fallback, so a catalog is always
//! available.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::{DatasetConfig, FallbackSource};
use crate::domain::item::{ItemId, SignalMap, WardrobeItem};
use crate::errors::{DomainError, IngestError};

pub mod records;
pub mod sample;
pub mod synthetic;
pub mod tabular;

pub use records::RecordsSource;
pub use sample::SampleSource;
pub use synthetic::SyntheticSource;
pub use tabular::TabularSource;

/// One item as it appears in an external dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<u64>,
    pub category: String,
    pub color: String,
    pub style: String,
    pub season: String,
    pub formality: String,
    #[serde(default)]
    pub attributes: SignalMap,
    #[serde(default)]
    pub sales_data: SignalMap,
}

impl ItemRecord {
    /// Validates the record; `fallback_id` is used when the record carries no id.
    pub fn into_item(self, fallback_id: ItemId) -> Result<WardrobeItem, DomainError> {
        let id = self.item_id.map(ItemId).unwrap_or(fallback_id);
        Ok(WardrobeItem::new(
            id,
            &self.category,
            &self.color,
            &self.style,
            &self.season,
            &self.formality,
        )?
        .with_attributes(self.attributes)
        .with_sales(self.sales_data))
    }
}

impl From<&WardrobeItem> for ItemRecord {
    fn from(item: &WardrobeItem) -> Self {
        Self {
            item_id: Some(item.id.0),
            category: item.category.clone(),
            color: item.color.clone(),
            style: item.style.clone(),
            season: item.season.clone(),
            formality: item.formality.clone(),
            attributes: item.attributes.clone(),
            sales_data: item.sales.clone(),
        }
    }
}

pub trait ItemSource {
    fn name(&self) -> &'static str;
    fn load(&self) -> Result<Vec<ItemRecord>, IngestError>;
}

#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub source: &'static str,
    /// Whether saving this catalog to the records path keeps what the next load reads.
    /// False for tabular catalogs and whenever an existing records file failed to load.
    pub records_writable: bool,
}

/// Turns a source's records into a catalog. Ids are not checked for uniqueness.
pub fn build_catalog(source: &dyn ItemSource) -> Result<Catalog, IngestError> {
    let records = source.load()?;
    let mut catalog = Catalog::default();

    for (index, record) in records.into_iter().enumerate() {
        let fallback_id = ItemId(index as u64 + 1);
        let item = record.into_item(fallback_id).map_err(|error| IngestError::InvalidRecord {
            source_name: source.name(),
            index,
            error,
        })?;
        catalog.add(item);
    }

    Ok(catalog)
}

/// Tabular file, then record file, then the fallback source. Never fails.
///
/// An existing records file is never overwritten here, even when it fails to load.
pub fn load_catalog(config: &DatasetConfig) -> LoadedCatalog {
    if config.tabular_path.exists() {
        if let Some(catalog) = try_source(&TabularSource::new(&config.tabular_path)) {
            return LoadedCatalog { catalog, source: "tabular", records_writable: false };
        }
    }

    let records_present = config.records_path.exists();
    if records_present {
        if let Some(catalog) = try_source(&RecordsSource::new(&config.records_path)) {
            return LoadedCatalog { catalog, source: "records", records_writable: true };
        }
    }

    let synthetic = SyntheticSource::new(config.synthetic_count, config.synthetic_seed);
    let source: &dyn ItemSource = match config.fallback {
        FallbackSource::Synthetic => &synthetic,
        FallbackSource::Sample => &SampleSource,
    };
    let catalog = try_source(source).unwrap_or_default();

    if records_present {
        warn!(
            event_name = "catalog.records.preserved",
            path = %config.records_path.display(),
            fallback = source.name(),
            "records file left untouched; using fallback catalog in memory"
        );
    } else if config.fallback == FallbackSource::Synthetic
        && config.persist_synthetic
        && !catalog.is_empty()
    {
        match RecordsSource::save(&config.records_path, catalog.items()) {
            Ok(()) => info!(
                event_name = "catalog.synthetic.persisted",
                path = %config.records_path.display(),
                items = catalog.len(),
                "saved generated catalog"
            ),
            Err(error) => warn!(
                event_name = "catalog.synthetic.persist_failed",
                error = %error,
                "could not save generated catalog"
            ),
        }
    }

    LoadedCatalog { catalog, source: source.name(), records_writable: !records_present }
}

fn try_source(source: &dyn ItemSource) -> Option<Catalog> {
    match build_catalog(source) {
        Ok(catalog) => {
            info!(
                event_name = "catalog.load.completed",
                source = source.name(),
                items = catalog.len(),
                "catalog loaded"
            );
            Some(catalog)
        }
        Err(error) => {
            warn!(
                event_name = "catalog.load.fallback",
                source = source.name(),
                error = %error,
                "dataset could not be loaded, trying next source"
            );
            None
        }
    }
}
