use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::item::WardrobeItem;
use crate::errors::IngestError;

use super::{ItemRecord, ItemSource};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    items: Vec<ItemRecord>,
}

/// JSON dataset of the form `{"items": [...]}`.
#[derive(Clone, Debug)]
pub struct RecordsSource {
    path: PathBuf,
}

impl RecordsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(path: &Path, items: &[WardrobeItem]) -> Result<(), IngestError> {
        let file = RecordFile { items: items.iter().map(ItemRecord::from).collect() };
        let body = serde_json::to_string_pretty(&file)
            .map_err(|source| IngestError::Records { path: path.to_path_buf(), source })?;

        fs::write(path, body).map_err(|source| IngestError::Write { path: path.to_path_buf(), source })
    }
}

impl ItemSource for RecordsSource {
    fn name(&self) -> &'static str {
        "records"
    }

    fn load(&self) -> Result<Vec<ItemRecord>, IngestError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|source| IngestError::Read { path: self.path.clone(), source })?;
        let file = serde_json::from_str::<RecordFile>(&raw)
            .map_err(|source| IngestError::Records { path: self.path.clone(), source })?;
        Ok(file.items)
    }
}
