use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("wardrobe item field `{field}` must not be empty")]
    EmptyField { field: &'static str },
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read dataset `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse tabular dataset `{path}`: {source}")]
    Tabular { path: PathBuf, source: csv::Error },
    #[error("could not parse record dataset `{path}`: {source}")]
    Records { path: PathBuf, source: serde_json::Error },
    #[error("could not write dataset `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("record {index} in `{source_name}` is invalid: {error}")]
    InvalidRecord { source_name: &'static str, index: usize, error: DomainError },
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl ApplicationError {
    /// Stable label used by the CLI `error_class` field.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "invalid_item",
            Self::Ingest(IngestError::Write { .. }) => "dataset_write",
            Self::Ingest(_) => "dataset_read",
            Self::Configuration(_) => "config_validation",
        }
    }
}
