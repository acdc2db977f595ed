use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::season::SEASONS;
use crate::styling::{
    RequiredCategories, ScoringWeights, DEFAULT_ATTEMPT_MULTIPLIER, DEFAULT_TOP_K, DEFAULT_WEIGHTS,
};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub scoring: ScoringConfig,
    pub outfit: OutfitConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatasetConfig {
    pub tabular_path: PathBuf,
    pub records_path: PathBuf,
    pub fallback: FallbackSource,
    pub synthetic_count: usize,
    pub synthetic_seed: Option<u64>,
    pub persist_synthetic: bool,
}

#[derive(Clone, Debug)]
pub struct ScoringConfig {
    pub popularity_weight: f64,
    pub rating_weight: f64,
    pub purchase_weight: f64,
    pub top_k: usize,
}

#[derive(Clone, Debug)]
pub struct OutfitConfig {
    pub top_category: String,
    pub bottom_category: String,
    pub footwear_category: String,
    pub default_season: Option<String>,
    pub default_count: usize,
    pub attempt_multiplier: usize,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackSource {
    Synthetic,
    Sample,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub tabular_path: Option<PathBuf>,
    pub records_path: Option<PathBuf>,
    pub fallback: Option<FallbackSource>,
    pub synthetic_seed: Option<u64>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        let categories = RequiredCategories::default();
        Self {
            dataset: DatasetConfig {
                tabular_path: PathBuf::from("Dresses_Attribute_Sales.csv"),
                records_path: PathBuf::from("fashion_dataset.json"),
                fallback: FallbackSource::Synthetic,
                synthetic_count: 50,
                synthetic_seed: None,
                persist_synthetic: true,
            },
            scoring: ScoringConfig {
                popularity_weight: DEFAULT_WEIGHTS.popularity,
                rating_weight: DEFAULT_WEIGHTS.rating,
                purchase_weight: DEFAULT_WEIGHTS.purchases,
                top_k: DEFAULT_TOP_K,
            },
            outfit: OutfitConfig {
                top_category: categories.top,
                bottom_category: categories.bottom,
                footwear_category: categories.footwear,
                default_season: None,
                default_count: 2,
                attempt_multiplier: DEFAULT_ATTEMPT_MULTIPLIER,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for FallbackSource {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "synthetic" => Ok(Self::Synthetic),
            "sample" => Ok(Self::Sample),
            other => Err(ConfigError::Validation(format!(
                "unsupported dataset fallback `{other}` (expected synthetic|sample)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            popularity: self.popularity_weight,
            rating: self.rating_weight,
            purchases: self.purchase_weight,
        }
    }
}

impl OutfitConfig {
    pub fn required_categories(&self) -> RequiredCategories {
        RequiredCategories::new(&self.top_category, &self.bottom_category, &self.footwear_category)
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("stylist.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(dataset) = patch.dataset {
            if let Some(tabular_path) = dataset.tabular_path {
                self.dataset.tabular_path = tabular_path;
            }
            if let Some(records_path) = dataset.records_path {
                self.dataset.records_path = records_path;
            }
            if let Some(fallback) = dataset.fallback {
                self.dataset.fallback = fallback;
            }
            if let Some(synthetic_count) = dataset.synthetic_count {
                self.dataset.synthetic_count = synthetic_count;
            }
            if let Some(synthetic_seed) = dataset.synthetic_seed {
                self.dataset.synthetic_seed = Some(synthetic_seed);
            }
            if let Some(persist_synthetic) = dataset.persist_synthetic {
                self.dataset.persist_synthetic = persist_synthetic;
            }
        }

        if let Some(scoring) = patch.scoring {
            if let Some(popularity_weight) = scoring.popularity_weight {
                self.scoring.popularity_weight = popularity_weight;
            }
            if let Some(rating_weight) = scoring.rating_weight {
                self.scoring.rating_weight = rating_weight;
            }
            if let Some(purchase_weight) = scoring.purchase_weight {
                self.scoring.purchase_weight = purchase_weight;
            }
            if let Some(top_k) = scoring.top_k {
                self.scoring.top_k = top_k;
            }
        }

        if let Some(outfit) = patch.outfit {
            if let Some(top_category) = outfit.top_category {
                self.outfit.top_category = top_category;
            }
            if let Some(bottom_category) = outfit.bottom_category {
                self.outfit.bottom_category = bottom_category;
            }
            if let Some(footwear_category) = outfit.footwear_category {
                self.outfit.footwear_category = footwear_category;
            }
            if let Some(default_season) = outfit.default_season {
                self.outfit.default_season = Some(default_season);
            }
            if let Some(default_count) = outfit.default_count {
                self.outfit.default_count = default_count;
            }
            if let Some(attempt_multiplier) = outfit.attempt_multiplier {
                self.outfit.attempt_multiplier = attempt_multiplier;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STYLIST_DATASET_TABULAR_PATH") {
            self.dataset.tabular_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("STYLIST_DATASET_RECORDS_PATH") {
            self.dataset.records_path = PathBuf::from(value);
        }
        if let Some(value) = read_env("STYLIST_DATASET_FALLBACK") {
            self.dataset.fallback = value.parse()?;
        }
        if let Some(value) = read_env("STYLIST_DATASET_SYNTHETIC_COUNT") {
            self.dataset.synthetic_count = parse_usize("STYLIST_DATASET_SYNTHETIC_COUNT", &value)?;
        }
        if let Some(value) = read_env("STYLIST_DATASET_SYNTHETIC_SEED") {
            self.dataset.synthetic_seed = Some(parse_u64("STYLIST_DATASET_SYNTHETIC_SEED", &value)?);
        }
        if let Some(value) = read_env("STYLIST_DATASET_PERSIST_SYNTHETIC") {
            self.dataset.persist_synthetic =
                parse_bool("STYLIST_DATASET_PERSIST_SYNTHETIC", &value)?;
        }

        if let Some(value) = read_env("STYLIST_SCORING_POPULARITY_WEIGHT") {
            self.scoring.popularity_weight =
                parse_f64("STYLIST_SCORING_POPULARITY_WEIGHT", &value)?;
        }
        if let Some(value) = read_env("STYLIST_SCORING_RATING_WEIGHT") {
            self.scoring.rating_weight = parse_f64("STYLIST_SCORING_RATING_WEIGHT", &value)?;
        }
        if let Some(value) = read_env("STYLIST_SCORING_PURCHASE_WEIGHT") {
            self.scoring.purchase_weight = parse_f64("STYLIST_SCORING_PURCHASE_WEIGHT", &value)?;
        }
        if let Some(value) = read_env("STYLIST_SCORING_TOP_K") {
            self.scoring.top_k = parse_usize("STYLIST_SCORING_TOP_K", &value)?;
        }

        if let Some(value) = read_env("STYLIST_OUTFIT_TOP_CATEGORY") {
            self.outfit.top_category = value;
        }
        if let Some(value) = read_env("STYLIST_OUTFIT_BOTTOM_CATEGORY") {
            self.outfit.bottom_category = value;
        }
        if let Some(value) = read_env("STYLIST_OUTFIT_FOOTWEAR_CATEGORY") {
            self.outfit.footwear_category = value;
        }
        if let Some(value) = read_env("STYLIST_OUTFIT_DEFAULT_SEASON") {
            self.outfit.default_season = Some(value);
        }
        if let Some(value) = read_env("STYLIST_OUTFIT_DEFAULT_COUNT") {
            self.outfit.default_count = parse_usize("STYLIST_OUTFIT_DEFAULT_COUNT", &value)?;
        }
        if let Some(value) = read_env("STYLIST_OUTFIT_ATTEMPT_MULTIPLIER") {
            self.outfit.attempt_multiplier =
                parse_usize("STYLIST_OUTFIT_ATTEMPT_MULTIPLIER", &value)?;
        }

        let log_level = read_env("STYLIST_LOGGING_LEVEL").or_else(|| read_env("STYLIST_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("STYLIST_LOGGING_FORMAT").or_else(|| read_env("STYLIST_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(tabular_path) = overrides.tabular_path {
            self.dataset.tabular_path = tabular_path;
        }
        if let Some(records_path) = overrides.records_path {
            self.dataset.records_path = records_path;
        }
        if let Some(fallback) = overrides.fallback {
            self.dataset.fallback = fallback;
        }
        if let Some(synthetic_seed) = overrides.synthetic_seed {
            self.dataset.synthetic_seed = Some(synthetic_seed);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dataset(&self.dataset)?;
        validate_scoring(&self.scoring)?;
        validate_outfit(&self.outfit)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("stylist.toml"), PathBuf::from("config/stylist.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_dataset(dataset: &DatasetConfig) -> Result<(), ConfigError> {
    if dataset.records_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("dataset.records_path must not be empty".to_string()));
    }

    if dataset.synthetic_count == 0 {
        return Err(ConfigError::Validation(
            "dataset.synthetic_count must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_scoring(scoring: &ScoringConfig) -> Result<(), ConfigError> {
    let weights = [
        ("scoring.popularity_weight", scoring.popularity_weight),
        ("scoring.rating_weight", scoring.rating_weight),
        ("scoring.purchase_weight", scoring.purchase_weight),
    ];
    for (key, weight) in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{key} must be a finite, non-negative number"
            )));
        }
    }

    if scoring.top_k == 0 {
        return Err(ConfigError::Validation("scoring.top_k must be greater than zero".to_string()));
    }

    Ok(())
}

fn validate_outfit(outfit: &OutfitConfig) -> Result<(), ConfigError> {
    let categories = outfit.required_categories();
    let named = [
        ("outfit.top_category", &categories.top),
        ("outfit.bottom_category", &categories.bottom),
        ("outfit.footwear_category", &categories.footwear),
    ];
    for (key, category) in named {
        if category.is_empty() {
            return Err(ConfigError::Validation(format!("{key} must not be empty")));
        }
    }
    if categories.top == categories.bottom
        || categories.top == categories.footwear
        || categories.bottom == categories.footwear
    {
        return Err(ConfigError::Validation(
            "outfit categories (top, bottom, footwear) must be distinct".to_string(),
        ));
    }

    if let Some(season) = &outfit.default_season {
        let season = season.trim().to_lowercase();
        if !SEASONS.contains(&season.as_str()) {
            return Err(ConfigError::Validation(format!(
                "outfit.default_season must be one of {}",
                SEASONS.join("|")
            )));
        }
    }

    if outfit.default_count == 0 {
        return Err(ConfigError::Validation(
            "outfit.default_count must be greater than zero".to_string(),
        ));
    }

    if outfit.attempt_multiplier == 0 {
        return Err(ConfigError::Validation(
            "outfit.attempt_multiplier must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    dataset: Option<DatasetPatch>,
    scoring: Option<ScoringPatch>,
    outfit: Option<OutfitPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatasetPatch {
    tabular_path: Option<PathBuf>,
    records_path: Option<PathBuf>,
    fallback: Option<FallbackSource>,
    synthetic_count: Option<usize>,
    synthetic_seed: Option<u64>,
    persist_synthetic: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct ScoringPatch {
    popularity_weight: Option<f64>,
    rating_weight: Option<f64>,
    purchase_weight: Option<f64>,
    top_k: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct OutfitPatch {
    top_category: Option<String>,
    bottom_category: Option<String>,
    footwear_category: Option<String>,
    default_season: Option<String>,
    default_count: Option<usize>,
    attempt_multiplier: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
