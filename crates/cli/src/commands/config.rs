use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use stylist_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use toml::Value;

use crate::commands::CommandResult;

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let config_file_path = detect_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| match override_flag(key_path, &options.overrides) {
        Some(flag) => format!("override ({flag})"),
        None => field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref()),
    };

    let dataset = &config.dataset;
    let scoring = &config.scoring;
    let outfit = &config.outfit;
    let entries = [
        (
            "dataset.tabular_path",
            dataset.tabular_path.display().to_string(),
            &["STYLIST_DATASET_TABULAR_PATH"][..],
        ),
        (
            "dataset.records_path",
            dataset.records_path.display().to_string(),
            &["STYLIST_DATASET_RECORDS_PATH"][..],
        ),
        ("dataset.fallback", format!("{:?}", dataset.fallback), &["STYLIST_DATASET_FALLBACK"][..]),
        (
            "dataset.synthetic_count",
            dataset.synthetic_count.to_string(),
            &["STYLIST_DATASET_SYNTHETIC_COUNT"][..],
        ),
        (
            "dataset.synthetic_seed",
            dataset.synthetic_seed.map(|seed| seed.to_string()).unwrap_or_else(|| "<unset>".to_string()),
            &["STYLIST_DATASET_SYNTHETIC_SEED"][..],
        ),
        (
            "dataset.persist_synthetic",
            dataset.persist_synthetic.to_string(),
            &["STYLIST_DATASET_PERSIST_SYNTHETIC"][..],
        ),
        (
            "scoring.popularity_weight",
            scoring.popularity_weight.to_string(),
            &["STYLIST_SCORING_POPULARITY_WEIGHT"][..],
        ),
        (
            "scoring.rating_weight",
            scoring.rating_weight.to_string(),
            &["STYLIST_SCORING_RATING_WEIGHT"][..],
        ),
        (
            "scoring.purchase_weight",
            scoring.purchase_weight.to_string(),
            &["STYLIST_SCORING_PURCHASE_WEIGHT"][..],
        ),
        ("scoring.top_k", scoring.top_k.to_string(), &["STYLIST_SCORING_TOP_K"][..]),
        ("outfit.top_category", outfit.top_category.clone(), &["STYLIST_OUTFIT_TOP_CATEGORY"][..]),
        (
            "outfit.bottom_category",
            outfit.bottom_category.clone(),
            &["STYLIST_OUTFIT_BOTTOM_CATEGORY"][..],
        ),
        (
            "outfit.footwear_category",
            outfit.footwear_category.clone(),
            &["STYLIST_OUTFIT_FOOTWEAR_CATEGORY"][..],
        ),
        (
            "outfit.default_season",
            outfit.default_season.clone().unwrap_or_else(|| "<by date>".to_string()),
            &["STYLIST_OUTFIT_DEFAULT_SEASON"][..],
        ),
        (
            "outfit.default_count",
            outfit.default_count.to_string(),
            &["STYLIST_OUTFIT_DEFAULT_COUNT"][..],
        ),
        (
            "outfit.attempt_multiplier",
            outfit.attempt_multiplier.to_string(),
            &["STYLIST_OUTFIT_ATTEMPT_MULTIPLIER"][..],
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            &["STYLIST_LOGGING_LEVEL", "STYLIST_LOG_LEVEL"][..],
        ),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            &["STYLIST_LOGGING_FORMAT", "STYLIST_LOG_FORMAT"][..],
        ),
    ];

    let mut lines = vec!["effective config (source precedence: flag override > env > file > default):".to_string()];
    lines.extend(
        entries
            .iter()
            .map(|(key, value, env_keys)| render_line(key, value, source(key, env_keys))),
    );

    CommandResult::text(lines.join("\n"))
}

fn detect_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    let root = PathBuf::from("stylist.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/stylist.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn override_flag(key_path: &str, overrides: &ConfigOverrides) -> Option<&'static str> {
    let (flag, set) = match key_path {
        "dataset.tabular_path" => ("--tabular", overrides.tabular_path.is_some()),
        "dataset.records_path" => ("--records", overrides.records_path.is_some()),
        "dataset.fallback" => ("--fallback", overrides.fallback.is_some()),
        "dataset.synthetic_seed" => ("--seed", overrides.synthetic_seed.is_some()),
        "logging.level" => ("--log-level", overrides.log_level.is_some()),
        _ => return None,
    };
    set.then_some(flag)
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
