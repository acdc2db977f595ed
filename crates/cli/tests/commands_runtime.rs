use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use serde_json::Value;
use stylist_cli::commands::add::AddArgs;
use stylist_cli::commands::{add, config, popular, recommend, search, wardrobe};
use stylist_core::config::{ConfigOverrides, LoadOptions};
use stylist_core::ingest::RecordsSource;
use stylist_core::{ItemId, SignalMap, WardrobeItem};
use tempfile::TempDir;

#[test]
fn wardrobe_lists_sample_items_grouped_by_category() {
    with_dataset(&[("STYLIST_DATASET_FALLBACK", "sample")], |_| {
        let result = wardrobe::run(&defaults(), true);
        assert_eq!(result.exit_code, 0, "expected wardrobe success");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "wardrobe");
        assert_eq!(payload["status"], "ok");

        let groups = payload["data"].as_array().expect("category groups");
        let categories = groups.iter().map(|group| group["category"].clone()).collect::<Vec<_>>();
        assert_eq!(categories, vec!["pants", "shirt", "shoes"]);
        assert!(groups.iter().all(|group| group["items"].as_array().map(Vec::len) == Some(4)));
    });
}

#[test]
fn wardrobe_text_output_uses_item_display() {
    with_dataset(&[("STYLIST_DATASET_FALLBACK", "sample")], |_| {
        let result = wardrobe::run(&defaults(), false);
        assert_eq!(result.exit_code, 0);
        assert!(result.output.starts_with("Your Wardrobe:"));
        assert!(result.output.contains("Shirts:"));
        assert!(result.output.contains("- white casual shirt (casual, all-season)"));
    });
}

#[test]
fn synthetic_fallback_is_persisted_for_the_next_run() {
    with_dataset(&[("STYLIST_DATASET_SYNTHETIC_SEED", "5")], |dir| {
        let first = wardrobe::run(&defaults(), true);
        assert_eq!(first.exit_code, 0);
        assert!(parse_payload(&first.output)["message"]
            .as_str()
            .is_some_and(|message| message.contains("50 items from synthetic dataset")));
        assert!(dir.join("fashion_dataset.json").exists());

        let second = wardrobe::run(&defaults(), true);
        assert!(parse_payload(&second.output)["message"]
            .as_str()
            .is_some_and(|message| message.contains("50 items from records dataset")));
    });
}

#[test]
fn add_assigns_next_id_and_saves_records() {
    with_dataset(&[("STYLIST_DATASET_FALLBACK", "sample")], |dir| {
        let result = add::run(
            &defaults(),
            AddArgs {
                category: "Jacket".to_string(),
                color: "navy".to_string(),
                style: "business".to_string(),
                season: "fall".to_string(),
                formality: "semi-formal".to_string(),
                material: Some("Wool".to_string()),
                fit: Some("  ".to_string()),
                ..AddArgs::default()
            },
            true,
        );
        assert_eq!(result.exit_code, 0, "expected add success: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "add");
        assert_eq!(payload["data"]["id"], 13);
        assert_eq!(payload["data"]["category"], "jacket");
        assert_eq!(payload["data"]["attributes"]["material"], "wool");
        assert!(payload["data"]["attributes"].get("fit").is_none());

        let saved: Value = serde_json::from_str(
            &fs::read_to_string(dir.join("fashion_dataset.json")).expect("records file"),
        )
        .expect("records json");
        assert_eq!(saved["items"].as_array().map(Vec::len), Some(13));

        let search = search::run(&defaults(), "category", "JACKET", true);
        let matches = parse_payload(&search.output);
        assert_eq!(matches["data"].as_array().map(Vec::len), Some(1));
    });
}

#[test]
fn add_rejects_blank_fields_with_invalid_item_class() {
    with_dataset(&[("STYLIST_DATASET_FALLBACK", "sample")], |dir| {
        let result = add::run(
            &defaults(),
            AddArgs {
                category: "shirt".to_string(),
                color: " ".to_string(),
                style: "casual".to_string(),
                season: "summer".to_string(),
                formality: "casual".to_string(),
                ..AddArgs::default()
            },
            false,
        );
        assert_eq!(result.exit_code, 3, "expected invalid item exit code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "invalid_item");
        assert!(!dir.join("fashion_dataset.json").exists());
    });
}

#[test]
fn recommend_builds_the_only_compatible_outfit() {
    with_dataset(&[], |dir| {
        write_records(
            dir,
            &[
                item(1, "shirt", "white", "casual", "all-season", "casual"),
                item(2, "pants", "blue", "casual", "all-season", "casual"),
                item(3, "shoes", "white", "casual", "all-season", "casual"),
            ],
        );

        let result = recommend::run(&defaults(), Some("Summer".to_string()), Some(1), true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["data"]["attempts"], 1);
        let outfit = &payload["data"]["outfits"][0];
        assert_eq!(outfit["description"], "Casual casual outfit for summer");
        assert_eq!(outfit["top"]["id"], 1);
        assert_eq!(outfit["bottom"]["id"], 2);
        assert_eq!(outfit["footwear"]["id"], 3);
    });
}

#[test]
fn recommend_reports_failure_reasons_without_failing() {
    with_dataset(&[("STYLIST_OUTFIT_DEFAULT_COUNT", "1")], |dir| {
        write_records(dir, &[item(1, "shirt", "white", "casual", "all-season", "casual")]);

        let result = recommend::run(&defaults(), Some("winter".to_string()), None, false);
        assert_eq!(result.exit_code, 0, "zero outfits is not a command failure");
        assert!(result.output.starts_with("Couldn't generate recommendations:"));
        assert_eq!(
            result.output.matches("- missing required categories: pants, shoes").count(),
            3,
            "one reason per attempt within the 3x budget"
        );
    });
}

#[test]
fn popular_ranks_trending_items_first() {
    with_dataset(&[], |dir| {
        let trending = item(2, "dress", "red", "vintage", "summer", "casual")
            .with_attributes(SignalMap::from([("popularity".to_string(), "trending".into())]));
        write_records(dir, &[item(1, "shirt", "white", "casual", "all-season", "casual"), trending]);

        let result = popular::run(&defaults(), Some(1), true);
        let payload = parse_payload(&result.output);
        let ranked = payload["data"].as_array().expect("ranked items");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0]["rank"], 1);
        assert_eq!(ranked[0]["item"]["id"], 2);

        let text = popular::run(&defaults(), None, false);
        assert!(text.output.contains("1. red vintage dress (casual, summer) [trending] - Popularity Score: 4.0"));
    });
}

#[test]
fn search_reports_no_matches_in_text_mode() {
    with_dataset(&[("STYLIST_DATASET_FALLBACK", "sample")], |_| {
        let result = search::run(&defaults(), "Material", "Silk", false);
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.output, "No items found with material=silk");
    });
}

#[test]
fn data_commands_return_config_failure_on_invalid_env() {
    with_dataset(&[("STYLIST_SCORING_TOP_K", "0")], |_| {
        for result in [
            wardrobe::run(&defaults(), true),
            recommend::run(&defaults(), None, None, true),
            popular::run(&defaults(), None, false),
        ] {
            assert_eq!(result.exit_code, 2, "expected config validation failure code");

            let payload = parse_payload(&result.output);
            assert_eq!(payload["status"], "error");
            assert_eq!(payload["error_class"], "config_validation");
        }
    });
}

#[test]
fn config_reports_env_sources() {
    with_dataset(&[("STYLIST_LOG_LEVEL", "debug")], |_| {
        let result = config::run(&defaults());
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("(source: env (STYLIST_DATASET_RECORDS_PATH))"));
        assert!(result.output.contains("- logging.level = debug (source: env (STYLIST_LOG_LEVEL))"));
        assert!(result.output.contains("- scoring.top_k = 3 (source: default)"));
    });
}

#[test]
fn recommend_rejects_zero_count() {
    with_dataset(&[("STYLIST_DATASET_FALLBACK", "sample")], |_| {
        for json in [true, false] {
            let result = recommend::run(&defaults(), Some("summer".to_string()), Some(0), json);
            assert_eq!(result.exit_code, 3);

            let payload = parse_payload(&result.output);
            assert_eq!(payload["error_class"], "invalid_request");
            assert_eq!(payload["message"], "--count must be at least 1");
        }
    });
}

#[test]
fn add_after_gap_in_ids_keeps_every_item() {
    with_dataset(&[], |dir| {
        write_records(
            dir,
            &[
                item(1, "shirt", "white", "casual", "all-season", "casual"),
                item(3, "pants", "blue", "casual", "all-season", "casual"),
            ],
        );

        let result = add::run(&defaults(), shoes(), true);
        assert_eq!(result.exit_code, 0, "expected add success: {}", result.output);
        assert_eq!(parse_payload(&result.output)["data"]["id"], 3);

        let listing = wardrobe::run(&defaults(), true);
        assert_eq!(parse_payload(&listing.output)["message"], "3 items from records dataset");
    });
}

#[test]
fn add_refuses_to_write_records_when_tabular_dataset_is_loaded() {
    with_dataset(&[], |dir| {
        fs::write(dir.join("absent.csv"), "Style,Season,Rating\nsexy,summer,4.6\n").expect("csv fixture");
        write_records(dir, &[item(1, "shirt", "white", "casual", "all-season", "casual")]);
        let before = fs::read_to_string(dir.join("fashion_dataset.json")).expect("records file");

        let result = add::run(&defaults(), shoes(), true);
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "dataset_read_only");
        assert_eq!(fs::read_to_string(dir.join("fashion_dataset.json")).expect("records file"), before);
    });
}

#[test]
fn add_leaves_unreadable_records_file_untouched() {
    with_dataset(&[("STYLIST_DATASET_FALLBACK", "sample")], |dir| {
        fs::write(dir.join("fashion_dataset.json"), "{\"items\": [").expect("records fixture");

        let result = add::run(&defaults(), shoes(), false);
        assert_eq!(result.exit_code, 4);
        assert_eq!(parse_payload(&result.output)["error_class"], "dataset_read_only");
        assert_eq!(fs::read_to_string(dir.join("fashion_dataset.json")).expect("records file"), "{\"items\": [");
    });
}

#[test]
fn records_flag_overrides_env_dataset_path() {
    with_dataset(&[("STYLIST_DATASET_FALLBACK", "sample")], |dir| {
        let mine = dir.join("mine.json");
        RecordsSource::save(
            &mine,
            &[
                item(1, "shirt", "white", "casual", "all-season", "casual"),
                item(2, "pants", "blue", "casual", "all-season", "casual"),
            ],
        )
        .expect("records fixture");
        let options = LoadOptions {
            overrides: ConfigOverrides { records_path: Some(mine.clone()), ..ConfigOverrides::default() },
            ..LoadOptions::default()
        };

        let listing = wardrobe::run(&options, true);
        assert_eq!(parse_payload(&listing.output)["message"], "2 items from records dataset");

        let report = config::run(&options);
        assert!(report
            .output
            .contains(&format!("- dataset.records_path = {} (source: override (--records))", mine.display())));
    });
}

#[test]
fn missing_explicit_config_file_is_a_config_failure() {
    with_dataset(&[], |dir| {
        let options =
            LoadOptions { config_path: Some(dir.join("nope.toml")), require_file: true, ..LoadOptions::default() };

        let result = wardrobe::run(&options, true);
        assert_eq!(result.exit_code, 2);
        assert_eq!(parse_payload(&result.output)["error_class"], "config_validation");
    });
}

fn defaults() -> LoadOptions {
    LoadOptions::default()
}

fn shoes() -> AddArgs {
    AddArgs {
        category: "shoes".to_string(),
        color: "white".to_string(),
        style: "casual".to_string(),
        season: "all-season".to_string(),
        formality: "casual".to_string(),
        ..AddArgs::default()
    }
}

fn item(id: u64, category: &str, color: &str, style: &str, season: &str, formality: &str) -> WardrobeItem {
    WardrobeItem::new(ItemId(id), category, color, style, season, formality).expect("valid item")
}

fn write_records(dir: &Path, items: &[WardrobeItem]) {
    RecordsSource::save(&dir.join("fashion_dataset.json"), items).expect("records fixture");
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

/// Points the dataset at a fresh temp dir, applies `vars`, and restores the environment afterwards.
fn with_dataset(vars: &[(&str, &str)], test_fn: impl FnOnce(&Path)) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(PoisonError::into_inner);

    let keys = [
        "STYLIST_DATASET_TABULAR_PATH",
        "STYLIST_DATASET_RECORDS_PATH",
        "STYLIST_DATASET_FALLBACK",
        "STYLIST_DATASET_SYNTHETIC_COUNT",
        "STYLIST_DATASET_SYNTHETIC_SEED",
        "STYLIST_DATASET_PERSIST_SYNTHETIC",
        "STYLIST_SCORING_POPULARITY_WEIGHT",
        "STYLIST_SCORING_RATING_WEIGHT",
        "STYLIST_SCORING_PURCHASE_WEIGHT",
        "STYLIST_SCORING_TOP_K",
        "STYLIST_OUTFIT_TOP_CATEGORY",
        "STYLIST_OUTFIT_BOTTOM_CATEGORY",
        "STYLIST_OUTFIT_FOOTWEAR_CATEGORY",
        "STYLIST_OUTFIT_DEFAULT_SEASON",
        "STYLIST_OUTFIT_DEFAULT_COUNT",
        "STYLIST_OUTFIT_ATTEMPT_MULTIPLIER",
        "STYLIST_LOGGING_LEVEL",
        "STYLIST_LOGGING_FORMAT",
        "STYLIST_LOG_LEVEL",
        "STYLIST_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    let dir = TempDir::new().expect("temp dir");
    for key in &keys {
        env::remove_var(key);
    }
    env::set_var("STYLIST_DATASET_TABULAR_PATH", dir.path().join("absent.csv"));
    env::set_var("STYLIST_DATASET_RECORDS_PATH", dir.path().join("fashion_dataset.json"));
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn(dir.path());

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
