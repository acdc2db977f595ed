use chrono::{Datelike, NaiveDate};

use crate::domain::item::WardrobeItem;

/// Sentinel season meaning the item can be worn in every season.
pub const ALL_SEASON: &str = "all-season";

pub const SEASONS: [&str; 4] = ["spring", "summer", "fall", "winter"];

/// Northern-hemisphere meteorological season for a calendar date.
pub fn season_for_date(date: NaiveDate) -> &'static str {
    match date.month() {
        12 | 1 | 2 => "winter",
        3..=5 => "spring",
        6..=8 => "summer",
        _ => "fall",
    }
}

pub fn season_eligible(item: &WardrobeItem, target_season: &str) -> bool {
    item.season == ALL_SEASON || item.season == target_season.trim().to_lowercase()
}
