use serde::Serialize;
use stylist_core::config::LoadOptions;
use stylist_core::styling::DEFAULT_POPULAR_LIMIT;
use stylist_core::WardrobeItem;

use crate::commands::{open_session, CommandResult};

#[derive(Debug, Serialize)]
struct RankedItem<'a> {
    rank: usize,
    score: f64,
    item: &'a WardrobeItem,
}

pub fn run(options: &LoadOptions, limit: Option<usize>, json: bool) -> CommandResult {
    let session = match open_session("popular", options) {
        Ok(session) => session,
        Err(failure) => return failure,
    };

    let ranked = session
        .service
        .popular(limit.unwrap_or(DEFAULT_POPULAR_LIMIT))
        .into_iter()
        .enumerate()
        .map(|(index, (item, score))| RankedItem { rank: index + 1, score, item })
        .collect::<Vec<_>>();

    if json {
        return CommandResult::success_with_data(
            "popular",
            format!("{} ranked items", ranked.len()),
            &ranked,
        );
    }

    if ranked.is_empty() {
        return CommandResult::text("No items found with popularity data.");
    }

    let mut lines = vec!["Popular Items in Your Wardrobe:".to_string()];
    lines.extend(ranked.iter().map(|entry| {
        format!("{}. {} - Popularity Score: {:.1}", entry.rank, entry.item, entry.score)
    }));
    CommandResult::text(lines.join("\n"))
}
