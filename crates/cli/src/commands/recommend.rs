use chrono::Local;
use stylist_core::config::LoadOptions;
use stylist_core::season_for_date;

use crate::commands::{open_session, CommandResult};

pub fn run(
    options: &LoadOptions,
    season: Option<String>,
    count: Option<usize>,
    json: bool,
) -> CommandResult {
    let session = match open_session("recommend", options) {
        Ok(session) => session,
        Err(failure) => return failure,
    };

    let season = season
        .or_else(|| session.config.outfit.default_season.clone())
        .unwrap_or_else(|| season_for_date(Local::now().date_naive()).to_string())
        .trim()
        .to_lowercase();
    let count = count.unwrap_or(session.config.outfit.default_count);
    if count == 0 {
        return CommandResult::failure("recommend", "invalid_request", "--count must be at least 1", 3);
    }

    let batch = session.service.recommend(&season, count);

    if json {
        return CommandResult::success_with_data(
            "recommend",
            format!("{} of {count} outfits for {season}", batch.outfits.len()),
            &batch,
        );
    }

    let mut lines = Vec::new();
    if batch.is_empty() {
        lines.push("Couldn't generate recommendations:".to_string());
        lines.extend(batch.failures.iter().map(|failure| format!("- {failure}")));
    } else {
        lines.push("Recommended Outfits:".to_string());
        for (index, outfit) in batch.outfits.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("Outfit {}: {}", index + 1, outfit.description));
            lines.extend(outfit.items().iter().map(|item| format!("- {item}")));
        }
    }
    CommandResult::text(lines.join("\n"))
}
