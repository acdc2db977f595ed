use stylist_core::config::LoadOptions;

use crate::commands::{open_session, CommandResult};

pub fn run(options: &LoadOptions, attribute: &str, value: &str, json: bool) -> CommandResult {
    let session = match open_session("search", options) {
        Ok(session) => session,
        Err(failure) => return failure,
    };

    let attribute = attribute.trim().to_lowercase();
    let value = value.trim().to_lowercase();
    let matches = session.service.search(&attribute, &value);

    if json {
        return CommandResult::success_with_data(
            "search",
            format!("{} items matching {attribute}={value}", matches.len()),
            &matches,
        );
    }

    if matches.is_empty() {
        return CommandResult::text(format!("No items found with {attribute}={value}"));
    }

    let mut lines = vec![format!("Found {} items matching {attribute}={value}:", matches.len())];
    lines.extend(matches.iter().enumerate().map(|(index, item)| format!("{}. {item}", index + 1)));
    CommandResult::text(lines.join("\n"))
}
