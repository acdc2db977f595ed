use serde::Serialize;
use stylist_core::config::LoadOptions;
use stylist_core::domain::outfit::capitalize;
use stylist_core::WardrobeItem;

use crate::commands::{open_session, CommandResult};

#[derive(Debug, Serialize)]
struct CategoryGroup<'a> {
    category: &'a str,
    items: Vec<&'a WardrobeItem>,
}

pub fn run(options: &LoadOptions, json: bool) -> CommandResult {
    let session = match open_session("wardrobe", options) {
        Ok(session) => session,
        Err(failure) => return failure,
    };
    let catalog = session.service.catalog();

    let groups = catalog
        .categories()
        .into_iter()
        .map(|category| CategoryGroup { category, items: catalog.items_in_category(category) })
        .collect::<Vec<_>>();

    if json {
        return CommandResult::success_with_data(
            "wardrobe",
            format!("{} items from {} dataset", catalog.len(), session.source),
            &groups,
        );
    }

    if groups.is_empty() {
        return CommandResult::text("Your wardrobe is empty.");
    }

    let mut lines = vec!["Your Wardrobe:".to_string()];
    for group in &groups {
        lines.push(String::new());
        lines.push(format!("{}:", plural_heading(group.category)));
        lines.extend(group.items.iter().map(|item| format!("- {item}")));
    }
    CommandResult::text(lines.join("\n"))
}

fn plural_heading(category: &str) -> String {
    let heading = capitalize(category);
    if heading.ends_with('s') {
        heading
    } else {
        format!("{heading}s")
    }
}
