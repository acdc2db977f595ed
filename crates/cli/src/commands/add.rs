use stylist_core::config::LoadOptions;
use stylist_core::ingest::RecordsSource;
use stylist_core::{ApplicationError, NewItem, SignalMap};
use tracing::info;

use crate::commands::{open_session, CommandResult};

#[derive(Clone, Debug, Default)]
pub struct AddArgs {
    pub category: String,
    pub color: String,
    pub style: String,
    pub season: String,
    pub formality: String,
    pub pattern: Option<String>,
    pub material: Option<String>,
    pub fit: Option<String>,
    pub popularity: Option<String>,
}

impl AddArgs {
    fn into_new_item(self) -> NewItem {
        let attributes = [
            ("pattern", self.pattern),
            ("material", self.material),
            ("fit", self.fit),
            ("popularity", self.popularity),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value?.trim().to_lowercase();
            (!value.is_empty()).then(|| (key.to_string(), value.into()))
        })
        .collect::<SignalMap>();

        NewItem {
            category: self.category,
            color: self.color,
            style: self.style,
            season: self.season,
            formality: self.formality,
            attributes,
            sales: SignalMap::new(),
        }
    }
}

pub fn run(options: &LoadOptions, args: AddArgs, json: bool) -> CommandResult {
    let mut session = match open_session("add", options) {
        Ok(session) => session,
        Err(failure) => return failure,
    };

    if !session.records_writable {
        return CommandResult::failure(
            "add",
            "dataset_read_only",
            format!(
                "wardrobe loaded from {} data; saving to `{}` would not be read back, so nothing was added",
                session.source,
                session.config.dataset.records_path.display()
            ),
            4,
        );
    }

    let item = match session.service.add_item(args.into_new_item()) {
        Ok(item) => item.clone(),
        Err(error) => {
            let error = ApplicationError::from(error);
            return CommandResult::failure("add", error.class(), error.to_string(), 3);
        }
    };

    let records_path = &session.config.dataset.records_path;
    if let Err(error) = RecordsSource::save(records_path, session.service.catalog().items()) {
        let error = ApplicationError::from(error);
        return CommandResult::failure("add", error.class(), error.to_string(), 4);
    }

    info!(
        event_name = "catalog.item.saved",
        item_id = %item.id,
        path = %records_path.display(),
        "wardrobe item saved"
    );

    if json {
        return CommandResult::success_with_data("add", format!("added item {}", item.id), &item);
    }
    CommandResult::text(format!("Added to wardrobe: {item}"))
}
