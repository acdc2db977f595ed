use crate::domain::item::SignalMap;
use crate::errors::IngestError;

use super::{ItemRecord, ItemSource};

/// (category, color, style, season, formality)
const STARTER_WARDROBE: [(&str, &str, &str, &str, &str); 12] = [
    ("shirt", "white", "casual", "all-season", "casual"),
    ("shirt", "blue", "formal", "all-season", "formal"),
    ("shirt", "black", "casual", "all-season", "casual"),
    ("shirt", "red", "sporty", "summer", "casual"),
    ("pants", "blue", "casual", "all-season", "casual"),
    ("pants", "black", "formal", "all-season", "formal"),
    ("pants", "beige", "casual", "summer", "casual"),
    ("pants", "grey", "formal", "all-season", "formal"),
    ("shoes", "white", "casual", "all-season", "casual"),
    ("shoes", "black", "formal", "all-season", "formal"),
    ("shoes", "brown", "casual", "all-season", "semi-formal"),
    ("shoes", "blue", "sporty", "summer", "casual"),
];

/// Fixed starter wardrobe of four shirts, four pants and four pairs of shoes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleSource;

impl ItemSource for SampleSource {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn load(&self) -> Result<Vec<ItemRecord>, IngestError> {
        Ok(STARTER_WARDROBE
            .iter()
            .zip(1_u64..)
            .map(|(&(category, color, style, season, formality), item_id)| ItemRecord {
                item_id: Some(item_id),
                category: category.to_owned(),
                color: color.to_owned(),
                style: style.to_owned(),
                season: season.to_owned(),
                formality: formality.to_owned(),
                attributes: SignalMap::new(),
                sales_data: SignalMap::new(),
            })
            .collect())
    }
}
