use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::item::{SignalMap, SignalValue};
use crate::errors::IngestError;

use super::{ItemRecord, ItemSource};

const CATEGORIES: [&str; 6] = ["shirt", "pants", "shoes", "dress", "jacket", "skirt"];
const COLORS: [&str; 10] =
    ["white", "black", "blue", "red", "green", "brown", "grey", "navy", "beige", "pink"];
const STYLES: [&str; 7] =
    ["casual", "formal", "business", "sporty", "streetwear", "vintage", "bohemian"];
const SEASONS: [&str; 5] = ["summer", "winter", "spring", "fall", "all-season"];
const FORMALITIES: [&str; 3] = ["formal", "semi-formal", "casual"];
const PATTERNS: [&str; 6] = ["solid", "striped", "floral", "plaid", "polka dot", "checkered"];
const MATERIALS: [&str; 7] = ["cotton", "silk", "wool", "polyester", "linen", "denim", "leather"];
const FITS: [&str; 5] = ["slim", "regular", "loose", "oversized", "fitted"];
const POPULARITY_LEVELS: [&str; 4] = ["low", "medium", "high", "trending"];

pub const DEFAULT_SYNTHETIC_COUNT: usize = 50;

/// Generated catalog drawn from fixed vocabularies.
#[derive(Clone, Debug)]
pub struct SyntheticSource {
    count: usize,
    seed: Option<u64>,
}

impl SyntheticSource {
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        Self { count, seed }
    }

    pub fn generate(&self) -> Vec<ItemRecord> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        (1..=self.count as u64).map(|item_id| generate_record(item_id, &mut rng)).collect()
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new(DEFAULT_SYNTHETIC_COUNT, None)
    }
}

impl ItemSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn load(&self) -> Result<Vec<ItemRecord>, IngestError> {
        Ok(self.generate())
    }
}

fn generate_record<R: Rng>(item_id: u64, rng: &mut R) -> ItemRecord {
    let mut pick = |choices: &[&str]| choices.choose(rng).copied().unwrap_or_default().to_owned();

    let category = pick(&CATEGORIES);
    let color = pick(&COLORS);
    let style = pick(&STYLES);
    let season = pick(&SEASONS);
    let formality = pick(&FORMALITIES);
    let attributes = SignalMap::from([
        ("pattern".to_owned(), SignalValue::Text(pick(&PATTERNS))),
        ("material".to_owned(), SignalValue::Text(pick(&MATERIALS))),
        ("fit".to_owned(), SignalValue::Text(pick(&FITS))),
        ("popularity".to_owned(), SignalValue::Text(pick(&POPULARITY_LEVELS))),
    ]);

    let rating = (rng.gen_range(1.0..=5.0_f64) * 10.0).round() / 10.0;
    let sales_data = SignalMap::from([
        ("rating".to_owned(), SignalValue::Number(rating)),
        ("reviews".to_owned(), SignalValue::from(rng.gen_range(0..=500_u32))),
        ("purchases".to_owned(), SignalValue::from(rng.gen_range(0..=1000_u32))),
        ("views".to_owned(), SignalValue::from(rng.gen_range(100..=10_000_u32))),
        ("likes".to_owned(), SignalValue::from(rng.gen_range(0..=500_u32))),
    ]);

    ItemRecord {
        item_id: Some(item_id),
        category,
        color,
        style,
        season,
        formality,
        attributes,
        sales_data,
    }
}
