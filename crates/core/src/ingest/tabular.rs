use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use crate::domain::item::{SignalMap, SignalValue};
use crate::errors::IngestError;

use super::{ItemRecord, ItemSource};

const ATTRIBUTE_COLUMNS: [&str; 8] =
    ["pattern", "material", "sleeve_length", "neckline", "fit", "length", "price_range", "popularity"];
const SALES_COLUMNS: [&str; 6] = ["rating", "reviews", "sales", "purchases", "views", "likes"];

/// Row-per-item CSV dataset such as the dresses attribute/sales export.
#[derive(Clone, Debug)]
pub struct TabularSource {
    path: PathBuf,
}

impl TabularSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<ItemRecord>, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers()?.iter().map(normalize_header).collect::<Vec<_>>();

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            let cells = headers
                .iter()
                .zip(row.iter())
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(header, cell)| (header.as_str(), cell))
                .collect::<BTreeMap<_, _>>();

            records.push(row_to_record(index as u64 + 1, &cells));
        }

        Ok(records)
    }
}

impl ItemSource for TabularSource {
    fn name(&self) -> &'static str {
        "tabular"
    }

    fn load(&self) -> Result<Vec<ItemRecord>, IngestError> {
        let file = File::open(&self.path)
            .map_err(|source| IngestError::Read { path: self.path.clone(), source })?;
        Self::read_records(file)
            .map_err(|source| IngestError::Tabular { path: self.path.clone(), source })
    }
}

fn row_to_record(item_id: u64, cells: &BTreeMap<&str, &str>) -> ItemRecord {
    let core = |column: &str, default: &str| cells.get(column).copied().unwrap_or(default).to_owned();

    let attributes = ATTRIBUTE_COLUMNS
        .iter()
        .filter_map(|column| cells.get(column).map(|cell| (column.to_string(), SignalValue::from(*cell))))
        .collect::<SignalMap>();

    let sales_data = SALES_COLUMNS
        .iter()
        .filter_map(|column| cells.get(column).map(|cell| (column.to_string(), sales_value(cell))))
        .collect::<SignalMap>();

    ItemRecord {
        item_id: Some(item_id),
        category: core("category", "dress"),
        color: core("color", "unknown"),
        style: core("style", "casual"),
        season: core("season", "all-season"),
        formality: core("formality", "casual"),
        attributes,
        sales_data,
    }
}

fn sales_value(cell: &str) -> SignalValue {
    match cell.parse::<f64>() {
        Ok(number) if number.is_finite() => SignalValue::Number(number),
        _ => SignalValue::from(cell),
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace([' ', '-'], "_")
}
