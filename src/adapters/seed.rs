use std::path::Path;

use crate::adapters::memory::InMemoryCandidateSource;
use crate::domain::model::Item;
use crate::utils::error::Result;

/// Reads items from a headered CSV seed file. Column names follow the
/// store's field names (`item_id`, `name`, `latitude`, ...); missing
/// columns take the item's default values.
pub fn load_items_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut items = Vec::new();

    for record in reader.deserialize() {
        let item: Item = record?;
        items.push(item);
    }

    tracing::info!("Loaded {} items from seed file", items.len());
    Ok(items)
}

/// Convenience wrapper: seed file straight into a candidate source.
pub fn source_from_csv<P: AsRef<Path>>(path: P) -> Result<InMemoryCandidateSource> {
    Ok(InMemoryCandidateSource::new(load_items_csv(path)?))
}
