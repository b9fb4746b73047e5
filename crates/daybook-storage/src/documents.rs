use daybook_model::AppData;

use crate::error::Result;
use crate::store::KeyValueStore;

/// Read and parse the document in `key`. An absent slot is `Ok(None)`; a slot
/// whose contents cannot be parsed is an error.
pub fn read_document(store: &dyn KeyValueStore, key: &str) -> Result<Option<AppData>> {
    match store.get(key)? {
        Some(text) => Ok(Some(AppData::from_json(&text)?)),
        None => Ok(None),
    }
}

pub fn write_document(store: &dyn KeyValueStore, key: &str, doc: &AppData) -> Result<()> {
    let text = doc.to_json()?;
    store.set(key, &text)
}
