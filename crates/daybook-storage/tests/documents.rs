use chrono::NaiveDate;
use daybook_model::{AppData, DocumentLayout};
use daybook_storage::slots::{snapshot_key, snapshot_names, AUTOSAVE_KEY};
use daybook_storage::{read_document, write_document, FileStore, KeyValueStore, StorageError};
use pretty_assertions::assert_eq;

fn fresh() -> AppData {
    AppData::with_layout_on(
        &DocumentLayout::default(),
        NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date"),
    )
}

#[test]
fn documents_survive_reopening_the_file_store() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let path = tmp.path().join("daybook").join("store.json");

    let mut doc = fresh();
    doc.accounting.month = "July 2024".to_string();
    {
        let store = FileStore::open(&path).expect("open");
        write_document(&store, AUTOSAVE_KEY, &doc).expect("autosave");
        write_document(&store, &snapshot_key("July 2024"), &doc).expect("snapshot");
    }

    let store = FileStore::open(&path).expect("reopen");
    assert_eq!(snapshot_names(&store).expect("names"), vec!["July 2024"]);
    assert_eq!(
        read_document(&store, AUTOSAVE_KEY).expect("read"),
        Some(doc.clone())
    );
    assert_eq!(
        read_document(&store, &snapshot_key("July 2024")).expect("read"),
        Some(doc)
    );
}

#[test]
fn absent_slot_reads_as_none_and_garbage_as_error() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let store = FileStore::open(tmp.path().join("store.json")).expect("open");

    assert_eq!(read_document(&store, AUTOSAVE_KEY).expect("read"), None);

    store.set(AUTOSAVE_KEY, "{not json").expect("set");
    assert!(matches!(
        read_document(&store, AUTOSAVE_KEY),
        Err(StorageError::Document(_))
    ));

    store
        .set(AUTOSAVE_KEY, r#"{"sales": {}, "statement": {}}"#)
        .expect("set");
    assert!(matches!(
        read_document(&store, AUTOSAVE_KEY),
        Err(StorageError::Document(_))
    ));
}
