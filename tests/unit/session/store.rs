use super::*;
use crate::foundation::core::ShotCount;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "stripbooth_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn missing_file_loads_default_state() {
    let store = JsonFileStore::new(temp_path("absent").join("session.json"));
    assert_eq!(store.load().unwrap(), SessionState::default());
}

#[test]
fn file_store_round_trips_and_creates_parent_dirs() {
    let root = temp_path("file_store");
    let mut store = JsonFileStore::new(root.join("nested").join("session.json"));

    let state = SessionState {
        selected_shots: Some(ShotCount::Three),
        ..SessionState::default()
    };
    store.save(&state).unwrap();
    assert_eq!(store.load().unwrap(), state);
    assert!(!store.path().with_extension("json.tmp").exists());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn corrupt_file_is_an_error_not_a_reset() {
    let root = temp_path("corrupt_store");
    std::fs::create_dir_all(&root).unwrap();
    let path = root.join("session.json");
    std::fs::write(&path, b"[]").unwrap();

    assert!(JsonFileStore::new(&path).load().is_err());
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn load_or_default_recovers_from_a_stale_document_and_update_overwrites_it() {
    let root = temp_path("stale_store");
    std::fs::create_dir_all(&root).unwrap();
    let path = root.join("session.json");
    std::fs::write(&path, br#"{"version":2,"selectedShots":"3"}"#).unwrap();

    let mut store = JsonFileStore::new(&path);
    assert!(matches!(store.load(), Err(BoothError::Session(_))));
    assert_eq!(store.load_or_default().unwrap(), SessionState::default());

    store
        .update(&mut |s| s.selected_shots = Some(ShotCount::One))
        .unwrap();
    assert_eq!(store.load().unwrap().selected_shots, Some(ShotCount::One));
    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn memory_store_update_persists_serialized_state() {
    let mut store = MemoryStore::new();
    assert!(store.raw().is_none());

    let out = store
        .update(&mut |s| s.selected_shots = Some(ShotCount::Four))
        .unwrap();
    assert_eq!(out.selected_shots, Some(ShotCount::Four));

    let raw = String::from_utf8(store.raw().unwrap().to_vec()).unwrap();
    assert!(raw.contains("\"selectedShots\": \"4\""));
    assert_eq!(store.load().unwrap().selected_shots, Some(ShotCount::Four));
}
