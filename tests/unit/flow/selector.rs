use super::*;
use crate::session::store::{JsonFileStore, MemoryStore};

const UNREADABLE_SESSIONS: [&str; 2] = [r#"{"version":2}"#, r#"{"version":1,"photoBoothImages":[]}"#];

fn session_file(name: &str, contents: &str) -> (std::path::PathBuf, JsonFileStore) {
    let root = std::env::temp_dir().join(format!(
        "stripbooth_selector_{name}_{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&root).unwrap();
    let path = root.join("session.json");
    std::fs::write(&path, contents).unwrap();
    (root, JsonFileStore::new(path))
}

#[test]
fn proceeding_without_a_choice_is_refused() {
    let mut store = MemoryStore::new();
    let selector = ShotSelector::open(&store).unwrap();
    assert_eq!(selector.selected(), None);

    let err = selector.proceed(&mut store).unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation error: Please select the number of shots before continuing!"
    );
    assert!(store.raw().is_none());
}

#[test]
fn choice_is_persisted_and_routes_to_capture() {
    let mut store = MemoryStore::new();
    let mut selector = ShotSelector::open(&store).unwrap();
    assert_eq!(selector.options().len(), 3);

    selector.choose(ShotCount::Four);
    let route = selector.proceed(&mut store).unwrap();
    assert_eq!(
        route,
        Route::Capture {
            shots: ShotCount::Four
        }
    );
    assert_eq!(route.to_string(), "/capture?shots=4");
    assert_eq!(store.load().unwrap().selected_shots, Some(ShotCount::Four));
}

#[test]
fn reopening_preselects_the_saved_count() {
    let mut store = MemoryStore::new();
    let mut first = ShotSelector::open(&store).unwrap();
    first.choose(ShotCount::Three);
    first.proceed(&mut store).unwrap();

    let again = ShotSelector::open(&store).unwrap();
    assert_eq!(again.selected(), Some(ShotCount::Three));
}

#[test]
fn unreadable_session_opens_with_nothing_selected() {
    for (i, contents) in UNREADABLE_SESSIONS.iter().enumerate() {
        let (root, store) = session_file(&format!("open_{i}"), contents);
        assert!(store.load().is_err());

        let selector = ShotSelector::open(&store).unwrap();
        assert_eq!(selector.selected(), None);
        std::fs::remove_dir_all(&root).ok();
    }
}

#[test]
fn proceeding_replaces_an_unreadable_session() {
    for (i, contents) in UNREADABLE_SESSIONS.iter().enumerate() {
        let (root, mut store) = session_file(&format!("proceed_{i}"), contents);
        let mut selector = ShotSelector::open(&store).unwrap();
        selector.choose(ShotCount::One);

        assert_eq!(
            selector.proceed(&mut store).unwrap(),
            Route::Capture {
                shots: ShotCount::One
            }
        );
        let state = store.load().unwrap();
        assert_eq!(state.version, crate::session::state::SESSION_VERSION);
        assert_eq!(state.selected_shots, Some(ShotCount::One));
        assert_eq!(state.baked, None);
        std::fs::remove_dir_all(&root).ok();
    }
}
