//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use snippy_server::{create_app, AppState, Config, Database, PasteStore};
use std::path::Path;
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        public_url: "http://snippy.test".to_string(),
        max_paste_size: 10_000,
        ..Config::default()
    }
}

pub(crate) fn test_server_for_state(state: AppState) -> TestServer {
    TestServer::new(create_app(state, false)).expect("server")
}

/// Server over a fresh database; `seed` runs against the open database first.
pub(crate) fn setup_test_server_with(seed: impl FnOnce(&Database)) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config_for_db_path(&temp_dir.path().join("db"));
    let db = Database::new(config.db_path.as_str()).expect("open db");
    seed(&db);
    let server = test_server_for_state(AppState::new(config, db));
    (server, temp_dir)
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    setup_test_server_with(|_| {})
}

pub(crate) fn test_server_for_store(store: PasteStore) -> TestServer {
    let config = test_config_for_db_path(Path::new("/unused"));
    test_server_for_state(AppState::with_store(config, store))
}
