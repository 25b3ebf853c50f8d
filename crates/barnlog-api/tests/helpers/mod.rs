//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p barnlog-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use barnlog_api::setup::routes;
use barnlog_api::AppState;
use barnlog_core::UploadLimits;
use barnlog_storage::LocalPhotoStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Test application: server plus the temporary photo store directory it writes into.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn store_dir(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Files currently present in the photo store.
    pub fn stored_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.store_dir())
            .expect("read store dir")
            .map(|entry| entry.expect("dir entry").path())
            .collect()
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_limits(UploadLimits::default()).await
}

pub async fn setup_test_app_with_limits(limits: UploadLimits) -> TestApp {
    let (router, temp_dir) = setup_test_router_with_limits(limits).await;
    let server = TestServer::new(router.into_make_service()).expect("start test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}

/// Router backed by a store in a fresh temporary directory, for driving requests with
/// `tower::ServiceExt::oneshot` when the body has to arrive in several frames.
pub async fn setup_test_router_with_limits(limits: UploadLimits) -> (Router, TempDir) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let store = LocalPhotoStore::new(temp_dir.path())
        .await
        .expect("open photo store");

    let state = Arc::new(
        AppState::new(Arc::new(store), Duration::from_secs(30)).with_limits(limits),
    );
    (routes::setup_routes(state), temp_dir)
}
