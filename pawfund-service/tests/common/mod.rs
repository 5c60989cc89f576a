/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - A fresh application state over a temporary store directory
/// - Upload fixture files written into the same temporary directory
/// - Registration and profile helpers

use pawfund_service::account::RegisterRequest;
use pawfund_service::app::AppState;
use pawfund_service::config::{Config, IngestConfig, StoreConfig};
use pawfund_service::ingest::FileUpload;
use pawfund_service::profile::ProfileForm;
use pawfund_shared::models::user::User;
use std::path::Path;
use tempfile::TempDir;

/// Test context containing all necessary resources
pub struct TestContext {
    /// Owns the store and upload directories for the test's lifetime
    pub dir: TempDir,
    pub app: AppState,
}

impl TestContext {
    /// Creates a new test context over a fresh store directory
    pub fn new() -> anyhow::Result<Self> {
        Self::with_read_timeout(5)
    }

    /// Creates a test context with a custom ingestion read timeout
    pub fn with_read_timeout(read_timeout_secs: u64) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = Config {
            store: StoreConfig {
                data_dir: dir.path().join("data"),
            },
            ingest: IngestConfig {
                read_timeout_secs,
                max_file_bytes: 64 * 1024,
            },
            ..Config::default()
        };
        let app = AppState::new(config)?;

        Ok(TestContext { dir, app })
    }

    /// Reopens the application state over the same store directory
    ///
    /// Simulates a restart: every collection must survive.
    pub fn reopen(&self) -> anyhow::Result<AppState> {
        Ok(AppState::new((*self.app.config).clone())?)
    }

    /// Registers an account and leaves its session established
    pub async fn register(&self, email: &str) -> anyhow::Result<User> {
        Ok(self
            .app
            .accounts
            .register(RegisterRequest {
                email: email.to_string(),
                password: "hunter2".to_string(),
                confirm_password: "hunter2".to_string(),
            })
            .await?)
    }

    /// Writes an upload fixture into the test directory
    pub fn upload(&self, name: &str, content: &[u8]) -> FileUpload {
        let path = self.dir.path().join("uploads").join(name);
        write_file(&path, content);
        FileUpload::from_path(path)
    }
}

fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create upload dir");
    }
    std::fs::write(path, content).expect("write upload fixture");
}

/// A minimal valid profile form
pub fn profile_form(name: &str, breed: &str) -> ProfileForm {
    ProfileForm {
        name: name.to_string(),
        breed: breed.to_string(),
        ..ProfileForm::default()
    }
}
