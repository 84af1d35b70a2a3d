//! Helpers for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

use catalog_api::repository::JsonProductRepository;

/// Temporary data file used in integration tests.
pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir.");
        TestStore { dir }
    }

    /// Path of the backing data file inside the temp dir.
    pub fn data_path(&self) -> PathBuf {
        self.dir.path().join("products.json")
    }

    /// A repository handle over the store's data file.
    pub fn repo(&self) -> JsonProductRepository {
        JsonProductRepository::new(self.data_path())
    }
}
