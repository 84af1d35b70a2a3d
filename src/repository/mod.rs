use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod errors;
pub mod product;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// JSON-file-backed repository; the whole catalog lives in a single file.
pub struct JsonProductRepository {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>, // serializes read-modify-write cycles on the file
}

impl JsonProductRepository {
    /// Create a new repository over the given data file. The file does not
    /// need to exist yet; a missing file reads as an empty catalog.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn guard(&self) -> RepositoryResult<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| RepositoryError::LockPoisoned)
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: Uuid) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        product_id: Uuid,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: Uuid) -> RepositoryResult<Product>;
}
