use mockall::mock;
use uuid::Uuid;

use super::{ProductReader, ProductWriter};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: Uuid) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: Uuid, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: Uuid) -> RepositoryResult<Product>;
    }
}
