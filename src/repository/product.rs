use std::fs;
use std::io;

use uuid::Uuid;

use crate::domain::product::{NewProduct, Product, ProductListQuery, SortOrder, UpdateProduct};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{JsonProductRepository, ProductReader, ProductWriter};

impl JsonProductRepository {
    /// Reads the full catalog from disk. A missing file is an empty catalog;
    /// anything unparseable is reported as corruption, never as empty.
    fn load(&self) -> RepositoryResult<Vec<Product>> {
        let raw = match fs::read(self.path.as_ref()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_slice(&raw)?)
    }

    /// Rewrites the catalog atomically: the new contents land in a sibling
    /// temp file first and replace the data file in a single rename.
    fn persist(&self, products: &[Product]) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_vec_pretty(products)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, raw)?;
        fs::rename(&tmp_path, self.path.as_ref())?;

        Ok(())
    }
}

impl ProductReader for JsonProductRepository {
    fn get_product_by_id(&self, id: Uuid) -> RepositoryResult<Option<Product>> {
        let _guard = self.guard()?;
        let products = self.load()?;

        Ok(products.into_iter().find(|product| product.id == id))
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let _guard = self.guard()?;
        let products = self.load()?;

        let mut matching: Vec<Product> = match &query.name {
            Some(term) => {
                let needle = term.to_lowercase();
                products
                    .into_iter()
                    .filter(|product| product.name.to_lowercase().contains(&needle))
                    .collect()
            }
            None => products,
        };

        // Total counts every match, not just the returned page.
        let total = matching.len();

        if let Some(order) = query.sort_by_price {
            match order {
                SortOrder::Asc => matching.sort_by(|a, b| a.price.total_cmp(&b.price)),
                SortOrder::Desc => matching.sort_by(|a, b| b.price.total_cmp(&a.price)),
            }
        }

        let items = matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();

        Ok((total, items))
    }
}

impl ProductWriter for JsonProductRepository {
    fn create_product(&self, new_product: NewProduct) -> RepositoryResult<Product> {
        let _guard = self.guard()?;
        let mut products = self.load()?;

        if products.iter().any(|product| product.sku == new_product.sku) {
            return Err(RepositoryError::DuplicateSku(new_product.sku));
        }

        let product = Product::from_new(new_product);
        product.enforce_rules()?;

        products.push(product.clone());
        self.persist(&products)?;

        Ok(product)
    }

    fn update_product(
        &self,
        product_id: Uuid,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        let _guard = self.guard()?;
        let mut products = self.load()?;

        let position = products
            .iter()
            .position(|product| product.id == product_id)
            .ok_or(RepositoryError::NotFound)?;

        // Merge into a copy so a rule violation leaves the stored record as is.
        let mut updated = products[position].clone();
        updated.apply(updates);
        updated.enforce_rules()?;

        products[position] = updated.clone();
        self.persist(&products)?;

        Ok(updated)
    }

    fn delete_product(&self, product_id: Uuid) -> RepositoryResult<Product> {
        let _guard = self.guard()?;
        let mut products = self.load()?;

        let position = products
            .iter()
            .position(|product| product.id == product_id)
            .ok_or(RepositoryError::NotFound)?;

        let deleted = products.remove(position);
        self.persist(&products)?;

        Ok(deleted)
    }
}
