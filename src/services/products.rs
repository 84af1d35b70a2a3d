use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::{
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Product, ProductListQuery, SortOrder,
};
use crate::forms::products::{AddProductForm, UpdateProductForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Longest accepted name filter, matching the stored name bound.
const NAME_FILTER_MAX_LEN: usize = 100;

/// Query parameters accepted by the product listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional case-insensitive name filter.
    pub name: Option<String>,
    /// Whether the results should be ordered by price.
    #[serde(default)]
    pub sort_by_price: bool,
    /// Sort direction applied when `sort_by_price` is set.
    #[serde(default)]
    pub order: SortOrder,
    /// Page size (1..=100); defaults to 10.
    pub limit: Option<usize>,
    /// Matching items to skip; defaults to 0.
    pub offset: Option<usize>,
}

/// A stored product enriched with the derived fields exposed by the API.
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    /// Price after discount, rounded to 2 decimals.
    pub final_price: f64,
    /// Volume in cubic centimetres.
    pub product_volume: f64,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let final_price = product.final_price();
        let product_volume = product.dimensions_cm.volume();

        Self {
            product,
            final_price,
            product_volume,
        }
    }
}

/// Response envelope returned by the product listing endpoint.
#[derive(Debug, Serialize)]
pub struct ProductListPage {
    /// Number of matches after filtering, before slicing.
    pub total: usize,
    /// Page size applied to the result.
    pub limit: usize,
    pub items: Vec<ProductView>,
}

/// Confirmation returned after a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

/// Loads a page of stored products; filtering, sorting and slicing always
/// apply, in that order.
pub fn load_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<ProductListPage>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery {
        name,
        sort_by_price,
        order,
        limit,
        offset,
    } = query;

    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if limit < 1 || limit > MAX_PAGE_LIMIT {
        return Err(ServiceError::Form(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }

    let offset = offset.unwrap_or(0);

    let mut list_query = ProductListQuery::new().limit(limit).offset(offset);

    if let Some(term) = name.as_ref() {
        let length = term.chars().count();
        if length < 1 || length > NAME_FILTER_MAX_LEN {
            return Err(ServiceError::Form(format!(
                "name filter must be between 1 and {NAME_FILTER_MAX_LEN} characters"
            )));
        }
        list_query = list_query.search(term.trim());
    }

    if sort_by_price {
        list_query = list_query.sort_by_price(order);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;

    Ok(ProductListPage {
        total,
        limit,
        items: items.into_iter().map(ProductView::from).collect(),
    })
}

/// Fetches a single product by id.
pub fn get_product<R>(repo: &R, product_id: Uuid) -> ServiceResult<ProductView>
where
    R: ProductReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    Ok(ProductView::from(product))
}

/// Validates the create payload and stores the new product.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<ProductView>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo
        .create_product(new_product)
        .map_err(ServiceError::from)?;

    Ok(ProductView::from(created))
}

/// Validates the partial payload and merges it into the stored product.
pub fn modify_product<R>(
    repo: &R,
    product_id: Uuid,
    form: UpdateProductForm,
) -> ServiceResult<ProductView>
where
    R: ProductWriter + ?Sized,
{
    let updates = form
        .into_update_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo
        .update_product(product_id, &updates)
        .map_err(ServiceError::from)?;

    Ok(ProductView::from(updated))
}

/// Removes a product and reports which one was deleted.
pub fn remove_product<R>(repo: &R, product_id: Uuid) -> ServiceResult<DeleteConfirmation>
where
    R: ProductWriter + ?Sized,
{
    let deleted = repo
        .delete_product(product_id)
        .map_err(ServiceError::from)?;

    Ok(DeleteConfirmation {
        message: format!("Deleted product: {}", deleted.name),
    })
}
