use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Default number of items returned by a listing when no limit is supplied.
pub const DEFAULT_PAGE_LIMIT: usize = 10;

/// Largest number of items a single listing may return.
pub const MAX_PAGE_LIMIT: usize = 100;

/// Currency a product is priced in. The catalog is single-currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "PKR")]
    Pkr,
}

/// Sort direction applied when ordering a listing by price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Physical dimensions of a product in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Length in centimetres.
    pub length: f64,
    /// Width in centimetres.
    pub width: f64,
    /// Height in centimetres.
    pub height: f64,
}

impl Dimensions {
    /// Volume in cubic centimetres.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }

    fn apply(&mut self, patch: &DimensionsPatch) {
        if let Some(length) = patch.length {
            self.length = length;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
    }
}

/// Seller a product is fulfilled by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// Stable identifier of the seller account.
    pub seller_id: Uuid,
    /// Display name of the seller.
    pub seller_name: String,
    /// Contact email address of the seller.
    pub seller_email: String,
    /// Seller storefront or homepage URL.
    pub seller_website: String,
}

impl Seller {
    fn apply(&mut self, patch: &SellerPatch) {
        if let Some(name) = &patch.seller_name {
            self.seller_name = name.clone();
        }
        if let Some(email) = &patch.seller_email {
            self.seller_email = email.clone();
        }
        if let Some(website) = &patch.seller_website {
            self.seller_website = website.clone();
        }
    }
}

/// Cross-field business rules enforced whenever a product record is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("stock is 0, is_active must be false")]
    ActiveWithoutStock,
    #[error("discounted product must have a rating")]
    DiscountWithoutRating,
}

fn check_rules(
    stock: u32,
    is_active: bool,
    discount_percent: u8,
    rating: f64,
) -> Result<(), RuleViolation> {
    if stock == 0 && is_active {
        return Err(RuleViolation::ActiveWithoutStock);
    }
    if discount_percent > 0 && rating == 0.0 {
        return Err(RuleViolation::DiscountWithoutRating);
    }
    Ok(())
}

/// A stored product record. This is exactly the shape persisted in the data
/// file; the derived `final_price`/volume values are computed on the way out
/// and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the server on create.
    pub id: Uuid,
    /// Stock keeping unit; unique across the catalog and immutable.
    pub sku: String,
    /// Human-readable product name.
    pub name: String,
    /// Short product description.
    pub description: String,
    /// Merchandising category the product is listed under.
    pub category: String,
    /// Brand the product is sold under.
    pub brand: String,
    /// Base price before any discount.
    pub price: f64,
    /// Currency the price is quoted in.
    pub currency: Currency,
    /// Discount applied to the base price, in whole percent (0..=90).
    pub discount_percent: u8,
    /// Units currently available.
    pub stock: u32,
    /// Whether the product is visible in the catalog.
    pub is_active: bool,
    /// Customer rating out of 5; 0 means unrated.
    pub rating: f64,
    /// Optional labels, at most 10.
    pub tags: Option<Vec<String>>,
    /// Product images; at least one.
    pub image_urls: Vec<String>,
    /// Physical dimensions in centimetres.
    pub dimensions_cm: Dimensions,
    /// Seller fulfilling the product.
    pub seller: Seller,
    /// Timestamp assigned by the server on create.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Materializes a stored record from a create payload, assigning the
    /// server-side id and creation timestamp.
    pub fn from_new(new: NewProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            sku: new.sku,
            name: new.name,
            description: new.description,
            category: new.category,
            brand: new.brand,
            price: new.price,
            currency: new.currency,
            discount_percent: new.discount_percent,
            stock: new.stock,
            is_active: new.is_active,
            rating: new.rating,
            tags: new.tags,
            image_urls: new.image_urls,
            dimensions_cm: new.dimensions_cm,
            seller: new.seller,
            created_at: Utc::now(),
        }
    }

    /// Effective price after the discount, rounded to 2 decimals.
    pub fn final_price(&self) -> f64 {
        let discounted = self.price * (1.0 - f64::from(self.discount_percent) / 100.0);
        (discounted * 100.0).round() / 100.0
    }

    /// Merges a partial update into this record. Absent fields keep their
    /// value, nested patches merge key by key, lists replace wholesale.
    pub fn apply(&mut self, updates: &UpdateProduct) {
        if let Some(name) = &updates.name {
            self.name = name.clone();
        }
        if let Some(description) = &updates.description {
            self.description = description.clone();
        }
        if let Some(category) = &updates.category {
            self.category = category.clone();
        }
        if let Some(brand) = &updates.brand {
            self.brand = brand.clone();
        }
        if let Some(price) = updates.price {
            self.price = price;
        }
        if let Some(discount_percent) = updates.discount_percent {
            self.discount_percent = discount_percent;
        }
        if let Some(stock) = updates.stock {
            self.stock = stock;
        }
        if let Some(is_active) = updates.is_active {
            self.is_active = is_active;
        }
        if let Some(rating) = updates.rating {
            self.rating = rating;
        }
        if let Some(tags) = &updates.tags {
            self.tags = Some(tags.clone());
        }
        if let Some(image_urls) = &updates.image_urls {
            self.image_urls = image_urls.clone();
        }
        if let Some(patch) = &updates.dimensions_cm {
            self.dimensions_cm.apply(patch);
        }
        if let Some(patch) = &updates.seller {
            self.seller.apply(patch);
        }
    }

    /// Checks the cross-field rules against the current field values.
    pub fn enforce_rules(&self) -> Result<(), RuleViolation> {
        check_rules(
            self.stock,
            self.is_active,
            self.discount_percent,
            self.rating,
        )
    }
}

/// Payload required to create a new product. Validated upstream by the
/// create form; the server-side id and timestamp are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Stock keeping unit; unique across the catalog.
    pub sku: String,
    /// Human-readable product name.
    pub name: String,
    /// Short product description.
    pub description: String,
    /// Merchandising category the product is listed under.
    pub category: String,
    /// Brand the product is sold under.
    pub brand: String,
    /// Base price before any discount.
    pub price: f64,
    /// Currency the price is quoted in.
    pub currency: Currency,
    /// Discount applied to the base price, in whole percent (0..=90).
    pub discount_percent: u8,
    /// Units currently available.
    pub stock: u32,
    /// Whether the product is visible in the catalog.
    pub is_active: bool,
    /// Customer rating out of 5; 0 means unrated.
    pub rating: f64,
    /// Optional labels, at most 10.
    pub tags: Option<Vec<String>>,
    /// Product images; at least one.
    pub image_urls: Vec<String>,
    /// Physical dimensions in centimetres.
    pub dimensions_cm: Dimensions,
    /// Seller fulfilling the product.
    pub seller: Seller,
}

impl NewProduct {
    /// Checks the cross-field rules against the payload.
    pub fn enforce_rules(&self) -> Result<(), RuleViolation> {
        check_rules(
            self.stock,
            self.is_active,
            self.discount_percent,
            self.rating,
        )
    }
}

/// Patch data applied when updating an existing product. `None` fields are
/// left untouched; the sku, currency and seller id are immutable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional description update.
    pub description: Option<String>,
    /// Optional category update.
    pub category: Option<String>,
    /// Optional brand update.
    pub brand: Option<String>,
    /// Optional base-price update.
    pub price: Option<f64>,
    /// Optional discount update, in whole percent.
    pub discount_percent: Option<u8>,
    /// Optional stock-level update.
    pub stock: Option<u32>,
    /// Optional visibility update.
    pub is_active: Option<bool>,
    /// Optional rating update.
    pub rating: Option<f64>,
    /// Replaces the whole tag list when present.
    pub tags: Option<Vec<String>>,
    /// Replaces the whole image list when present.
    pub image_urls: Option<Vec<String>>,
    /// Merged field by field into the stored dimensions.
    pub dimensions_cm: Option<DimensionsPatch>,
    /// Merged field by field into the stored seller.
    pub seller: Option<SellerPatch>,
}

/// Partial dimensions update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionsPatch {
    /// Optional length update in centimetres.
    pub length: Option<f64>,
    /// Optional width update in centimetres.
    pub width: Option<f64>,
    /// Optional height update in centimetres.
    pub height: Option<f64>,
}

/// Partial seller update. The seller id cannot be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellerPatch {
    /// Optional display-name update.
    pub seller_name: Option<String>,
    /// Optional contact-email update.
    pub seller_email: Option<String>,
    /// Optional website update.
    pub seller_website: Option<String>,
}

/// Query definition used to list stored products. Filtering, sorting and
/// slicing always apply, in that order.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Optional case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Price ordering; insertion order is kept when unset.
    pub sort_by_price: Option<SortOrder>,
    /// Maximum number of items returned.
    pub limit: usize,
    /// Number of matching items skipped from the start.
    pub offset: usize,
}

impl ProductListQuery {
    /// Construct a query over the whole catalog with default paging.
    pub fn new() -> Self {
        Self {
            name: None,
            sort_by_price: None,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }

    /// Filter the results by a name substring, case-insensitively.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.name = Some(term.into());
        self
    }

    /// Order the results by price.
    pub fn sort_by_price(mut self, order: SortOrder) -> Self {
        self.sort_by_price = Some(order);
        self
    }

    /// Cap the number of returned items.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Skip the first `offset` matching items.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new()
    }
}
