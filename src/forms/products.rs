use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidateUrl, ValidationErrors};

use crate::domain::product::{
    Currency, Dimensions, DimensionsPatch, NewProduct, RuleViolation, Seller, SellerPatch,
    UpdateProduct,
};

/// Upper bound shared by most free-text fields.
const TEXT_MAX_LEN: u64 = 100;

/// Minimum length for a SKU.
const SKU_MIN_LEN: u64 = 6;

/// Minimum length for a product name, category or brand.
const LABEL_MIN_LEN: u64 = 3;

/// Minimum length for a product description.
const DESCRIPTION_MIN_LEN: u64 = 6;

/// Seller display-name bounds.
const SELLER_NAME_MIN_LEN: u64 = 2;
const SELLER_NAME_MAX_LEN: u64 = 60;

/// Minimum length for a seller email or website.
const SELLER_CONTACT_MIN_LEN: u64 = 3;

/// Most tags a single product may carry.
const MAX_TAGS: u64 = 10;

/// A SKU ends in a segment of exactly this many ASCII digits.
const SKU_SUFFIX_DIGITS: usize = 3;

/// Domains a seller email address may belong to.
const ALLOWED_SELLER_EMAIL_DOMAINS: [&str; 4] = [
    "email.com",
    "gmail.com",
    "fccollege.edu.pk",
    "formanite.fccollege.edu.pk",
];

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The SKU does not contain a hyphen.
    #[error("SKU must contain a hyphen `-`")]
    SkuMissingHyphen,
    /// The SKU does not end in a 3-digit segment.
    #[error("SKU must end with a 3-digit sequence like `001`")]
    SkuBadSuffix,
    /// The seller email belongs to a domain outside the allow list.
    #[error("email domain `{domain}` is not allowed")]
    EmailDomainNotAllowed { domain: String },
    /// An image URL failed to parse.
    #[error("invalid image URL `{url}`")]
    InvalidImageUrl { url: String },
    /// A cross-field business rule failed.
    #[error(transparent)]
    Rule(#[from] RuleViolation),
}

/// Payload accepted when creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Stock keeping unit, e.g. `XIAO-359GB-001`.
    #[validate(length(min = SKU_MIN_LEN, max = TEXT_MAX_LEN))]
    pub sku: String,
    #[validate(length(min = LABEL_MIN_LEN, max = TEXT_MAX_LEN))]
    pub name: String,
    #[validate(length(min = DESCRIPTION_MIN_LEN, max = TEXT_MAX_LEN))]
    pub description: String,
    #[validate(length(min = LABEL_MIN_LEN, max = TEXT_MAX_LEN))]
    pub category: String,
    #[validate(length(min = LABEL_MIN_LEN, max = TEXT_MAX_LEN))]
    pub brand: String,
    /// Base price before discount.
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub currency: Currency,
    #[validate(range(min = 0, max = 90))]
    #[serde(default)]
    pub discount_percent: u8,
    pub stock: u32,
    pub is_active: bool,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(default)]
    pub rating: f64,
    #[validate(length(max = MAX_TAGS))]
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// At least one image URL.
    #[validate(length(min = 1))]
    pub image_urls: Vec<String>,
    #[validate(nested)]
    pub dimensions_cm: DimensionsForm,
    #[validate(nested)]
    pub seller: SellerForm,
}

impl AddProductForm {
    /// Validates the payload and converts it into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;
        check_sku_format(&self.sku)?;
        check_seller_email_domain(&self.seller.seller_email)?;
        check_image_urls(&self.image_urls)?;

        let new_product = NewProduct {
            sku: self.sku,
            name: self.name,
            description: self.description,
            category: self.category,
            brand: self.brand,
            price: self.price,
            currency: self.currency,
            discount_percent: self.discount_percent,
            stock: self.stock,
            is_active: self.is_active,
            rating: self.rating,
            tags: self.tags,
            image_urls: self.image_urls,
            dimensions_cm: self.dimensions_cm.into(),
            seller: self.seller.into(),
        };
        new_product.enforce_rules()?;

        Ok(new_product)
    }
}

/// Dimensions payload in centimetres; every side is required and positive.
#[derive(Debug, Deserialize, Validate)]
pub struct DimensionsForm {
    #[validate(range(exclusive_min = 0.0))]
    pub length: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub width: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub height: f64,
}

impl From<DimensionsForm> for Dimensions {
    fn from(form: DimensionsForm) -> Self {
        Self {
            length: form.length,
            width: form.width,
            height: form.height,
        }
    }
}

/// Seller payload attached to a create request.
#[derive(Debug, Deserialize, Validate)]
pub struct SellerForm {
    pub seller_id: Uuid,
    #[validate(length(min = SELLER_NAME_MIN_LEN, max = SELLER_NAME_MAX_LEN))]
    pub seller_name: String,
    #[validate(email, length(min = SELLER_CONTACT_MIN_LEN, max = TEXT_MAX_LEN))]
    pub seller_email: String,
    #[validate(url, length(min = SELLER_CONTACT_MIN_LEN, max = TEXT_MAX_LEN))]
    pub seller_website: String,
}

impl From<SellerForm> for Seller {
    fn from(form: SellerForm) -> Self {
        Self {
            seller_id: form.seller_id,
            seller_name: form.seller_name,
            seller_email: form.seller_email,
            seller_website: form.seller_website,
        }
    }
}

/// Payload accepted when partially updating a product. Absent fields leave
/// the stored value untouched; the SKU and currency cannot be changed.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductForm {
    #[validate(length(min = LABEL_MIN_LEN, max = TEXT_MAX_LEN))]
    pub name: Option<String>,
    #[validate(length(min = DESCRIPTION_MIN_LEN, max = TEXT_MAX_LEN))]
    pub description: Option<String>,
    #[validate(length(min = LABEL_MIN_LEN, max = TEXT_MAX_LEN))]
    pub category: Option<String>,
    #[validate(length(min = LABEL_MIN_LEN, max = TEXT_MAX_LEN))]
    pub brand: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0, max = 90))]
    pub discount_percent: Option<u8>,
    pub stock: Option<u32>,
    pub is_active: Option<bool>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    /// Replaces the stored tag list wholesale.
    #[validate(length(max = MAX_TAGS))]
    pub tags: Option<Vec<String>>,
    /// Replaces the stored image list wholesale.
    #[validate(length(min = 1))]
    pub image_urls: Option<Vec<String>>,
    #[validate(nested)]
    pub dimensions_cm: Option<DimensionsPatchForm>,
    #[validate(nested)]
    pub seller: Option<SellerPatchForm>,
}

impl UpdateProductForm {
    /// Validates the payload and converts it into a domain `UpdateProduct`.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        if let Some(seller) = &self.seller
            && let Some(email) = &seller.seller_email
        {
            check_seller_email_domain(email)?;
        }

        if let Some(image_urls) = &self.image_urls {
            check_image_urls(image_urls)?;
        }

        Ok(UpdateProduct {
            name: self.name,
            description: self.description,
            category: self.category,
            brand: self.brand,
            price: self.price,
            discount_percent: self.discount_percent,
            stock: self.stock,
            is_active: self.is_active,
            rating: self.rating,
            tags: self.tags,
            image_urls: self.image_urls,
            dimensions_cm: self.dimensions_cm.map(Into::into),
            seller: self.seller.map(Into::into),
        })
    }
}

/// Partial dimensions payload; present sides must be positive.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DimensionsPatchForm {
    #[validate(range(exclusive_min = 0.0))]
    pub length: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    pub width: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    pub height: Option<f64>,
}

impl From<DimensionsPatchForm> for DimensionsPatch {
    fn from(form: DimensionsPatchForm) -> Self {
        Self {
            length: form.length,
            width: form.width,
            height: form.height,
        }
    }
}

/// Partial seller payload; the seller id cannot be changed.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SellerPatchForm {
    #[validate(length(min = SELLER_NAME_MIN_LEN, max = SELLER_NAME_MAX_LEN))]
    pub seller_name: Option<String>,
    #[validate(email, length(min = SELLER_CONTACT_MIN_LEN, max = TEXT_MAX_LEN))]
    pub seller_email: Option<String>,
    #[validate(url, length(min = SELLER_CONTACT_MIN_LEN, max = TEXT_MAX_LEN))]
    pub seller_website: Option<String>,
}

impl From<SellerPatchForm> for SellerPatch {
    fn from(form: SellerPatchForm) -> Self {
        Self {
            seller_name: form.seller_name,
            seller_email: form.seller_email,
            seller_website: form.seller_website,
        }
    }
}

fn check_sku_format(sku: &str) -> ProductFormResult<()> {
    if !sku.contains('-') {
        return Err(ProductFormError::SkuMissingHyphen);
    }

    let suffix = sku.rsplit('-').next().unwrap_or("");
    if suffix.len() != SKU_SUFFIX_DIGITS || !suffix.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ProductFormError::SkuBadSuffix);
    }

    Ok(())
}

fn check_seller_email_domain(email: &str) -> ProductFormResult<()> {
    let domain = email.rsplit('@').next().unwrap_or("");

    if !ALLOWED_SELLER_EMAIL_DOMAINS
        .iter()
        .any(|allowed| domain.eq_ignore_ascii_case(allowed))
    {
        return Err(ProductFormError::EmailDomainNotAllowed {
            domain: domain.to_string(),
        });
    }

    Ok(())
}

fn check_image_urls(urls: &[String]) -> ProductFormResult<()> {
    for url in urls {
        if !url.validate_url() {
            return Err(ProductFormError::InvalidImageUrl { url: url.clone() });
        }
    }

    Ok(())
}
