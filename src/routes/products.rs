use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use uuid::Uuid;

use crate::forms::products::{AddProductForm, UpdateProductForm};
use crate::repository::JsonProductRepository;
use crate::routes::ErrorBody;
use crate::services::ServiceError;
use crate::services::products::{
    ProductsQuery, create_product, get_product, load_products, modify_product, remove_product,
};

#[get("/products")]
pub async fn show_products(
    params: web::Query<ProductsQuery>,
    repo: web::Data<JsonProductRepository>,
) -> impl Responder {
    match load_products(repo.get_ref(), params.0) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    path: web::Path<Uuid>,
    repo: web::Data<JsonProductRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match get_product(repo.get_ref(), product_id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(ErrorBody::new("Product not found"))
        }
        Err(err) => {
            log::error!("Failed to fetch product {product_id}: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

#[post("/products")]
pub async fn add_product(
    form: web::Json<AddProductForm>,
    repo: web::Data<JsonProductRepository>,
) -> impl Responder {
    match create_product(repo.get_ref(), form.into_inner()) {
        Ok(view) => HttpResponse::Created().json(view),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        Err(ServiceError::Conflict(message)) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

#[put("/products/{product_id}")]
pub async fn edit_product(
    path: web::Path<Uuid>,
    form: web::Json<UpdateProductForm>,
    repo: web::Data<JsonProductRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match modify_product(repo.get_ref(), product_id, form.into_inner()) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(ErrorBody::new("Product not found"))
        }
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    path: web::Path<Uuid>,
    repo: web::Data<JsonProductRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match remove_product(repo.get_ref(), product_id) {
        Ok(confirmation) => HttpResponse::Ok().json(confirmation),
        Err(ServiceError::NotFound) => {
            HttpResponse::NotFound().json(ErrorBody::new("Product not found"))
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}
