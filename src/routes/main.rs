use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

#[get("/")]
pub async fn show_index() -> impl Responder {
    HttpResponse::Ok().json(json!({"message": "Product catalog API"}))
}
