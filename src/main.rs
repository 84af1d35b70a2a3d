use std::env;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use catalog_api::repository::JsonProductRepository;
use catalog_api::routes::main::show_index;
use catalog_api::routes::products::{
    add_product, delete_product, edit_product, show_product, show_products,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let data_file = env::var("DATA_FILE").unwrap_or("data/products.json".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let repo = JsonProductRepository::new(&data_file);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(show_index)
            .service(show_products)
            .service(show_product)
            .service(add_product)
            .service(edit_product)
            .service(delete_product)
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
