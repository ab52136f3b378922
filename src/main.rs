mod caption;
mod gallery;
mod handlers;
mod intake;
mod legacy;
mod models;
mod routes;
mod store;
mod transform;
mod utils;

use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::caption::CaptionClient;
use crate::store::postgres::PgPhotoStore;
use crate::store::StoreHandles;
use crate::utils::s3::S3ObjectStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&db_url)
        .await
        .expect("Failed to connect to DB");

    let stores = StoreHandles {
        objects: Arc::new(S3ObjectStore::from_env()),
        photos: Arc::new(PgPhotoStore::new(pool.clone())),
        captions: Arc::new(CaptionClient::from_env()),
    };

    let pool_data = web::Data::new(pool);
    let store_data = web::Data::new(stores);

    info!("listening on 0.0.0.0:8000");

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(pool_data.clone())
            .app_data(store_data.clone())
            .configure(routes::config)
    })
    .bind(("0.0.0.0", 8000))?
    .run()
    .await
}
