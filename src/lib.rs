pub mod application;
pub mod client;
pub mod config;
pub mod console;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;

use std::net::TcpListener;

use actix_web::{middleware::Logger, web, App, HttpServer};

pub use application::CatalogService;
pub use client::{ApiClient, ClientError};
pub use infrastructure::InMemoryRepository;

/// The catalog the reference server runs on.
pub type Catalog = CatalogService<InMemoryRepository>;

/// A fresh, empty catalog ready to be shared with the server.
pub fn new_catalog() -> web::Data<Catalog> {
    web::Data::new(CatalogService::new(InMemoryRepository::new()))
}

/// Register every route of the reference server, plus the JSON body config
/// that renders malformed payloads as `{"error": ...}`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(errors::json_error_handler))
        .route("/health", web::get().to(handlers::health::health))
        .route("/api-docs/openapi.json", web::get().to(openapi::openapi_json))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/users")
                        .route("", web::get().to(handlers::users::list_users))
                        .route("", web::post().to(handlers::users::create_user))
                        .route("/{id}", web::get().to(handlers::users::get_user))
                        .route("/{id}", web::delete().to(handlers::users::delete_user)),
                )
                .service(
                    web::scope("/products")
                        .route("", web::get().to(handlers::products::list_products))
                        .route("", web::post().to(handlers::products::create_product))
                        .route("/{id}", web::get().to(handlers::products::get_product))
                        .route("/{id}", web::delete().to(handlers::products::delete_product)),
                )
                .service(
                    web::scope("/orders")
                        .route("", web::get().to(handlers::orders::list_orders))
                        .route("", web::post().to(handlers::orders::create_order))
                        .route("/{id}", web::get().to(handlers::orders::get_order)),
                ),
        );
}

/// Build and return an actix-web `Server` serving the reference backend on
/// an already-bound listener.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    catalog: web::Data<Catalog>,
    listener: TcpListener,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(catalog.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .listen(listener)?
    .run())
}
