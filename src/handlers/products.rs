use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{NewProduct, Product};
use crate::errors::AppError;
use crate::Catalog;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    /// Must be a JSON number; a quoted price is rejected as malformed.
    pub price: Option<f64>,
    pub description: Option<String>,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = AppError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        match (req.name, req.price) {
            (Some(name), Some(price)) => Ok(NewProduct {
                name,
                price,
                description: req.description,
            }),
            _ => Err(AppError::BadRequest(
                "Name and price are required".to_string(),
            )),
        }
    }
}

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products in id order", body = Vec<Product>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(catalog: web::Data<Catalog>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(catalog.list_products()?))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    catalog: web::Data<Catalog>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(catalog.get_product(path.into_inner())?))
}

/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing name or price, or negative price"),
    ),
    tag = "products"
)]
pub async fn create_product(
    catalog: web::Data<Catalog>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let new_product = NewProduct::try_from(body.into_inner())?;
    let product = catalog.create_product(new_product)?;
    log::info!("created product id={}", product.id);
    Ok(HttpResponse::Created().json(product))
}

/// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    catalog: web::Data<Catalog>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    catalog.delete_product(id)?;
    log::info!("deleted product id={}", id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted successfully" })))
}
