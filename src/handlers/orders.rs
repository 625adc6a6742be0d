use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{NewOrder, Order};
use crate::errors::AppError;
use crate::Catalog;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub user_id: Option<i64>,
    pub product_id: Option<i64>,
    pub quantity: Option<i32>,
}

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = AppError;

    fn try_from(req: CreateOrderRequest) -> Result<Self, Self::Error> {
        match (req.user_id, req.product_id, req.quantity) {
            (Some(user_id), Some(product_id), Some(quantity)) => Ok(NewOrder {
                user_id,
                product_id,
                quantity,
            }),
            _ => Err(AppError::BadRequest(
                "user_id, product_id, and quantity are required".to_string(),
            )),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders in id order", body = Vec<Order>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(catalog: web::Data<Catalog>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(catalog.list_orders()?))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = Order),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    catalog: web::Data<Catalog>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(catalog.get_order(path.into_inner())?))
}

/// POST /api/orders
///
/// Checks that the referenced user and product exist, then records the
/// order with `total_price = price * quantity` and the current UTC time.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Missing field or non-positive quantity"),
        (status = 404, description = "User or product not found"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    catalog: web::Data<Catalog>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let new_order = NewOrder::try_from(body.into_inner())?;
    let order = catalog.place_order(new_order)?;
    log::info!(
        "created order id={} user_id={} product_id={}",
        order.id,
        order.user_id,
        order.product_id
    );
    Ok(HttpResponse::Created().json(order))
}
