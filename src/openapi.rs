use actix_web::HttpResponse;
use utoipa::OpenApi;

use crate::domain::{NewOrder, NewProduct, NewUser, Order, Product, User};
use crate::handlers;
use crate::handlers::orders::CreateOrderRequest;
use crate::handlers::products::CreateProductRequest;
use crate::handlers::users::CreateUserRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::delete_user,
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::delete_product,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::create_order,
    ),
    components(schemas(
        User,
        NewUser,
        Product,
        NewProduct,
        Order,
        NewOrder,
        CreateUserRequest,
        CreateProductRequest,
        CreateOrderRequest,
    )),
    tags(
        (name = "users", description = "User accounts"),
        (name = "products", description = "Product catalog"),
        (name = "orders", description = "Orders referencing a user and a product"),
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
