use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{NewUser, User};
use crate::errors::AppError;
use crate::Catalog;

// ── Request DTOs ─────────────────────────────────────────────────────────────

/// Both fields are optional on the wire so that a missing one produces the
/// contract's `{"error": ...}` body instead of a bare deserialization error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = AppError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        match (req.name, req.email) {
            (Some(name), Some(email)) => Ok(NewUser { name, email }),
            _ => Err(AppError::BadRequest(
                "Name and email are required".to_string(),
            )),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users in id order", body = Vec<User>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "users"
)]
pub async fn list_users(catalog: web::Data<Catalog>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(catalog.list_users()?))
}

/// GET /api/users/{id}
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn get_user(
    catalog: web::Data<Catalog>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(catalog.get_user(path.into_inner())?))
}

/// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Name or email missing"),
        (status = 409, description = "Email already exists"),
    ),
    tag = "users"
)]
pub async fn create_user(
    catalog: web::Data<Catalog>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let new_user = NewUser::try_from(body.into_inner())?;
    let user = catalog.create_user(new_user)?;
    log::info!("created user id={}", user.id);
    Ok(HttpResponse::Created().json(user))
}

/// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn delete_user(
    catalog: web::Data<Catalog>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    catalog.delete_user(id)?;
    log::info!("deleted user id={}", id);
    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })))
}
