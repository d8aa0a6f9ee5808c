use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use service::domain::{User, ROLE_USER};
use service::users::service::NewUser;
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::errors::ApiError;
use crate::state::ServerState;

fn default_role() -> String {
    ROLE_USER.to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserDoc),
        (status = 400, description = "Invalid input", body = crate::errors::ErrorBody),
        (status = 409, description = "Name taken", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    ctx.require_admin()?;
    let Json(body) = body?;
    let user = state
        .users
        .create_user(NewUser { name: body.name, password: body.password, role: body.role })
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    patch, path = "/users/{id}/role", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = crate::openapi::ChangeRoleDoc,
    responses(
        (status = 200, description = "Updated user", body = crate::openapi::UserDoc),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn change_role(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ChangeRoleRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    ctx.require_admin()?;
    let Path(id) = id?;
    let Json(body) = body?;
    Ok(Json(state.users.change_role(id, &body.role).await?))
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    ctx.require_admin()?;
    let Path(id) = id?;
    if id == ctx.user_id {
        return Err(ApiError::BadRequest("cannot delete the authenticated user".into()));
    }
    state.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
