use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use service::domain::{Actor, ActorInfo, ActorUpdate, NewActor};
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::errors::ApiError;
use crate::routes::Created;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct ActorsQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    pub name: String,
    pub second_name: String,
    #[serde(default)]
    pub patronymic: String,
    pub sex: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub films: Vec<Uuid>,
}

/// Every field is optional; omitted or empty values keep the stored ones.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateActorRequest {
    pub name: String,
    pub second_name: String,
    pub patronymic: String,
    pub sex: String,
    pub date_of_birth: String,
    pub films_to_add: Vec<Uuid>,
    pub films_to_del: Vec<Uuid>,
}

#[utoipa::path(
    get, path = "/actors", tag = "actors",
    params(("name" = Option<String>, Query, description = "Substring of \"name second_name patronymic\"")),
    responses(
        (status = 200, description = "Actors with their films", body = [crate::openapi::ActorDoc]),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ActorsQuery>, QueryRejection>,
) -> Result<Json<Vec<Actor>>, ApiError> {
    let Query(q) = query?;
    let actors = match q.name {
        Some(name) => state.actors.get_actors_by_name(&name).await?,
        None => state.actors.get_all_actors().await?,
    };
    Ok(Json(actors))
}

#[utoipa::path(
    get, path = "/actors/{id}", tag = "actors",
    params(("id" = Uuid, Path, description = "Actor id")),
    responses(
        (status = 200, description = "Actor", body = crate::openapi::ActorDoc),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Actor>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.actors.get_actor_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/actors", tag = "actors",
    request_body = crate::openapi::CreateActorDoc,
    responses(
        (status = 201, description = "Created", body = Created),
        (status = 400, description = "Validation failed", body = crate::errors::ErrorBody),
        (status = 403, description = "Administrator role required", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    body: Result<Json<CreateActorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    ctx.require_admin()?;
    let Json(body) = body?;
    let input = NewActor {
        info: ActorInfo {
            name: body.name,
            second_name: body.second_name,
            patronymic: body.patronymic,
            sex: body.sex,
            date_of_birth: body.date_of_birth,
        },
        films: body.films,
    };
    let id = state.actors.add_actor(input).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[utoipa::path(
    patch, path = "/actors/{id}", tag = "actors",
    params(("id" = Uuid, Path, description = "Actor id")),
    request_body = crate::openapi::UpdateActorDoc,
    responses(
        (status = 200, description = "Updated actor", body = crate::openapi::ActorDoc),
        (status = 400, description = "Validation or link check failed", body = crate::errors::ErrorBody),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateActorRequest>, JsonRejection>,
) -> Result<Json<Actor>, ApiError> {
    ctx.require_admin()?;
    let Path(id) = id?;
    let Json(body) = body?;
    let input = ActorUpdate {
        id,
        info: ActorInfo {
            name: body.name,
            second_name: body.second_name,
            patronymic: body.patronymic,
            sex: body.sex,
            date_of_birth: body.date_of_birth,
        },
        films_to_add: body.films_to_add,
        films_to_del: body.films_to_del,
    };
    state.actors.update_actor(input).await?;
    Ok(Json(state.actors.get_actor_by_id(id).await?))
}

#[utoipa::path(
    delete, path = "/actors/{id}", tag = "actors",
    params(("id" = Uuid, Path, description = "Actor id")),
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
    state.actors.delete_actor(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
