use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use service::domain::{Film, FilmInfo, FilmSort, FilmUpdate, NewFilm, SortField, SortOrder};
use uuid::Uuid;

use crate::auth::AuthContext;
use crate::errors::ApiError;
use crate::routes::Created;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct FilmsQuery {
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
    pub name: Option<String>,
    #[serde(rename = "actor-name")]
    pub actor_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFilmRequest {
    pub name: String,
    pub description: String,
    pub date: String,
    pub rating: f64,
    #[serde(default)]
    pub actors: Vec<Uuid>,
}

/// Every field is optional; omitted, empty or zero values keep the stored ones.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateFilmRequest {
    pub name: String,
    pub description: String,
    pub date: String,
    pub rating: f64,
    pub actors_to_add: Vec<Uuid>,
    pub actors_to_del: Vec<Uuid>,
}

#[utoipa::path(
    get, path = "/films", tag = "films",
    params(
        ("sort" = Option<String>, Query, description = "name, date or rating (default rating)"),
        ("order" = Option<String>, Query, description = "asc or desc (default desc)"),
        ("name" = Option<String>, Query, description = "Substring of the film name"),
        ("actor-name" = Option<String>, Query, description = "Substring of an actor's full name")
    ),
    responses(
        (status = 200, description = "Films with their actors", body = [crate::openapi::FilmDoc]),
        (status = 400, description = "Unknown sort field or order", body = crate::errors::ErrorBody),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<FilmsQuery>, QueryRejection>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let Query(q) = query?;
    let films = match (q.name, q.actor_name) {
        (Some(_), Some(_)) => {
            return Err(ApiError::BadRequest("use either name or actor-name, not both".into()));
        }
        (Some(name), None) => state.films.get_films_by_name(&name).await?,
        (None, Some(actor)) => state.films.get_films_by_actor_name(&actor).await?,
        (None, None) => state.films.get_all_films(FilmSort::new(q.sort, q.order)).await?,
    };
    Ok(Json(films))
}

#[utoipa::path(
    get, path = "/films/{id}", tag = "films",
    params(("id" = Uuid, Path, description = "Film id")),
    responses(
        (status = 200, description = "Film", body = crate::openapi::FilmDoc),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Film>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.films.get_film_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/films", tag = "films",
    request_body = crate::openapi::CreateFilmDoc,
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
    body: Result<Json<CreateFilmRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    ctx.require_admin()?;
    let Json(body) = body?;
    let input = NewFilm {
        info: FilmInfo { name: body.name, description: body.description, date: body.date, rating: body.rating },
        actors: body.actors,
    };
    let id = state.films.add_new_film(input).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[utoipa::path(
    patch, path = "/films/{id}", tag = "films",
    params(("id" = Uuid, Path, description = "Film id")),
    request_body = crate::openapi::UpdateFilmDoc,
    responses(
        (status = 200, description = "Updated film", body = crate::openapi::FilmDoc),
        (status = 400, description = "Validation or link check failed", body = crate::errors::ErrorBody),
        (status = 404, description = "Not found", body = crate::errors::ErrorBody)
    ),
    security(("basic_auth" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(ctx): Extension<AuthContext>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateFilmRequest>, JsonRejection>,
) -> Result<Json<Film>, ApiError> {
    ctx.require_admin()?;
    let Path(id) = id?;
    let Json(body) = body?;
    let input = FilmUpdate {
        id,
        info: FilmInfo { name: body.name, description: body.description, date: body.date, rating: body.rating },
        actors_to_add: body.actors_to_add,
        actors_to_del: body.actors_to_del,
    };
    state.films.edit_film(input).await?;
    Ok(Json(state.films.get_film_by_id(id).await?))
}

#[utoipa::path(
    delete, path = "/films/{id}", tag = "films",
    params(("id" = Uuid, Path, description = "Film id")),
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
    state.films.delete_film(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
