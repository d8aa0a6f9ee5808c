use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct ActorFilmDoc {
    pub id: Uuid,
    pub name: String,
}

#[derive(ToSchema)]
pub struct ActorDoc {
    pub id: Uuid,
    #[schema(example = "Maxim")]
    pub name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
    #[schema(example = "Мужчина")]
    pub sex: String,
    #[schema(example = "2000-01-01")]
    pub date_of_birth: String,
    pub films: Vec<ActorFilmDoc>,
}

#[derive(ToSchema)]
pub struct FilmActorDoc {
    pub id: Uuid,
    pub name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
}

#[derive(ToSchema)]
pub struct FilmDoc {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(example = "2000-01-01")]
    pub date: String,
    #[schema(example = 5.2)]
    pub rating: f64,
    pub actors: Vec<FilmActorDoc>,
}

#[derive(ToSchema)]
pub struct CreateActorDoc {
    pub name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
    /// "Мужчина" or "Женщина" ("Male"/"Female" accepted)
    pub sex: String,
    pub date_of_birth: String,
    pub films: Option<Vec<Uuid>>,
}

#[derive(ToSchema)]
pub struct UpdateActorDoc {
    pub name: Option<String>,
    pub second_name: Option<String>,
    pub patronymic: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<String>,
    pub films_to_add: Option<Vec<Uuid>>,
    pub films_to_del: Option<Vec<Uuid>>,
}

#[derive(ToSchema)]
pub struct CreateFilmDoc {
    pub name: String,
    pub description: String,
    pub date: String,
    pub rating: f64,
    pub actors: Option<Vec<Uuid>>,
}

#[derive(ToSchema)]
pub struct UpdateFilmDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub rating: Option<f64>,
    pub actors_to_add: Option<Vec<Uuid>>,
    pub actors_to_del: Option<Vec<Uuid>>,
}

#[derive(ToSchema)]
pub struct UserDoc {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

#[derive(ToSchema)]
pub struct CreateUserDoc {
    pub name: String,
    pub password: String,
    /// Defaults to "пользователь"; "администратор" grants write access
    pub role: Option<String>,
}

#[derive(ToSchema)]
pub struct ChangeRoleDoc {
    pub role: String,
}

struct BasicAuth;

impl Modify for BasicAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme("basic_auth", SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)));
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::films::list,
        crate::routes::films::get,
        crate::routes::films::create,
        crate::routes::films::update,
        crate::routes::films::delete,
        crate::routes::actors::list,
        crate::routes::actors::get,
        crate::routes::actors::create,
        crate::routes::actors::update,
        crate::routes::actors::delete,
        crate::routes::users::create,
        crate::routes::users::change_role,
        crate::routes::users::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ActorFilmDoc,
            ActorDoc,
            FilmActorDoc,
            FilmDoc,
            CreateActorDoc,
            UpdateActorDoc,
            CreateFilmDoc,
            UpdateFilmDoc,
            UserDoc,
            CreateUserDoc,
            ChangeRoleDoc,
            crate::routes::Created,
            crate::errors::ErrorBody,
        )
    ),
    modifiers(&BasicAuth),
    tags(
        (name = "health"),
        (name = "films"),
        (name = "actors"),
        (name = "users")
    )
)]
pub struct ApiDoc;
