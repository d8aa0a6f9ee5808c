use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::actors::{ActorRepository, ActorsService, SeaOrmActorRepository};
use service::films::{FilmRepository, FilmsService, SeaOrmFilmRepository};
use service::users::{SeaOrmUserRepository, UserRepository, UsersService};

/// Shared handler state. Services hold their repositories as trait objects so
/// tests can swap in the in-memory mocks.
#[derive(Clone)]
pub struct ServerState {
    pub actors: Arc<ActorsService<dyn ActorRepository>>,
    pub films: Arc<FilmsService<dyn FilmRepository>>,
    pub users: Arc<UsersService<dyn UserRepository>>,
}

impl ServerState {
    pub fn new(
        actors: Arc<dyn ActorRepository>,
        films: Arc<dyn FilmRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            actors: Arc::new(ActorsService::new(actors)),
            films: Arc::new(FilmsService::new(films)),
            users: Arc::new(UsersService::new(users)),
        }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(SeaOrmActorRepository::new(db.clone())),
            Arc::new(SeaOrmFilmRepository::new(db.clone())),
            Arc::new(SeaOrmUserRepository::new(db)),
        )
    }
}
