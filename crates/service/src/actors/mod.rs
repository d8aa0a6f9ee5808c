//! Actors: repository contract, sea-orm implementation and service.

pub mod repository;
pub mod seaorm;
pub mod service;

pub use repository::ActorRepository;
pub use seaorm::SeaOrmActorRepository;
pub use service::ActorsService;
