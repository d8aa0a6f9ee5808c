//! Films: repository contract, sea-orm implementation and service.

pub mod repository;
pub mod seaorm;
pub mod service;

pub use repository::FilmRepository;
pub use seaorm::SeaOrmFilmRepository;
pub use service::FilmsService;
