//! Users: credential checks and role management behind basic auth.

pub mod repository;
pub mod seaorm;
pub mod service;

pub use repository::UserRepository;
pub use seaorm::SeaOrmUserRepository;
pub use service::UsersService;
