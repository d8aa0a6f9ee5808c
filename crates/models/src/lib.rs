//! sea-orm entities for the films library schema.

pub mod errors;
pub mod db;
pub mod actor;
pub mod film;
pub mod actor_film;
pub mod app_user;
