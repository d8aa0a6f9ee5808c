//! Domain types shared by the actor, film and user services.
//!
//! `*Info` structs carry raw caller input where an empty value (or a zero
//! rating) means "not supplied". Validation turns them into the typed
//! `*Fields` structs that repositories persist.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SEX_MALE: &str = "Мужчина";
pub const SEX_FEMALE: &str = "Женщина";

/// Role token that grants write access.
pub const ROLE_ADMIN: &str = "администратор";
pub const ROLE_USER: &str = "пользователь";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "Мужчина", alias = "Male")]
    Male,
    #[serde(rename = "Женщина", alias = "Female")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => SEX_MALE,
            Sex::Female => SEX_FEMALE,
        }
    }

    /// Accepts the stored tokens and their english aliases.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            SEX_MALE | "Male" => Some(Sex::Male),
            SEX_FEMALE | "Female" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw actor fields as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorInfo {
    pub name: String,
    pub second_name: String,
    pub patronymic: String,
    pub sex: String,
    pub date_of_birth: String,
}

impl ActorInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.second_name.is_empty()
            && self.patronymic.is_empty()
            && self.sex.is_empty()
            && self.date_of_birth.is_empty()
    }
}

/// Actor fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorFields {
    pub name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
}

/// Raw film fields as supplied by a caller. `rating == 0.0` means unspecified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilmInfo {
    pub name: String,
    pub description: String,
    pub date: String,
    pub rating: f64,
}

impl FilmInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.date.is_empty() && self.rating == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmFields {
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub rating: f64,
}

/// Film projection embedded in an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorFilm {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
    pub sex: Sex,
    pub date_of_birth: NaiveDate,
    pub films: Vec<ActorFilm>,
}

/// Actor projection embedded in a film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmActor {
    pub id: Uuid,
    pub name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub rating: f64,
    pub actors: Vec<FilmActor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewActor {
    pub info: ActorInfo,
    pub films: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorUpdate {
    pub id: Uuid,
    pub info: ActorInfo,
    pub films_to_add: Vec<Uuid>,
    pub films_to_del: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewFilm {
    pub info: FilmInfo,
    pub actors: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilmUpdate {
    pub id: Uuid,
    pub info: FilmInfo,
    pub actors_to_add: Vec<Uuid>,
    pub actors_to_del: Vec<Uuid>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Date,
    #[default]
    Rating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "ASC")]
    Asc,
    #[default]
    #[serde(alias = "DESC")]
    Desc,
}

/// Ordering for film listings; defaults to rating, highest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl FilmSort {
    pub fn new(field: Option<SortField>, order: Option<SortOrder>) -> Self {
        Self { field: field.unwrap_or_default(), order: order.unwrap_or_default() }
    }
}
