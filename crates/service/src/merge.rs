//! Coalesce a partial update with the persisted entity.
//!
//! Every supplied field wins unless it is the "unspecified" value (empty
//! string, or a zero rating), in which case the stored value is kept. The
//! result is raw input again and goes through the usual validation.

use crate::domain::{Actor, ActorInfo, Film, FilmInfo};
use crate::validation::DATE_FORMAT;

fn coalesce(supplied: &str, stored: impl FnOnce() -> String) -> String {
    if supplied.is_empty() {
        stored()
    } else {
        supplied.to_string()
    }
}

pub fn merge_actor(patch: &ActorInfo, current: &Actor) -> ActorInfo {
    ActorInfo {
        name: coalesce(&patch.name, || current.name.clone()),
        second_name: coalesce(&patch.second_name, || current.second_name.clone()),
        patronymic: coalesce(&patch.patronymic, || current.patronymic.clone().unwrap_or_default()),
        sex: coalesce(&patch.sex, || current.sex.as_str().to_string()),
        date_of_birth: coalesce(&patch.date_of_birth, || current.date_of_birth.format(DATE_FORMAT).to_string()),
    }
}

pub fn merge_film(patch: &FilmInfo, current: &Film) -> FilmInfo {
    FilmInfo {
        name: coalesce(&patch.name, || current.name.clone()),
        description: coalesce(&patch.description, || current.description.clone()),
        date: coalesce(&patch.date, || current.date.format(DATE_FORMAT).to_string()),
        rating: if patch.rating == 0.0 { current.rating } else { patch.rating },
    }
}
