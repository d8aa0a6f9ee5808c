//! Field rules for actors and films.
//!
//! Checks run in a fixed order and stop at the first violation, so a given
//! input always yields the same message.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::{ActorFields, ActorInfo, FilmFields, FilmInfo, Sex};

pub const NAME_MAX_LEN: usize = 150;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 10.0;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Either entirely cyrillic or entirely latin letters.
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[а-яА-ЯёЁ]+|[a-zA-Z]+)$").expect("valid regex"));

pub fn earliest_birth_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// First public film screening.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid {field} format. field must contain only characters from the english or russian language, but has: {value}")]
    NameFormat { field: &'static str, value: String },
    #[error("input {entity}'s {field} too short. length must be between 1 and {max}, but got: {len}")]
    TooShort { entity: &'static str, field: &'static str, max: usize, len: usize },
    #[error("input {entity}'s {field} too long. length must be between {min} and {max}, but got: {len}")]
    TooLong { entity: &'static str, field: &'static str, min: usize, max: usize, len: usize },
    #[error("input film's name is empty")]
    EmptyFilmName,
    #[error("empty film's description")]
    EmptyDescription,
    #[error("invalid value in sex field. field value must be equal to 'Мужчина' or 'Женщина', but has: {0}")]
    InvalidSex(String),
    #[error("invalid {field} '{value}': expected YYYY-MM-DD")]
    DateFormat { field: &'static str, value: String },
    #[error("input actor's birthday not in range. date must be in range {min} and {max}, but has: {value}")]
    BirthdayOutOfRange { min: NaiveDate, max: NaiveDate, value: NaiveDate },
    #[error("input film's date not in range. date can't be earlier than {min}, but has: {value}")]
    ReleaseDateTooEarly { min: NaiveDate, value: NaiveDate },
    #[error("input film's rating is negative. rating value must be in range between 0 and 10, but got: {0}")]
    NegativeRating(f64),
    #[error("input film's rating is too big. rating value must be in range between 0 and 10, but got: {0}")]
    RatingTooBig(f64),
    #[error("input film's rating is not a number")]
    RatingNotFinite,
}

fn check_name_format(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || NAME_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::NameFormat { field, value: value.to_string() })
    }
}

fn check_length(entity: &'static str, field: &'static str, value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { entity, field, max, len });
    }
    if len > max {
        return Err(ValidationError::TooLong { entity, field, min, max, len });
    }
    Ok(())
}

pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::DateFormat { field, value: value.to_string() })
}

impl ActorInfo {
    /// Validate against today's date (UTC).
    pub fn validate(&self) -> Result<ActorFields, ValidationError> {
        self.validate_at(Utc::now().date_naive())
    }

    /// Validate with an explicit upper bound for the birth date.
    pub fn validate_at(&self, today: NaiveDate) -> Result<ActorFields, ValidationError> {
        check_name_format("name", &self.name)?;
        check_name_format("second_name", &self.second_name)?;
        check_name_format("patronymic", &self.patronymic)?;

        check_length("actor", "name", &self.name, 1, NAME_MAX_LEN)?;
        check_length("actor", "second_name", &self.second_name, 1, NAME_MAX_LEN)?;
        check_length("actor", "patronymic", &self.patronymic, 0, NAME_MAX_LEN)?;

        let sex = Sex::parse(&self.sex).ok_or_else(|| ValidationError::InvalidSex(self.sex.clone()))?;

        let date_of_birth = parse_date("date_of_birth", &self.date_of_birth)?;
        let min = earliest_birth_date();
        if date_of_birth < min || date_of_birth > today {
            return Err(ValidationError::BirthdayOutOfRange { min, max: today, value: date_of_birth });
        }

        Ok(ActorFields {
            name: self.name.clone(),
            second_name: self.second_name.clone(),
            patronymic: (!self.patronymic.is_empty()).then(|| self.patronymic.clone()),
            sex,
            date_of_birth,
        })
    }
}

impl FilmInfo {
    pub fn validate(&self) -> Result<FilmFields, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyFilmName);
        }
        check_length("film", "name", &self.name, 1, NAME_MAX_LEN)?;

        if self.description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        check_length("film", "description", &self.description, 1, DESCRIPTION_MAX_LEN)?;

        let date = parse_date("date", &self.date)?;
        let min = earliest_release_date();
        if date < min {
            return Err(ValidationError::ReleaseDateTooEarly { min, value: date });
        }

        if !self.rating.is_finite() {
            return Err(ValidationError::RatingNotFinite);
        }
        if self.rating < RATING_MIN {
            return Err(ValidationError::NegativeRating(self.rating));
        }
        if self.rating > RATING_MAX {
            return Err(ValidationError::RatingTooBig(self.rating));
        }

        Ok(FilmFields { name: self.name.clone(), description: self.description.clone(), date, rating: self.rating })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> ActorInfo {
        ActorInfo {
            name: "Maxim".into(),
            second_name: "Sizask".into(),
            patronymic: "Edu".into(),
            sex: "Male".into(),
            date_of_birth: "2000-01-01".into(),
        }
    }

    fn film() -> FilmInfo {
        FilmInfo { name: "Film".into(), description: "d".into(), date: "2000-01-01".into(), rating: 5.2 }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn valid_actor_passes() {
        let fields = actor().validate_at(today()).unwrap();
        assert_eq!(fields.sex, Sex::Male);
        assert_eq!(fields.patronymic.as_deref(), Some("Edu"));
        assert_eq!(fields.date_of_birth, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
    }

    #[test]
    fn cyrillic_names_pass() {
        let info = ActorInfo {
            name: "Фёдор".into(),
            second_name: "Бондарчук".into(),
            patronymic: String::new(),
            sex: "Мужчина".into(),
            ..actor()
        };
        let fields = info.validate_at(today()).unwrap();
        assert_eq!(fields.patronymic, None);
    }

    #[test]
    fn digits_and_mixed_scripts_are_rejected() {
        for bad in ["Max1m", "Maxим", "Max im", "Max-im"] {
            let info = ActorInfo { name: bad.into(), ..actor() };
            let err = info.validate_at(today()).unwrap_err();
            assert!(matches!(err, ValidationError::NameFormat { field: "name", .. }), "{bad}: {err}");
        }
        let info = ActorInfo { second_name: "Sizask2".into(), ..actor() };
        assert!(matches!(
            info.validate_at(today()).unwrap_err(),
            ValidationError::NameFormat { field: "second_name", .. }
        ));
    }

    #[test]
    fn format_is_checked_before_length() {
        let info = ActorInfo { name: "1".repeat(200), ..actor() };
        assert!(matches!(info.validate_at(today()).unwrap_err(), ValidationError::NameFormat { .. }));
    }

    #[test]
    fn empty_name_is_too_short() {
        let info = ActorInfo { name: String::new(), ..actor() };
        let err = info.validate_at(today()).unwrap_err();
        assert_eq!(err.to_string(), "input actor's name too short. length must be between 1 and 150, but got: 0");
    }

    #[test]
    fn name_length_counts_characters() {
        let info = ActorInfo { name: "Я".repeat(150), ..actor() };
        assert!(info.validate_at(today()).is_ok());

        let info = ActorInfo { second_name: "a".repeat(151), ..actor() };
        assert!(matches!(
            info.validate_at(today()).unwrap_err(),
            ValidationError::TooLong { field: "second_name", len: 151, .. }
        ));
    }

    #[test]
    fn unknown_sex_is_rejected() {
        let info = ActorInfo { sex: "Other".into(), ..actor() };
        assert_eq!(info.validate_at(today()).unwrap_err(), ValidationError::InvalidSex("Other".into()));
    }

    #[test]
    fn birth_date_bounds() {
        let info = ActorInfo { date_of_birth: "1885-01-01".into(), ..actor() };
        assert!(matches!(info.validate_at(today()).unwrap_err(), ValidationError::BirthdayOutOfRange { .. }));

        let info = ActorInfo { date_of_birth: "1900-01-01".into(), ..actor() };
        assert!(info.validate_at(today()).is_ok());

        let info = ActorInfo { date_of_birth: "2024-06-01".into(), ..actor() };
        assert!(info.validate_at(today()).is_ok());

        let info = ActorInfo { date_of_birth: "2024-06-02".into(), ..actor() };
        let err = info.validate_at(today()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "input actor's birthday not in range. date must be in range 1900-01-01 and 2024-06-01, but has: 2024-06-02"
        );
    }

    #[test]
    fn future_birth_date_rejected_against_clock() {
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        let info = ActorInfo { date_of_birth: tomorrow.format(DATE_FORMAT).to_string(), ..actor() };
        assert!(info.validate().is_err());
    }

    #[test]
    fn malformed_birth_date_is_a_parse_error() {
        let info = ActorInfo { date_of_birth: "41-31-2011".into(), ..actor() };
        let err = info.validate_at(today()).unwrap_err();
        assert_eq!(err, ValidationError::DateFormat { field: "date_of_birth", value: "41-31-2011".into() });
    }

    #[test]
    fn valid_film_passes() {
        let fields = film().validate().unwrap();
        assert_eq!(fields.rating, 5.2);
    }

    #[test]
    fn film_name_and_description_rules() {
        let f = FilmInfo { name: String::new(), ..film() };
        assert_eq!(f.validate().unwrap_err().to_string(), "input film's name is empty");

        let f = FilmInfo { name: "x".repeat(151), ..film() };
        assert!(matches!(f.validate().unwrap_err(), ValidationError::TooLong { field: "name", .. }));

        let f = FilmInfo { description: String::new(), ..film() };
        assert_eq!(f.validate().unwrap_err().to_string(), "empty film's description");

        let f = FilmInfo { description: "d".repeat(1000), ..film() };
        assert!(f.validate().is_ok());

        let f = FilmInfo { description: "d".repeat(1001), ..film() };
        assert!(matches!(f.validate().unwrap_err(), ValidationError::TooLong { field: "description", .. }));
    }

    #[test]
    fn release_date_lower_bound() {
        let f = FilmInfo { date: "1895-12-28".into(), ..film() };
        assert!(f.validate().is_ok());

        let f = FilmInfo { date: "1895-12-27".into(), ..film() };
        assert!(matches!(f.validate().unwrap_err(), ValidationError::ReleaseDateTooEarly { .. }));

        let f = FilmInfo { date: "2999-01-01".into(), ..film() };
        assert!(f.validate().is_ok());

        let f = FilmInfo { date: "yesterday".into(), ..film() };
        assert!(matches!(f.validate().unwrap_err(), ValidationError::DateFormat { field: "date", .. }));
    }

    #[test]
    fn rating_bounds() {
        for ok in [0.0, 10.0, 7.5] {
            assert!(FilmInfo { rating: ok, ..film() }.validate().is_ok(), "{ok}");
        }
        assert_eq!(FilmInfo { rating: -0.1, ..film() }.validate().unwrap_err(), ValidationError::NegativeRating(-0.1));
        assert_eq!(FilmInfo { rating: 10.1, ..film() }.validate().unwrap_err(), ValidationError::RatingTooBig(10.1));
        assert_eq!(FilmInfo { rating: f64::NAN, ..film() }.validate().unwrap_err(), ValidationError::RatingNotFinite);
    }
}
