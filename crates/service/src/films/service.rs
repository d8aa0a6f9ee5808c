use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{Film, FilmSort, FilmUpdate, NewFilm};
use crate::errors::ServiceError;
use crate::films::repository::FilmRepository;
use crate::merge::merge_film;
use crate::reconcile::{reconcile, Counterpart};

/// Film use cases on top of a [`FilmRepository`].
pub struct FilmsService<R: FilmRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: FilmRepository + ?Sized> FilmsService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validate and store a new film linked to `input.actors`.
    ///
    /// # Examples
    /// ```
    /// use service::films::{FilmsService, repository::mock::MockFilmRepository};
    /// use service::domain::{FilmInfo, NewFilm};
    /// use std::sync::Arc;
    /// let svc = FilmsService::new(Arc::new(MockFilmRepository::default()));
    /// let info = FilmInfo { name: "Film".into(), description: "d".into(), date: "2000-01-01".into(), rating: 5.2 };
    /// let id = tokio_test::block_on(svc.add_new_film(NewFilm { info, actors: vec![] })).unwrap();
    /// assert_eq!(tokio_test::block_on(svc.get_film_by_id(id)).unwrap().rating, 5.2);
    /// ```
    #[instrument(skip(self, input), fields(actors = input.actors.len()))]
    pub async fn add_new_film(&self, input: NewFilm) -> Result<Uuid, ServiceError> {
        let fields = input.info.validate().map_err(|e| {
            debug!(error = %e, "film rejected");
            e
        })?;
        let id = self.repo.create(&fields, &input.actors).await?;
        info!(film_id = %id, "film_created");
        Ok(id)
    }

    #[instrument(skip(self, input), fields(film_id = %input.id))]
    pub async fn edit_film(&self, input: FilmUpdate) -> Result<(), ServiceError> {
        let current = self.repo.get_by_id(input.id).await?;

        let fields = merge_film(&input.info, &current).validate().map_err(|e| {
            debug!(error = %e, "merged film rejected");
            e
        })?;

        if !input.actors_to_add.is_empty() || !input.actors_to_del.is_empty() {
            reconcile(
                Counterpart::Actor,
                current.actors.iter().map(|a| a.id),
                &input.actors_to_add,
                &input.actors_to_del,
            )
            .map_err(|e| {
                debug!(error = %e, "actor links rejected");
                e
            })?;
        }

        self.repo
            .edit(input.id, &fields, &input.actors_to_add, &input.actors_to_del)
            .await?;
        info!(added = input.actors_to_add.len(), removed = input.actors_to_del.len(), "film_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_film(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!("film_deleted");
        Ok(())
    }

    pub async fn get_all_films(&self, sort: FilmSort) -> Result<Vec<Film>, ServiceError> {
        self.repo.get_all(sort).await
    }

    pub async fn get_film_by_id(&self, id: Uuid) -> Result<Film, ServiceError> {
        self.repo.get_by_id(id).await
    }

    pub async fn get_films_by_name(&self, name: &str) -> Result<Vec<Film>, ServiceError> {
        self.repo.get_by_name(name).await
    }

    pub async fn get_films_by_actor_name(&self, name: &str) -> Result<Vec<Film>, ServiceError> {
        self.repo.get_by_actor_name(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilmActor, FilmFields, FilmInfo, SortField, SortOrder};
    use crate::films::repository::mock::MockFilmRepository;
    use crate::reconcile::LinkError;
    use crate::validation::ValidationError;
    use chrono::NaiveDate;

    fn film_info() -> FilmInfo {
        FilmInfo { name: "Film".into(), description: "d".into(), date: "2000-01-01".into(), rating: 5.2 }
    }

    fn stored(name: &str, rating: f64, actors: &[Uuid]) -> Film {
        Film {
            id: Uuid::new_v4(),
            name: name.into(),
            description: "d".into(),
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            rating,
            actors: actors
                .iter()
                .map(|&id| FilmActor { id, name: "Anna".into(), second_name: "Petrova".into(), patronymic: None })
                .collect(),
        }
    }

    fn update(id: Uuid) -> FilmUpdate {
        FilmUpdate { id, info: FilmInfo::default(), actors_to_add: vec![], actors_to_del: vec![] }
    }

    #[tokio::test]
    async fn add_new_film_succeeds() {
        let repo = Arc::new(MockFilmRepository::default());
        let svc = FilmsService::new(repo.clone());
        svc.add_new_film(NewFilm { info: film_info(), actors: vec![] }).await.unwrap();

        let expected = FilmFields {
            name: "Film".into(),
            description: "d".into(),
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            rating: 5.2,
        };
        assert_eq!(repo.creates(), vec![(expected, vec![])]);
    }

    #[tokio::test]
    async fn invalid_film_is_never_created() {
        let repo = Arc::new(MockFilmRepository::default());
        let svc = FilmsService::new(repo.clone());
        let info = FilmInfo { rating: 10.1, ..film_info() };
        let err = svc.add_new_film(NewFilm { info, actors: vec![] }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::RatingTooBig(_))));
        assert!(repo.creates().is_empty());
    }

    #[tokio::test]
    async fn edit_film_merges_and_keeps_rating() {
        let film = stored("Film", 5.2, &[]);
        let repo = Arc::new(MockFilmRepository::with_films([film.clone()]));
        let svc = FilmsService::new(repo.clone());
        let input = FilmUpdate { info: FilmInfo { name: "Renamed".into(), ..Default::default() }, ..update(film.id) };
        svc.edit_film(input).await.unwrap();

        let edited = &repo.edits()[0];
        assert_eq!(edited.fields.name, "Renamed");
        assert_eq!(edited.fields.rating, 5.2);
        assert_eq!(edited.fields.date, film.date);
    }

    #[tokio::test]
    async fn edit_film_rejects_bad_links_before_writing() {
        let linked = Uuid::new_v4();
        let film = stored("Film", 5.2, &[linked]);
        let repo = Arc::new(MockFilmRepository::with_films([film.clone()]));
        let svc = FilmsService::new(repo.clone());

        let err = svc.edit_film(FilmUpdate { actors_to_add: vec![linked], ..update(film.id) }).await.unwrap_err();
        assert_eq!(err.to_string(), format!("actors_to_add contains id already associated: {linked}"));

        let stranger = Uuid::new_v4();
        let err = svc.edit_film(FilmUpdate { actors_to_del: vec![stranger], ..update(film.id) }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Link(LinkError::NotLinked { .. })));
        assert!(repo.edits().is_empty());
    }

    #[tokio::test]
    async fn edit_film_with_invalid_date_never_edits() {
        let film = stored("Film", 5.2, &[]);
        let repo = Arc::new(MockFilmRepository::with_films([film.clone()]));
        let svc = FilmsService::new(repo.clone());
        let input = FilmUpdate { info: FilmInfo { date: "1800-01-01".into(), ..Default::default() }, ..update(film.id) };
        let err = svc.edit_film(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ValidationError::ReleaseDateTooEarly { .. })));
        assert!(repo.edits().is_empty());
    }

    #[tokio::test]
    async fn delete_and_edit_missing_film_are_not_found() {
        let repo = Arc::new(MockFilmRepository::default());
        let svc = FilmsService::new(repo);
        assert!(matches!(svc.delete_film(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.edit_film(update(Uuid::new_v4())).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_all_films_forwards_sort() {
        let low = stored("Alpha", 1.0, &[]);
        let high = stored("Beta", 9.0, &[]);
        let repo = Arc::new(MockFilmRepository::with_films([low.clone(), high.clone()]));
        let svc = FilmsService::new(repo.clone());

        let films = svc.get_all_films(FilmSort::default()).await.unwrap();
        assert_eq!(films.iter().map(|f| f.id).collect::<Vec<_>>(), vec![high.id, low.id]);

        let by_name = FilmSort { field: SortField::Name, order: SortOrder::Asc };
        let films = svc.get_all_films(by_name).await.unwrap();
        assert_eq!(films[0].name, "Alpha");
        assert_eq!(repo.sorts(), vec![FilmSort::default(), by_name]);
    }

    #[tokio::test]
    async fn name_and_actor_searches() {
        let actor = Uuid::new_v4();
        let with_actor = stored("Solaris", 8.0, &[actor]);
        let without = stored("Stalker", 8.5, &[]);
        let repo = Arc::new(MockFilmRepository::with_films([with_actor.clone(), without.clone()]));
        let svc = FilmsService::new(repo);

        let found = svc.get_films_by_name("Sta").await.unwrap();
        assert_eq!(found, vec![without]);
        let found = svc.get_films_by_actor_name("Anna Pet").await.unwrap();
        assert_eq!(found, vec![with_actor]);
    }

    #[tokio::test]
    async fn repeated_actor_in_add_list_links_once() {
        let film = stored("Film", 5.2, &[]);
        let repo = Arc::new(MockFilmRepository::with_films([film.clone()]));
        let svc = FilmsService::new(repo.clone());
        let actor = Uuid::new_v4();
        svc.edit_film(FilmUpdate { actors_to_add: vec![actor, actor], ..update(film.id) }).await.unwrap();

        let after = svc.get_film_by_id(film.id).await.unwrap();
        assert_eq!(after.actors.iter().map(|a| a.id).collect::<Vec<_>>(), vec![actor]);
    }
}
