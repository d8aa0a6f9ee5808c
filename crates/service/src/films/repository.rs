use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Film, FilmFields, FilmSort};
use crate::errors::ServiceError;

/// Persistence for films and their actor links.
#[async_trait]
pub trait FilmRepository: Send + Sync {
    async fn create(&self, film: &FilmFields, actors: &[Uuid]) -> Result<Uuid, ServiceError>;
    async fn edit(&self, id: Uuid, film: &FilmFields, actors_to_add: &[Uuid], actors_to_del: &[Uuid]) -> Result<(), ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn get_all(&self, sort: FilmSort) -> Result<Vec<Film>, ServiceError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Film, ServiceError>;
    /// Substring match on the film name.
    async fn get_by_name(&self, name: &str) -> Result<Vec<Film>, ServiceError>;
    /// Films with at least one actor whose full name contains `name`.
    async fn get_by_actor_name(&self, name: &str) -> Result<Vec<Film>, ServiceError>;
}

/// In-memory repository for tests and doc examples. Records write calls.
pub mod mock {
    use super::*;
    use crate::actors::repository::full_name;
    use crate::domain::{FilmActor, SortField, SortOrder};
    use std::cmp::Ordering;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct FilmEdit {
        pub id: Uuid,
        pub fields: FilmFields,
        pub actors_to_add: Vec<Uuid>,
        pub actors_to_del: Vec<Uuid>,
    }

    #[derive(Default)]
    pub struct MockFilmRepository {
        films: Mutex<HashMap<Uuid, Film>>,
        creates: Mutex<Vec<(FilmFields, Vec<Uuid>)>>,
        edits: Mutex<Vec<FilmEdit>>,
        sorts: Mutex<Vec<FilmSort>>,
    }

    impl MockFilmRepository {
        pub fn with_films(films: impl IntoIterator<Item = Film>) -> Self {
            let repo = Self::default();
            for f in films {
                repo.insert(f);
            }
            repo
        }

        pub fn insert(&self, film: Film) {
            self.films.lock().unwrap().insert(film.id, film);
        }

        pub fn creates(&self) -> Vec<(FilmFields, Vec<Uuid>)> {
            self.creates.lock().unwrap().clone()
        }

        pub fn edits(&self) -> Vec<FilmEdit> {
            self.edits.lock().unwrap().clone()
        }

        /// Sort parameters received by `get_all`, in call order.
        pub fn sorts(&self) -> Vec<FilmSort> {
            self.sorts.lock().unwrap().clone()
        }

        fn sorted(&self, sort: FilmSort) -> Vec<Film> {
            let mut all: Vec<Film> = self.films.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| match sort.order {
                SortOrder::Asc => compare(a, b, sort.field),
                SortOrder::Desc => compare(b, a, sort.field),
            });
            all
        }

        fn placeholder_actor(id: Uuid) -> FilmActor {
            FilmActor { id, name: String::new(), second_name: String::new(), patronymic: None }
        }
    }

    fn compare(a: &Film, b: &Film, field: SortField) -> Ordering {
        match field {
            SortField::Name => a.name.cmp(&b.name),
            SortField::Date => a.date.cmp(&b.date),
            SortField::Rating => a.rating.total_cmp(&b.rating),
        }
    }

    #[async_trait]
    impl FilmRepository for MockFilmRepository {
        async fn create(&self, film: &FilmFields, actors: &[Uuid]) -> Result<Uuid, ServiceError> {
            self.creates.lock().unwrap().push((film.clone(), actors.to_vec()));
            let id = Uuid::new_v4();
            self.insert(Film {
                id,
                name: film.name.clone(),
                description: film.description.clone(),
                date: film.date,
                rating: film.rating,
                actors: actors.iter().map(|&a| Self::placeholder_actor(a)).collect(),
            });
            Ok(id)
        }

        async fn edit(&self, id: Uuid, film: &FilmFields, actors_to_add: &[Uuid], actors_to_del: &[Uuid]) -> Result<(), ServiceError> {
            self.edits.lock().unwrap().push(FilmEdit {
                id,
                fields: film.clone(),
                actors_to_add: actors_to_add.to_vec(),
                actors_to_del: actors_to_del.to_vec(),
            });
            let mut films = self.films.lock().unwrap();
            let stored = films.get_mut(&id).ok_or_else(|| ServiceError::not_found("film", id))?;
            stored.name = film.name.clone();
            stored.description = film.description.clone();
            stored.date = film.date;
            stored.rating = film.rating;
            stored.actors.retain(|a| !actors_to_del.contains(&a.id));
            for &actor_id in actors_to_add {
                if !stored.actors.iter().any(|a| a.id == actor_id) {
                    stored.actors.push(Self::placeholder_actor(actor_id));
                }
            }
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
            self.films
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| ServiceError::not_found("film", id))
        }

        async fn get_all(&self, sort: FilmSort) -> Result<Vec<Film>, ServiceError> {
            self.sorts.lock().unwrap().push(sort);
            Ok(self.sorted(sort))
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Film, ServiceError> {
            self.films
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("film", id))
        }

        async fn get_by_name(&self, name: &str) -> Result<Vec<Film>, ServiceError> {
            Ok(self.sorted(FilmSort::default()).into_iter().filter(|f| f.name.contains(name)).collect())
        }

        async fn get_by_actor_name(&self, name: &str) -> Result<Vec<Film>, ServiceError> {
            Ok(self
                .sorted(FilmSort::default())
                .into_iter()
                .filter(|f| {
                    f.actors
                        .iter()
                        .any(|a| full_name(&a.name, &a.second_name, a.patronymic.as_deref()).contains(name))
                })
                .collect())
        }
    }
}
