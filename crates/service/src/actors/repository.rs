use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Actor, ActorFields};
use crate::errors::ServiceError;

/// Persistence for actors and their film links.
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// Insert the actor and link it to every film in `films`.
    async fn create(&self, actor: &ActorFields, films: &[Uuid]) -> Result<Uuid, ServiceError>;
    /// Overwrite the scalar fields and apply the link changes in one unit.
    async fn edit(&self, id: Uuid, actor: &ActorFields, films_to_add: &[Uuid], films_to_del: &[Uuid]) -> Result<(), ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn get_all(&self) -> Result<Vec<Actor>, ServiceError>;
    async fn get_by_id(&self, id: Uuid) -> Result<Actor, ServiceError>;
    /// Substring match on "name second_name patronymic".
    async fn get_by_name(&self, name: &str) -> Result<Vec<Actor>, ServiceError>;
}

pub(crate) fn full_name(name: &str, second_name: &str, patronymic: Option<&str>) -> String {
    match patronymic {
        Some(p) => format!("{name} {second_name} {p}"),
        None => format!("{name} {second_name}"),
    }
}

/// In-memory repository for tests and doc examples. Records write calls.
pub mod mock {
    use super::*;
    use crate::domain::ActorFilm;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct ActorEdit {
        pub id: Uuid,
        pub fields: ActorFields,
        pub films_to_add: Vec<Uuid>,
        pub films_to_del: Vec<Uuid>,
    }

    #[derive(Default)]
    pub struct MockActorRepository {
        actors: Mutex<HashMap<Uuid, Actor>>,
        creates: Mutex<Vec<(ActorFields, Vec<Uuid>)>>,
        edits: Mutex<Vec<ActorEdit>>,
        write_error: Mutex<Option<String>>,
    }

    impl MockActorRepository {
        pub fn with_actors(actors: impl IntoIterator<Item = Actor>) -> Self {
            let repo = Self::default();
            for a in actors {
                repo.insert(a);
            }
            repo
        }

        pub fn insert(&self, actor: Actor) {
            self.actors.lock().unwrap().insert(actor.id, actor);
        }

        pub fn creates(&self) -> Vec<(ActorFields, Vec<Uuid>)> {
            self.creates.lock().unwrap().clone()
        }

        pub fn edits(&self) -> Vec<ActorEdit> {
            self.edits.lock().unwrap().clone()
        }

        /// Make every subsequent write fail with a database error.
        pub fn fail_writes(&self, msg: &str) {
            *self.write_error.lock().unwrap() = Some(msg.to_string());
        }

        fn check_writable(&self) -> Result<(), ServiceError> {
            match self.write_error.lock().unwrap().as_ref() {
                Some(msg) => Err(ServiceError::Db(msg.clone())),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ActorRepository for MockActorRepository {
        async fn create(&self, actor: &ActorFields, films: &[Uuid]) -> Result<Uuid, ServiceError> {
            self.creates.lock().unwrap().push((actor.clone(), films.to_vec()));
            self.check_writable()?;
            let id = Uuid::new_v4();
            self.insert(Actor {
                id,
                name: actor.name.clone(),
                second_name: actor.second_name.clone(),
                patronymic: actor.patronymic.clone(),
                sex: actor.sex,
                date_of_birth: actor.date_of_birth,
                films: films.iter().map(|&id| ActorFilm { id, name: String::new() }).collect(),
            });
            Ok(id)
        }

        async fn edit(&self, id: Uuid, actor: &ActorFields, films_to_add: &[Uuid], films_to_del: &[Uuid]) -> Result<(), ServiceError> {
            self.edits.lock().unwrap().push(ActorEdit {
                id,
                fields: actor.clone(),
                films_to_add: films_to_add.to_vec(),
                films_to_del: films_to_del.to_vec(),
            });
            self.check_writable()?;
            let mut actors = self.actors.lock().unwrap();
            let stored = actors.get_mut(&id).ok_or_else(|| ServiceError::not_found("actor", id))?;
            stored.name = actor.name.clone();
            stored.second_name = actor.second_name.clone();
            stored.patronymic = actor.patronymic.clone();
            stored.sex = actor.sex;
            stored.date_of_birth = actor.date_of_birth;
            stored.films.retain(|f| !films_to_del.contains(&f.id));
            for &film_id in films_to_add {
                if !stored.films.iter().any(|f| f.id == film_id) {
                    stored.films.push(ActorFilm { id: film_id, name: String::new() });
                }
            }
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
            self.check_writable()?;
            self.actors
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| ServiceError::not_found("actor", id))
        }

        async fn get_all(&self) -> Result<Vec<Actor>, ServiceError> {
            let mut all: Vec<Actor> = self.actors.lock().unwrap().values().cloned().collect();
            all.sort_by(|a, b| (&a.second_name, &a.name).cmp(&(&b.second_name, &b.name)));
            Ok(all)
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Actor, ServiceError> {
            self.actors
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("actor", id))
        }

        async fn get_by_name(&self, name: &str) -> Result<Vec<Actor>, ServiceError> {
            let all = self.get_all().await?;
            Ok(all
                .into_iter()
                .filter(|a| full_name(&a.name, &a.second_name, a.patronymic.as_deref()).contains(name))
                .collect())
        }
    }
}
