use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use models::{actor, actor_film, film};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::actors::repository::ActorRepository;
use crate::domain::{Actor, ActorFields, ActorFilm, Sex};
use crate::errors::ServiceError;
use crate::sql::{like_contains, ACTOR_FULL_NAME_LIKE};

pub struct SeaOrmActorRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmActorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_actor(m: actor::Model, films: Vec<film::Model>) -> Result<Actor, ServiceError> {
    let sex = Sex::parse(&m.sex)
        .ok_or_else(|| ServiceError::Db(format!("actor {} has unknown sex token '{}'", m.id, m.sex)))?;
    Ok(Actor {
        id: m.id,
        name: m.name,
        second_name: m.second_name,
        patronymic: m.patronymic,
        sex,
        date_of_birth: m.date_of_birth,
        films: films.into_iter().map(|f| ActorFilm { id: f.id, name: f.name }).collect(),
    })
}

/// Reject links to films that do not exist with a not-found error instead of
/// a foreign key failure.
async fn ensure_films_exist<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> Result<(), ServiceError> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: HashSet<Uuid> = film::Entity::find()
        .select_only()
        .column(film::Column::Id)
        .filter(film::Column::Id.is_in(ids.iter().copied()))
        .into_tuple::<Uuid>()
        .all(db)
        .await?
        .into_iter()
        .collect();
    match ids.iter().find(|id| !found.contains(id)) {
        Some(id) => Err(ServiceError::not_found("film", id)),
        None => Ok(()),
    }
}

impl SeaOrmActorRepository {
    async fn with_films(&self, actors: Vec<actor::Model>) -> Result<Vec<Actor>, ServiceError> {
        let films = actors.load_many_to_many(film::Entity, actor_film::Entity, &self.db).await?;
        actors.into_iter().zip(films).map(|(a, f)| to_actor(a, f)).collect()
    }
}

#[async_trait]
impl ActorRepository for SeaOrmActorRepository {
    async fn create(&self, actor: &ActorFields, films: &[Uuid]) -> Result<Uuid, ServiceError> {
        let txn = self.db.begin().await?;
        ensure_films_exist(&txn, films).await?;

        let id = Uuid::new_v4();
        let now: DateTimeWithTimeZone = Utc::now().into();
        actor::ActiveModel {
            id: Set(id),
            name: Set(actor.name.clone()),
            second_name: Set(actor.second_name.clone()),
            patronymic: Set(actor.patronymic.clone()),
            sex: Set(actor.sex.as_str().to_string()),
            date_of_birth: Set(actor.date_of_birth),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        actor_film::link(&txn, films.iter().map(|&film_id| (id, film_id)).collect::<Vec<_>>()).await?;

        txn.commit().await?;
        debug!(actor_id = %id, links = films.len(), "actor row inserted");
        Ok(id)
    }

    async fn edit(&self, id: Uuid, actor: &ActorFields, films_to_add: &[Uuid], films_to_del: &[Uuid]) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let stored = actor::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("actor", id))?;
        ensure_films_exist(&txn, films_to_add).await?;

        let mut am: actor::ActiveModel = stored.into();
        am.name = Set(actor.name.clone());
        am.second_name = Set(actor.second_name.clone());
        am.patronymic = Set(actor.patronymic.clone());
        am.sex = Set(actor.sex.as_str().to_string());
        am.date_of_birth = Set(actor.date_of_birth);
        am.updated_at = Set(Utc::now().into());
        am.update(&txn).await?;

        actor_film::unlink(&txn, films_to_del.iter().map(|&film_id| (id, film_id)).collect::<Vec<_>>()).await?;
        actor_film::link(&txn, films_to_add.iter().map(|&film_id| (id, film_id)).collect::<Vec<_>>()).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let res = actor::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("actor", id));
        }
        txn.commit().await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Actor>, ServiceError> {
        let actors = actor::Entity::find()
            .order_by_asc(actor::Column::SecondName)
            .order_by_asc(actor::Column::Name)
            .all(&self.db)
            .await?;
        self.with_films(actors).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Actor, ServiceError> {
        let m = actor::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("actor", id))?;
        let films = m.find_related(film::Entity).all(&self.db).await?;
        to_actor(m, films)
    }

    async fn get_by_name(&self, name: &str) -> Result<Vec<Actor>, ServiceError> {
        let actors = actor::Entity::find()
            .filter(Expr::cust_with_values(ACTOR_FULL_NAME_LIKE, [like_contains(name)]))
            .order_by_asc(actor::Column::SecondName)
            .order_by_asc(actor::Column::Name)
            .all(&self.db)
            .await?;
        self.with_films(actors).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use chrono::NaiveDate;

    fn fields(name: &str) -> ActorFields {
        ActorFields {
            name: name.to_string(),
            second_name: "Sizask".into(),
            patronymic: Some("Edu".into()),
            sex: Sex::Male,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        }
    }

    async fn insert_film(db: &DatabaseConnection, name: &str) -> anyhow::Result<Uuid> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let m = film::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set("d".into()),
            release_date: Set(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
            rating: Set(5.0),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;
        Ok(m.id)
    }

    #[tokio::test]
    async fn create_edit_delete_roundtrip() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmActorRepository::new(db.clone());
        let f1 = insert_film(&db, "First").await?;
        let f2 = insert_film(&db, "Second").await?;

        let id = repo.create(&fields("Maxim"), &[f1]).await?;
        let actor = repo.get_by_id(id).await?;
        assert_eq!(actor.films, vec![ActorFilm { id: f1, name: "First".into() }]);

        repo.edit(id, &fields("Ivan"), &[f2], &[f1]).await?;
        let actor = repo.get_by_id(id).await?;
        assert_eq!(actor.name, "Ivan");
        assert_eq!(actor.films.iter().map(|f| f.id).collect::<Vec<_>>(), vec![f2]);

        repo.delete(id).await?;
        assert!(matches!(repo.get_by_id(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(repo.delete(id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_with_unknown_film_writes_nothing() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmActorRepository::new(db);
        let marker = format!("Ghost{}", Uuid::new_v4().simple()).replace(|c: char| c.is_ascii_digit(), "x");

        let err = repo.create(&fields(&marker), &[Uuid::new_v4()]).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(repo.get_by_name(&marker).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn name_search_matches_full_name_substring() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmActorRepository::new(db);
        let id = repo.create(&fields("Searchable"), &[]).await?;

        let found = repo.get_by_name("Searchable Sizask Ed").await?;
        assert!(found.iter().any(|a| a.id == id));
        let found = repo.get_by_name("searchable").await?;
        assert!(!found.iter().any(|a| a.id == id));

        repo.delete(id).await?;
        Ok(())
    }
}
