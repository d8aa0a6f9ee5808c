use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use models::{actor, actor_film, film};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType, LoaderTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Film, FilmActor, FilmFields, FilmSort, SortField, SortOrder};
use crate::errors::ServiceError;
use crate::films::repository::FilmRepository;
use crate::sql::{like_contains, ACTOR_FULL_NAME_LIKE};

pub struct SeaOrmFilmRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmFilmRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn with_actors(&self, films: Vec<film::Model>) -> Result<Vec<Film>, ServiceError> {
        let actors = films.load_many_to_many(actor::Entity, actor_film::Entity, &self.db).await?;
        Ok(films.into_iter().zip(actors).map(|(f, a)| to_film(f, a)).collect())
    }
}

fn to_film(m: film::Model, actors: Vec<actor::Model>) -> Film {
    Film {
        id: m.id,
        name: m.name,
        description: m.description,
        date: m.release_date,
        rating: m.rating,
        actors: actors
            .into_iter()
            .map(|a| FilmActor { id: a.id, name: a.name, second_name: a.second_name, patronymic: a.patronymic })
            .collect(),
    }
}

fn sort_column(field: SortField) -> film::Column {
    match field {
        SortField::Name => film::Column::Name,
        SortField::Date => film::Column::ReleaseDate,
        SortField::Rating => film::Column::Rating,
    }
}

fn sort_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

async fn ensure_actors_exist<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> Result<(), ServiceError> {
    if ids.is_empty() {
        return Ok(());
    }
    let found: HashSet<Uuid> = actor::Entity::find()
        .select_only()
        .column(actor::Column::Id)
        .filter(actor::Column::Id.is_in(ids.iter().copied()))
        .into_tuple::<Uuid>()
        .all(db)
        .await?
        .into_iter()
        .collect();
    match ids.iter().find(|id| !found.contains(id)) {
        Some(id) => Err(ServiceError::not_found("actor", id)),
        None => Ok(()),
    }
}

#[async_trait]
impl FilmRepository for SeaOrmFilmRepository {
    async fn create(&self, film: &FilmFields, actors: &[Uuid]) -> Result<Uuid, ServiceError> {
        let txn = self.db.begin().await?;
        ensure_actors_exist(&txn, actors).await?;

        let id = Uuid::new_v4();
        let now: DateTimeWithTimeZone = Utc::now().into();
        film::ActiveModel {
            id: Set(id),
            name: Set(film.name.clone()),
            description: Set(film.description.clone()),
            release_date: Set(film.date),
            rating: Set(film.rating),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        actor_film::link(&txn, actors.iter().map(|&actor_id| (actor_id, id)).collect::<Vec<_>>()).await?;

        txn.commit().await?;
        debug!(film_id = %id, links = actors.len(), "film row inserted");
        Ok(id)
    }

    async fn edit(&self, id: Uuid, film: &FilmFields, actors_to_add: &[Uuid], actors_to_del: &[Uuid]) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let stored = film::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("film", id))?;
        ensure_actors_exist(&txn, actors_to_add).await?;

        let mut am: film::ActiveModel = stored.into();
        am.name = Set(film.name.clone());
        am.description = Set(film.description.clone());
        am.release_date = Set(film.date);
        am.rating = Set(film.rating);
        am.updated_at = Set(Utc::now().into());
        am.update(&txn).await?;

        actor_film::unlink(&txn, actors_to_del.iter().map(|&actor_id| (actor_id, id)).collect::<Vec<_>>()).await?;
        actor_film::link(&txn, actors_to_add.iter().map(|&actor_id| (actor_id, id)).collect::<Vec<_>>()).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let res = film::Entity::delete_by_id(id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("film", id));
        }
        txn.commit().await?;
        Ok(())
    }

    async fn get_all(&self, sort: FilmSort) -> Result<Vec<Film>, ServiceError> {
        let films = film::Entity::find()
            .order_by(sort_column(sort.field), sort_order(sort.order))
            .order_by_asc(film::Column::Id)
            .all(&self.db)
            .await?;
        self.with_actors(films).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Film, ServiceError> {
        let m = film::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("film", id))?;
        let actors = m.find_related(actor::Entity).all(&self.db).await?;
        Ok(to_film(m, actors))
    }

    async fn get_by_name(&self, name: &str) -> Result<Vec<Film>, ServiceError> {
        let films = film::Entity::find()
            .filter(film::Column::Name.like(like_contains(name)))
            .order_by_desc(film::Column::Rating)
            .all(&self.db)
            .await?;
        self.with_actors(films).await
    }

    async fn get_by_actor_name(&self, name: &str) -> Result<Vec<Film>, ServiceError> {
        let films = film::Entity::find()
            .join(JoinType::InnerJoin, film::Relation::ActorFilm.def())
            .join(JoinType::InnerJoin, actor_film::Relation::Actor.def())
            .filter(Expr::cust_with_values(ACTOR_FULL_NAME_LIKE, [like_contains(name)]))
            .distinct()
            .order_by_desc(film::Column::Rating)
            .all(&self.db)
            .await?;
        self.with_actors(films).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::repository::ActorRepository;
    use crate::actors::SeaOrmActorRepository;
    use crate::domain::{ActorFields, Sex};
    use crate::test_support::get_db;
    use chrono::NaiveDate;

    fn fields(name: &str, rating: f64) -> FilmFields {
        FilmFields {
            name: name.to_string(),
            description: "d".into(),
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            rating,
        }
    }

    fn unique(prefix: &str) -> String {
        format!("{prefix}-{}", Uuid::new_v4())
    }

    #[test]
    fn sort_whitelist_maps_to_columns() {
        assert!(matches!(sort_column(SortField::Date), film::Column::ReleaseDate));
        assert!(matches!(sort_order(SortOrder::Asc), Order::Asc));
    }

    #[tokio::test]
    async fn films_are_sorted_and_carry_actors() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let films = SeaOrmFilmRepository::new(db.clone());
        let actors = SeaOrmActorRepository::new(db);

        let tag = unique("sorted");
        let low = films.create(&fields(&format!("{tag} a"), 1.0), &[]).await?;
        let high = films.create(&fields(&format!("{tag} b"), 9.0), &[]).await?;

        let by_rating = films.get_by_name(&tag).await?;
        assert_eq!(by_rating.iter().map(|f| f.id).collect::<Vec<_>>(), vec![high, low]);

        let sort = FilmSort { field: SortField::Rating, order: SortOrder::Asc };
        let all: Vec<Uuid> = films.get_all(sort).await?.into_iter().map(|f| f.id).filter(|id| *id == low || *id == high).collect();
        assert_eq!(all, vec![low, high]);

        let actor = ActorFields {
            name: "Linked".into(),
            second_name: "Actor".into(),
            patronymic: None,
            sex: Sex::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 5).unwrap(),
        };
        let actor_id = actors.create(&actor, &[low]).await?;
        let film = films.get_by_id(low).await?;
        assert_eq!(film.actors.len(), 1);
        assert_eq!(film.actors[0].id, actor_id);

        let by_actor = films.get_by_actor_name("Linked Act").await?;
        assert!(by_actor.iter().any(|f| f.id == low));
        assert!(!by_actor.iter().any(|f| f.id == high));

        films.delete(low).await?;
        assert!(actors.get_by_id(actor_id).await?.films.is_empty());
        films.delete(high).await?;
        actors.delete(actor_id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn edit_missing_film_is_not_found() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let films = SeaOrmFilmRepository::new(db);
        let err = films.edit(Uuid::new_v4(), &fields("x", 1.0), &[], &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
