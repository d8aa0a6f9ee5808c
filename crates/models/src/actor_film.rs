//! Link rows of the actor/film many-to-many association.

use std::collections::HashSet;

use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actor_film")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub actor_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub film_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::actor::Entity",
        from = "Column::ActorId",
        to = "super::actor::Column::Id",
        on_delete = "Cascade"
    )]
    Actor,
    #[sea_orm(
        belongs_to = "super::film::Entity",
        from = "Column::FilmId",
        to = "super::film::Column::Id",
        on_delete = "Cascade"
    )]
    Film,
}

impl Related<super::actor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Film.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert one link row per distinct pair. Each pair is its own statement so a
/// failure names the offending pair; callers wrap the batch in a transaction.
pub async fn link<C: ConnectionTrait>(db: &C, pairs: impl IntoIterator<Item = (Uuid, Uuid)>) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for (actor_id, film_id) in pairs {
        if !seen.insert((actor_id, film_id)) {
            continue;
        }
        ActiveModel { actor_id: Set(actor_id), film_id: Set(film_id) }
            .insert(db)
            .await
            .map_err(|e| ModelError::Db(format!("link actor {actor_id} to film {film_id}: {e}")))?;
    }
    Ok(())
}

/// Delete the given link rows. Missing rows are not an error here.
pub async fn unlink<C: ConnectionTrait>(db: &C, pairs: impl IntoIterator<Item = (Uuid, Uuid)>) -> Result<(), ModelError> {
    for (actor_id, film_id) in pairs {
        Entity::delete_many()
            .filter(Column::ActorId.eq(actor_id))
            .filter(Column::FilmId.eq(film_id))
            .exec(db)
            .await?;
    }
    Ok(())
}
