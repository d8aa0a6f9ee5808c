use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "film")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub release_date: Date,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::actor_film::Entity")]
    ActorFilm,
}

impl Related<super::actor_film::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActorFilm.def()
    }
}

impl Related<super::actor::Entity> for Entity {
    fn to() -> RelationDef {
        super::actor_film::Relation::Actor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::actor_film::Relation::Film.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
