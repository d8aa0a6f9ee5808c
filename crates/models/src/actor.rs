use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
    pub sex: String,
    pub date_of_birth: Date,
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

impl Related<super::film::Entity> for Entity {
    fn to() -> RelationDef {
        super::actor_film::Relation::Film.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::actor_film::Relation::Actor.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// "name second_name patronymic", the string actor-name searches match against.
    pub fn full_name(&self) -> String {
        match &self.patronymic {
            Some(p) => format!("{} {} {}", self.name, self.second_name, p),
            None => format!("{} {}", self.name, self.second_name),
        }
    }
}
