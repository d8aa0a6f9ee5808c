//! Create `actor_film` link table.
//!
//! Rows cascade away with either side, so deleting an actor or a film never
//! leaves dangling associations.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActorFilm::Table)
                    .if_not_exists()
                    .col(uuid(ActorFilm::ActorId).not_null())
                    .col(uuid(ActorFilm::FilmId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_actor_film")
                            .col(ActorFilm::ActorId)
                            .col(ActorFilm::FilmId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actor_film_actor")
                            .from(ActorFilm::Table, ActorFilm::ActorId)
                            .to(Actor::Table, Actor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actor_film_film")
                            .from(ActorFilm::Table, ActorFilm::FilmId)
                            .to(Film::Table, Film::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ActorFilm::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ActorFilm { Table, ActorId, FilmId }

#[derive(DeriveIden)]
enum Actor { Table, Id }

#[derive(DeriveIden)]
enum Film { Table, Id }
