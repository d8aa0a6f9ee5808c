use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Film lookups from the actor side of the link table
        manager
            .create_index(
                Index::create()
                    .name("idx_actor_film_film")
                    .table(ActorFilm::Table)
                    .col(ActorFilm::FilmId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_name")
                    .table(Film::Table)
                    .col(Film::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actor_names")
                    .table(Actor::Table)
                    .col(Actor::Name)
                    .col(Actor::SecondName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_actor_names").table(Actor::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_film_name").table(Film::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_actor_film_film").table(ActorFilm::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ActorFilm { Table, FilmId }

#[derive(DeriveIden)]
enum Film { Table, Name }

#[derive(DeriveIden)]
enum Actor { Table, Name, SecondName }
