//! Create `film` table.
//!
//! Release dates before the first public screening are rejected by the service
//! layer; the table itself only stores what it is given.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(uuid(Film::Id).primary_key())
                    .col(string_len(Film::Name, 150).not_null())
                    .col(string_len(Film::Description, 1000).not_null())
                    .col(date(Film::ReleaseDate).not_null())
                    .col(double(Film::Rating).not_null())
                    .col(
                        timestamp_with_time_zone(Film::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Film::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Film { Table, Id, Name, Description, ReleaseDate, Rating, CreatedAt, UpdatedAt }
