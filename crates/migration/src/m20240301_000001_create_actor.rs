//! Create `actor` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Actor::Table)
                    .if_not_exists()
                    .col(uuid(Actor::Id).primary_key())
                    .col(string_len(Actor::Name, 150).not_null())
                    .col(string_len(Actor::SecondName, 150).not_null())
                    .col(string_len_null(Actor::Patronymic, 150))
                    .col(string_len(Actor::Sex, 16).not_null())
                    .col(date(Actor::DateOfBirth).not_null())
                    .col(
                        timestamp_with_time_zone(Actor::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Actor::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Actor::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Actor { Table, Id, Name, SecondName, Patronymic, Sex, DateOfBirth, CreatedAt, UpdatedAt }
