//! Index backing the listing order of `GET /pets`.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_created_at")
                    .table(Pet::Table)
                    .col(Pet::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pet_created_at").table(Pet::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pet {
    Table,
    CreatedAt,
}
