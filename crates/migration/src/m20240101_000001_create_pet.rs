//! Create `pet` table.
//! One row per listed pet; `image` holds the public path of the uploaded picture.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pet::Table)
                    .if_not_exists()
                    .col(uuid(Pet::Id).primary_key())
                    .col(string(Pet::Petname))
                    .col(string(Pet::Pettype))
                    .col(string(Pet::Petbreed))
                    .col(string_len(Pet::Petage, 32))
                    .col(text_null(Pet::Description))
                    .col(string(Pet::Location))
                    .col(string_len_null(Pet::Image, 512))
                    .col(string_len(Pet::Status, 16).default("available"))
                    .col(timestamp_with_time_zone(Pet::CreatedAt))
                    .col(timestamp_with_time_zone(Pet::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pet {
    Table,
    Id,
    Petname,
    Pettype,
    Petbreed,
    Petage,
    Description,
    Location,
    Image,
    Status,
    CreatedAt,
    UpdatedAt,
}
