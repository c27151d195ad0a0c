//! Create `property` table with FK to its creating `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Property::Table)
                    .if_not_exists()
                    .col(uuid(Property::Id).primary_key())
                    .col(string_len(Property::Title, 255).not_null())
                    .col(text(Property::TitleSearch).not_null())
                    .col(text(Property::Description).not_null())
                    .col(string_len(Property::PropertyType, 64).not_null())
                    .col(string_len(Property::Location, 255).not_null())
                    .col(double(Property::Price).not_null())
                    .col(text(Property::Photo).not_null())
                    .col(uuid(Property::Creator).not_null())
                    .col(timestamp_with_time_zone(Property::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Property::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_creator")
                            .from(Property::Table, Property::Creator)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Property::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Property {
    Table,
    Id,
    Title,
    TitleSearch,
    Description,
    PropertyType,
    Location,
    Price,
    Photo,
    Creator,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
