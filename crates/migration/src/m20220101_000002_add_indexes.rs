//! Secondary indexes for the listing filters and creator lookups.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_property_type")
                    .table(Property::Table)
                    .col(Property::PropertyType)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_property_creator")
                    .table(Property::Table)
                    .col(Property::Creator)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_property_creator").table(Property::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_property_type").table(Property::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Property { Table, PropertyType, Creator }
