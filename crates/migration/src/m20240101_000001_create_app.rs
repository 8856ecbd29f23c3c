//! Create `app` table holding per-app signing secrets.
//!
//! Rows are provisioned out-of-band; the service only reads them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(App::Table)
                    .if_not_exists()
                    // Ids are assigned by the provisioning side, not the database
                    .col(ColumnDef::new(App::Id).big_integer().not_null().primary_key())
                    .col(string_len(App::Name, 128).not_null())
                    .col(string_len(App::Secret, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(App::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum App { Table, Id, Name, Secret }
