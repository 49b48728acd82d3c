//! Create `user` table.
//!
//! Email carries the unique constraint that guards concurrent registrations;
//! the application-level lookup is only an early exit.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(string_len(User::PasswordHash, 255).not_null())
                    .col(string_len(User::FirstName, 128).not_null())
                    .col(ColumnDef::new(User::LastName).string_len(128).null())
                    .col(ColumnDef::new(User::Phone).string_len(32).null())
                    .col(ColumnDef::new(User::BirthDate).date().null())
                    .col(string_len(User::Role, 16).not_null().default("USER"))
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(User::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Phone,
    BirthDate,
    Role,
    CreatedAt,
    UpdatedAt,
}
