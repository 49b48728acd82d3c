//! Create `product` table.
//! Catalog entries addressed by a unique slug; list columns are Postgres text arrays.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(uuid(Product::Id).primary_key())
                    .col(string_len(Product::Name, 255).not_null())
                    .col(string_len(Product::Slug, 255).unique_key().not_null())
                    .col(text(Product::Description).not_null())
                    .col(
                        decimal_len(Product::Price, 10, 2)
                            .not_null()
                            .check(Expr::col(Product::Price).gte(0)),
                    )
                    .col(text_array(Product::Images))
                    .col(text_array(Product::Sizes))
                    .col(text_array(Product::Colors))
                    .col(
                        integer(Product::Stock)
                            .not_null()
                            .default(0)
                            .check(Expr::col(Product::Stock).gte(0)),
                    )
                    .col(boolean(Product::Active).not_null().default(true))
                    .col(timestamp_with_time_zone(Product::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Product::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

fn text_array(col: Product) -> ColumnDef {
    ColumnDef::new(col)
        .array(ColumnType::Text)
        .not_null()
        .default(Expr::cust("'{}'"))
        .to_owned()
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Price,
    Images,
    Sizes,
    Colors,
    Stock,
    Active,
    CreatedAt,
    UpdatedAt,
}
