//! Migration: Create the catalog tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Table name and optional maximum name length
const TABLES: &[(&str, Option<u32>)] = &[
    ("roles", None),
    ("departments", None),
    ("document_categories", None),
    ("documentary_topics", None),
    ("settlements", Some(100)),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, max_name_len) in TABLES {
            manager
                .create_table(catalog_table(table, *max_name_len))
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (table, _) in TABLES.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}

/// Every catalog table shares the same shape: identity PK, unique name with
/// a minimum-length check, server-default created_at, nullable updated_at.
fn catalog_table(name: &str, max_name_len: Option<u32>) -> TableCreateStatement {
    let mut name_check = Expr::expr(Func::char_length(Expr::col(Catalog::Name))).gt(3);
    if let Some(max) = max_name_len {
        name_check =
            name_check.and(Expr::expr(Func::char_length(Expr::col(Catalog::Name))).lt(max));
    }

    Table::create()
        .table(Alias::new(name))
        .if_not_exists()
        .col(
            ColumnDef::new(Catalog::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Catalog::Name)
                .text()
                .not_null()
                .unique_key()
                .check(name_check),
        )
        .col(
            ColumnDef::new(Catalog::CreatedAt)
                .timestamp_with_time_zone()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Catalog::UpdatedAt)
                .timestamp_with_time_zone()
                .null(),
        )
        .to_owned()
}

#[derive(Iden)]
enum Catalog {
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}
