//! Migration: Create poems table and the poem/category junction.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_categories_table::Categories;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Poems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Poems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Poems::Title).string().not_null())
                    .col(ColumnDef::new(Poems::Body).text().not_null())
                    .col(ColumnDef::new(Poems::WriterId).integer().not_null())
                    .col(
                        ColumnDef::new(Poems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Poems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poems_writer_id")
                            .from(Poems::Table, Poems::WriterId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PoemCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PoemCategories::PoemId).integer().not_null())
                    .col(ColumnDef::new(PoemCategories::CategoryId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(PoemCategories::PoemId)
                            .col(PoemCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poem_categories_poem_id")
                            .from(PoemCategories::Table, PoemCategories::PoemId)
                            .to(Poems::Table, Poems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poem_categories_category_id")
                            .from(PoemCategories::Table, PoemCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_poem_categories_category_id")
                    .table(PoemCategories::Table)
                    .col(PoemCategories::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PoemCategories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Poems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Poems {
    Table,
    Id,
    Title,
    Body,
    WriterId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PoemCategories {
    Table,
    PoemId,
    CategoryId,
}
