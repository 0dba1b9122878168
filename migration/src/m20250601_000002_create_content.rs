use sea_orm_migration::prelude::*;

use crate::m20250601_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Content tables share the same shape: an owning author reference and
        // a flat record. Author FKs cascade so deleting a user removes their
        // authored content.
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Title).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text().not_null())
                    .col(ColumnDef::new(Projects::TechStack).text().not_null())
                    .col(ColumnDef::new(Projects::GithubLink).string().null())
                    .col(ColumnDef::new(Projects::DemoLink).string().null())
                    .col(ColumnDef::new(Projects::Thumbnail).string().null())
                    .col(ColumnDef::new(Projects::AuthorId).string().not_null())
                    .col(
                        ColumnDef::new(Projects::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_author_id")
                            .from(Projects::Table, Projects::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_author_created")
                    .table(Projects::Table)
                    .col(Projects::AuthorId)
                    .col(Projects::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tools::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tools::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tools::Name).string().not_null())
                    .col(ColumnDef::new(Tools::Description).text().not_null())
                    .col(ColumnDef::new(Tools::Logo).string().null())
                    .col(ColumnDef::new(Tools::Category).string().not_null())
                    .col(ColumnDef::new(Tools::AccessLink).string().not_null())
                    .col(ColumnDef::new(Tools::Screenshots).text().not_null())
                    .col(ColumnDef::new(Tools::Features).text().not_null())
                    .col(ColumnDef::new(Tools::AuthorId).string().not_null())
                    .col(
                        ColumnDef::new(Tools::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tools_author_id")
                            .from(Tools::Table, Tools::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(News::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(News::Title).string().not_null())
                    .col(ColumnDef::new(News::Description).text().not_null())
                    .col(ColumnDef::new(News::Content).text().not_null())
                    .col(ColumnDef::new(News::Thumbnail).string().not_null())
                    .col(ColumnDef::new(News::Category).string().not_null())
                    .col(
                        ColumnDef::new(News::Views)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(News::AuthorId).string().not_null())
                    .col(
                        ColumnDef::new(News::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_news_author_id")
                            .from(News::Table, News::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_news_category")
                    .table(News::Table)
                    .col(News::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tools::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    TechStack,
    GithubLink,
    DemoLink,
    Thumbnail,
    AuthorId,
    CreatedAt,
}

#[derive(Iden)]
enum Tools {
    Table,
    Id,
    Name,
    Description,
    Logo,
    Category,
    AccessLink,
    Screenshots,
    Features,
    AuthorId,
    CreatedAt,
}

#[derive(Iden)]
enum News {
    Table,
    Id,
    Title,
    Description,
    Content,
    Thumbnail,
    Category,
    Views,
    AuthorId,
    CreatedAt,
}
