use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(posts_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_pub_date")
                    .table(Posts::Table)
                    .col(Posts::PubDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_author_id")
                    .table(Posts::Table)
                    .col(Posts::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_category_id")
                    .table(Posts::Table)
                    .col(Posts::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager.create_table(comments_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post_id")
                    .table(Comments::Table)
                    .col(Comments::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

/// Posts keep their author for life, so that edge cascades. Category
/// and location are loose attachments: deleting one detaches it from
/// its posts instead of taking the posts down.
fn posts_table() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Posts::Title).string().not_null())
        .col(ColumnDef::new(Posts::Text).text().not_null())
        .col(ColumnDef::new(Posts::Image).string())
        .col(
            ColumnDef::new(Posts::PubDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Posts::AuthorId).uuid().not_null())
        .col(ColumnDef::new(Posts::LocationId).uuid())
        .col(ColumnDef::new(Posts::CategoryId).uuid())
        .col(
            ColumnDef::new(Posts::IsPublished)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(
            ColumnDef::new(Posts::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_author_id")
                .from(Posts::Table, Posts::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_location_id")
                .from(Posts::Table, Posts::LocationId)
                .to(Locations::Table, Locations::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_category_id")
                .from(Posts::Table, Posts::CategoryId)
                .to(Categories::Table, Categories::Id)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

/// Comments live and die with their post and their author.
fn comments_table() -> TableCreateStatement {
    Table::create()
        .table(Comments::Table)
        .if_not_exists()
        .col(ColumnDef::new(Comments::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Comments::Text).text().not_null())
        .col(ColumnDef::new(Comments::PostId).uuid().not_null())
        .col(ColumnDef::new(Comments::AuthorId).uuid().not_null())
        .col(
            ColumnDef::new(Comments::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_comments_post_id")
                .from(Comments::Table, Comments::PostId)
                .to(Posts::Table, Posts::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_comments_author_id")
                .from(Comments::Table, Comments::AuthorId)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Text,
    Image,
    PubDate,
    AuthorId,
    LocationId,
    CategoryId,
    IsPublished,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    Text,
    PostId,
    AuthorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_references_encode_deletion_policy() {
        let sql = posts_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"FOREIGN KEY ("author_id") REFERENCES "users" ("id") ON DELETE CASCADE"#));
        assert!(sql.contains(r#"FOREIGN KEY ("location_id") REFERENCES "locations" ("id") ON DELETE SET NULL"#));
        assert!(sql.contains(r#"FOREIGN KEY ("category_id") REFERENCES "categories" ("id") ON DELETE SET NULL"#));
    }

    #[test]
    fn test_comments_cascade_with_post_and_author() {
        let sql = comments_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"FOREIGN KEY ("post_id") REFERENCES "posts" ("id") ON DELETE CASCADE"#));
        assert!(sql.contains(r#"FOREIGN KEY ("author_id") REFERENCES "users" ("id") ON DELETE CASCADE"#));
    }

    #[test]
    fn test_optional_references_are_nullable() {
        let sql = posts_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""author_id" uuid NOT NULL"#));
        assert!(!sql.contains(r#""category_id" uuid NOT NULL"#));
        assert!(!sql.contains(r#""location_id" uuid NOT NULL"#));
    }
}
