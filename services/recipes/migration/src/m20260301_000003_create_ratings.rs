use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Ratings::RecipeId).uuid().not_null())
                    .col(ColumnDef::new(Ratings::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Ratings::HalfStars)
                            .small_integer()
                            .not_null()
                            .check(Expr::col(Ratings::HalfStars).between(0, 10)),
                    )
                    .col(
                        ColumnDef::new(Ratings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(Ratings::RecipeId)
                            .col(Ratings::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Ratings::Table, Ratings::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ratings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Ratings {
    Table,
    RecipeId,
    UserId,
    HalfStars,
    UpdatedAt,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}
