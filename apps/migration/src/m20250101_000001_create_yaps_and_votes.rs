use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Yaps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Yaps::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Yaps::Content).text().not_null())
                    .col(ColumnDef::new(Yaps::Region).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Append-only ledger; the autoincrement id records insertion order
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Votes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Votes::Yap).uuid().not_null())
                    .col(ColumnDef::new(Votes::Score).boolean().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_yap")
                            .from(Votes::Table, Votes::Yap)
                            .to(Yaps::Table, Yaps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_votes_yap")
                    .table(Votes::Table)
                    .col(Votes::Yap)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Yaps::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Yaps {
    Table,
    Id,
    Content,
    Region,
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    Id,
    Yap,
    Score,
}
