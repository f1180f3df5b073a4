use sea_orm_migration::{prelude::*, schema::*};

use crate::v1_3_0_generated::{Tag, Workflowversion};

/// Validity flags on tool tags and workflow versions.
pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "1.4.0"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Tag::Table)
                    .add_column(boolean(Tag::Valid).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Workflowversion::Table)
                    .add_column(boolean(Workflowversion::Valid).default(true))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Workflowversion::Table)
                    .drop_column(Workflowversion::Valid)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Tag::Table)
                    .drop_column(Tag::Valid)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
