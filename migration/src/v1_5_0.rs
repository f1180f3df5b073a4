use sea_orm_migration::{prelude::*, schema::*};

use crate::v1_3_0_generated::{Tool, Workflow};

/// Free-text topics on tools and workflows.
pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "1.5.0"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Tool::Table)
                    .add_column(string_null(Tool::Topic))
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Workflow::Table)
                    .add_column(string_null(Workflow::Topic))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Workflow::Table)
                    .drop_column(Workflow::Topic)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Tool::Table)
                    .drop_column(Tool::Topic)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
