use sea_orm_migration::{prelude::*, schema::*};

use crate::v1_3_0_generated::Workflow;

/// GitHub App installation tracking and refresh timestamps on workflows.
pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "1.13.0"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Workflow::Table)
                    .add_column(big_integer_null(Workflow::GithubAppInstallationId))
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Workflow::Table)
                    .add_column(timestamp_null(Workflow::LastRefreshed))
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
                    .drop_column(Workflow::LastRefreshed)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Workflow::Table)
                    .drop_column(Workflow::GithubAppInstallationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
