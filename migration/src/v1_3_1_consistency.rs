use sea_orm_migration::prelude::*;

use crate::v1_3_0_generated::{Enduser, Tag, Tool, Workflow, Workflowversion};

static UNIQUE_USERNAME: &str = "unique_enduser_username";
static UNIQUE_TOOL_PATH: &str = "unique_tool_path";
static UNIQUE_TAG_NAME: &str = "unique_tag_tool_id_name";
static UNIQUE_WORKFLOW_PATH: &str = "unique_workflow_path";
static UNIQUE_WORKFLOWVERSION_NAME: &str = "unique_workflowversion_workflow_id_name";

/// Uniqueness constraints on entry paths and version names.
pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "1.3.1.consistency"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_USERNAME)
                    .table(Enduser::Table)
                    .col(Enduser::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_TOOL_PATH)
                    .table(Tool::Table)
                    .col(Tool::Registry)
                    .col(Tool::Namespace)
                    .col(Tool::Name)
                    .col(Tool::Toolname)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_TAG_NAME)
                    .table(Tag::Table)
                    .col(Tag::ToolId)
                    .col(Tag::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_WORKFLOW_PATH)
                    .table(Workflow::Table)
                    .col(Workflow::SourceControl)
                    .col(Workflow::Organization)
                    .col(Workflow::Repository)
                    .col(Workflow::WorkflowName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(UNIQUE_WORKFLOWVERSION_NAME)
                    .table(Workflowversion::Table)
                    .col(Workflowversion::WorkflowId)
                    .col(Workflowversion::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(UNIQUE_WORKFLOWVERSION_NAME)
                    .table(Workflowversion::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name(UNIQUE_WORKFLOW_PATH)
                    .table(Workflow::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name(UNIQUE_TAG_NAME).table(Tag::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name(UNIQUE_TOOL_PATH).table(Tool::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name(UNIQUE_USERNAME)
                    .table(Enduser::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
