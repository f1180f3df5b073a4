use sea_orm_migration::{prelude::*, schema::*};

static FK_TOKEN_USER_ID: &str = "fk_token_user_id";
static FK_TOOL_USER_ID: &str = "fk_tool_user_id";
static FK_TAG_TOOL_ID: &str = "fk_tag_tool_id";
static FK_WORKFLOW_USER_ID: &str = "fk_workflow_user_id";
static FK_WORKFLOWVERSION_WORKFLOW_ID: &str = "fk_workflowversion_workflow_id";

/// Base schema for users, tokens, tools, workflows and their descriptor files.
pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "1.3.0.generated"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enduser::Table)
                    .if_not_exists()
                    .col(pk_auto(Enduser::Id))
                    .col(string(Enduser::Username))
                    .col(boolean(Enduser::IsAdmin).default(false))
                    .col(string_null(Enduser::AvatarUrl))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Token::Table)
                    .if_not_exists()
                    .col(pk_auto(Token::Id))
                    .col(integer(Token::UserId))
                    .col(string(Token::TokenSource))
                    .col(string(Token::Content))
                    .col(string_null(Token::RefreshToken))
                    .col(string(Token::Username))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TOKEN_USER_ID)
                            .from(Token::Table, Token::UserId)
                            .to(Enduser::Table, Enduser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tool::Table)
                    .if_not_exists()
                    .col(pk_auto(Tool::Id))
                    .col(integer(Tool::UserId))
                    .col(string(Tool::Registry))
                    .col(string(Tool::Namespace))
                    .col(string(Tool::Name))
                    .col(string_null(Tool::Toolname))
                    .col(string(Tool::Mode))
                    .col(string(Tool::GitUrl))
                    .col(boolean(Tool::IsPublished).default(false))
                    .col(string(Tool::DefaultCwlPath))
                    .col(string(Tool::DefaultWdlPath))
                    .col(string(Tool::DefaultDockerfilePath))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TOOL_USER_ID)
                            .from(Tool::Table, Tool::UserId)
                            .to(Enduser::Table, Enduser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(pk_auto(Tag::Id))
                    .col(integer(Tag::ToolId))
                    .col(string(Tag::Name))
                    .col(string(Tag::Reference))
                    .col(string_null(Tag::ImageId))
                    .col(string(Tag::CwlPath))
                    .col(string(Tag::WdlPath))
                    .col(string(Tag::DockerfilePath))
                    .col(boolean(Tag::Hidden).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TAG_TOOL_ID)
                            .from(Tag::Table, Tag::ToolId)
                            .to(Tool::Table, Tool::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Workflow::Table)
                    .if_not_exists()
                    .col(pk_auto(Workflow::Id))
                    .col(integer(Workflow::UserId))
                    .col(string(Workflow::SourceControl))
                    .col(string(Workflow::Organization))
                    .col(string(Workflow::Repository))
                    .col(string_null(Workflow::WorkflowName))
                    .col(string(Workflow::DescriptorType))
                    .col(string(Workflow::DefaultWorkflowPath))
                    .col(boolean(Workflow::IsPublished).default(false))
                    .col(string(Workflow::Mode))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_WORKFLOW_USER_ID)
                            .from(Workflow::Table, Workflow::UserId)
                            .to(Enduser::Table, Enduser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Workflowversion::Table)
                    .if_not_exists()
                    .col(pk_auto(Workflowversion::Id))
                    .col(integer(Workflowversion::WorkflowId))
                    .col(string(Workflowversion::Name))
                    .col(string(Workflowversion::Reference))
                    .col(string(Workflowversion::WorkflowPath))
                    .col(string_null(Workflowversion::CommitId))
                    .col(boolean(Workflowversion::Hidden).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_WORKFLOWVERSION_WORKFLOW_ID)
                            .from(Workflowversion::Table, Workflowversion::WorkflowId)
                            .to(Workflow::Table, Workflow::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sourcefile::Table)
                    .if_not_exists()
                    .col(pk_auto(Sourcefile::Id))
                    .col(string(Sourcefile::ParentType))
                    .col(integer(Sourcefile::ParentId))
                    .col(string(Sourcefile::Path))
                    .col(string(Sourcefile::FileType))
                    .col(text(Sourcefile::Content))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sourcefile::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workflowversion::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Workflow::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tool::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Token::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enduser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Enduser {
    Table,
    Id,
    Username,
    IsAdmin,
    AvatarUrl,
}

#[derive(DeriveIden)]
pub enum Token {
    Table,
    Id,
    UserId,
    TokenSource,
    Content,
    RefreshToken,
    Username,
}

#[derive(DeriveIden)]
pub enum Tool {
    Table,
    Id,
    UserId,
    Registry,
    Namespace,
    Name,
    Toolname,
    Mode,
    GitUrl,
    IsPublished,
    DefaultCwlPath,
    DefaultWdlPath,
    DefaultDockerfilePath,
    Topic,
}

#[derive(DeriveIden)]
pub enum Tag {
    Table,
    Id,
    ToolId,
    Name,
    Reference,
    ImageId,
    CwlPath,
    WdlPath,
    DockerfilePath,
    Hidden,
    Valid,
}

#[derive(DeriveIden)]
pub enum Workflow {
    Table,
    Id,
    UserId,
    SourceControl,
    Organization,
    Repository,
    WorkflowName,
    DescriptorType,
    DefaultWorkflowPath,
    IsPublished,
    Mode,
    Topic,
    GithubAppInstallationId,
    LastRefreshed,
}

#[derive(DeriveIden)]
pub enum Workflowversion {
    Table,
    Id,
    WorkflowId,
    Name,
    Reference,
    WorkflowPath,
    CommitId,
    Hidden,
    Valid,
}

#[derive(DeriveIden)]
pub enum Sourcefile {
    Table,
    Id,
    ParentType,
    ParentId,
    Path,
    FileType,
    Content,
}
