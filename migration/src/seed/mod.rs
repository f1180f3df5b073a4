//! Fixture rows shared by the seed migrations.
//!
//! Seed migrations insert rows with explicit primary keys so every reset produces the
//! same content. Nothing here reads a clock or a random source.

pub mod confidential1;
pub mod confidential2;
pub mod public;

use sea_orm_migration::{
    prelude::*,
    sea_orm::{sea_query, ConnectionTrait, DbBackend},
};

use crate::v1_3_0_generated::{Enduser, Sourcefile, Tag, Token, Tool, Workflow, Workflowversion};

pub const MODE_AUTO: &str = "AUTO_DETECT_QUAY_TAGS_AUTOMATED_BUILDS";
pub const MODE_MANUAL: &str = "MANUAL_IMAGE_PATH";
pub const MODE_FULL: &str = "FULL";

pub const TOOL_CWL: &str = r#"cwlVersion: v1.0
class: CommandLineTool
baseCommand: cowsay
inputs:
  message:
    type: string
    inputBinding:
      position: 1
  repeat:
    type: int?
outputs: []
"#;

pub const WORKFLOW_CWL: &str = r#"cwlVersion: v1.0
class: Workflow
inputs:
  - id: input_file
    type: File
  - id: verbose
    type: boolean
  - id: names
    type: string[]
outputs: []
steps: []
"#;

pub struct UserRow {
    pub id: i32,
    pub username: &'static str,
    pub is_admin: bool,
}

pub struct TokenRow {
    pub id: i32,
    pub user_id: i32,
    pub token_source: &'static str,
    pub content: &'static str,
    pub username: &'static str,
}

pub struct ToolRow {
    pub id: i32,
    pub user_id: i32,
    pub registry: &'static str,
    pub namespace: &'static str,
    pub name: &'static str,
    pub mode: &'static str,
    pub git_url: &'static str,
    pub is_published: bool,
}

pub struct TagRow {
    pub id: i32,
    pub tool_id: i32,
    pub name: &'static str,
    pub reference: &'static str,
    pub image_id: Option<&'static str>,
}

pub struct WorkflowRow {
    pub id: i32,
    pub user_id: i32,
    pub organization: &'static str,
    pub repository: &'static str,
    pub descriptor_type: &'static str,
    pub default_workflow_path: &'static str,
    pub is_published: bool,
}

pub struct WorkflowVersionRow {
    pub id: i32,
    pub workflow_id: i32,
    pub name: &'static str,
    pub workflow_path: &'static str,
}

pub struct SourcefileRow {
    pub id: i32,
    pub parent_type: &'static str,
    pub parent_id: i32,
    pub path: &'static str,
    pub file_type: &'static str,
    pub content: &'static str,
}

pub const BASE_USERS: &[UserRow] = &[
    UserRow {
        id: 1,
        username: "user1",
        is_admin: false,
    },
    UserRow {
        id: 2,
        username: "user2",
        is_admin: false,
    },
];

pub const BASE_TOKENS: &[TokenRow] = &[
    TokenRow {
        id: 1,
        user_id: 1,
        token_source: "dockstore",
        content: "iamafakedockstoretoken",
        username: "user1",
    },
    TokenRow {
        id: 2,
        user_id: 1,
        token_source: "github.com",
        content: "fakeGitHubToken",
        username: "DockstoreTestUser2",
    },
    TokenRow {
        id: 3,
        user_id: 2,
        token_source: "dockstore",
        content: "iamafakedockstoretoken2",
        username: "user2",
    },
];

pub const BASE_TOOLS: &[ToolRow] = &[
    ToolRow {
        id: 1,
        user_id: 1,
        registry: "quay.io",
        namespace: "dockstoretestuser",
        name: "quayandgithub",
        mode: MODE_AUTO,
        git_url: "git@github.com:DockstoreTestUser/dockstore-whalesay.git",
        is_published: false,
    },
    ToolRow {
        id: 2,
        user_id: 1,
        registry: "quay.io",
        namespace: "dockstoretestuser",
        name: "quayandbitbucket",
        mode: MODE_AUTO,
        git_url: "git@bitbucket.org:DockstoreTestUser/dockstore-whalesay.git",
        is_published: true,
    },
    ToolRow {
        id: 3,
        user_id: 1,
        registry: "quay.io",
        namespace: "dockstoretestuser",
        name: "manualtool",
        mode: MODE_MANUAL,
        git_url: "git@github.com:DockstoreTestUser/dockstore-whalesay.git",
        is_published: false,
    },
    ToolRow {
        id: 4,
        user_id: 2,
        registry: "quay.io",
        namespace: "dockstoretestuser2",
        name: "publictool",
        mode: MODE_AUTO,
        git_url: "git@github.com:DockstoreTestUser2/public-tool.git",
        is_published: true,
    },
];

pub const BASE_TAGS: &[TagRow] = &[
    TagRow {
        id: 1,
        tool_id: 1,
        name: "master",
        reference: "master",
        image_id: Some("c6d8b4a0e5f1"),
    },
    TagRow {
        id: 2,
        tool_id: 2,
        name: "latest",
        reference: "master",
        image_id: Some("0a1b2c3d4e5f"),
    },
    TagRow {
        id: 3,
        tool_id: 3,
        name: "latest",
        reference: "master",
        image_id: None,
    },
    TagRow {
        id: 4,
        tool_id: 4,
        name: "1.0",
        reference: "1.0",
        image_id: Some("f00dfeedbeef"),
    },
];

pub const BASE_WORKFLOWS: &[WorkflowRow] = &[
    WorkflowRow {
        id: 1,
        user_id: 1,
        organization: "DockstoreTestUser2",
        repository: "hello-dockstore-workflow",
        descriptor_type: "cwl",
        default_workflow_path: "/Dockstore.cwl",
        is_published: false,
    },
    WorkflowRow {
        id: 2,
        user_id: 1,
        organization: "DockstoreTestUser2",
        repository: "dockstore-whalesay-imports",
        descriptor_type: "cwl",
        default_workflow_path: "/Dockstore.cwl",
        is_published: true,
    },
];

pub const BASE_WORKFLOW_VERSIONS: &[WorkflowVersionRow] = &[
    WorkflowVersionRow {
        id: 1,
        workflow_id: 1,
        name: "master",
        workflow_path: "/Dockstore.cwl",
    },
    WorkflowVersionRow {
        id: 2,
        workflow_id: 2,
        name: "master",
        workflow_path: "/Dockstore.cwl",
    },
];

pub const BASE_SOURCEFILES: &[SourcefileRow] = &[
    SourcefileRow {
        id: 1,
        parent_type: "tag",
        parent_id: 1,
        path: "/Dockstore.cwl",
        file_type: "DOCKSTORE_CWL",
        content: TOOL_CWL,
    },
    SourcefileRow {
        id: 2,
        parent_type: "tag",
        parent_id: 2,
        path: "/Dockstore.cwl",
        file_type: "DOCKSTORE_CWL",
        content: TOOL_CWL,
    },
    SourcefileRow {
        id: 3,
        parent_type: "workflowversion",
        parent_id: 1,
        path: "/Dockstore.cwl",
        file_type: "DOCKSTORE_CWL",
        content: WORKFLOW_CWL,
    },
    SourcefileRow {
        id: 4,
        parent_type: "workflowversion",
        parent_id: 2,
        path: "/Dockstore.cwl",
        file_type: "DOCKSTORE_CWL",
        content: WORKFLOW_CWL,
    },
];

fn query_err(err: sea_query::error::Error) -> DbErr {
    DbErr::Custom(err.to_string())
}

pub async fn insert_users(manager: &SchemaManager<'_>, rows: &[UserRow]) -> Result<(), DbErr> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut insert = Query::insert();
    insert
        .into_table(Enduser::Table)
        .columns([Enduser::Id, Enduser::Username, Enduser::IsAdmin]);
    for row in rows {
        insert
            .values([row.id.into(), row.username.into(), row.is_admin.into()])
            .map_err(query_err)?;
    }

    manager.exec_stmt(insert).await
}

pub async fn insert_tokens(manager: &SchemaManager<'_>, rows: &[TokenRow]) -> Result<(), DbErr> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut insert = Query::insert();
    insert.into_table(Token::Table).columns([
        Token::Id,
        Token::UserId,
        Token::TokenSource,
        Token::Content,
        Token::Username,
    ]);
    for row in rows {
        insert
            .values([
                row.id.into(),
                row.user_id.into(),
                row.token_source.into(),
                row.content.into(),
                row.username.into(),
            ])
            .map_err(query_err)?;
    }

    manager.exec_stmt(insert).await
}

/// Tools always get the conventional descriptor and Dockerfile locations.
pub async fn insert_tools(manager: &SchemaManager<'_>, rows: &[ToolRow]) -> Result<(), DbErr> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut insert = Query::insert();
    insert.into_table(Tool::Table).columns([
        Tool::Id,
        Tool::UserId,
        Tool::Registry,
        Tool::Namespace,
        Tool::Name,
        Tool::Mode,
        Tool::GitUrl,
        Tool::IsPublished,
        Tool::DefaultCwlPath,
        Tool::DefaultWdlPath,
        Tool::DefaultDockerfilePath,
    ]);
    for row in rows {
        insert
            .values([
                row.id.into(),
                row.user_id.into(),
                row.registry.into(),
                row.namespace.into(),
                row.name.into(),
                row.mode.into(),
                row.git_url.into(),
                row.is_published.into(),
                "/Dockstore.cwl".into(),
                "/Dockstore.wdl".into(),
                "/Dockerfile".into(),
            ])
            .map_err(query_err)?;
    }

    manager.exec_stmt(insert).await
}

pub async fn insert_tags(manager: &SchemaManager<'_>, rows: &[TagRow]) -> Result<(), DbErr> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut insert = Query::insert();
    insert.into_table(Tag::Table).columns([
        Tag::Id,
        Tag::ToolId,
        Tag::Name,
        Tag::Reference,
        Tag::ImageId,
        Tag::CwlPath,
        Tag::WdlPath,
        Tag::DockerfilePath,
        Tag::Hidden,
    ]);
    for row in rows {
        insert
            .values([
                row.id.into(),
                row.tool_id.into(),
                row.name.into(),
                row.reference.into(),
                row.image_id.into(),
                "/Dockstore.cwl".into(),
                "/Dockstore.wdl".into(),
                "/Dockerfile".into(),
                false.into(),
            ])
            .map_err(query_err)?;
    }

    manager.exec_stmt(insert).await
}

/// Workflows are always GitHub-hosted full workflows.
pub async fn insert_workflows(
    manager: &SchemaManager<'_>,
    rows: &[WorkflowRow],
) -> Result<(), DbErr> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut insert = Query::insert();
    insert.into_table(Workflow::Table).columns([
        Workflow::Id,
        Workflow::UserId,
        Workflow::SourceControl,
        Workflow::Organization,
        Workflow::Repository,
        Workflow::DescriptorType,
        Workflow::DefaultWorkflowPath,
        Workflow::IsPublished,
        Workflow::Mode,
    ]);
    for row in rows {
        insert
            .values([
                row.id.into(),
                row.user_id.into(),
                "github.com".into(),
                row.organization.into(),
                row.repository.into(),
                row.descriptor_type.into(),
                row.default_workflow_path.into(),
                row.is_published.into(),
                MODE_FULL.into(),
            ])
            .map_err(query_err)?;
    }

    manager.exec_stmt(insert).await
}

pub async fn insert_workflow_versions(
    manager: &SchemaManager<'_>,
    rows: &[WorkflowVersionRow],
) -> Result<(), DbErr> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut insert = Query::insert();
    insert.into_table(Workflowversion::Table).columns([
        Workflowversion::Id,
        Workflowversion::WorkflowId,
        Workflowversion::Name,
        Workflowversion::Reference,
        Workflowversion::WorkflowPath,
        Workflowversion::Hidden,
    ]);
    for row in rows {
        insert
            .values([
                row.id.into(),
                row.workflow_id.into(),
                row.name.into(),
                row.name.into(),
                row.workflow_path.into(),
                false.into(),
            ])
            .map_err(query_err)?;
    }

    manager.exec_stmt(insert).await
}

pub async fn insert_sourcefiles(
    manager: &SchemaManager<'_>,
    rows: &[SourcefileRow],
) -> Result<(), DbErr> {
    if rows.is_empty() {
        return Ok(());
    }

    let mut insert = Query::insert();
    insert.into_table(Sourcefile::Table).columns([
        Sourcefile::Id,
        Sourcefile::ParentType,
        Sourcefile::ParentId,
        Sourcefile::Path,
        Sourcefile::FileType,
        Sourcefile::Content,
    ]);
    for row in rows {
        insert
            .values([
                row.id.into(),
                row.parent_type.into(),
                row.parent_id.into(),
                row.path.into(),
                row.file_type.into(),
                row.content.into(),
            ])
            .map_err(query_err)?;
    }

    manager.exec_stmt(insert).await
}

/// Inserts the rows every fixture set starts from.
pub async fn insert_base(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    insert_users(manager, BASE_USERS).await?;
    insert_tokens(manager, BASE_TOKENS).await?;
    insert_tools(manager, BASE_TOOLS).await?;
    insert_tags(manager, BASE_TAGS).await?;
    insert_workflows(manager, BASE_WORKFLOWS).await?;
    insert_workflow_versions(manager, BASE_WORKFLOW_VERSIONS).await?;
    insert_sourcefiles(manager, BASE_SOURCEFILES).await?;

    Ok(())
}

/// Sets a tool topic; used by the seeds that run after 1.5.0.
pub async fn set_tool_topic(
    manager: &SchemaManager<'_>,
    tool_id: i32,
    topic: &str,
) -> Result<(), DbErr> {
    manager
        .exec_stmt(
            Query::update()
                .table(Tool::Table)
                .value(Tool::Topic, topic)
                .and_where(Expr::col(Tool::Id).eq(tool_id))
                .to_owned(),
        )
        .await
}

pub async fn set_workflow_topic(
    manager: &SchemaManager<'_>,
    workflow_id: i32,
    topic: &str,
) -> Result<(), DbErr> {
    manager
        .exec_stmt(
            Query::update()
                .table(Workflow::Table)
                .value(Workflow::Topic, topic)
                .and_where(Expr::col(Workflow::Id).eq(workflow_id))
                .to_owned(),
        )
        .await
}

/// Explicit ids leave Postgres serial sequences behind; move them past the seeded rows.
pub async fn sync_sequences(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    if manager.get_database_backend() != DbBackend::Postgres {
        return Ok(());
    }

    let conn = manager.get_connection();
    for table in [
        "enduser",
        "token",
        "tool",
        "tag",
        "workflow",
        "workflowversion",
        "sourcefile",
    ] {
        conn.execute_unprepared(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
             COALESCE((SELECT MAX(id) FROM {table}), 0) + 1, false)"
        ))
        .await?;
    }

    Ok(())
}
