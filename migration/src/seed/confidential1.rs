//! Fixture content for tests against the `DockstoreTestUser` organization.

use sea_orm_migration::prelude::*;

use super::{
    insert_base, insert_tags, insert_tools, set_tool_topic, sync_sequences, TagRow, ToolRow,
    MODE_AUTO, MODE_MANUAL,
};

const TOOLS: &[ToolRow] = &[
    ToolRow {
        id: 5,
        user_id: 1,
        registry: "quay.io",
        namespace: "dockstoretestuser",
        name: "noautobuild",
        mode: MODE_AUTO,
        git_url: "git@github.com:DockstoreTestUser/dockstore-whalesay.git",
        is_published: false,
    },
    ToolRow {
        id: 6,
        user_id: 1,
        registry: "registry.hub.docker.com",
        namespace: "dockstoretestuser",
        name: "dockerhubandgithub",
        mode: MODE_MANUAL,
        git_url: "git@github.com:DockstoreTestUser/dockstore-whalesay.git",
        is_published: false,
    },
];

const TAGS: &[TagRow] = &[TagRow {
    id: 5,
    tool_id: 6,
    name: "latest",
    reference: "master",
    image_id: None,
}];

/// Base rows plus private tools, one of which has no tags and cannot be published.
pub struct Seed;

impl MigrationName for Seed {
    fn name(&self) -> &str {
        "test.confidential1"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Seed {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        insert_base(manager).await?;
        insert_tools(manager, TOOLS).await?;
        insert_tags(manager, TAGS).await?;
        sync_sequences(manager).await
    }
}

pub struct SeedTopics;

impl MigrationName for SeedTopics {
    fn name(&self) -> &str {
        "test.confidential1_1.5.0"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for SeedTopics {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        set_tool_topic(manager, 1, "Cowsay wrapped in a whale").await?;
        set_tool_topic(manager, 6, "Docker Hub image built from GitHub").await
    }
}
