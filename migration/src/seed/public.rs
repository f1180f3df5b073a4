//! Fixture content for tests that only touch public repositories.

use sea_orm_migration::prelude::*;

use super::{insert_base, set_tool_topic, set_workflow_topic, sync_sequences};

/// Seeds the shared users, tools and workflows.
pub struct Seed;

impl MigrationName for Seed {
    fn name(&self) -> &str {
        "test"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Seed {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        insert_base(manager).await?;
        sync_sequences(manager).await
    }
}

/// Topics, which only exist once 1.5.0 has run.
pub struct SeedTopics;

impl MigrationName for SeedTopics {
    fn name(&self) -> &str {
        "test_1.5.0"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for SeedTopics {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        set_tool_topic(manager, 1, "Cowsay wrapped in a whale").await?;
        set_tool_topic(manager, 4, "A public tool owned by user2").await?;
        set_workflow_topic(manager, 2, "Whalesay with imports").await
    }
}
