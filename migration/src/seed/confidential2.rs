//! Fixture content for tests against the `DockstoreTestUser2` organization.

use sea_orm_migration::prelude::*;

use super::{
    insert_base, insert_workflows, set_workflow_topic, sync_sequences, WorkflowRow,
};

const WORKFLOWS: &[WorkflowRow] = &[
    WorkflowRow {
        id: 3,
        user_id: 1,
        organization: "DockstoreTestUser2",
        repository: "dockstore_workflow_cnv",
        descriptor_type: "cwl",
        default_workflow_path: "/workflow/cnv.cwl",
        is_published: false,
    },
    WorkflowRow {
        id: 4,
        user_id: 2,
        organization: "DockstoreTestUser2",
        repository: "parameter_test_workflow",
        descriptor_type: "wdl",
        default_workflow_path: "/Dockstore.wdl",
        is_published: false,
    },
];

/// Base rows plus unrefreshed workflows with no versions.
pub struct Seed;

impl MigrationName for Seed {
    fn name(&self) -> &str {
        "test.confidential2"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Seed {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        insert_base(manager).await?;
        insert_workflows(manager, WORKFLOWS).await?;
        sync_sequences(manager).await
    }
}

pub struct SeedTopics;

impl MigrationName for SeedTopics {
    fn name(&self) -> &str {
        "test.confidential2_1.5.0"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for SeedTopics {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        set_workflow_topic(manager, 2, "Whalesay with imports").await?;
        set_workflow_topic(manager, 3, "Copy number variation").await
    }
}
