use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

/// A version read from source control during a refresh.
pub struct RefreshedVersion {
    pub name: String,
    pub reference: String,
    pub workflow_path: String,
    pub commit_id: String,
    /// Descriptor content; `None` when the descriptor is missing on that ref
    pub descriptor: Option<String>,
}

pub struct WorkflowRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkflowRepository<'a> {
    /// Creates a new instance of [`WorkflowRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(
        &self,
        workflow_id: i32,
    ) -> Result<Option<entity::workflow::Model>, DbErr> {
        entity::prelude::Workflow::find_by_id(workflow_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_path(
        &self,
        source_control: &str,
        organization: &str,
        repository: &str,
        workflow_name: Option<&str>,
    ) -> Result<Option<entity::workflow::Model>, DbErr> {
        let query = entity::prelude::Workflow::find()
            .filter(entity::workflow::Column::SourceControl.eq(source_control))
            .filter(entity::workflow::Column::Organization.eq(organization))
            .filter(entity::workflow::Column::Repository.eq(repository));

        let query = match workflow_name {
            Some(name) => query.filter(entity::workflow::Column::WorkflowName.eq(name)),
            None => query.filter(entity::workflow::Column::WorkflowName.is_null()),
        };

        query.one(self.db).await
    }

    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<entity::workflow::Model>, DbErr> {
        entity::prelude::Workflow::find()
            .filter(entity::workflow::Column::UserId.eq(user_id))
            .order_by_asc(entity::workflow::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn get_by_organization(
        &self,
        organization: &str,
    ) -> Result<Vec<entity::workflow::Model>, DbErr> {
        entity::prelude::Workflow::find()
            .filter(entity::workflow::Column::Organization.eq(organization))
            .all(self.db)
            .await
    }

    pub async fn set_published(
        &self,
        workflow: entity::workflow::Model,
        publish: bool,
    ) -> Result<entity::workflow::Model, DbErr> {
        let mut workflow: entity::workflow::ActiveModel = workflow.into();
        workflow.is_published = ActiveValue::Set(publish);
        workflow.update(self.db).await
    }

    pub async fn get_versions(
        &self,
        workflow_id: i32,
    ) -> Result<Vec<entity::workflowversion::Model>, DbErr> {
        entity::prelude::Workflowversion::find()
            .filter(entity::workflowversion::Column::WorkflowId.eq(workflow_id))
            .order_by_asc(entity::workflowversion::Column::Id)
            .all(self.db)
            .await
    }

    /// Replaces the workflow's versions and their descriptors in one transaction
    ///
    /// # Arguments
    /// - `workflow` - Workflow being refreshed
    /// - `versions` - Versions read from source control
    /// - `installation_id` - GitHub App installation of the repository, if any
    /// - `refreshed_at` - Time recorded as the last refresh
    ///
    /// # Returns
    /// - `Ok(Model)` - The updated workflow
    /// - `Err(DbErr)` - Any statement failed; nothing was changed
    pub async fn replace_versions(
        &self,
        workflow: entity::workflow::Model,
        versions: Vec<RefreshedVersion>,
        installation_id: Option<i64>,
        refreshed_at: NaiveDateTime,
    ) -> Result<entity::workflow::Model, DbErr> {
        let txn = self.db.begin().await?;

        let existing: Vec<i32> = entity::prelude::Workflowversion::find()
            .filter(entity::workflowversion::Column::WorkflowId.eq(workflow.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|version| version.id)
            .collect();

        entity::prelude::Sourcefile::delete_many()
            .filter(entity::sourcefile::Column::ParentType.eq(super::sourcefile::WORKFLOW_VERSION_PARENT))
            .filter(entity::sourcefile::Column::ParentId.is_in(existing))
            .exec(&txn)
            .await?;

        entity::prelude::Workflowversion::delete_many()
            .filter(entity::workflowversion::Column::WorkflowId.eq(workflow.id))
            .exec(&txn)
            .await?;

        let file_type = format!("DOCKSTORE_{}", workflow.descriptor_type.to_uppercase());

        for version in versions {
            let inserted = entity::workflowversion::ActiveModel {
                workflow_id: ActiveValue::Set(workflow.id),
                name: ActiveValue::Set(version.name),
                reference: ActiveValue::Set(version.reference),
                workflow_path: ActiveValue::Set(version.workflow_path.clone()),
                commit_id: ActiveValue::Set(Some(version.commit_id)),
                hidden: ActiveValue::Set(false),
                valid: ActiveValue::Set(version.descriptor.is_some()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            if let Some(content) = version.descriptor {
                entity::sourcefile::ActiveModel {
                    parent_type: ActiveValue::Set(
                        super::sourcefile::WORKFLOW_VERSION_PARENT.to_string(),
                    ),
                    parent_id: ActiveValue::Set(inserted.id),
                    path: ActiveValue::Set(version.workflow_path),
                    file_type: ActiveValue::Set(file_type.clone()),
                    content: ActiveValue::Set(content),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }

        let mut workflow: entity::workflow::ActiveModel = workflow.into();
        workflow.github_app_installation_id = ActiveValue::Set(installation_id);
        workflow.last_refreshed = ActiveValue::Set(Some(refreshed_at));
        let workflow = workflow.update(&txn).await?;

        txn.commit().await?;

        Ok(workflow)
    }
}
