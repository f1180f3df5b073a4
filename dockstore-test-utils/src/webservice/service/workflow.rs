use chrono::Utc;
use dockstore::model::{
    user::RepositoryDto,
    workflow::{WorkflowDto, WorkflowVersionDto},
};
use sea_orm::DatabaseConnection;

use crate::webservice::{
    data::{
        user::GITHUB_TOKEN_SOURCE, workflow::RefreshedVersion, UserRepository, WorkflowRepository,
    },
    error::Error,
    upstream::github::GitHubClient,
};

use super::{ensure_owner, is_visible, parse_path};

static GITHUB_SOURCE_CONTROL: &str = "github.com";

pub struct WorkflowService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkflowService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn to_dto(&self, workflow: entity::workflow::Model) -> Result<WorkflowDto, Error> {
        let versions = WorkflowRepository::new(self.db)
            .get_versions(workflow.id)
            .await?;

        let mut full_workflow_path = format!(
            "{}/{}/{}",
            workflow.source_control, workflow.organization, workflow.repository
        );
        if let Some(name) = &workflow.workflow_name {
            full_workflow_path = format!("{full_workflow_path}/{name}");
        }

        Ok(WorkflowDto {
            id: workflow.id,
            full_workflow_path,
            source_control: workflow.source_control,
            organization: workflow.organization,
            repository: workflow.repository,
            workflow_name: workflow.workflow_name,
            descriptor_type: workflow.descriptor_type,
            default_workflow_path: workflow.default_workflow_path,
            is_published: workflow.is_published,
            mode: workflow.mode,
            topic: workflow.topic,
            github_app_installation_id: workflow.github_app_installation_id,
            versions: versions
                .into_iter()
                .map(|version| WorkflowVersionDto {
                    id: version.id,
                    name: version.name,
                    reference: version.reference,
                    workflow_path: version.workflow_path,
                    commit_id: version.commit_id,
                    hidden: version.hidden,
                    valid: version.valid,
                })
                .collect(),
        })
    }

    async fn to_dtos(
        &self,
        workflows: Vec<entity::workflow::Model>,
    ) -> Result<Vec<WorkflowDto>, Error> {
        let mut dtos = Vec::with_capacity(workflows.len());
        for workflow in workflows {
            dtos.push(self.to_dto(workflow).await?);
        }
        Ok(dtos)
    }

    pub async fn find_visible(
        &self,
        path: &str,
        user: Option<&entity::enduser::Model>,
    ) -> Result<entity::workflow::Model, Error> {
        let path = parse_path(path)?;
        let workflow = WorkflowRepository::new(self.db)
            .get_by_path(
                &path.host,
                &path.namespace,
                &path.name,
                path.entry_name.as_deref(),
            )
            .await?
            .filter(|workflow| is_visible(workflow.user_id, workflow.is_published, user))
            .ok_or_else(|| Error::NotFound(format!("Workflow {path} not found")))?;

        Ok(workflow)
    }

    pub async fn get_by_path(
        &self,
        path: &str,
        user: Option<&entity::enduser::Model>,
    ) -> Result<WorkflowDto, Error> {
        let workflow = self.find_visible(path, user).await?;
        self.to_dto(workflow).await
    }

    async fn get_owned(
        &self,
        workflow_id: i32,
        user: &entity::enduser::Model,
    ) -> Result<entity::workflow::Model, Error> {
        let workflow = WorkflowRepository::new(self.db)
            .get_by_id(workflow_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Workflow {workflow_id} not found")))?;
        ensure_owner(workflow.user_id, user, &format!("workflow {workflow_id}"))?;

        Ok(workflow)
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
        user: &entity::enduser::Model,
    ) -> Result<Vec<WorkflowDto>, Error> {
        ensure_owner(user_id, user, &format!("the workflows of user {user_id}"))?;
        let workflows = WorkflowRepository::new(self.db).get_by_user(user_id).await?;
        self.to_dtos(workflows).await
    }

    /// Changes the publish state; publishing requires at least one valid, visible version
    pub async fn set_published(
        &self,
        workflow_id: i32,
        publish: bool,
        user: &entity::enduser::Model,
    ) -> Result<WorkflowDto, Error> {
        let workflow = self.get_owned(workflow_id, user).await?;
        let workflow_repository = WorkflowRepository::new(self.db);

        if publish {
            let versions = workflow_repository.get_versions(workflow.id).await?;
            if !versions.iter().any(|version| version.valid && !version.hidden) {
                return Err(Error::BadRequest(format!(
                    "Workflow {workflow_id} has no valid versions and cannot be published"
                )));
            }
        }

        let workflow = workflow_repository.set_published(workflow, publish).await?;
        self.to_dto(workflow).await
    }

    async fn github_token(&self, user: &entity::enduser::Model) -> Result<String, Error> {
        UserRepository::new(self.db)
            .get_token(user.id, GITHUB_TOKEN_SOURCE)
            .await?
            .map(|token| token.content)
            .ok_or_else(|| {
                Error::BadRequest(format!("User {} has no GitHub token", user.username))
            })
    }

    /// Replaces the workflow's versions with the branches and tags found on GitHub
    ///
    /// Each branch or tag becomes a version; it is valid when the workflow's default
    /// descriptor exists on that ref. The GitHub App installation id is recorded.
    ///
    /// # Returns
    /// - `Ok(WorkflowDto)` - The refreshed workflow
    /// - `Err(Error::BadRequest)` - Not a GitHub workflow, or the user has no GitHub token
    /// - `Err(Error::Upstream)` - A GitHub request failed, including unsimulated requests
    pub async fn refresh(
        &self,
        workflow_id: i32,
        user: &entity::enduser::Model,
        github: &GitHubClient,
    ) -> Result<WorkflowDto, Error> {
        let workflow = self.get_owned(workflow_id, user).await?;
        if workflow.source_control != GITHUB_SOURCE_CONTROL {
            return Err(Error::BadRequest(format!(
                "Refreshing {} workflows is not supported",
                workflow.source_control
            )));
        }

        let token = self.github_token(user).await?;
        let full_name = format!("{}/{}", workflow.organization, workflow.repository);

        let repository = github.get_repository(&token, &full_name).await?;
        tracing::debug!(
            repository = %repository.full_name,
            default_branch = %repository.default_branch,
            "Refreshing workflow"
        );

        let mut versions = Vec::new();
        for git_ref in github.get_refs(&token, &full_name).await? {
            let Some(name) = git_ref
                .name
                .strip_prefix("refs/heads/")
                .or_else(|| git_ref.name.strip_prefix("refs/tags/"))
            else {
                continue;
            };

            let descriptor = github
                .get_file(&token, &full_name, &workflow.default_workflow_path, name)
                .await?;

            versions.push(RefreshedVersion {
                name: name.to_string(),
                reference: name.to_string(),
                workflow_path: workflow.default_workflow_path.clone(),
                commit_id: git_ref.object.sha.clone(),
                descriptor,
            });
        }

        let installation_id = github.get_installation_id(&token, &full_name).await?;

        let workflow = WorkflowRepository::new(self.db)
            .replace_versions(workflow, versions, installation_id, Utc::now().naive_utc())
            .await?;

        self.to_dto(workflow).await
    }

    /// Organizations the user's GitHub token can see
    pub async fn organizations(
        &self,
        user: &entity::enduser::Model,
        github: &GitHubClient,
    ) -> Result<Vec<String>, Error> {
        let token = self.github_token(user).await?;
        let organizations = github.get_organizations(&token).await?;

        Ok(organizations.into_iter().map(|org| org.login).collect())
    }

    /// Repositories of `organization`, flagged when a workflow is registered for them
    pub async fn repositories(
        &self,
        organization: &str,
        user: &entity::enduser::Model,
        github: &GitHubClient,
    ) -> Result<Vec<RepositoryDto>, Error> {
        let token = self.github_token(user).await?;
        let registered = WorkflowRepository::new(self.db)
            .get_by_organization(organization)
            .await?;

        let repositories = github
            .get_user_repositories(&token)
            .await?
            .into_iter()
            .filter(|repository| repository.owner.login == organization)
            .map(|repository| RepositoryDto {
                registered: registered
                    .iter()
                    .any(|workflow| workflow.repository == repository.name),
                path: repository.full_name,
            })
            .collect();

        Ok(repositories)
    }
}
