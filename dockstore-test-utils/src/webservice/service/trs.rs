use dockstore::model::api::DescriptorDto;
use sea_orm::DatabaseConnection;

use crate::webservice::{
    data::{
        sourcefile::{TAG_PARENT, WORKFLOW_VERSION_PARENT},
        SourcefileRepository, ToolRepository, WorkflowRepository,
    },
    error::Error,
};

use super::{tool::github_repository, ToolService, WorkflowService};

static WORKFLOW_PREFIX: &str = "#workflow/";

/// GA4GH TRS descriptor lookups.
pub struct TrsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TrsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Primary descriptor of one version of a tool or workflow
    ///
    /// # Arguments
    /// - `id` - TRS id; workflows carry a `#workflow/` prefix
    /// - `version` - Tag or version name
    /// - `descriptor_type` - `CWL` or `WDL`, optionally prefixed with `PLAIN_`
    /// - `user` - Caller, if authenticated; unpublished entries are visible to their owner
    ///
    /// # Returns
    /// - `Ok(DescriptorDto)` - Descriptor content and its source URL
    /// - `Err(Error::NotFound)` - Unknown entry or version, or no such descriptor
    pub async fn descriptor(
        &self,
        id: &str,
        version: &str,
        descriptor_type: &str,
        user: Option<&entity::enduser::Model>,
    ) -> Result<DescriptorDto, Error> {
        let descriptor_type = descriptor_type.to_ascii_uppercase();
        let descriptor_type = descriptor_type
            .strip_prefix("PLAIN_")
            .unwrap_or(&descriptor_type);
        if descriptor_type != "CWL" && descriptor_type != "WDL" {
            return Err(Error::BadRequest(format!(
                "Unsupported descriptor type {descriptor_type}"
            )));
        }

        match id.strip_prefix(WORKFLOW_PREFIX) {
            Some(path) => self.workflow_descriptor(path, version, descriptor_type, user).await,
            None => self.tool_descriptor(id, version, descriptor_type, user).await,
        }
    }

    async fn tool_descriptor(
        &self,
        path: &str,
        version: &str,
        descriptor_type: &str,
        user: Option<&entity::enduser::Model>,
    ) -> Result<DescriptorDto, Error> {
        let tool = ToolService::new(self.db).find_visible(path, user).await?;
        let tag = ToolRepository::new(self.db)
            .get_tags(tool.id)
            .await?
            .into_iter()
            .find(|tag| tag.name == version && !tag.hidden)
            .ok_or_else(|| Error::NotFound(format!("Tool {path} has no version {version}")))?;

        let file_path = if descriptor_type == "CWL" {
            &tag.cwl_path
        } else {
            &tag.wdl_path
        };

        let file = SourcefileRepository::new(self.db)
            .get(TAG_PARENT, tag.id, file_path)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "No {descriptor_type} descriptor at {file_path} for {path}:{version}"
                ))
            })?;

        Ok(DescriptorDto {
            url: source_url(&tool.git_url, &tag.reference, &file.path),
            content: file.content,
        })
    }

    async fn workflow_descriptor(
        &self,
        path: &str,
        version: &str,
        descriptor_type: &str,
        user: Option<&entity::enduser::Model>,
    ) -> Result<DescriptorDto, Error> {
        let workflow = WorkflowService::new(self.db).find_visible(path, user).await?;
        if !workflow.descriptor_type.eq_ignore_ascii_case(descriptor_type) {
            return Err(Error::NotFound(format!(
                "Workflow {path} has no {descriptor_type} descriptor"
            )));
        }

        let workflow_version = WorkflowRepository::new(self.db)
            .get_versions(workflow.id)
            .await?
            .into_iter()
            .find(|candidate| candidate.name == version && !candidate.hidden)
            .ok_or_else(|| {
                Error::NotFound(format!("Workflow {path} has no version {version}"))
            })?;

        let file = SourcefileRepository::new(self.db)
            .get(
                WORKFLOW_VERSION_PARENT,
                workflow_version.id,
                &workflow_version.workflow_path,
            )
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("No descriptor for {path}:{version}"))
            })?;

        let git_url = format!(
            "https://github.com/{}/{}",
            workflow.organization, workflow.repository
        );

        Ok(DescriptorDto {
            url: source_url(&git_url, &workflow_version.reference, &file.path),
            content: file.content,
        })
    }
}

/// Raw download URL of a file in a GitHub repository, or the git URL for other hosts.
fn source_url(git_url: &str, reference: &str, path: &str) -> String {
    match github_repository(git_url) {
        Some(full_name) => format!(
            "https://raw.githubusercontent.com/{full_name}/{reference}/{}",
            path.trim_start_matches('/')
        ),
        None => git_url.to_string(),
    }
}
