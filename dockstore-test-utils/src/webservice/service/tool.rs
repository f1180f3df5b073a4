use dockstore::model::tool::{ManualToolRequest, NewTagDto, TagDto, ToolDto, ToolMode};
use sea_orm::DatabaseConnection;

use crate::webservice::{
    data::{
        sourcefile::TAG_PARENT,
        tool::{NewTag, NewTool},
        SourcefileRepository, ToolRepository, UserRepository,
    },
    error::Error,
    upstream::github::GitHubClient,
};

use super::{ensure_owner, is_visible, parse_path};

pub struct ToolService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ToolService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn to_dto(&self, tool: entity::tool::Model) -> Result<ToolDto, Error> {
        let tags = ToolRepository::new(self.db).get_tags(tool.id).await?;
        let mode = tool
            .mode
            .parse::<ToolMode>()
            .map_err(|e| Error::BadRequest(format!("Tool {} has {e}", tool.id)))?;

        let mut tool_path = format!("{}/{}/{}", tool.registry, tool.namespace, tool.name);
        if let Some(toolname) = &tool.toolname {
            tool_path = format!("{tool_path}/{toolname}");
        }

        Ok(ToolDto {
            id: tool.id,
            tool_path,
            registry: tool.registry,
            namespace: tool.namespace,
            name: tool.name,
            toolname: tool.toolname,
            mode,
            git_url: tool.git_url,
            is_published: tool.is_published,
            default_cwl_path: tool.default_cwl_path,
            default_wdl_path: tool.default_wdl_path,
            default_dockerfile_path: tool.default_dockerfile_path,
            topic: tool.topic,
            tags: tags.into_iter().map(tag_dto).collect(),
        })
    }

    async fn to_dtos(&self, tools: Vec<entity::tool::Model>) -> Result<Vec<ToolDto>, Error> {
        let mut dtos = Vec::with_capacity(tools.len());
        for tool in tools {
            dtos.push(self.to_dto(tool).await?);
        }
        Ok(dtos)
    }

    /// Loads a tool, hiding unpublished tools from everyone but their owner
    pub async fn find_visible(
        &self,
        path: &str,
        user: Option<&entity::enduser::Model>,
    ) -> Result<entity::tool::Model, Error> {
        let path = parse_path(path)?;
        let tool = ToolRepository::new(self.db)
            .get_by_path(
                &path.host,
                &path.namespace,
                &path.name,
                path.entry_name.as_deref(),
            )
            .await?
            .filter(|tool| is_visible(tool.user_id, tool.is_published, user))
            .ok_or_else(|| Error::NotFound(format!("Tool {path} not found")))?;

        Ok(tool)
    }

    pub async fn get_by_path(
        &self,
        path: &str,
        user: Option<&entity::enduser::Model>,
    ) -> Result<ToolDto, Error> {
        let tool = self.find_visible(path, user).await?;
        self.to_dto(tool).await
    }

    async fn get_owned(
        &self,
        tool_id: i32,
        user: &entity::enduser::Model,
    ) -> Result<entity::tool::Model, Error> {
        let tool = ToolRepository::new(self.db)
            .get_by_id(tool_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Tool {tool_id} not found")))?;
        ensure_owner(tool.user_id, user, &format!("tool {tool_id}"))?;

        Ok(tool)
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
        user: &entity::enduser::Model,
    ) -> Result<Vec<ToolDto>, Error> {
        ensure_owner(user_id, user, &format!("the tools of user {user_id}"))?;
        let tools = ToolRepository::new(self.db).get_by_user(user_id).await?;
        self.to_dtos(tools).await
    }

    pub async fn published(&self) -> Result<Vec<ToolDto>, Error> {
        let tools = ToolRepository::new(self.db).get_published().await?;
        self.to_dtos(tools).await
    }

    /// Published tools whose path contains `pattern`, case-insensitively
    pub async fn search(&self, pattern: &str) -> Result<Vec<ToolDto>, Error> {
        let pattern = pattern.to_lowercase();
        let tools = self.published().await?;

        Ok(tools
            .into_iter()
            .filter(|tool| tool.tool_path.to_lowercase().contains(&pattern))
            .collect())
    }

    /// Changes the publish state; publishing requires at least one valid, visible tag
    pub async fn set_published(
        &self,
        tool_id: i32,
        publish: bool,
        user: &entity::enduser::Model,
    ) -> Result<ToolDto, Error> {
        let tool = self.get_owned(tool_id, user).await?;
        let tool_repository = ToolRepository::new(self.db);

        if publish {
            let tags = tool_repository.get_tags(tool.id).await?;
            if !tags.iter().any(|tag| tag.valid && !tag.hidden) {
                return Err(Error::BadRequest(format!(
                    "Tool {} has no valid tags and cannot be published",
                    tool.id
                )));
            }
        }

        let tool = tool_repository.set_published(tool, publish).await?;
        self.to_dto(tool).await
    }

    pub async fn register_manual(
        &self,
        request: ManualToolRequest,
        user: &entity::enduser::Model,
    ) -> Result<ToolDto, Error> {
        for (field, value) in [
            ("registry", &request.registry),
            ("namespace", &request.namespace),
            ("name", &request.name),
            ("git_url", &request.git_url),
            ("git_reference", &request.git_reference),
            ("version_name", &request.version_name),
        ] {
            if value.trim().is_empty() {
                return Err(Error::BadRequest(format!("{field} must not be empty")));
            }
        }

        let tool_repository = ToolRepository::new(self.db);
        let existing = tool_repository
            .get_by_path(
                &request.registry,
                &request.namespace,
                &request.name,
                request.toolname.as_deref(),
            )
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict(format!(
                "Tool {}/{}/{} is already registered",
                request.registry, request.namespace, request.name
            )));
        }

        let tag = NewTag {
            name: request.version_name,
            reference: request.git_reference,
            image_id: None,
            cwl_path: request.default_cwl_path.clone(),
            wdl_path: request.default_wdl_path.clone(),
            dockerfile_path: request.default_dockerfile_path.clone(),
            hidden: false,
        };
        let tool = NewTool {
            user_id: user.id,
            registry: request.registry,
            namespace: request.namespace,
            name: request.name,
            toolname: request.toolname,
            mode: ToolMode::ManualImagePath.as_str().to_string(),
            git_url: request.git_url,
            default_cwl_path: request.default_cwl_path,
            default_wdl_path: request.default_wdl_path,
            default_dockerfile_path: request.default_dockerfile_path,
        };

        let tool = tool_repository.create_with_tag(tool, tag).await?;
        self.to_dto(tool).await
    }

    pub async fn get_tags(
        &self,
        tool_id: i32,
        user: &entity::enduser::Model,
    ) -> Result<Vec<TagDto>, Error> {
        let tool = self.get_owned(tool_id, user).await?;
        let tags = ToolRepository::new(self.db).get_tags(tool.id).await?;
        Ok(tags.into_iter().map(tag_dto).collect())
    }

    /// Adds tags to a manually registered tool and returns all of its tags
    pub async fn add_tags(
        &self,
        tool_id: i32,
        new_tags: Vec<NewTagDto>,
        user: &entity::enduser::Model,
    ) -> Result<Vec<TagDto>, Error> {
        let tool = self.get_owned(tool_id, user).await?;
        if tool.mode != ToolMode::ManualImagePath.as_str() {
            return Err(Error::BadRequest(format!(
                "Tool {tool_id} gets its tags from the image registry"
            )));
        }

        let tool_repository = ToolRepository::new(self.db);
        let existing = tool_repository.get_tags(tool.id).await?;

        for tag in new_tags {
            if existing.iter().any(|existing| existing.name == tag.name) {
                return Err(Error::Conflict(format!(
                    "Tool {tool_id} already has a tag named {}",
                    tag.name
                )));
            }

            tool_repository
                .add_tag(
                    tool.id,
                    NewTag {
                        name: tag.name,
                        reference: tag.reference,
                        image_id: tag.image_id,
                        cwl_path: tag.cwl_path,
                        wdl_path: tag.wdl_path,
                        dockerfile_path: tag.dockerfile_path,
                        hidden: tag.hidden,
                    },
                )
                .await?;
        }

        let tags = tool_repository.get_tags(tool.id).await?;
        Ok(tags.into_iter().map(tag_dto).collect())
    }

    pub async fn delete_tag(
        &self,
        tool_id: i32,
        tag_id: i32,
        user: &entity::enduser::Model,
    ) -> Result<(), Error> {
        let tool = self.get_owned(tool_id, user).await?;
        let result = ToolRepository::new(self.db)
            .delete_tag(tool.id, tag_id)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::NotFound(format!(
                "Tool {tool_id} has no tag {tag_id}"
            )));
        }

        Ok(())
    }

    /// Re-reads each tag's CWL descriptor from GitHub and updates tag validity
    ///
    /// Tools built from other source control hosts are returned unchanged.
    pub async fn refresh(
        &self,
        tool_id: i32,
        user: &entity::enduser::Model,
        github: &GitHubClient,
    ) -> Result<ToolDto, Error> {
        let tool = self.get_owned(tool_id, user).await?;

        let Some(full_name) = github_repository(&tool.git_url) else {
            tracing::debug!(tool_id, git_url = %tool.git_url, "Skipping refresh of non-GitHub tool");
            return self.to_dto(tool).await;
        };

        let token = UserRepository::new(self.db)
            .get_token(user.id, crate::webservice::data::user::GITHUB_TOKEN_SOURCE)
            .await?
            .ok_or_else(|| {
                Error::BadRequest(format!("User {} has no GitHub token", user.username))
            })?;

        let tool_repository = ToolRepository::new(self.db);
        let sourcefile_repository = SourcefileRepository::new(self.db);

        for tag in tool_repository.get_tags(tool.id).await? {
            let content = github
                .get_file(&token.content, &full_name, &tag.cwl_path, &tag.reference)
                .await?;

            let valid = content.is_some();
            if let Some(content) = content {
                sourcefile_repository
                    .upsert(TAG_PARENT, tag.id, &tag.cwl_path, "DOCKSTORE_CWL", content)
                    .await?;
            }
            tool_repository.set_tag_valid(tag, valid).await?;
        }

        self.to_dto(tool).await
    }
}

fn tag_dto(tag: entity::tag::Model) -> TagDto {
    TagDto {
        id: tag.id,
        name: tag.name,
        reference: tag.reference,
        image_id: tag.image_id,
        cwl_path: tag.cwl_path,
        wdl_path: tag.wdl_path,
        dockerfile_path: tag.dockerfile_path,
        hidden: tag.hidden,
        valid: tag.valid,
    }
}

/// `owner/repo` of a GitHub SSH or HTTPS git URL.
pub(crate) fn github_repository(git_url: &str) -> Option<String> {
    let rest = git_url
        .strip_prefix("git@github.com:")
        .or_else(|| git_url.strip_prefix("https://github.com/"))?;
    let rest = rest.strip_suffix(".git").unwrap_or(rest);

    (rest.split('/').count() == 2).then(|| rest.to_string())
}
