use crate::{
    entry::EntryPath,
    error::Error,
    model::{
        api::PublishRequest,
        tool::{ManualToolRequest, NewTagDto, TagDto, ToolDto},
    },
};

use super::ApiClient;

impl ApiClient {
    /// Looks up one of the user's tools by path.
    ///
    /// A 404 from the webservice becomes [`Error::EntryNotFound`].
    pub async fn get_tool_by_path(&self, path: &EntryPath) -> Result<ToolDto, Error> {
        self.require_token()?;
        let encoded = urlencoding::encode(&path.to_string()).into_owned();

        self.get(&format!("/containers/path/tool/{encoded}"))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    Error::EntryNotFound(format!("Could not find tool {path}"))
                } else {
                    e
                }
            })
    }

    pub async fn list_user_tools(&self, user_id: i32) -> Result<Vec<ToolDto>, Error> {
        self.require_token()?;
        self.get(&format!("/users/{user_id}/containers")).await
    }

    /// Published tools whose path contains `pattern`.
    pub async fn search_tools(&self, pattern: &str) -> Result<Vec<ToolDto>, Error> {
        let pattern = urlencoding::encode(pattern).into_owned();
        self.get(&format!("/containers/search?pattern={pattern}"))
            .await
    }

    pub async fn publish_tool(&self, tool_id: i32, publish: bool) -> Result<ToolDto, Error> {
        self.require_token()?;
        self.post(
            &format!("/containers/{tool_id}/publish"),
            &PublishRequest { publish },
        )
        .await
    }

    pub async fn register_manual_tool(
        &self,
        request: &ManualToolRequest,
    ) -> Result<ToolDto, Error> {
        self.require_token()?;
        self.post("/containers/registerManual", request).await
    }

    pub async fn refresh_tool(&self, tool_id: i32) -> Result<ToolDto, Error> {
        self.require_token()?;
        self.post(&format!("/containers/{tool_id}/refresh"), &())
            .await
    }

    /// Adds tags and returns the tool's full tag list.
    pub async fn add_tags(&self, tool_id: i32, tags: &[NewTagDto]) -> Result<Vec<TagDto>, Error> {
        self.require_token()?;
        self.post(&format!("/containers/{tool_id}/tags"), tags)
            .await
    }

    pub async fn delete_tag(&self, tool_id: i32, tag_id: i32) -> Result<(), Error> {
        self.require_token()?;
        self.delete(&format!("/containers/{tool_id}/tags/{tag_id}"))
            .await
    }
}
