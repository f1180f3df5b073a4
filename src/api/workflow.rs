use crate::{
    entry::EntryPath,
    error::Error,
    model::{api::PublishRequest, workflow::WorkflowDto},
};

use super::ApiClient;

impl ApiClient {
    /// Looks up one of the user's workflows by path.
    ///
    /// A 404 from the webservice becomes [`Error::EntryNotFound`].
    pub async fn get_workflow_by_path(&self, path: &EntryPath) -> Result<WorkflowDto, Error> {
        self.require_token()?;
        let encoded = urlencoding::encode(&path.to_string()).into_owned();

        self.get(&format!("/workflows/path/workflow/{encoded}"))
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    Error::EntryNotFound(format!("Could not find workflow {path}"))
                } else {
                    e
                }
            })
    }

    pub async fn list_user_workflows(&self, user_id: i32) -> Result<Vec<WorkflowDto>, Error> {
        self.require_token()?;
        self.get(&format!("/users/{user_id}/workflows")).await
    }

    pub async fn publish_workflow(
        &self,
        workflow_id: i32,
        publish: bool,
    ) -> Result<WorkflowDto, Error> {
        self.require_token()?;
        self.post(
            &format!("/workflows/{workflow_id}/publish"),
            &PublishRequest { publish },
        )
        .await
    }

    /// Re-reads the workflow's versions from its source control repository.
    pub async fn refresh_workflow(&self, workflow_id: i32) -> Result<WorkflowDto, Error> {
        self.require_token()?;
        self.post(&format!("/workflows/{workflow_id}/refresh"), &())
            .await
    }
}
