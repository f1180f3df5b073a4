use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDto {
    pub id: i32,
    pub full_workflow_path: String,
    pub source_control: String,
    pub organization: String,
    pub repository: String,
    pub workflow_name: Option<String>,
    pub descriptor_type: String,
    pub default_workflow_path: String,
    pub is_published: bool,
    pub mode: String,
    pub topic: Option<String>,
    pub github_app_installation_id: Option<i64>,
    #[serde(default)]
    pub versions: Vec<WorkflowVersionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowVersionDto {
    pub id: i32,
    pub name: String,
    pub reference: String,
    pub workflow_path: String,
    pub commit_id: Option<String>,
    pub hidden: bool,
    pub valid: bool,
}
