use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How a tool's versions are discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolMode {
    /// Tags are discovered from the image registry's automated builds
    AutoDetectQuayTagsAutomatedBuilds,
    /// Tags are added by hand through `version_tag`
    ManualImagePath,
}

impl ToolMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoDetectQuayTagsAutomatedBuilds => "AUTO_DETECT_QUAY_TAGS_AUTOMATED_BUILDS",
            Self::ManualImagePath => "MANUAL_IMAGE_PATH",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUTO_DETECT_QUAY_TAGS_AUTOMATED_BUILDS" => Ok(Self::AutoDetectQuayTagsAutomatedBuilds),
            "MANUAL_IMAGE_PATH" => Ok(Self::ManualImagePath),
            other => Err(format!("unknown tool mode {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDto {
    pub id: i32,
    pub tool_path: String,
    pub registry: String,
    pub namespace: String,
    pub name: String,
    pub toolname: Option<String>,
    pub mode: ToolMode,
    pub git_url: String,
    pub is_published: bool,
    pub default_cwl_path: String,
    pub default_wdl_path: String,
    pub default_dockerfile_path: String,
    pub topic: Option<String>,
    #[serde(default)]
    pub tags: Vec<TagDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagDto {
    pub id: i32,
    pub name: String,
    pub reference: String,
    pub image_id: Option<String>,
    pub cwl_path: String,
    pub wdl_path: String,
    pub dockerfile_path: String,
    pub hidden: bool,
    pub valid: bool,
}

/// A tag to be added to a manually registered tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTagDto {
    pub name: String,
    pub reference: String,
    pub image_id: Option<String>,
    pub cwl_path: String,
    pub wdl_path: String,
    pub dockerfile_path: String,
    pub hidden: bool,
}

/// Registration request for a tool whose tags are managed by hand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualToolRequest {
    pub registry: String,
    pub namespace: String,
    pub name: String,
    pub toolname: Option<String>,
    pub git_url: String,
    pub git_reference: String,
    pub version_name: String,
    pub default_cwl_path: String,
    pub default_wdl_path: String,
    pub default_dockerfile_path: String,
}
