//! Entry path parsing.
//!
//! Tools are addressed as `registry/namespace/name[/toolname]` and workflows as
//! `sourcecontrol/organization/repository[/workflowname]`. Commands that act on a
//! single version accept an optional `:version` suffix.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// Path identifying a tool or workflow in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPath {
    /// Image registry host for tools, source control host for workflows.
    pub host: String,
    pub namespace: String,
    pub name: String,
    /// Optional fourth segment distinguishing entries in the same repository.
    pub entry_name: Option<String>,
}

impl EntryPath {
    /// Path of the entry as a GA4GH TRS tool id.
    pub fn trs_id(&self, is_workflow: bool) -> String {
        if is_workflow {
            format!("#workflow/{self}")
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for EntryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.namespace, self.name)?;
        if let Some(entry_name) = &self.entry_name {
            write!(f, "/{entry_name}")?;
        }
        Ok(())
    }
}

impl FromStr for EntryPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('/').collect();

        if !(3..=4).contains(&segments.len()) || segments.iter().any(|segment| segment.is_empty())
        {
            return Err(Error::ClientError(format!(
                "Invalid entry path {s:?}, expected host/namespace/name[/entryname]"
            )));
        }

        Ok(Self {
            host: segments[0].to_string(),
            namespace: segments[1].to_string(),
            name: segments[2].to_string(),
            entry_name: segments.get(3).map(|segment| segment.to_string()),
        })
    }
}

/// An entry path with an optional version, as in `quay.io/org/tool:1.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub path: EntryPath,
    pub version: Option<String>,
}

impl FromStr for EntryRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // A ':' followed by '/' belongs to a registry port, not a version.
        let (path, version) = match s.rsplit_once(':').filter(|(_, v)| !v.contains('/')) {
            Some((_, "")) => {
                return Err(Error::ClientError(format!(
                    "Invalid entry {s:?}, the version after ':' is empty"
                )))
            }
            Some((path, version)) => (path, Some(version.to_string())),
            None => (s, None),
        };

        Ok(Self {
            path: path.parse()?,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_segment_tool_path() {
        let path: EntryPath = "quay.io/dockstoretestuser/quayandgithub".parse().unwrap();

        assert_eq!(path.host, "quay.io");
        assert_eq!(path.namespace, "dockstoretestuser");
        assert_eq!(path.name, "quayandgithub");
        assert_eq!(path.entry_name, None);
        assert_eq!(path.to_string(), "quay.io/dockstoretestuser/quayandgithub");
    }

    #[test]
    fn parses_entry_name_segment() {
        let path: EntryPath = "github.com/org/repo/alt".parse().unwrap();

        assert_eq!(path.entry_name.as_deref(), Some("alt"));
        assert_eq!(path.trs_id(true), "#workflow/github.com/org/repo/alt");
    }

    #[test]
    fn rejects_short_and_empty_paths() {
        assert!("quay.io/onlytwo".parse::<EntryPath>().is_err());
        assert!("quay.io//name".parse::<EntryPath>().is_err());
        assert!("a/b/c/d/e".parse::<EntryPath>().is_err());
    }

    #[test]
    fn splits_version_suffix() {
        let entry: EntryRef = "quay.io/org/tool:1.0".parse().unwrap();

        assert_eq!(entry.path.to_string(), "quay.io/org/tool");
        assert_eq!(entry.version.as_deref(), Some("1.0"));

        let entry: EntryRef = "quay.io/org/tool".parse().unwrap();
        assert_eq!(entry.version, None);
    }

    #[test]
    fn registry_port_is_not_a_version() {
        let entry: EntryRef = "localhost:5000/org/tool".parse().unwrap();

        assert_eq!(entry.path.host, "localhost:5000");
        assert_eq!(entry.version, None);
    }

    #[test]
    fn rejects_empty_version() {
        assert!("quay.io/org/tool:".parse::<EntryRef>().is_err());
    }
}
