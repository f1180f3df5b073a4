//! Descriptor handling: language detection and CWL parameter templates.

use std::{fmt, path::Path, str::FromStr};

use serde_json::{json, Map, Value as Json};
use serde_yaml::Value as Yaml;

use crate::error::Error;

static FILE_PLACEHOLDER: &str = "/tmp/fill_me_in.txt";
static DIRECTORY_PLACEHOLDER: &str = "/tmp/fill_me_in";
static STRING_PLACEHOLDER: &str = "fill me in";

/// Workflow language of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorType {
    Cwl,
    Wdl,
}

impl DescriptorType {
    /// Infers the language from a file extension (`.cwl`, `.wdl`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "cwl" => Some(Self::Cwl),
            "wdl" => Some(Self::Wdl),
            _ => None,
        }
    }

    /// Descriptor type segment used in GA4GH TRS URLs.
    pub fn trs_name(&self) -> &'static str {
        match self {
            Self::Cwl => "CWL",
            Self::Wdl => "WDL",
        }
    }
}

impl fmt::Display for DescriptorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cwl => f.write_str("cwl"),
            Self::Wdl => f.write_str("wdl"),
        }
    }
}

impl FromStr for DescriptorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cwl" => Ok(Self::Cwl),
            "wdl" => Ok(Self::Wdl),
            other => Err(Error::ClientError(format!(
                "Unknown descriptor type {other:?}, expected cwl or wdl"
            ))),
        }
    }
}

/// Builds a parameter template from the `inputs` of a CWL descriptor.
///
/// Every input gets a placeholder value of its declared type. Inputs may be given
/// as a map keyed by id or as a list of objects with an `id` field, and ids may
/// carry a leading `#`.
///
/// # Arguments
/// - `content` - CWL descriptor text, YAML or JSON
///
/// # Returns
/// - `Ok(Json)` - An object mapping each input id to a placeholder value
/// - `Err(Error::CommandError)` - The document is not a CWL tool or workflow
/// - `Err(Error::YamlError)` - The document is not valid YAML
pub fn cwl_parameter_template(content: &str) -> Result<Json, Error> {
    let document: Yaml = serde_yaml::from_str(content)?;

    if document.get("cwlVersion").is_none() {
        return Err(Error::CommandError(
            "Descriptor is not a CWL document, cwlVersion is missing".to_string(),
        ));
    }

    let mut template = Map::new();

    match document.get("inputs") {
        None | Some(Yaml::Null) => {}
        Some(Yaml::Mapping(inputs)) => {
            for (id, input) in inputs {
                let Some(id) = id.as_str() else { continue };
                template.insert(strip_id(id), placeholder_for_input(input));
            }
        }
        Some(Yaml::Sequence(inputs)) => {
            for input in inputs {
                let Some(id) = input.get("id").and_then(Yaml::as_str) else {
                    return Err(Error::CommandError(
                        "CWL input is missing an id".to_string(),
                    ));
                };
                template.insert(strip_id(id), placeholder_for_input(input));
            }
        }
        Some(_) => {
            return Err(Error::CommandError(
                "CWL inputs must be a map or a list".to_string(),
            ))
        }
    }

    Ok(Json::Object(template))
}

fn strip_id(id: &str) -> String {
    let id = id.trim_start_matches('#');
    // Packed documents qualify ids as `main/input`
    id.rsplit('/').next().unwrap_or(id).to_string()
}

fn placeholder_for_input(input: &Yaml) -> Json {
    match input {
        // Shorthand `name: string`
        Yaml::String(_) => placeholder_for_type(input),
        _ => input
            .get("type")
            .map(placeholder_for_type)
            .unwrap_or(Json::Null),
    }
}

fn placeholder_for_type(cwl_type: &Yaml) -> Json {
    match cwl_type {
        Yaml::String(name) => placeholder_for_type_name(name),
        // Union such as ["null", "File"]; the first non-null member decides
        Yaml::Sequence(members) => members
            .iter()
            .find(|member| member.as_str() != Some("null"))
            .map(placeholder_for_type)
            .unwrap_or(Json::Null),
        Yaml::Mapping(_) => match cwl_type.get("type").and_then(Yaml::as_str) {
            Some("array") => {
                let item = cwl_type
                    .get("items")
                    .map(placeholder_for_type)
                    .unwrap_or(Json::Null);
                json!([item])
            }
            Some("enum") => cwl_type
                .get("symbols")
                .and_then(|symbols| symbols.get(0))
                .and_then(Yaml::as_str)
                .map(|symbol| Json::String(strip_id(symbol)))
                .unwrap_or(Json::Null),
            Some("record") => Json::Object(Map::new()),
            _ => Json::Null,
        },
        _ => Json::Null,
    }
}

fn placeholder_for_type_name(name: &str) -> Json {
    if let Some(item) = name.strip_suffix("[]") {
        return json!([placeholder_for_type_name(item)]);
    }
    let name = name.strip_suffix('?').unwrap_or(name);

    match name {
        "File" => json!({ "class": "File", "path": FILE_PLACEHOLDER }),
        "Directory" => json!({ "class": "Directory", "path": DIRECTORY_PLACEHOLDER }),
        "string" => json!(STRING_PLACEHOLDER),
        "int" | "long" => json!(0),
        "float" | "double" => json!(0.0),
        "boolean" => json!(false),
        _ => Json::Null,
    }
}
