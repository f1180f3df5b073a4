use std::path::Path;

use crate::{
    api::ApiClient,
    descriptor::{cwl_parameter_template, DescriptorType},
    error::Error,
};

use super::{args::ConvertCommands, launch, output::Output};

pub async fn execute(
    command: ConvertCommands,
    api: &ApiClient,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    match command {
        ConvertCommands::Cwl2Json { cwl } => cwl_to_json(&cwl, out).await,
        ConvertCommands::Cwl2Yaml { cwl } => cwl_to_yaml(&cwl, out).await,
        ConvertCommands::Entry2Json { entry, workflow } => {
            let remote =
                launch::fetch_descriptor(api, &entry, workflow, Some(DescriptorType::Cwl)).await?;
            let template = cwl_parameter_template(&remote.descriptor.content)?;
            out.println(serde_json::to_string_pretty(&template)?)
        }
    }
}

pub async fn cwl_to_json(path: &Path, out: &mut Output<'_>) -> Result<(), Error> {
    let template = cwl_parameter_template(&read_descriptor(path).await?)?;
    out.println(serde_json::to_string_pretty(&template)?)
}

pub async fn cwl_to_yaml(path: &Path, out: &mut Output<'_>) -> Result<(), Error> {
    let template = cwl_parameter_template(&read_descriptor(path).await?)?;
    out.write_raw(serde_yaml::to_string(&template)?.as_bytes())
}

async fn read_descriptor(path: &Path) -> Result<String, Error> {
    if !path.is_file() {
        return Err(Error::EntryNotFound(format!(
            "Could not find local file {}",
            path.display()
        )));
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Could not read {}", path.display()), e))
}
