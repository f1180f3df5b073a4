//! Local execution of tools and workflows with an external runner.

use std::{path::Path, process::Stdio};

use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    api::ApiClient,
    config::{Config, LauncherConfig},
    descriptor::DescriptorType,
    entry::EntryRef,
    error::Error,
    model::api::DescriptorDto,
    notify::Notifier,
};

use super::{args::LaunchArgs, output::Output};

/// A descriptor downloaded from the registry.
pub struct RemoteDescriptor {
    pub descriptor: DescriptorDto,
    pub descriptor_type: DescriptorType,
    pub version: String,
}

/// Launches a local or registered entry with the configured runner.
///
/// # Returns
/// - `Err(Error::EntryNotFound)` - The local file, entry or version does not exist
/// - `Err(Error::IoError)` - The parameter file is unreadable or the descriptor could not be downloaded
/// - `Err(Error::RunnerError)` - The runner could not start or exited unsuccessfully
pub async fn launch(
    args: LaunchArgs,
    is_workflow: bool,
    config: &Config,
    api: &ApiClient,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    // Keeps a downloaded descriptor on disk until the runner has finished
    let mut _workdir = None;

    let (label, descriptor_path, descriptor_type) = match (&args.entry, &args.local_entry) {
        (_, Some(local)) => {
            if !local.is_file() {
                return Err(Error::EntryNotFound(format!(
                    "Could not find local file {}",
                    local.display()
                )));
            }
            let descriptor_type = match args.descriptor {
                Some(descriptor_type) => descriptor_type,
                None => DescriptorType::from_path(local).ok_or_else(|| {
                    Error::ClientError(format!(
                        "Could not tell the language of {}, pass --descriptor cwl|wdl",
                        local.display()
                    ))
                })?,
            };
            (local.display().to_string(), local.clone(), descriptor_type)
        }
        (Some(entry), None) => {
            let remote = fetch_descriptor(api, entry, is_workflow, args.descriptor).await?;

            let dir = tempfile::tempdir()
                .map_err(|e| Error::io("Could not create a working directory", e))?;
            let path = dir.path().join(format!("Dockstore.{}", remote.descriptor_type));
            tokio::fs::write(&path, &remote.descriptor.content)
                .await
                .map_err(|e| Error::io(format!("Could not write {}", path.display()), e))?;
            _workdir = Some(dir);

            (
                format!("{}:{}", entry.path, remote.version),
                path,
                remote.descriptor_type,
            )
        }
        (None, None) => {
            return Err(Error::ClientError(
                "One of --entry or --local-entry is required".to_string(),
            ))
        }
    };

    read_parameters(&args.json).await?;

    let notifier = Notifier::new(config.webhook_url.clone());
    notifier.notify(&format!("Launching {label}")).await;

    let result = run_runner(&config.launcher, descriptor_type, &descriptor_path, &args.json, out).await;

    match &result {
        Ok(()) => notifier.notify(&format!("Finished {label}")).await,
        Err(e) => notifier.notify(&format!("Failed {label}: {e}")).await,
    }

    result
}

/// Resolves an entry and version, then downloads its primary descriptor.
///
/// A missing entry or version is [`Error::EntryNotFound`]; any failure while
/// downloading the descriptor itself is an [`Error::IoError`].
pub async fn fetch_descriptor(
    api: &ApiClient,
    entry: &EntryRef,
    is_workflow: bool,
    requested_type: Option<DescriptorType>,
) -> Result<RemoteDescriptor, Error> {
    let (versions, default_type) = if is_workflow {
        let workflow = api.get_workflow_by_path(&entry.path).await?;
        let versions: Vec<String> = workflow
            .versions
            .iter()
            .filter(|version| !version.hidden)
            .map(|version| version.name.clone())
            .collect();
        (versions, workflow.descriptor_type.parse::<DescriptorType>()?)
    } else {
        let tool = api.get_tool_by_path(&entry.path).await?;
        let versions: Vec<String> = tool
            .tags
            .iter()
            .filter(|tag| !tag.hidden)
            .map(|tag| tag.name.clone())
            .collect();
        (versions, DescriptorType::Cwl)
    };

    let version = match &entry.version {
        Some(version) if versions.contains(version) => version.clone(),
        Some(version) => {
            return Err(Error::EntryNotFound(format!(
                "{} has no version named {version}",
                entry.path
            )))
        }
        None => versions.into_iter().next().ok_or_else(|| {
            Error::EntryNotFound(format!("{} has no versions", entry.path))
        })?,
    };

    let descriptor_type = requested_type.unwrap_or(default_type);
    let trs_id = entry.path.trs_id(is_workflow);

    let descriptor = api
        .get_descriptor(&trs_id, &version, descriptor_type)
        .await
        .map_err(|e| match e {
            Error::ConnectionError { .. } => e,
            e => Error::IoError {
                message: format!(
                    "Could not download the {descriptor_type} descriptor of {}:{version}: {e}",
                    entry.path
                ),
                source: None,
            },
        })?;

    debug!(entry = %entry.path, %version, url = %descriptor.url, "Downloaded descriptor");

    Ok(RemoteDescriptor {
        descriptor,
        descriptor_type,
        version,
    })
}

async fn read_parameters(path: &Path) -> Result<serde_yaml::Value, Error> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Could not read parameter file {}", path.display()), e))?;

    // YAML is a superset of JSON, so one parser covers both formats
    serde_yaml::from_str(&contents).map_err(|e| {
        Error::ClientError(format!(
            "Parameter file {} is neither JSON nor YAML: {e}",
            path.display()
        ))
    })
}

/// Program and arguments used to run a descriptor.
fn runner_command(
    launcher: &LauncherConfig,
    descriptor_type: DescriptorType,
    descriptor: &Path,
    parameters: &Path,
) -> Result<(String, Vec<String>), Error> {
    let runner = match descriptor_type {
        DescriptorType::Cwl => &launcher.cwl_runner,
        DescriptorType::Wdl => &launcher.wdl_runner,
    };

    let mut words = runner.split_whitespace().map(str::to_string);
    let program = words
        .next()
        .ok_or_else(|| Error::ClientError(format!("No {descriptor_type} runner is configured")))?;
    let mut args: Vec<String> = words.collect();

    let descriptor = descriptor.display().to_string();
    let parameters = parameters.display().to_string();

    match descriptor_type {
        DescriptorType::Cwl => {
            if launcher.singularity {
                args.push("--singularity".to_string());
            }
            args.push(descriptor);
            args.push(parameters);
        }
        DescriptorType::Wdl => {
            args.extend(["run".to_string(), descriptor, "--inputs".to_string(), parameters]);
        }
    }

    Ok((program, args))
}

async fn run_runner(
    launcher: &LauncherConfig,
    descriptor_type: DescriptorType,
    descriptor: &Path,
    parameters: &Path,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    let (program, args) = runner_command(launcher, descriptor_type, descriptor, parameters)?;
    info!(%program, ?args, "Starting runner");

    let output = Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| Error::RunnerError(format!("Could not start {program}: {e}")))?;

    out.write_raw(&output.stdout)?;
    debug!(stderr = %String::from_utf8_lossy(&output.stderr), "Runner finished");

    if !output.status.success() {
        return Err(Error::RunnerError(format!(
            "{program} exited with {}\n{}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim_end()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cwl_runner_gets_singularity_flag() {
        let launcher = LauncherConfig {
            cwl_runner: "cwltool --debug".to_string(),
            singularity: true,
            ..LauncherConfig::default()
        };

        let (program, args) = runner_command(
            &launcher,
            DescriptorType::Cwl,
            Path::new("/tmp/Dockstore.cwl"),
            Path::new("/tmp/params.json"),
        )
        .unwrap();

        assert_eq!(program, "cwltool");
        assert_eq!(
            args,
            vec!["--debug", "--singularity", "/tmp/Dockstore.cwl", "/tmp/params.json"]
        );
    }

    #[test]
    fn wdl_runner_uses_inputs_flag() {
        let (program, args) = runner_command(
            &LauncherConfig::default(),
            DescriptorType::Wdl,
            Path::new("hello.wdl"),
            Path::new("inputs.json"),
        )
        .unwrap();

        assert_eq!(program, "cromwell");
        assert_eq!(args, vec!["run", "hello.wdl", "--inputs", "inputs.json"]);
    }

    #[test]
    fn empty_runner_is_a_client_error() {
        let launcher = LauncherConfig {
            cwl_runner: "  ".to_string(),
            ..LauncherConfig::default()
        };

        let result = runner_command(
            &launcher,
            DescriptorType::Cwl,
            Path::new("a.cwl"),
            Path::new("b.json"),
        );

        assert!(matches!(result, Err(Error::ClientError(_))));
    }

    #[tokio::test]
    async fn unreadable_parameters_are_io_errors() {
        let result = read_parameters(Path::new("/nonexistent/params.json")).await;

        assert!(matches!(result, Err(Error::IoError { .. })));
    }
}
