use tracing::info;

use crate::{api::ApiClient, config::Config, entry::EntryPath, error::Error};

use super::{args::WorkflowCommands, launch, output::Output};

pub async fn execute(
    command: WorkflowCommands,
    config: &Config,
    api: &ApiClient,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    match command {
        WorkflowCommands::List => {
            let user = api.get_user().await?;
            let workflows = api.list_user_workflows(user.id).await?;
            out.workflows(&workflows)
        }
        WorkflowCommands::Info { entry } => {
            let workflow = api.get_workflow_by_path(&entry).await?;
            if !workflow.is_published {
                return Err(Error::EntryNotFound(format!(
                    "Workflow {entry} is not published"
                )));
            }
            out.workflow(&workflow)
        }
        WorkflowCommands::Publish { entry, unpub } => publish(api, &entry, !unpub, out).await,
        WorkflowCommands::Refresh { entry } => {
            let workflow = api.get_workflow_by_path(&entry).await?;
            let workflow = api.refresh_workflow(workflow.id).await?;
            out.hint(format_args!("Refreshed {}", workflow.full_workflow_path))?;
            out.workflow(&workflow)
        }
        WorkflowCommands::Launch(args) => launch::launch(args, true, config, api, out).await,
    }
}

async fn publish(
    api: &ApiClient,
    entry: &EntryPath,
    publish: bool,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    let workflow = api.get_workflow_by_path(entry).await?;

    if workflow.is_published == publish {
        let state = if publish { "published" } else { "unpublished" };
        return Err(Error::CommandError(format!(
            "Workflow {entry} is already {state}"
        )));
    }

    api.publish_workflow(workflow.id, publish).await?;
    info!(workflow = %entry, publish, "Changed publish state");

    if publish {
        out.println(format_args!("Successfully published {entry}"))
    } else {
        out.println(format_args!("Successfully unpublished {entry}"))
    }
}
