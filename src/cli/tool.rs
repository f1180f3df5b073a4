use tracing::info;

use crate::{
    api::ApiClient,
    config::Config,
    entry::EntryPath,
    error::Error,
    model::tool::{ManualToolRequest, NewTagDto, ToolDto, ToolMode},
};

use super::{
    args::{ManualPublishArgs, ToolCommands, VersionTagCommands},
    launch,
    output::Output,
};

pub async fn execute(
    command: ToolCommands,
    config: &Config,
    api: &ApiClient,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    match command {
        ToolCommands::List => {
            let user = api.get_user().await?;
            let tools = api.list_user_tools(user.id).await?;
            out.tools(&tools)
        }
        ToolCommands::Search { pattern } => {
            let tools = api.search_tools(&pattern).await?;
            if tools.is_empty() {
                return out.hint(format_args!("No published tools match {pattern:?}"));
            }
            out.tools(&tools)
        }
        ToolCommands::Info { entry } => {
            let tool = api.get_tool_by_path(&entry).await?;
            if !tool.is_published {
                return Err(Error::EntryNotFound(format!(
                    "Tool {entry} is not published"
                )));
            }
            out.tool(&tool)
        }
        ToolCommands::Publish { entry, unpub } => publish(api, &entry, !unpub, out).await,
        ToolCommands::ManualPublish(args) => manual_publish(api, args, out).await,
        ToolCommands::VersionTag(command) => version_tag(api, command, out).await,
        ToolCommands::Refresh { entry } => {
            let tool = api.get_tool_by_path(&entry).await?;
            let tool = api.refresh_tool(tool.id).await?;
            out.hint(format_args!("Refreshed {}", tool.tool_path))?;
            out.tool(&tool)
        }
        ToolCommands::Launch(args) => launch::launch(args, false, config, api, out).await,
    }
}

async fn publish(
    api: &ApiClient,
    entry: &EntryPath,
    publish: bool,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    let tool = api.get_tool_by_path(entry).await?;

    if tool.is_published == publish {
        let state = if publish { "published" } else { "unpublished" };
        return Err(Error::CommandError(format!(
            "Tool {entry} is already {state}"
        )));
    }

    api.publish_tool(tool.id, publish).await?;
    info!(tool = %entry, publish, "Changed publish state");

    if publish {
        out.println(format_args!("Successfully published {entry}"))
    } else {
        out.println(format_args!("Successfully unpublished {entry}"))
    }
}

async fn manual_publish(
    api: &ApiClient,
    args: ManualPublishArgs,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    if !args.git_url.starts_with("git@") && !args.git_url.starts_with("https://") {
        return Err(Error::ClientError(format!(
            "Git URL {:?} must be an SSH (git@...) or HTTPS URL",
            args.git_url
        )));
    }

    let request = ManualToolRequest {
        registry: args.registry,
        namespace: args.namespace,
        name: args.name,
        toolname: args.toolname,
        git_url: args.git_url,
        git_reference: args.git_reference,
        version_name: args.version_name,
        default_cwl_path: args.cwl_path,
        default_wdl_path: args.wdl_path,
        default_dockerfile_path: args.dockerfile_path,
    };

    let tool = api.register_manual_tool(&request).await?;
    out.println(format_args!("Successfully registered {}", tool.tool_path))
}

async fn version_tag(
    api: &ApiClient,
    command: VersionTagCommands,
    out: &mut Output<'_>,
) -> Result<(), Error> {
    match command {
        VersionTagCommands::Add {
            entry,
            name,
            git_reference,
            image_id,
            cwl_path,
            wdl_path,
            dockerfile_path,
            hidden,
        } => {
            let tool = manual_tool(api, &entry).await?;

            if tool.tags.iter().any(|tag| tag.name == name) {
                return Err(Error::ClientError(format!(
                    "Tool {entry} already has a tag named {name}"
                )));
            }

            let tag = NewTagDto {
                name: name.clone(),
                reference: git_reference,
                image_id,
                cwl_path,
                wdl_path,
                dockerfile_path,
                hidden,
            };
            api.add_tags(tool.id, &[tag]).await?;

            out.println(format_args!("Added tag {name} to {entry}"))
        }
        VersionTagCommands::Remove { entry, name } => {
            let tool = manual_tool(api, &entry).await?;

            let Some(tag) = tool.tags.iter().find(|tag| tag.name == name) else {
                return Err(Error::ClientError(format!(
                    "Tool {entry} has no tag named {name}"
                )));
            };
            api.delete_tag(tool.id, tag.id).await?;

            out.println(format_args!("Removed tag {name} from {entry}"))
        }
    }
}

/// Tags can only be edited on tools registered through `manual_publish`.
async fn manual_tool(api: &ApiClient, entry: &EntryPath) -> Result<ToolDto, Error> {
    let tool = api.get_tool_by_path(entry).await?;

    if tool.mode != ToolMode::ManualImagePath {
        return Err(Error::ClientError(format!(
            "Tool {entry} is not a manually registered tool, its tags come from the image registry"
        )));
    }

    Ok(tool)
}
