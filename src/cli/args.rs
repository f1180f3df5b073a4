//! Command line structure.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    descriptor::DescriptorType,
    entry::{EntryPath, EntryRef},
};

#[derive(Parser, Debug)]
#[command(name = "dockstore")]
#[command(about = "Command line client for the Dockstore tool and workflow registry", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.dockstore/config
    #[arg(long, global = true, env = "DOCKSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log requests and responses to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Non-interactive mode: terse output without hints
    #[arg(long, global = true)]
    pub script: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Tool commands
    #[command(subcommand)]
    Tool(ToolCommands),

    /// Workflow commands
    #[command(subcommand)]
    Workflow(WorkflowCommands),

    /// Convert descriptors into parameter files
    #[command(subcommand)]
    Convert(ConvertCommands),
}

#[derive(Subcommand, Debug)]
pub enum ToolCommands {
    /// List your tools
    List,

    /// Search published tools
    Search {
        /// Text to look for in tool paths
        #[arg(long)]
        pattern: String,
    },

    /// Show a published tool
    Info {
        #[arg(long)]
        entry: EntryPath,
    },

    /// Publish or unpublish one of your tools
    Publish {
        #[arg(long)]
        entry: EntryPath,

        /// Unpublish instead of publishing
        #[arg(long)]
        unpub: bool,
    },

    /// Register a tool whose tags are managed by hand
    #[command(name = "manual_publish")]
    ManualPublish(ManualPublishArgs),

    /// Add or remove tags of a manually registered tool
    #[command(name = "version_tag", subcommand)]
    VersionTag(VersionTagCommands),

    /// Update a tool from its image registry and source repository
    Refresh {
        #[arg(long)]
        entry: EntryPath,
    },

    /// Run a tool locally
    Launch(LaunchArgs),
}

#[derive(Args, Debug)]
pub struct ManualPublishArgs {
    /// Image registry, e.g. quay.io
    #[arg(long)]
    pub registry: String,

    #[arg(long)]
    pub namespace: String,

    #[arg(long)]
    pub name: String,

    /// Distinguishes several tools built from the same image
    #[arg(long)]
    pub toolname: Option<String>,

    /// Source repository, e.g. git@github.com:org/repo.git
    #[arg(long)]
    pub git_url: String,

    /// Branch or tag the first version is built from
    #[arg(long)]
    pub git_reference: String,

    /// Name of the first version
    #[arg(long, default_value = "latest")]
    pub version_name: String,

    #[arg(long, default_value = "/Dockstore.cwl")]
    pub cwl_path: String,

    #[arg(long, default_value = "/Dockstore.wdl")]
    pub wdl_path: String,

    #[arg(long, default_value = "/Dockerfile")]
    pub dockerfile_path: String,
}

#[derive(Subcommand, Debug)]
pub enum VersionTagCommands {
    /// Add a tag
    Add {
        #[arg(long)]
        entry: EntryPath,

        /// Name of the new tag
        #[arg(long)]
        name: String,

        #[arg(long)]
        git_reference: String,

        #[arg(long)]
        image_id: Option<String>,

        #[arg(long, default_value = "/Dockstore.cwl")]
        cwl_path: String,

        #[arg(long, default_value = "/Dockstore.wdl")]
        wdl_path: String,

        #[arg(long, default_value = "/Dockerfile")]
        dockerfile_path: String,

        /// Hide the tag from the public listing
        #[arg(long)]
        hidden: bool,
    },

    /// Remove a tag
    Remove {
        #[arg(long)]
        entry: EntryPath,

        /// Name of the tag to remove
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkflowCommands {
    /// List your workflows
    List,

    /// Show a published workflow
    Info {
        #[arg(long)]
        entry: EntryPath,
    },

    /// Publish or unpublish one of your workflows
    Publish {
        #[arg(long)]
        entry: EntryPath,

        #[arg(long)]
        unpub: bool,
    },

    /// Update a workflow's versions from its source repository
    Refresh {
        #[arg(long)]
        entry: EntryPath,
    },

    /// Run a workflow locally
    Launch(LaunchArgs),
}

#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// Registered entry, optionally with a version: host/namespace/name[:version]
    #[arg(long, conflicts_with = "local_entry", required_unless_present = "local_entry")]
    pub entry: Option<EntryRef>,

    /// Descriptor file on disk
    #[arg(long)]
    pub local_entry: Option<PathBuf>,

    /// Parameter file, JSON or YAML
    #[arg(long, alias = "yaml")]
    pub json: PathBuf,

    /// Descriptor language; inferred from the file extension when omitted
    #[arg(long)]
    pub descriptor: Option<DescriptorType>,
}

#[derive(Subcommand, Debug)]
pub enum ConvertCommands {
    /// Print a JSON parameter template for a local CWL descriptor
    #[command(name = "cwl2json")]
    Cwl2Json {
        #[arg(long)]
        cwl: PathBuf,
    },

    /// Print a YAML parameter template for a local CWL descriptor
    #[command(name = "cwl2yaml")]
    Cwl2Yaml {
        #[arg(long)]
        cwl: PathBuf,
    },

    /// Print a JSON parameter template for a registered entry
    #[command(name = "entry2json")]
    Entry2Json {
        #[arg(long)]
        entry: EntryRef,

        /// Look the entry up among workflows instead of tools
        #[arg(long)]
        workflow: bool,
    },
}
