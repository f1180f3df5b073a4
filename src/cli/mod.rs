//! In-process CLI entry point.
//!
//! [`run`] parses arguments, executes one command and returns the exit status.
//! It never terminates the process, so tests can call it repeatedly and inspect
//! the returned code and captured output.

mod args;
mod convert;
mod launch;
mod output;
mod tool;
mod workflow;

use std::{ffi::OsString, io::Write};

use clap::Parser;
use tracing::debug;

use crate::{
    api::ApiClient,
    config::Config,
    error::{Error, ExitCode},
};

pub use self::args::{Cli, Commands};
use self::{args::ConvertCommands, output::Output};

/// Runs the CLI with `args` (including the program name) and returns the exit status.
///
/// # Arguments
/// - `args` - Argument vector, first element is the program name
/// - `stdout` - Receives command output
/// - `stderr` - Receives error messages
///
/// # Returns
/// - The numeric [`ExitCode`] of the invocation
pub async fn run<I, T>(
    args: I,
    stdout: &mut (dyn Write + Send),
    stderr: &mut (dyn Write + Send),
) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests are not errors
            if !e.use_stderr() {
                let _ = write!(stdout, "{}", e.render());
                return ExitCode::Success.code();
            }
            let _ = write!(stderr, "{}", e.render());
            return ExitCode::ClientError.code();
        }
    };

    match execute(cli, stdout).await {
        Ok(()) => ExitCode::Success.code(),
        Err(e) => {
            let code = e.exit_code();
            debug!(error = ?e, ?code, "Command failed");
            let _ = writeln!(stderr, "{e}");
            code.code()
        }
    }
}

async fn execute(cli: Cli, stdout: &mut (dyn Write + Send)) -> Result<(), Error> {
    let mut out = Output::new(stdout, cli.script);

    // Local conversions work without a config file
    match &cli.command {
        Commands::Convert(ConvertCommands::Cwl2Json { cwl }) => {
            return convert::cwl_to_json(cwl, &mut out).await
        }
        Commands::Convert(ConvertCommands::Cwl2Yaml { cwl }) => {
            return convert::cwl_to_yaml(cwl, &mut out).await
        }
        _ => {}
    }

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)?;
    debug!(path = %config_path.display(), server_url = %config.server_url, "Loaded config");

    let api = ApiClient::new(&config)?;

    match cli.command {
        Commands::Tool(command) => tool::execute(command, &config, &api, &mut out).await,
        Commands::Workflow(command) => {
            workflow::execute(command, &config, &api, &mut out).await
        }
        Commands::Convert(command) => convert::execute(command, &api, &mut out).await,
    }
}
