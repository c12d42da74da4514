//! Run the copy plugin as a one-shot build step

use crate::config::Cli;
use crate::executor::ExecutionStats;
use crate::plugin::{BuildPlugin, CopyPlugin};
use crate::types::{BuildContext, CopyError};
use crate::Config;
use tokio::runtime::Builder;

/// Run one build's copy step on a current-thread runtime
pub fn run(config: Config, ctx: &BuildContext) -> Result<ExecutionStats, CopyError> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CopyError::Io)?;

    let plugin = CopyPlugin::new(config);
    tracing::debug!(
        plugin = plugin.name(),
        output_dir = %ctx.output.output_dir().display(),
        working_dir = %ctx.working_dir.display(),
        "running build hook"
    );

    runtime.block_on(plugin.on_outputs_written(ctx))
}

/// Build the configuration and context from command-line arguments, then run
pub fn run_cli(cli: &Cli) -> Result<ExecutionStats, CopyError> {
    let config = Config::try_from(cli)?;

    let ctx = match &cli.cwd {
        Some(dir) => BuildContext::new(cli.bundle_output(), dir.clone()),
        None => BuildContext::in_current_dir(cli.bundle_output()).map_err(CopyError::Io)?,
    };

    run(config, &ctx)
}
