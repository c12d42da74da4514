use bundle_copy::commands::run::run_cli;
use bundle_copy::config::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    bundle_copy::logging::init(cli.debug);
    tracing::debug!(version = bundle_copy::VERSION, "starting bundle-copy");

    run_cli(&cli)?;

    Ok(())
}
