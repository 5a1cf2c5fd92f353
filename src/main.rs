//! kubecache CLI entry point.

use clap::Parser;

use kubecache::cli::output::output;
use kubecache::cli::{Cli, Commands};
use kubecache::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match kubecache::cli::load_config(&cli) {
        Ok(config) => config,
        Err(err) => kubecache::cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => kubecache::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Plan(args) => kubecache::cli::commands::plan::execute(args, config)
            .await
            .map(|plan| output(&plan, cli.json)),
    };

    if let Err(err) = result {
        kubecache::cli::handle_error(err, cli.json);
    }
}
