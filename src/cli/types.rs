//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::plan::PlanArgs;

#[derive(Parser, Debug)]
#[command(name = "kubecache")]
#[command(about = "Plan Kubernetes caching agents per account", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .kubecache/config.yaml + local.yaml)
    #[arg(short, long, global = true, env = "KUBECACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the caching agents each account would schedule
    Plan(PlanArgs),
}
