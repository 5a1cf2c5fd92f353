//! Implementation of the `kubecache plan` command.
//!
//! Loads configuration, builds each account's handler registry from the
//! built-in Kubernetes handlers, dispatches, and prints the resulting agents.
//! Nothing is scheduled or polled.

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::kubernetes::builtin_registry;
use crate::cli::output::{base_table, CommandOutput};
use crate::domain::models::{AccountContext, Config};
use crate::domain::ports::AgentSummary;
use crate::services::CachingAgentDispatcher;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Only plan this account
    #[arg(short, long)]
    pub account: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccountPlan {
    pub account: String,
    pub agents: Vec<AgentSummary>,
}

#[derive(Debug, Serialize)]
pub struct PlanOutput {
    pub caching_enabled: bool,
    pub accounts: Vec<AccountPlan>,
}

impl CommandOutput for PlanOutput {
    fn to_human(&self) -> String {
        if !self.caching_enabled {
            return "Caching is disabled by configuration ('cache.enabled').".to_string();
        }
        if self.accounts.is_empty() {
            return "No accounts configured.".to_string();
        }

        let mut table = base_table(&[
            "Account",
            "Agent Type",
            "Shard",
            "Interval (ms)",
            "Kinds",
            "Namespaces",
        ]);
        for plan in &self.accounts {
            for agent in &plan.agents {
                let namespaces = match (agent.namespaces.is_empty(), agent.omit_namespaces.is_empty()) {
                    (false, _) => agent.namespaces.join(", "),
                    (true, true) => "*".to_string(),
                    (true, false) => format!("* except {}", agent.omit_namespaces.join(", ")),
                };
                table.add_row(vec![
                    plan.account.clone(),
                    agent.agent_type.clone(),
                    format!("{}/{}", agent.shard_index + 1, agent.shard_count),
                    agent.poll_interval_ms.to_string(),
                    agent.kinds.len().to_string(),
                    namespaces,
                ]);
            }
        }

        let total: usize = self.accounts.iter().map(|a| a.agents.len()).sum();
        format!("{table}\n{total} caching agent(s) across {} account(s)", self.accounts.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: PlanArgs, config: Config) -> Result<PlanOutput> {
    let selected: Vec<_> = config
        .accounts
        .iter()
        .filter(|a| args.account.as_ref().is_none_or(|name| &a.name == name))
        .collect();

    if let Some(name) = &args.account {
        if selected.is_empty() {
            bail!("Account not found in configuration: {name}");
        }
    }

    let accounts = selected
        .into_iter()
        .map(|account| {
            let registry = builtin_registry(&account.kinds)
                .with_context(|| format!("Failed to build handler registry for {}", account.name))?;
            Ok::<_, anyhow::Error>(Arc::new(AccountContext::from_config(account, registry)))
        })
        .collect::<Result<Vec<_>>>()?;

    let dispatcher = CachingAgentDispatcher::new(config.cache);
    let results = dispatcher
        .build_for_accounts(accounts)
        .await
        .context("Failed to build caching agents")?;

    Ok(PlanOutput {
        caching_enabled: dispatcher.config().enabled,
        accounts: results
            .into_iter()
            .map(|(account, agents)| AccountPlan {
                account,
                agents: agents.summaries(),
            })
            .collect(),
    })
}
