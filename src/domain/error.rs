//! Domain errors for caching-agent dispatch.

use thiserror::Error;

/// Failure raised by a resource handler while constructing a caching agent.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Invalid handler configuration for {kind}: {reason}")]
    InvalidConfiguration { kind: String, reason: String },

    #[error("Unusable credentials: {0}")]
    UnusableCredentials(String),

    #[error("Agent construction failed: {0}")]
    ConstructionFailed(String),
}

/// Errors surfaced to the caller of a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(
        "Failed to build caching agent for kind {kind} on shard {shard_index} of account {account}: {source}"
    )]
    AgentConstruction {
        account: String,
        kind: String,
        shard_index: u32,
        #[source]
        source: HandlerError,
    },

    #[error("Dispatch task for account {account} did not complete: {reason}")]
    TaskFailed { account: String, reason: String },
}

pub type HandlerResult<T> = Result<T, HandlerError>;

pub type DispatchResult<T> = Result<T, DispatchError>;
