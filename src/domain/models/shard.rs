//! Shard addressing for caching agents.
//!
//! A [`ShardSpec`] names one of `count` partitions of an account's caching
//! workload. Keys (namespace names, for the built-in agents) are assigned to
//! exactly one shard with a stable string hash so that every process computes
//! the same partitioning.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One shard out of `count`, zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardSpec {
    pub index: u32,
    pub count: u32,
}

impl ShardSpec {
    /// Create a shard spec. Returns `None` unless `index < count`.
    pub const fn new(index: u32, count: u32) -> Option<Self> {
        if index < count {
            Some(Self { index, count })
        } else {
            None
        }
    }

    /// The single shard used by agents that do not partition their work.
    pub const fn singleton() -> Self {
        Self { index: 0, count: 1 }
    }

    /// Whether this shard is responsible for `key`.
    pub fn owns(&self, key: &str) -> bool {
        if self.count <= 1 {
            return true;
        }
        shard_for(key, self.count) == self.index
    }

    /// Keep only the keys this shard is responsible for, preserving order.
    pub fn owned<'a, I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        keys.into_iter().filter(|k| self.owns(k)).cloned().collect()
    }
}

impl fmt::Display for ShardSpec {
    /// One-based, e.g. `[2/3]` for index 1 of 3
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}]", self.index + 1, self.count)
    }
}

/// Stable 31-multiplier string hash, reduced modulo `count`.
fn shard_for(key: &str, count: u32) -> u32 {
    let hash = key
        .encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(i32::from(c)));
    hash.unsigned_abs() % count
}

/// Agent type in the `{account}/{agent}[{index + 1}/{count}]` convention.
pub fn agent_type_for(account: &str, agent_name: &str, shard: ShardSpec) -> String {
    format!("{account}/{agent_name}{shard}")
}
