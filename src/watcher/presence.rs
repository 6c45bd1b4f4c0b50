use linked_hash_set::LinkedHashSet;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::status::StatusSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceEvent {
    Joined(String),
    Left(String),
}

impl Display for PresenceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Joined(name) => write!(f, "+ {} joined!", name),
            Self::Left(name) => write!(f, "- {} left!", name),
        }
    }
}

/// How an offline snapshot affects the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfflinePolicy {
    /// Offline means nobody is online: every known player leaves, and everyone
    /// listed once the server is back joins again.
    #[default]
    Reset,
    /// Offline carries no information: the last known player list is kept.
    Hold,
}

#[derive(Debug, Default)]
pub struct PresenceDiff {
    pub joined: LinkedHashSet<String>,
    pub left: LinkedHashSet<String>,
}

impl PresenceDiff {
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty()
    }

    /// Joins first, then leaves.
    pub fn into_events(self) -> Vec<PresenceEvent> {
        self.joined
            .into_iter()
            .map(PresenceEvent::Joined)
            .chain(self.left.into_iter().map(PresenceEvent::Left))
            .collect()
    }
}

/// Players in `current` but not `previous` joined, the reverse left.
pub fn diff(previous: &LinkedHashSet<String>, current: &LinkedHashSet<String>) -> PresenceDiff {
    PresenceDiff {
        joined: current
            .iter()
            .filter(|name| !previous.contains(*name))
            .cloned()
            .collect(),
        left: previous
            .iter()
            .filter(|name| !current.contains(*name))
            .cloned()
            .collect(),
    }
}

/// Baseline of the last observed player list.
#[derive(Debug, Default)]
pub struct PresenceState {
    previous: LinkedHashSet<String>,
    policy: OfflinePolicy,
}

impl PresenceState {
    pub fn new(policy: OfflinePolicy) -> Self {
        Self {
            previous: LinkedHashSet::new(),
            policy,
        }
    }

    pub fn previous(&self) -> &LinkedHashSet<String> {
        &self.previous
    }

    /// Diffs `snapshot` against the baseline and makes it the new baseline.
    pub fn advance(&mut self, snapshot: &StatusSnapshot) -> Vec<PresenceEvent> {
        if !snapshot.is_online() && self.policy == OfflinePolicy::Hold {
            return Vec::new();
        }

        let changes = diff(&self.previous, snapshot.players());
        if changes.is_empty() {
            return Vec::new();
        }

        self.previous = snapshot.players().clone();
        changes.into_events()
    }
}
