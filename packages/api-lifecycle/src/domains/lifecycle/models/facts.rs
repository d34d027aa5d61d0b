//! Asynchronously fetched lifecycle facts.

use serde::Serialize;

/// Lifecycle state name that marks an API as published.
pub const PUBLISHED_STATE: &str = "Published";

/// A remotely fetched value.
///
/// `Failed` is kept distinct from `Pending` so callers can tell a lookup that
/// never answered from one that is still running, but both count as
/// "not yet known" for progress resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Fact<T> {
    Pending,
    Loaded(T),
    Failed(String),
}

impl<T> Fact<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Fact::Loaded(value) => Some(value),
            Fact::Pending | Fact::Failed(_) => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Fact::Pending)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Fact::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T: Clone> Fact<T> {
    /// A failed lookup falls back to a value loaded earlier, if any.
    pub fn or_previous(self, previous: &Fact<T>) -> Fact<T> {
        match (self, previous) {
            (Fact::Failed(_), Fact::Loaded(value)) => Fact::Loaded(value.clone()),
            (fact, _) => fact,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Fact<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Fact::Loaded(value),
            Err(e) => Fact::Failed(e.to_string()),
        }
    }
}

/// Lifecycle state and deployment count of the bound API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LifecycleFacts {
    pub state: Fact<String>,
    pub deployment_count: Fact<u32>,
}

impl LifecycleFacts {
    /// Neither lookup has answered yet.
    pub fn pending() -> Self {
        Self {
            state: Fact::Pending,
            deployment_count: Fact::Pending,
        }
    }

    pub fn loaded(state: impl Into<String>, deployment_count: u32) -> Self {
        Self {
            state: Fact::Loaded(state.into()),
            deployment_count: Fact::Loaded(deployment_count),
        }
    }

    pub fn is_published(&self) -> bool {
        self.state.loaded().is_some_and(|s| s == PUBLISHED_STATE)
    }

    /// True only once the count is known to be non-zero.
    pub fn has_deployments(&self) -> bool {
        self.deployment_count.loaded().is_some_and(|count| *count > 0)
    }

    pub fn is_settled(&self) -> bool {
        self.state.is_settled() && self.deployment_count.is_settled()
    }

    /// Refetched facts for the same API. Values already known survive a
    /// failed refetch.
    pub fn refreshed_over(self, previous: &LifecycleFacts) -> Self {
        Self {
            state: self.state.or_previous(&previous.state),
            deployment_count: self.deployment_count.or_previous(&previous.deployment_count),
        }
    }
}

impl Default for LifecycleFacts {
    fn default() -> Self {
        Self::pending()
    }
}
