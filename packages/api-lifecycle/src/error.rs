//! Error types for lifecycle operations.

use thiserror::Error;

use crate::domains::lifecycle::machines::PublishBlocker;

pub type Result<T> = std::result::Result<T, LifecycleError>;

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The API could not be loaded, so nothing can be bound.
    #[error("API {api_id} is unavailable: {message}")]
    ResourceUnavailable { api_id: String, message: String },

    /// The publish gate has at least one blocker.
    #[error("Publish is disabled: {}", join_blockers(.0))]
    PublishDisabled(Vec<PublishBlocker>),
}

fn join_blockers(blockers: &[PublishBlocker]) -> String {
    blockers
        .iter()
        .map(|b| b.message())
        .collect::<Vec<_>>()
        .join("; ")
}
