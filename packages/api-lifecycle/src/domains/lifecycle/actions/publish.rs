//! Publish action
//!
//! Issues one lifecycle transition, refreshes the owning resource and
//! reports through the notifier. At most one transition is outstanding per
//! action; nothing is retried.

use publisher_client::PublisherError;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domains::lifecycle::context::ResourceContext;
use crate::kernel::BaseNotifier;

pub const PUBLISH_ACTION: &str = "Publish";
pub const UPDATE_SUCCESS_MESSAGE: &str = "Lifecycle state updated successfully";
pub const REFRESH_FAILED_MESSAGE: &str = "Something went wrong while updating the API";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// The transition succeeded. `refreshed` is false when the follow-up
    /// resource refresh failed; the transition still stands.
    Transitioned { refreshed: bool },
    Failed { message: String },
    /// Another transition from this action has not settled yet.
    AlreadyInProgress,
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PublishOutcome::Transitioned { .. })
    }
}

/// Holds the in-progress flag and clears it on drop, whichever way the
/// request settles.
struct InProgressGuard<'a>(&'a AtomicBool);

impl<'a> InProgressGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PublishAction {
    context: Arc<ResourceContext>,
    notifier: Arc<dyn BaseNotifier>,
    in_progress: AtomicBool,
}

impl PublishAction {
    pub fn new(context: Arc<ResourceContext>, notifier: Arc<dyn BaseNotifier>) -> Self {
        Self {
            context,
            notifier,
            in_progress: AtomicBool::new(false),
        }
    }

    /// True while a transition request is outstanding.
    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Move `api_id` to `target_state` (the lifecycle event, e.g. "Publish").
    pub async fn publish(&self, api_id: &str, target_state: &str) -> PublishOutcome {
        let Some(_guard) = InProgressGuard::acquire(&self.in_progress) else {
            warn!(api_id, "Publish already in progress, ignoring");
            return PublishOutcome::AlreadyInProgress;
        };

        info!(api_id, target_state, "Updating lifecycle state");

        match self
            .context
            .api()
            .change_lifecycle_state(api_id, target_state)
            .await
        {
            Ok(()) => {
                self.notifier.info(UPDATE_SUCCESS_MESSAGE);
                let refreshed = match self.context.update().await {
                    Ok(_) => true,
                    Err(e) => {
                        warn!(api_id, error = %e, "Resource refresh after lifecycle change failed");
                        self.notifier.error(&refresh_error_message(&e));
                        false
                    }
                };
                PublishOutcome::Transitioned { refreshed }
            }
            Err(e) => {
                warn!(api_id, target_state, error = %e, "Lifecycle change failed");
                let message = e.to_string();
                self.notifier.error(&message);
                PublishOutcome::Failed { message }
            }
        }
    }
}

/// The publisher's description when the refresh failed with one, otherwise a
/// generic message.
fn refresh_error_message(error: &anyhow::Error) -> String {
    error
        .downcast_ref::<PublisherError>()
        .and_then(PublisherError::description)
        .map(str::to_string)
        .unwrap_or_else(|| REFRESH_FAILED_MESSAGE.to_string())
}
