//! Lifecycle progress resolution.
//!
//! Pure decision logic - NO IO. The same resource and facts always produce
//! the same progress.

use crate::domains::lifecycle::models::{ActiveStep, ApiResource, DerivedProgress, LifecycleFacts};

/// Compute the active step and per-stage completion for an API.
///
/// `resource` is `None` while the API itself has not been loaded. Facts that
/// are pending or failed count as not yet known, which keeps the active step
/// at Develop or Deploy until the deployment count arrives.
pub fn resolve(resource: Option<&ApiResource>, facts: &LifecycleFacts) -> DerivedProgress {
    let endpoint_complete = resource.is_some_and(ApiResource::has_endpoint);
    let deploy_complete = facts.has_deployments();
    let publish_complete = facts.is_published();

    // First match wins.
    let active_step = if !endpoint_complete {
        ActiveStep::Develop
    } else if !deploy_complete {
        ActiveStep::Deploy
    } else if !publish_complete {
        ActiveStep::Test
    } else {
        ActiveStep::Published
    };

    DerivedProgress {
        active_step,
        develop_complete: resource.is_some(),
        endpoint_complete,
        deploy_complete,
        publish_complete,
    }
}
