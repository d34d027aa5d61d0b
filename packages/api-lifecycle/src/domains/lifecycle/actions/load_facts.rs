//! Lifecycle facts lookup.

use tracing::{debug, warn};

use crate::domains::lifecycle::models::{ApiResource, Fact, LifecycleFacts};
use crate::kernel::BaseLifecycleApi;

/// Fetch lifecycle state and deployment count concurrently.
///
/// Failures are not retried; they come back as `Fact::Failed` and the
/// resolver treats them as not yet known.
pub async fn fetch_facts(api: &dyn BaseLifecycleApi, resource: &ApiResource) -> LifecycleFacts {
    let deployment_source = resource.deployment_source_id();

    let (state, count) = tokio::join!(
        api.get_lifecycle_state(&resource.id),
        api.get_deployed_revision_count(deployment_source),
    );

    if let Err(e) = &state {
        warn!(api_id = %resource.id, error = %e, "Lifecycle state lookup failed");
    }
    if let Err(e) = &count {
        warn!(api_id = %deployment_source, error = %e, "Deployment lookup failed");
    }

    let facts = LifecycleFacts {
        state: Fact::from(state),
        deployment_count: Fact::from(count),
    };
    debug!(api_id = %resource.id, ?facts, "Lifecycle facts fetched");
    facts
}
