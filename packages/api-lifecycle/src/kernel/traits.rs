// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no stepper logic.
// Stepper decisions live in domains::lifecycle and take these as parameters.
//
// Naming convention: Base* for trait names (e.g., BaseLifecycleApi, BaseNotifier)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::lifecycle::models::ApiResource;

// =============================================================================
// Lifecycle API Trait (Infrastructure - remote publisher service)
// =============================================================================

#[async_trait]
pub trait BaseLifecycleApi: Send + Sync {
    /// Fetch the API resource
    async fn get_api(&self, api_id: &str) -> Result<ApiResource>;

    /// Fetch the current lifecycle state name (e.g. "Created", "Published")
    async fn get_lifecycle_state(&self, api_id: &str) -> Result<String>;

    /// Count revisions deployed to at least one gateway environment
    async fn get_deployed_revision_count(&self, api_id: &str) -> Result<u32>;

    /// Request a lifecycle transition (`action` is the event, e.g. "Publish")
    async fn change_lifecycle_state(&self, api_id: &str, action: &str) -> Result<()>;
}

// =============================================================================
// Authorization Trait (Infrastructure)
// =============================================================================

pub trait BaseAuthorization: Send + Sync {
    /// Whether the current actor may publish APIs
    fn is_publisher(&self) -> bool;

    fn is_not_publisher(&self) -> bool {
        !self.is_publisher()
    }
}

// =============================================================================
// Notification Trait (Infrastructure - fire-and-forget)
// =============================================================================

pub trait BaseNotifier: Send + Sync {
    fn info(&self, message: &str);

    fn error(&self, message: &str);
}
