//! The bound API resource and its refresh path.

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domains::lifecycle::models::ApiResource;
use crate::kernel::BaseLifecycleApi;

/// Owns the current `ApiResource` and knows how to re-fetch it.
pub struct ResourceContext {
    api: Arc<dyn BaseLifecycleApi>,
    resource: RwLock<ApiResource>,
}

impl ResourceContext {
    pub fn new(api: Arc<dyn BaseLifecycleApi>, resource: ApiResource) -> Self {
        Self {
            api,
            resource: RwLock::new(resource),
        }
    }

    /// Fetch the API and wrap it.
    pub async fn load(api: Arc<dyn BaseLifecycleApi>, api_id: &str) -> Result<Self> {
        let resource = api.get_api(api_id).await?;
        Ok(Self::new(api, resource))
    }

    pub fn api(&self) -> &Arc<dyn BaseLifecycleApi> {
        &self.api
    }

    /// Snapshot of the current resource.
    pub async fn resource(&self) -> ApiResource {
        self.resource.read().await.clone()
    }

    /// Swap in a different resource without fetching.
    pub async fn replace(&self, resource: ApiResource) {
        *self.resource.write().await = resource;
    }

    /// Re-fetch the resource from the publisher and store it.
    pub async fn update(&self) -> Result<ApiResource> {
        let id = self.resource.read().await.id.clone();
        let fresh = self.api.get_api(&id).await?;
        debug!(api_id = %id, "Resource refreshed");
        *self.resource.write().await = fresh.clone();
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockLifecycleApi;

    #[tokio::test]
    async fn load_fetches_resource_by_id() {
        let api = Arc::new(MockLifecycleApi::new().with_api(ApiResource::new("api-1")));

        let context = ResourceContext::load(api.clone(), "api-1").await.unwrap();

        assert_eq!(context.resource().await.id, "api-1");
        assert_eq!(api.get_api_count(), 1);
        assert!(ResourceContext::load(api, "missing").await.is_err());
    }

    #[tokio::test]
    async fn update_replaces_resource() {
        let fresh = ApiResource::new("api-1").with_policies(["Gold"]);
        let api = Arc::new(MockLifecycleApi::new().with_api(fresh.clone()));
        let context = ResourceContext::new(api.clone(), ApiResource::new("api-1"));

        let updated = context.update().await.unwrap();

        assert_eq!(updated, fresh);
        assert_eq!(context.resource().await, fresh);
        assert_eq!(api.get_api_count(), 1);
    }

    #[tokio::test]
    async fn failed_update_keeps_previous_resource() {
        let api = Arc::new(MockLifecycleApi::new().with_get_api_failure("gateway timeout"));
        let original = ApiResource::new("api-1");
        let context = ResourceContext::new(api, original.clone());

        assert!(context.update().await.is_err());
        assert_eq!(context.resource().await, original);
    }
}
