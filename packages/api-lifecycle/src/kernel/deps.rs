//! Stepper dependencies (using traits for testability)
//!
//! This module provides the dependency container handed to the stepper
//! session and the adapters that back its traits in production.

use anyhow::Result;
use async_trait::async_trait;
use publisher_client::PublisherClient;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::domains::lifecycle::models::ApiResource;
use crate::kernel::{BaseAuthorization, BaseLifecycleApi, BaseNotifier};

/// OAuth scope that grants lifecycle changes.
pub const PUBLISH_SCOPE: &str = "apim:api_publish";

// =============================================================================
// PublisherClient Adapter (implements BaseLifecycleApi trait)
// =============================================================================

/// Wrapper around PublisherClient that implements BaseLifecycleApi.
///
/// Client errors are kept as `PublisherError` inside the `anyhow::Error` so
/// callers can downcast for the server's description.
pub struct PublisherApiAdapter(pub Arc<PublisherClient>);

impl PublisherApiAdapter {
    pub fn new(client: Arc<PublisherClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseLifecycleApi for PublisherApiAdapter {
    async fn get_api(&self, api_id: &str) -> Result<ApiResource> {
        let dto = self.0.get_api(api_id).await?;
        Ok(ApiResource::from(dto))
    }

    async fn get_lifecycle_state(&self, api_id: &str) -> Result<String> {
        let lc = self.0.get_lifecycle_state(api_id).await?;
        Ok(lc.state)
    }

    async fn get_deployed_revision_count(&self, api_id: &str) -> Result<u32> {
        let revisions = self.0.get_deployed_revisions(api_id).await?;
        Ok(revisions.count)
    }

    async fn change_lifecycle_state(&self, api_id: &str, action: &str) -> Result<()> {
        let response = self.0.change_lifecycle_state(api_id, action).await?;
        tracing::debug!(
            api_id,
            action,
            workflow_status = %response.workflow_status,
            "Lifecycle change accepted"
        );
        Ok(())
    }
}

// =============================================================================
// Scope-based authorization
// =============================================================================

/// Publisher capability derived from the token's granted scopes.
#[derive(Debug, Clone, Default)]
pub struct ScopeAuthorization {
    scopes: Vec<String>,
}

impl ScopeAuthorization {
    pub fn new(scopes: Vec<String>) -> Self {
        Self { scopes }
    }
}

impl BaseAuthorization for ScopeAuthorization {
    fn is_publisher(&self) -> bool {
        self.scopes.iter().any(|s| s == PUBLISH_SCOPE)
    }
}

// =============================================================================
// Tracing notifier
// =============================================================================

/// Notification sink that only logs.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl BaseNotifier for TracingNotifier {
    fn info(&self, message: &str) {
        tracing::info!(notification = message, "Stepper notification");
    }

    fn error(&self, message: &str) {
        tracing::error!(notification = message, "Stepper notification");
    }
}

// =============================================================================
// StepperDeps
// =============================================================================

/// Dependencies shared by the stepper session and its actions
#[derive(Clone)]
pub struct StepperDeps {
    pub api: Arc<dyn BaseLifecycleApi>,
    pub auth: Arc<dyn BaseAuthorization>,
    pub notifier: Arc<dyn BaseNotifier>,
}

impl StepperDeps {
    pub fn new(
        api: Arc<dyn BaseLifecycleApi>,
        auth: Arc<dyn BaseAuthorization>,
        notifier: Arc<dyn BaseNotifier>,
    ) -> Self {
        Self {
            api,
            auth,
            notifier,
        }
    }

    /// Production dependencies: publisher REST client, scope authorization
    /// and the given notifier.
    pub fn from_config(config: &Config, notifier: Arc<dyn BaseNotifier>) -> Result<Self> {
        let client = PublisherClient::new(&config.access_token)
            .with_base_url(&config.publisher_base_url)
            .with_timeout(Duration::from_secs(config.request_timeout_secs))?;

        Ok(Self::new(
            Arc::new(PublisherApiAdapter::new(Arc::new(client))),
            Arc::new(ScopeAuthorization::new(config.scopes.clone())),
            notifier,
        ))
    }

    pub fn can_publish(&self) -> bool {
        !self.auth.is_not_publisher()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_scope_grants_publisher() {
        let auth = ScopeAuthorization::new(vec![
            "apim:api_view".to_string(),
            PUBLISH_SCOPE.to_string(),
        ]);
        assert!(auth.is_publisher());
        assert!(!auth.is_not_publisher());
    }

    #[test]
    fn missing_publish_scope_is_not_publisher() {
        let auth = ScopeAuthorization::new(vec!["apim:api_create".to_string()]);
        assert!(auth.is_not_publisher());
        assert!(ScopeAuthorization::default().is_not_publisher());
    }

    #[test]
    fn deps_from_config_reads_scopes() {
        let config = Config {
            publisher_base_url: "http://localhost:9763/api/am/publisher/v2".into(),
            access_token: "token".into(),
            scopes: vec![PUBLISH_SCOPE.into()],
            request_timeout_secs: 5,
        };

        let deps = StepperDeps::from_config(&config, Arc::new(TracingNotifier)).unwrap();
        assert!(deps.can_publish());
    }
}
