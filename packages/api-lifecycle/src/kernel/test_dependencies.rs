// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into StepperDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{BaseAuthorization, BaseLifecycleApi, BaseNotifier, StepperDeps};
use crate::domains::lifecycle::models::ApiResource;

// =============================================================================
// Mock Lifecycle API
// =============================================================================

/// A queued reply, optionally delayed so tests can interleave fetches.
struct Reply<T> {
    result: std::result::Result<T, String>,
    delay: Option<Duration>,
}

/// Calls recorded by the mock, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    GetApi(String),
    GetLifecycleState(String),
    GetDeployedRevisionCount(String),
    ChangeLifecycleState { api_id: String, action: String },
}

pub struct MockLifecycleApi {
    apis: Arc<Mutex<HashMap<String, ApiResource>>>,
    get_api_failures: Arc<Mutex<VecDeque<String>>>,
    states: Arc<Mutex<VecDeque<Reply<String>>>>,
    counts: Arc<Mutex<VecDeque<Reply<u32>>>>,
    transitions: Arc<Mutex<VecDeque<Reply<()>>>>,
    calls: Arc<Mutex<Vec<ApiCall>>>,
}

impl MockLifecycleApi {
    pub fn new() -> Self {
        Self {
            apis: Arc::new(Mutex::new(HashMap::new())),
            get_api_failures: Arc::new(Mutex::new(VecDeque::new())),
            states: Arc::new(Mutex::new(VecDeque::new())),
            counts: Arc::new(Mutex::new(VecDeque::new())),
            transitions: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve this resource from `get_api`
    pub fn with_api(self, resource: ApiResource) -> Self {
        self.apis
            .lock()
            .unwrap()
            .insert(resource.id.clone(), resource);
        self
    }

    /// Make the next `get_api` call fail
    pub fn with_get_api_failure(self, message: &str) -> Self {
        self.get_api_failures
            .lock()
            .unwrap()
            .push_back(message.to_string());
        self
    }

    /// Queue a lifecycle state reply
    pub fn with_state(self, state: &str) -> Self {
        self.push_state(Ok(state.to_string()), None)
    }

    /// Queue a lifecycle state reply that arrives after `delay`
    pub fn with_delayed_state(self, state: &str, delay: Duration) -> Self {
        self.push_state(Ok(state.to_string()), Some(delay))
    }

    pub fn with_state_failure(self, message: &str) -> Self {
        self.push_state(Err(message.to_string()), None)
    }

    /// Queue a deployed revision count reply
    pub fn with_deployment_count(self, count: u32) -> Self {
        self.push_count(Ok(count), None)
    }

    pub fn with_delayed_deployment_count(self, count: u32, delay: Duration) -> Self {
        self.push_count(Ok(count), Some(delay))
    }

    pub fn with_deployment_count_failure(self, message: &str) -> Self {
        self.push_count(Err(message.to_string()), None)
    }

    /// Queue a successful lifecycle transition
    pub fn with_transition_success(self) -> Self {
        self.push_transition(Ok(()), None)
    }

    /// Queue a successful lifecycle transition that settles after `delay`
    pub fn with_delayed_transition(self, delay: Duration) -> Self {
        self.push_transition(Ok(()), Some(delay))
    }

    pub fn with_transition_failure(self, message: &str) -> Self {
        self.push_transition(Err(message.to_string()), None)
    }

    fn push_state(self, result: std::result::Result<String, String>, delay: Option<Duration>) -> Self {
        self.states.lock().unwrap().push_back(Reply { result, delay });
        self
    }

    fn push_count(self, result: std::result::Result<u32, String>, delay: Option<Duration>) -> Self {
        self.counts.lock().unwrap().push_back(Reply { result, delay });
        self
    }

    fn push_transition(self, result: std::result::Result<(), String>, delay: Option<Duration>) -> Self {
        self.transitions
            .lock()
            .unwrap()
            .push_back(Reply { result, delay });
        self
    }

    /// Get all calls made so far
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `get_api` calls (resource refreshes)
    pub fn get_api_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, ApiCall::GetApi(_)))
            .count()
    }

    pub fn transition_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, ApiCall::ChangeLifecycleState { .. }))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockLifecycleApi {
    fn default() -> Self {
        Self::new()
    }
}

/// Pop the next reply (or the fallback), then wait out its delay.
async fn settle<T>(
    queue: &Mutex<VecDeque<Reply<T>>>,
    fallback: impl FnOnce() -> std::result::Result<T, String>,
) -> Result<T> {
    let reply = queue.lock().unwrap().pop_front();
    let (result, delay) = match reply {
        Some(reply) => (reply.result, reply.delay),
        None => (fallback(), None),
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    result.map_err(|message| anyhow::anyhow!(message))
}

#[async_trait]
impl BaseLifecycleApi for MockLifecycleApi {
    async fn get_api(&self, api_id: &str) -> Result<ApiResource> {
        self.record(ApiCall::GetApi(api_id.to_string()));

        if let Some(message) = self.get_api_failures.lock().unwrap().pop_front() {
            return Err(anyhow::anyhow!(message));
        }
        self.apis
            .lock()
            .unwrap()
            .get(api_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("API {} not found", api_id))
    }

    async fn get_lifecycle_state(&self, api_id: &str) -> Result<String> {
        self.record(ApiCall::GetLifecycleState(api_id.to_string()));
        settle(&self.states, || Ok("Created".to_string())).await
    }

    async fn get_deployed_revision_count(&self, api_id: &str) -> Result<u32> {
        self.record(ApiCall::GetDeployedRevisionCount(api_id.to_string()));
        settle(&self.counts, || Ok(0)).await
    }

    async fn change_lifecycle_state(&self, api_id: &str, action: &str) -> Result<()> {
        self.record(ApiCall::ChangeLifecycleState {
            api_id: api_id.to_string(),
            action: action.to_string(),
        });
        settle(&self.transitions, || Ok(())).await
    }
}

// =============================================================================
// Mock Authorization
// =============================================================================

pub struct MockAuthorization {
    publisher: bool,
}

impl MockAuthorization {
    pub fn publisher() -> Self {
        Self { publisher: true }
    }

    pub fn viewer() -> Self {
        Self { publisher: false }
    }
}

impl BaseAuthorization for MockAuthorization {
    fn is_publisher(&self) -> bool {
        self.publisher
    }
}

// =============================================================================
// Mock Notifier
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Error(String),
}

#[derive(Default)]
pub struct MockNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Info(message) => Some(message),
                Notification::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message),
                Notification::Info(_) => None,
            })
            .collect()
    }
}

impl BaseNotifier for MockNotifier {
    fn info(&self, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push(Notification::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notifications
            .lock()
            .unwrap()
            .push(Notification::Error(message.to_string()));
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks plus the StepperDeps built from them, so tests keep handles for
/// assertions after injecting.
pub struct TestDependencies {
    pub api: Arc<MockLifecycleApi>,
    pub notifier: Arc<MockNotifier>,
    pub deps: StepperDeps,
}

impl TestDependencies {
    pub fn new(api: MockLifecycleApi, auth: MockAuthorization) -> Self {
        let api = Arc::new(api);
        let notifier = Arc::new(MockNotifier::new());
        let deps = StepperDeps::new(api.clone(), Arc::new(auth), notifier.clone());
        Self {
            api,
            notifier,
            deps,
        }
    }

    /// Dependencies for a publisher actor
    pub fn publisher(api: MockLifecycleApi) -> Self {
        Self::new(api, MockAuthorization::publisher())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_api_records_calls_and_serves_queue() {
        let api = MockLifecycleApi::new()
            .with_state("Published")
            .with_deployment_count(2);

        assert_eq!(api.get_lifecycle_state("api-1").await.unwrap(), "Published");
        assert_eq!(api.get_deployed_revision_count("api-1").await.unwrap(), 2);
        // Queue drained: fallbacks
        assert_eq!(api.get_lifecycle_state("api-1").await.unwrap(), "Created");
        assert_eq!(api.get_deployed_revision_count("api-1").await.unwrap(), 0);

        assert_eq!(api.calls().len(), 4);
    }

    #[tokio::test]
    async fn mock_api_unknown_resource_fails() {
        let api = MockLifecycleApi::new();
        assert!(api.get_api("missing").await.is_err());
        assert_eq!(api.get_api_count(), 1);
    }

    #[test]
    fn mock_notifier_splits_levels() {
        let notifier = MockNotifier::new();
        notifier.info("a");
        notifier.error("b");

        assert_eq!(notifier.infos(), vec!["a".to_string()]);
        assert_eq!(notifier.errors(), vec!["b".to_string()]);
    }
}
