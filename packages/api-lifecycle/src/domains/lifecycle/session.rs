//! Stepper session
//!
//! Binds one API, loads its lifecycle facts and exposes progress, stage
//! views and the publish action for it. Facts are fetched once per binding
//! and again only after a successful lifecycle change.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domains::lifecycle::actions::{fetch_facts, PublishAction, PublishOutcome};
use crate::domains::lifecycle::context::ResourceContext;
use crate::domains::lifecycle::machines::{publish_blockers, resolve, PublishBlocker};
use crate::domains::lifecycle::models::{ApiResource, DerivedProgress, LifecycleFacts};
use crate::domains::lifecycle::views::{step_views, StepView};
use crate::error::{LifecycleError, Result};
use crate::kernel::StepperDeps;

/// Everything a front-end needs to draw the stepper once.
#[derive(Debug, Clone, Serialize)]
pub struct StepperSnapshot {
    pub resource: ApiResource,
    pub facts: LifecycleFacts,
    pub progress: DerivedProgress,
    pub publish_blockers: Vec<PublishBlocker>,
    pub steps: Vec<StepView>,
}

impl StepperSnapshot {
    pub fn publish_enabled(&self) -> bool {
        self.publish_blockers.is_empty()
    }
}

pub struct StepperSession {
    deps: StepperDeps,
    context: Arc<ResourceContext>,
    facts: RwLock<LifecycleFacts>,
    /// Bumped on every fact load; results from an older load are dropped.
    generation: AtomicU64,
    publish: PublishAction,
}

impl StepperSession {
    /// Session over an already loaded resource. Facts start pending.
    pub fn new(deps: StepperDeps, resource: ApiResource) -> Self {
        let context = ResourceContext::new(deps.api.clone(), resource);
        Self::with_context(deps, Arc::new(context))
    }

    fn with_context(deps: StepperDeps, context: Arc<ResourceContext>) -> Self {
        let publish = PublishAction::new(context.clone(), deps.notifier.clone());
        Self {
            deps,
            context,
            facts: RwLock::new(LifecycleFacts::pending()),
            generation: AtomicU64::new(0),
            publish,
        }
    }

    /// Load the API by id and fetch its facts.
    pub async fn bind(deps: StepperDeps, api_id: &str) -> Result<Self> {
        let context = ResourceContext::load(deps.api.clone(), api_id)
            .await
            .map_err(|e| LifecycleError::ResourceUnavailable {
                api_id: api_id.to_string(),
                message: e.to_string(),
            })?;
        info!(api_id, "Bound stepper session");

        let session = Self::with_context(deps, Arc::new(context));
        session.reload_facts().await;
        Ok(session)
    }

    /// Bind a different resource: facts drop back to pending and are fetched
    /// for the new resource. Any fetch still in flight for the old one is
    /// ignored when it lands.
    pub async fn rebind(&self, resource: ApiResource) -> Option<LifecycleFacts> {
        debug!(api_id = %resource.id, "Rebinding stepper session");
        {
            let mut facts = self.facts.write().await;
            self.generation.fetch_add(1, Ordering::AcqRel);
            self.context.replace(resource).await;
            *facts = LifecycleFacts::pending();
        }
        self.reload_facts().await
    }

    /// Fetch facts for the bound resource. Returns `None` when a newer load
    /// or a rebind started meanwhile, in which case nothing is stored or
    /// reported.
    ///
    /// A lookup that fails keeps the value already loaded for this binding,
    /// so progress never moves backwards on a transient error.
    pub async fn reload_facts(&self) -> Option<LifecycleFacts> {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let resource = self.context.resource().await;

        let fetched = fetch_facts(self.deps.api.as_ref(), &resource).await;

        let mut stored = self.facts.write().await;
        if self.generation.load(Ordering::Acquire) != generation {
            debug!(api_id = %resource.id, generation, "Discarding stale lifecycle facts");
            return None;
        }

        if let Some(message) = fetched.state.failure() {
            self.deps
                .notifier
                .error(&format!("Failed to load lifecycle state: {}", message));
        }
        if let Some(message) = fetched.deployment_count.failure() {
            self.deps
                .notifier
                .error(&format!("Failed to load deployments: {}", message));
        }

        let facts = fetched.refreshed_over(&stored);
        *stored = facts.clone();
        Some(facts)
    }

    pub async fn resource(&self) -> ApiResource {
        self.context.resource().await
    }

    pub async fn facts(&self) -> LifecycleFacts {
        self.facts.read().await.clone()
    }

    pub async fn progress(&self) -> DerivedProgress {
        let resource = self.context.resource().await;
        let facts = self.facts.read().await;
        resolve(Some(&resource), &facts)
    }

    pub async fn snapshot(&self) -> StepperSnapshot {
        let resource = self.context.resource().await;
        let facts = self.facts().await;
        let can_publish = self.deps.can_publish();

        let progress = resolve(Some(&resource), &facts);
        let steps = step_views(
            &resource,
            &facts,
            &progress,
            can_publish,
            self.publish.is_in_progress(),
        );

        StepperSnapshot {
            publish_blockers: publish_blockers(&resource, &facts, can_publish),
            resource,
            facts,
            progress,
            steps,
        }
    }

    pub fn publish_action(&self) -> &PublishAction {
        &self.publish
    }

    /// Run the publish action if the gate allows it. A successful transition
    /// invalidates the fact snapshot, so facts are fetched again.
    pub async fn publish(&self, action: &str) -> Result<PublishOutcome> {
        let resource = self.context.resource().await;
        let blockers = {
            let facts = self.facts.read().await;
            publish_blockers(&resource, &facts, self.deps.can_publish())
        };
        if !blockers.is_empty() {
            return Err(LifecycleError::PublishDisabled(blockers));
        }

        let outcome = self.publish.publish(&resource.id, action).await;
        if outcome.is_success() {
            self.reload_facts().await;
        }
        Ok(outcome)
    }
}
