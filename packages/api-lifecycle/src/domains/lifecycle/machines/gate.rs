//! Publish gating and navigation affordances.

use serde::Serialize;

use crate::domains::lifecycle::models::{ApiResource, LifecycleFacts};

/// A condition that keeps the Publish action disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishBlocker {
    /// No endpoint and the API is not WebSub.
    MissingEndpoint,
    /// No business plan attached.
    NoBusinessPlan,
    NotDeployed,
    IsRevision,
    NotPublisher,
    /// Workflow status is CREATED.
    PendingApproval,
}

impl PublishBlocker {
    pub fn message(self) -> &'static str {
        match self {
            PublishBlocker::MissingEndpoint => "Configure an endpoint for this API",
            PublishBlocker::NoBusinessPlan => "Attach at least one business plan",
            PublishBlocker::NotDeployed => "Deploy a revision of this API to the Gateway",
            PublishBlocker::IsRevision => "Revisions cannot be published directly",
            PublishBlocker::NotPublisher => "Current user does not have publisher permissions",
            PublishBlocker::PendingApproval => "A lifecycle change is pending approval",
        }
    }
}

impl std::fmt::Display for PublishBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Every violated publish condition, in a fixed order. Empty means enabled.
pub fn publish_blockers(
    resource: &ApiResource,
    facts: &LifecycleFacts,
    can_publish: bool,
) -> Vec<PublishBlocker> {
    let mut blockers = Vec::new();
    if !resource.has_endpoint() && !resource.is_websub() {
        blockers.push(PublishBlocker::MissingEndpoint);
    }
    if !resource.has_business_plan() {
        blockers.push(PublishBlocker::NoBusinessPlan);
    }
    if !facts.has_deployments() {
        blockers.push(PublishBlocker::NotDeployed);
    }
    if resource.is_revision {
        blockers.push(PublishBlocker::IsRevision);
    }
    if !can_publish {
        blockers.push(PublishBlocker::NotPublisher);
    }
    if resource.is_pending_approval() {
        blockers.push(PublishBlocker::PendingApproval);
    }
    blockers
}

pub fn publish_enabled(resource: &ApiResource, facts: &LifecycleFacts, can_publish: bool) -> bool {
    publish_blockers(resource, facts, can_publish).is_empty()
}

/// Sub-page of an API that a stage links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubPage {
    Endpoints,
    Deployments,
}

impl SubPage {
    pub fn section(self) -> &'static str {
        match self {
            SubPage::Endpoints => "endpoints",
            SubPage::Deployments => "deployments",
        }
    }
}

/// A live link from a stage to an API sub-page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepLink {
    pub api_id: String,
    pub page: SubPage,
}

impl StepLink {
    pub fn new(api_id: impl Into<String>, page: SubPage) -> Self {
        Self {
            api_id: api_id.into(),
            page,
        }
    }

    pub fn path(&self) -> String {
        format!("/apis/{}/{}", self.api_id, self.page.section())
    }
}

/// Which stage links are live. `None` renders as a disabled affordance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepLinks {
    pub endpoints: Option<StepLink>,
    pub deployments: Option<StepLink>,
    pub test: Option<StepLink>,
}

/// Link gating mirrors the publish gate for endpoint and plan availability
/// but ignores the revision flag and the deployment state.
pub fn step_links(resource: &ApiResource, facts: &LifecycleFacts, can_publish: bool) -> StepLinks {
    let endpoint_ready = resource.has_endpoint() || resource.is_websub();

    let deployments_live = endpoint_ready
        && resource.has_business_plan()
        && can_publish
        && !resource.is_pending_approval();

    let test_live =
        !facts.is_published() && facts.has_deployments() && resource.has_endpoint();

    StepLinks {
        endpoints: Some(StepLink::new(&resource.id, SubPage::Endpoints)),
        deployments: deployments_live.then(|| StepLink::new(&resource.id, SubPage::Deployments)),
        test: test_live.then(|| StepLink::new(&resource.id, SubPage::Deployments)),
    }
}
