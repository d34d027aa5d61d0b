pub mod actions;
pub mod context;
pub mod machines;
pub mod models;
pub mod session;
pub mod views;

// Re-export actions
pub use actions::{fetch_facts, PublishAction, PublishOutcome, PUBLISH_ACTION};

// Re-export decisions
pub use machines::{
    publish_blockers, publish_enabled, resolve, step_links, PublishBlocker, StepLink, StepLinks,
    SubPage,
};

// Re-export models
pub use models::{
    ActiveStep, ApiResource, ApiType, DerivedProgress, Fact, LifecycleFacts, Stage, StepMarker,
    WorkflowStatus, PUBLISHED_STATE,
};

pub use context::ResourceContext;
pub use session::{StepperSession, StepperSnapshot};
pub use views::{step_views, PublishView, StepView, DEPLOY_HINT};
