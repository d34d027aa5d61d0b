pub mod api_resource;
pub mod facts;
pub mod progress;

pub use api_resource::{ApiResource, ApiType, WorkflowStatus};
pub use facts::{Fact, LifecycleFacts, PUBLISHED_STATE};
pub use progress::{ActiveStep, DerivedProgress, Stage, StepMarker};
