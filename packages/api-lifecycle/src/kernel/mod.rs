//! Kernel module - collaborator traits and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PublisherApiAdapter, ScopeAuthorization, StepperDeps, TracingNotifier, PUBLISH_SCOPE};
pub use test_dependencies::TestDependencies;
pub use traits::*;
