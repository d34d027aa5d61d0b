//! API lifecycle stepper core.
//!
//! Derives which lifecycle stage (Develop, Deploy, Test, Publish) an API is
//! in from its attributes and two remotely fetched facts, gates the Publish
//! action, and runs that action against the publisher service.
//!
//! # Example
//!
//! ```rust,ignore
//! use api_lifecycle::{Config, StepperDeps, StepperSession, TracingNotifier, PUBLISH_ACTION};
//!
//! let config = Config::from_env()?;
//! let deps = StepperDeps::from_config(&config, Arc::new(TracingNotifier))?;
//!
//! let session = StepperSession::bind(deps, "api-1").await?;
//! let snapshot = session.snapshot().await;
//! if snapshot.publish_enabled() {
//!     session.publish(PUBLISH_ACTION).await?;
//! }
//! ```

pub mod config;
pub mod domains;
pub mod error;
pub mod kernel;

pub use config::Config;
pub use domains::lifecycle::*;
pub use error::{LifecycleError, Result};
pub use kernel::{
    BaseAuthorization, BaseLifecycleApi, BaseNotifier, PublisherApiAdapter, ScopeAuthorization,
    StepperDeps, TracingNotifier, PUBLISH_SCOPE,
};
