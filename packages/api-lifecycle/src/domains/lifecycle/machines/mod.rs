//! Lifecycle stepper decisions.
//!
//! Pure functions of the bound API, its fetched facts and the actor's
//! publisher capability. Nothing here performs IO.

pub mod gate;
pub mod resolver;

pub use gate::{
    publish_blockers, publish_enabled, step_links, PublishBlocker, StepLink, StepLinks, SubPage,
};
pub use resolver::resolve;
