//! `publish` command

use anyhow::{bail, Result};
use api_lifecycle::{PublishOutcome, StepperDeps, StepperSession};
use console::style;

use crate::render::render;

/// Bind the API and run the lifecycle transition if the gate allows it
pub async fn run_publish(deps: StepperDeps, api_id: &str, action: &str) -> Result<()> {
    let session = StepperSession::bind(deps, api_id).await?;

    let outcome = session.publish(action).await?;
    if matches!(outcome, PublishOutcome::Transitioned { refreshed: false }) {
        println!("{}", style("API details could not be refreshed").yellow());
    }
    check_outcome(&outcome)?;

    println!();
    for line in render(&session.snapshot().await) {
        println!("{}", line);
    }

    Ok(())
}

/// Exit status for a settled publish. The notifier has already printed the
/// publisher's message for a failed transition.
fn check_outcome(outcome: &PublishOutcome) -> Result<()> {
    match outcome {
        PublishOutcome::Transitioned { .. } => Ok(()),
        PublishOutcome::Failed { .. } => bail!("Lifecycle change was not applied"),
        PublishOutcome::AlreadyInProgress => bail!("A lifecycle change is already in progress"),
    }
}
