//! `status` command

use anyhow::Result;
use api_lifecycle::{StepperDeps, StepperSession};
use console::style;

use crate::render::render;

/// Bind the API, load its facts and print the stepper
pub async fn show_status(deps: StepperDeps, api_id: &str, json: bool) -> Result<()> {
    let session = StepperSession::bind(deps, api_id).await?;
    let snapshot = session.snapshot().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{} {}", style("API").bold(), style(&snapshot.resource.id).cyan());
    println!();
    for line in render(&snapshot) {
        println!("{}", line);
    }

    Ok(())
}
