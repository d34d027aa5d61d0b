//! Plain-text stepper output.

use api_lifecycle::{PublishView, StepLink, StepMarker, StepView, StepperSnapshot};
use console::style;

fn check(done: bool) -> console::StyledObject<&'static str> {
    if done {
        style("✓").green()
    } else {
        style("✗").dim()
    }
}

fn marker(marker: StepMarker) -> console::StyledObject<&'static str> {
    match marker {
        StepMarker::Completed => style("●").green(),
        StepMarker::Active => style("◉").cyan().bold(),
        StepMarker::Upcoming => style("○").dim(),
    }
}

fn link(link: &Option<StepLink>) -> String {
    match link {
        Some(link) => style(link.path()).underlined().to_string(),
        None => style("(unavailable)").dim().to_string(),
    }
}

/// One block per stage, in display order.
pub fn render(snapshot: &StepperSnapshot) -> Vec<String> {
    let mut lines = Vec::new();

    for step in &snapshot.steps {
        let stage = step.stage();
        lines.push(format!(
            "{} {}",
            marker(snapshot.progress.marker(stage)),
            style(stage.label()).bold()
        ));

        match step {
            StepView::Develop {
                loaded,
                endpoint_configured,
                endpoints_link,
            } => {
                lines.push(format!("    {} Develop", check(*loaded)));
                lines.push(format!(
                    "    {} Endpoint  {}",
                    check(*endpoint_configured),
                    link(endpoints_link)
                ));
            }
            StepView::Deploy {
                deployed,
                hint,
                deployments_link,
            } => {
                lines.push(format!(
                    "    {} Deploy  {}",
                    check(*deployed),
                    link(deployments_link)
                ));
                if let Some(hint) = hint {
                    lines.push(format!("      {}", style(hint).yellow()));
                }
            }
            StepView::Test { test_link } => {
                lines.push(format!("    Test  {}", link(test_link)));
            }
            StepView::Publish(PublishView::Published) => {
                lines.push(format!("    {} Published (Current API)", check(true)));
            }
            StepView::Publish(PublishView::Button {
                enabled,
                busy,
                blockers,
            }) => {
                let state = match (*enabled, *busy) {
                    (_, true) => style("publishing…").cyan().to_string(),
                    (true, false) => style("ready to publish").green().to_string(),
                    (false, false) => style("publish disabled").dim().to_string(),
                };
                lines.push(format!("    {}", state));
                for blocker in blockers {
                    lines.push(format!("      - {}", blocker.message()));
                }
            }
        }
    }

    lines
}
