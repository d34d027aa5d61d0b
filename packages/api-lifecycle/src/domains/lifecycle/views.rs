//! Per-stage view data.
//!
//! Each stage carries only what its label needs; front-ends match on the
//! variant instead of comparing stage names.

use serde::Serialize;

use crate::domains::lifecycle::machines::{publish_blockers, step_links, PublishBlocker, StepLink};
use crate::domains::lifecycle::models::{ApiResource, DerivedProgress, LifecycleFacts, Stage};

/// Shown under Deploy until a revision is deployed.
pub const DEPLOY_HINT: &str = "Deploy a revision of this API to the Gateway";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PublishView {
    Button {
        enabled: bool,
        busy: bool,
        blockers: Vec<PublishBlocker>,
    },
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StepView {
    Develop {
        loaded: bool,
        endpoint_configured: bool,
        endpoints_link: Option<StepLink>,
    },
    Deploy {
        deployed: bool,
        hint: Option<&'static str>,
        deployments_link: Option<StepLink>,
    },
    Test {
        test_link: Option<StepLink>,
    },
    Publish(PublishView),
}

impl StepView {
    pub fn stage(&self) -> Stage {
        match self {
            StepView::Develop { .. } => Stage::Develop,
            StepView::Deploy { .. } => Stage::Deploy,
            StepView::Test { .. } => Stage::Test,
            StepView::Publish(_) => Stage::Publish,
        }
    }
}

/// Build the four stage views in display order.
///
/// `busy` is the publish action's in-progress flag.
pub fn step_views(
    resource: &ApiResource,
    facts: &LifecycleFacts,
    progress: &DerivedProgress,
    can_publish: bool,
    busy: bool,
) -> Vec<StepView> {
    let links = step_links(resource, facts, can_publish);

    Stage::ALL
        .iter()
        .map(|stage| match stage {
            Stage::Develop => StepView::Develop {
                loaded: progress.develop_complete,
                endpoint_configured: progress.endpoint_complete,
                endpoints_link: links.endpoints.clone(),
            },
            Stage::Deploy => StepView::Deploy {
                deployed: progress.deploy_complete,
                hint: (!progress.deploy_complete).then_some(DEPLOY_HINT),
                deployments_link: links.deployments.clone(),
            },
            Stage::Test => StepView::Test {
                test_link: links.test.clone(),
            },
            Stage::Publish if progress.publish_complete => StepView::Publish(PublishView::Published),
            Stage::Publish => {
                let blockers = publish_blockers(resource, facts, can_publish);
                StepView::Publish(PublishView::Button {
                    enabled: blockers.is_empty(),
                    busy,
                    blockers,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::lifecycle::machines::resolve;

    fn views_for(resource: &ApiResource, facts: &LifecycleFacts, busy: bool) -> Vec<StepView> {
        let progress = resolve(Some(resource), facts);
        step_views(resource, facts, &progress, true, busy)
    }

    #[test]
    fn views_follow_display_order() {
        let resource = ApiResource::new("api-1");
        let stages: Vec<Stage> = views_for(&resource, &LifecycleFacts::pending(), false)
            .iter()
            .map(StepView::stage)
            .collect();

        assert_eq!(stages, Stage::ALL.to_vec());
    }

    #[test]
    fn undeployed_api_shows_deploy_hint_and_disabled_publish() {
        let resource = ApiResource::new("api-1")
            .with_endpoint(serde_json::json!({}))
            .with_policies(["Gold"]);
        let views = views_for(&resource, &LifecycleFacts::loaded("Created", 0), false);

        match &views[1] {
            StepView::Deploy { deployed, hint, .. } => {
                assert!(!deployed);
                assert_eq!(*hint, Some(DEPLOY_HINT));
            }
            other => panic!("expected deploy view, got {other:?}"),
        }
        match &views[3] {
            StepView::Publish(PublishView::Button { enabled, blockers, .. }) => {
                assert!(!enabled);
                assert_eq!(blockers, &vec![PublishBlocker::NotDeployed]);
            }
            other => panic!("expected publish button, got {other:?}"),
        }
    }

    #[test]
    fn published_api_replaces_button() {
        let resource = ApiResource::new("api-1")
            .with_endpoint(serde_json::json!({}))
            .with_policies(["Gold"]);
        let views = views_for(&resource, &LifecycleFacts::loaded("Published", 1), false);

        assert_eq!(views[3], StepView::Publish(PublishView::Published));
        assert!(matches!(views[1], StepView::Deploy { hint: None, .. }));
    }

    #[test]
    fn busy_flag_reaches_button() {
        let resource = ApiResource::new("api-1")
            .with_endpoint(serde_json::json!({}))
            .with_policies(["Gold"]);
        let views = views_for(&resource, &LifecycleFacts::loaded("Created", 1), true);

        assert!(matches!(
            views[3],
            StepView::Publish(PublishView::Button { enabled: true, busy: true, .. })
        ));
    }
}
