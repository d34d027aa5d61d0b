//! End-to-end stepper flows against mocked publisher dependencies.

use std::sync::Arc;
use std::time::Duration;

use api_lifecycle::kernel::test_dependencies::{
    ApiCall, MockAuthorization, MockLifecycleApi, Notification,
};
use api_lifecycle::kernel::TestDependencies;
use api_lifecycle::{
    publish_enabled, resolve, ActiveStep, ApiResource, ApiType, LifecycleError, LifecycleFacts,
    PublishAction, PublishBlocker, PublishOutcome, PublishView, ResourceContext, StepView,
    StepperSession, WorkflowStatus, PUBLISH_ACTION,
};
use tokio_test::{assert_err, assert_ok};

fn publishable(id: &str) -> ApiResource {
    ApiResource::new(id)
        .with_endpoint(serde_json::json!({
            "endpoint_type": "http",
            "production_endpoints": { "url": "https://backend.example.com/v1" }
        }))
        .with_policies(["Gold", "Unlimited"])
        .with_workflow_status(WorkflowStatus::Approved)
}

// =============================================================================
// Progress resolution
// =============================================================================

#[test]
fn stage_advances_with_each_condition() {
    let cases = [
        (ApiResource::new("api-1"), LifecycleFacts::loaded("Published", 5), 0),
        (publishable("api-1"), LifecycleFacts::loaded("Created", 0), 1),
        (publishable("api-1"), LifecycleFacts::pending(), 1),
        (publishable("api-1"), LifecycleFacts::loaded("Created", 1), 3),
        (publishable("api-1"), LifecycleFacts::loaded("Published", 1), 4),
    ];

    for (resource, facts, expected) in cases {
        assert_eq!(
            resolve(Some(&resource), &facts).active_step_index(),
            expected,
            "facts {facts:?}"
        );
    }
}

#[test]
fn each_gate_condition_flips_publish_enabled() {
    let facts = LifecycleFacts::loaded("Created", 1);
    let base = publishable("api-1");
    assert!(publish_enabled(&base, &facts, true));

    let mut no_endpoint = base.clone();
    no_endpoint.endpoint_config = None;
    assert!(!publish_enabled(&no_endpoint, &facts, true));
    assert!(publish_enabled(&no_endpoint.clone().with_type(ApiType::WebSub), &facts, true));

    assert!(!publish_enabled(
        &base.clone().with_policies(Vec::<String>::new()),
        &facts,
        true
    ));
    assert!(!publish_enabled(&base, &LifecycleFacts::loaded("Created", 0), true));
    assert!(!publish_enabled(&base.clone().as_revision_of("api-0"), &facts, true));
    assert!(!publish_enabled(&base, &facts, false));
    assert!(!publish_enabled(
        &base.clone().with_workflow_status(WorkflowStatus::Created),
        &facts,
        true
    ));
}

// =============================================================================
// Publish action
// =============================================================================

#[tokio::test]
async fn publish_success_notifies_once_and_refreshes_once() {
    let test = TestDependencies::publisher(
        MockLifecycleApi::new()
            .with_api(publishable("api-1"))
            .with_transition_success(),
    );
    let context = Arc::new(ResourceContext::new(test.api.clone(), publishable("api-1")));
    let action = PublishAction::new(context, test.notifier.clone());

    let outcome = action.publish("api-1", "Publish").await;

    assert_eq!(outcome, PublishOutcome::Transitioned { refreshed: true });
    assert_eq!(test.notifier.infos().len(), 1);
    assert!(test.notifier.errors().is_empty());
    assert_eq!(test.api.get_api_count(), 1);
    assert!(!action.is_in_progress());
}

#[tokio::test]
async fn publish_failure_notifies_error_and_skips_refresh() {
    let test = TestDependencies::publisher(
        MockLifecycleApi::new()
            .with_api(publishable("api-1"))
            .with_transition_failure("API publishing is not allowed"),
    );
    let context = Arc::new(ResourceContext::new(test.api.clone(), publishable("api-1")));
    let action = PublishAction::new(context, test.notifier.clone());

    let outcome = action.publish("api-1", "Publish").await;

    assert!(!outcome.is_success());
    assert_eq!(
        test.notifier.notifications(),
        vec![Notification::Error("API publishing is not allowed".into())]
    );
    assert_eq!(test.api.get_api_count(), 0);
    assert!(!action.is_in_progress());
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn session_publish_reloads_facts() {
    let test = TestDependencies::publisher(
        MockLifecycleApi::new()
            .with_api(publishable("api-1"))
            .with_state("Created")
            .with_deployment_count(1)
            .with_transition_success()
            .with_state("Published")
            .with_deployment_count(1),
    );
    let session = assert_ok!(StepperSession::bind(test.deps.clone(), "api-1").await);
    assert_eq!(session.progress().await.active_step, ActiveStep::Test);

    let outcome = assert_ok!(session.publish(PUBLISH_ACTION).await);

    assert!(outcome.is_success());
    assert_eq!(session.progress().await.active_step, ActiveStep::Published);

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.steps[3], StepView::Publish(PublishView::Published));
    assert!(test.api.calls().contains(&ApiCall::ChangeLifecycleState {
        api_id: "api-1".into(),
        action: "Publish".into(),
    }));
}

#[tokio::test]
async fn session_refuses_publish_for_revision() {
    let revision = publishable("rev-1").as_revision_of("api-1");
    let test = TestDependencies::publisher(
        MockLifecycleApi::new()
            .with_api(revision)
            .with_deployment_count(2),
    );
    let session = assert_ok!(StepperSession::bind(test.deps.clone(), "rev-1").await);

    let err = assert_err!(session.publish(PUBLISH_ACTION).await);

    assert!(matches!(
        err,
        LifecycleError::PublishDisabled(ref blockers) if blockers == &vec![PublishBlocker::IsRevision]
    ));
    assert!(test
        .api
        .calls()
        .contains(&ApiCall::GetDeployedRevisionCount("api-1".into())));
}

#[tokio::test]
async fn stale_facts_are_ignored_after_rebind() {
    let test = TestDependencies::new(
        MockLifecycleApi::new()
            .with_delayed_state("Published", Duration::from_millis(100))
            .with_delayed_deployment_count(4, Duration::from_millis(100))
            .with_state("Created")
            .with_deployment_count(0),
        MockAuthorization::publisher(),
    );
    let session = StepperSession::new(test.deps.clone(), publishable("api-a"));

    let (first, second) = tokio::join!(session.reload_facts(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.rebind(publishable("api-b")).await
    });

    assert!(first.is_none());
    assert_eq!(second, Some(LifecycleFacts::loaded("Created", 0)));
    assert_eq!(session.facts().await, LifecycleFacts::loaded("Created", 0));
    assert_eq!(session.resource().await.id, "api-b");
    assert_eq!(session.progress().await.active_step, ActiveStep::Deploy);
}

#[tokio::test]
async fn viewer_sees_disabled_links_and_button() {
    let test = TestDependencies::new(
        MockLifecycleApi::new()
            .with_api(publishable("api-1"))
            .with_state("Created")
            .with_deployment_count(1),
        MockAuthorization::viewer(),
    );
    let session = assert_ok!(StepperSession::bind(test.deps.clone(), "api-1").await);

    let snapshot = session.snapshot().await;

    assert!(!snapshot.publish_enabled());
    match &snapshot.steps[1] {
        StepView::Deploy { deployments_link, .. } => assert!(deployments_link.is_none()),
        other => panic!("expected deploy view, got {other:?}"),
    }
    match &snapshot.steps[2] {
        StepView::Test { test_link } => {
            assert_eq!(
                test_link.as_ref().map(|l| l.path()),
                Some("/apis/api-1/deployments".to_string())
            );
        }
        other => panic!("expected test view, got {other:?}"),
    }
}
