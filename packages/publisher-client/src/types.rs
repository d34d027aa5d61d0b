use serde::{Deserialize, Serialize};

/// API as returned by `GET /apis/{apiId}`.
///
/// Only the fields the lifecycle stepper consumes are modelled; everything
/// else in the publisher payload is ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDto {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "type", default = "default_api_type")]
    pub api_type: String,
    #[serde(default)]
    pub endpoint_config: Option<serde_json::Value>,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub is_revision: bool,
    #[serde(default)]
    pub revisioned_api_id: Option<String>,
    #[serde(default)]
    pub workflow_status: Option<String>,
    #[serde(default)]
    pub life_cycle_status: Option<String>,
}

fn default_api_type() -> String {
    "HTTP".to_string()
}

/// Body of `GET /apis/{apiId}/lifecycle-state`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleStateDto {
    pub state: String,
    #[serde(default)]
    pub available_transitions: Vec<LifecycleTransitionDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleTransitionDto {
    pub event: String,
    pub target_state: Option<String>,
}

/// Body of `GET /apis/{apiId}/revisions`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevisionListDto {
    pub count: u32,
    #[serde(default)]
    pub list: Vec<RevisionDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionDto {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub deployment_info: Vec<DeploymentInfoDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfoDto {
    pub name: String,
    pub vhost: Option<String>,
}

/// Body of `POST /apis/change-lifecycle`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowResponseDto {
    pub workflow_status: String,
    #[serde(default)]
    pub lifecycle_state: Option<LifecycleStateDto>,
}

/// Error payload the publisher returns on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDto {
    pub code: Option<i64>,
    pub message: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_dto_parses_publisher_payload() {
        let json = serde_json::json!({
            "id": "01234567-0123-0123-0123-012345678901",
            "name": "PizzaShackAPI",
            "version": "1.0.0",
            "type": "HTTP",
            "endpointConfig": {
                "endpoint_type": "http",
                "production_endpoints": { "url": "https://localhost:9443/am/sample/pizzashack/v1/api/" }
            },
            "policies": ["Unlimited"],
            "isRevision": false,
            "workflowStatus": "APPROVED",
            "lifeCycleStatus": "CREATED",
            "businessInformation": { "businessOwner": "Jane Roe" }
        });

        let api: ApiDto = serde_json::from_value(json).unwrap();

        assert_eq!(api.api_type, "HTTP");
        assert!(api.endpoint_config.is_some());
        assert_eq!(api.policies, vec!["Unlimited".to_string()]);
        assert_eq!(api.workflow_status.as_deref(), Some("APPROVED"));
        assert!(api.revisioned_api_id.is_none());
    }

    #[test]
    fn api_dto_null_endpoint_config_is_none() {
        let json = serde_json::json!({
            "id": "api-1",
            "type": "WEBSUB",
            "endpointConfig": null,
            "isRevision": true,
            "revisionedApiId": "api-0"
        });

        let api: ApiDto = serde_json::from_value(json).unwrap();

        assert!(api.endpoint_config.is_none());
        assert!(api.policies.is_empty());
        assert!(api.is_revision);
        assert_eq!(api.revisioned_api_id.as_deref(), Some("api-0"));
    }

    #[test]
    fn revision_list_reads_count() {
        let json = serde_json::json!({
            "count": 2,
            "list": [
                { "id": "rev-1", "displayName": "Revision 1",
                  "deploymentInfo": [{ "name": "Default", "vhost": "localhost" }] },
                { "id": "rev-2", "displayName": "Revision 2", "deploymentInfo": [] }
            ]
        });

        let revisions: RevisionListDto = serde_json::from_value(json).unwrap();
        assert_eq!(revisions.count, 2);
        assert_eq!(revisions.list[0].deployment_info[0].name, "Default");
    }

    #[test]
    fn lifecycle_state_reads_transitions() {
        let json = serde_json::json!({
            "state": "Created",
            "availableTransitions": [
                { "event": "Publish", "targetState": "Published" },
                { "event": "Deploy as a Prototype", "targetState": "Prototyped" }
            ]
        });

        let lc: LifecycleStateDto = serde_json::from_value(json).unwrap();
        assert_eq!(lc.state, "Created");
        assert_eq!(lc.available_transitions.len(), 2);
        assert_eq!(lc.available_transitions[0].target_state.as_deref(), Some("Published"));
    }
}
