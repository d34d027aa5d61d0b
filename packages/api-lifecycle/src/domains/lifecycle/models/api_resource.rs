//! The API resource as the lifecycle stepper sees it.

use publisher_client::ApiDto;
use serde::Serialize;

/// API flavour. Only `WebSub` changes stepper behaviour; it can be published
/// without an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ApiType {
    Http,
    Ws,
    Soap,
    SoapToRest,
    GraphQl,
    WebSub,
    Sse,
    WebHook,
    Async,
    Other(String),
}

impl ApiType {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "HTTP" => ApiType::Http,
            "WS" => ApiType::Ws,
            "SOAP" => ApiType::Soap,
            "SOAPTOREST" => ApiType::SoapToRest,
            "GRAPHQL" => ApiType::GraphQl,
            "WEBSUB" => ApiType::WebSub,
            "SSE" => ApiType::Sse,
            "WEBHOOK" => ApiType::WebHook,
            "ASYNC" => ApiType::Async,
            _ => ApiType::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ApiType::Http => "HTTP",
            ApiType::Ws => "WS",
            ApiType::Soap => "SOAP",
            ApiType::SoapToRest => "SOAPTOREST",
            ApiType::GraphQl => "GRAPHQL",
            ApiType::WebSub => "WEBSUB",
            ApiType::Sse => "SSE",
            ApiType::WebHook => "WEBHOOK",
            ApiType::Async => "ASYNC",
            ApiType::Other(raw) => raw,
        }
    }
}

impl From<ApiType> for String {
    fn from(value: ApiType) -> Self {
        value.as_str().to_string()
    }
}

/// Approval-pipeline state of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum WorkflowStatus {
    /// Pending approval; blocks publishing.
    Created,
    Approved,
    Rejected,
    Other(String),
}

impl WorkflowStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "CREATED" => WorkflowStatus::Created,
            "APPROVED" => WorkflowStatus::Approved,
            "REJECTED" => WorkflowStatus::Rejected,
            _ => WorkflowStatus::Other(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WorkflowStatus::Created => "CREATED",
            WorkflowStatus::Approved => "APPROVED",
            WorkflowStatus::Rejected => "REJECTED",
            WorkflowStatus::Other(raw) => raw,
        }
    }
}

impl From<WorkflowStatus> for String {
    fn from(value: WorkflowStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Attributes of an API consumed by the progress resolver and publish gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResource {
    pub id: String,
    pub api_type: ApiType,
    pub endpoint_config: Option<serde_json::Value>,
    /// Business plans (subscription tiers) attached to the API.
    pub policies: Vec<String>,
    pub is_revision: bool,
    pub revisioned_api_id: Option<String>,
    pub workflow_status: Option<WorkflowStatus>,
}

impl ApiResource {
    /// A bare HTTP API with no endpoint, no plans and no workflow status.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            api_type: ApiType::Http,
            endpoint_config: None,
            policies: Vec::new(),
            is_revision: false,
            revisioned_api_id: None,
            workflow_status: None,
        }
    }

    pub fn with_type(mut self, api_type: ApiType) -> Self {
        self.api_type = api_type;
        self
    }

    pub fn with_endpoint(mut self, endpoint_config: serde_json::Value) -> Self {
        self.endpoint_config = Some(endpoint_config);
        self
    }

    pub fn with_policies<I, S>(mut self, policies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policies = policies.into_iter().map(Into::into).collect();
        self
    }

    pub fn as_revision_of(mut self, api_id: impl Into<String>) -> Self {
        self.is_revision = true;
        self.revisioned_api_id = Some(api_id.into());
        self
    }

    pub fn with_workflow_status(mut self, status: WorkflowStatus) -> Self {
        self.workflow_status = Some(status);
        self
    }

    pub fn has_endpoint(&self) -> bool {
        self.endpoint_config.is_some()
    }

    pub fn has_business_plan(&self) -> bool {
        !self.policies.is_empty()
    }

    pub fn is_websub(&self) -> bool {
        self.api_type == ApiType::WebSub
    }

    pub fn is_pending_approval(&self) -> bool {
        self.workflow_status == Some(WorkflowStatus::Created)
    }

    /// Deployments belong to the working copy, so a revision counts the
    /// deployments of the API it was taken from.
    pub fn deployment_source_id(&self) -> &str {
        match (&self.revisioned_api_id, self.is_revision) {
            (Some(parent), true) => parent,
            _ => &self.id,
        }
    }
}

impl From<ApiDto> for ApiResource {
    fn from(dto: ApiDto) -> Self {
        Self {
            id: dto.id,
            api_type: ApiType::parse(&dto.api_type),
            endpoint_config: dto.endpoint_config.filter(|v| !v.is_null()),
            policies: dto.policies,
            is_revision: dto.is_revision,
            revisioned_api_id: dto.revisioned_api_id,
            workflow_status: dto.workflow_status.as_deref().map(WorkflowStatus::parse),
        }
    }
}
