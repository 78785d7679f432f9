//! Request and response DTOs for the `/api/v1` REST API.

use crate::incident::check_target;
use crate::{ActionType, Incident, IncidentPatch, ValidationError};
use serde::{Deserialize, Serialize};

/// Key/value pairs appended to a URL as a query string. Keys may repeat.
pub type Query = Vec<(String, String)>;

/// One page of `GET /risk-events/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEventPage {
    pub items: Vec<Incident>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
    pub limit: u32,
}

/// Filters for listing risk events. Absent filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskEventFilter {
    pub status: Option<String>,
    pub severity: Option<String>,
    /// Case-insensitive substring match on the maker.
    pub maker: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub date_to: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl RiskEventFilter {
    pub fn to_query(&self) -> Query {
        let mut q = Query::new();
        let mut push = |k: &str, v: &Option<String>| {
            if let Some(v) = v.as_deref().filter(|v| !v.is_empty()) {
                q.push((k.to_string(), v.to_string()));
            }
        };
        push("status", &self.status);
        push("severity", &self.severity);
        push("maker", &self.maker);
        push("date_from", &self.date_from);
        push("date_to", &self.date_to);
        push("page", &self.page.map(|p| p.to_string()));
        push("limit", &self.limit.map(|l| l.to_string()));
        q
    }
}

/// Maker submission for `POST /risk-events/request`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewApprovalRequest {
    pub action: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_incident_id: Option<String>,
    #[serde(default)]
    pub payload: IncidentPatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl NewApprovalRequest {
    pub fn create(payload: IncidentPatch) -> Self {
        Self {
            action: ActionType::Create,
            target_incident_id: None,
            payload,
            note: None,
        }
    }

    pub fn edit(target: impl Into<String>, payload: IncidentPatch) -> Self {
        Self {
            action: ActionType::Edit,
            target_incident_id: Some(target.into()),
            payload,
            note: None,
        }
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self {
            action: ActionType::Delete,
            target_incident_id: Some(target.into()),
            payload: IncidentPatch::default(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_target(self.action, self.target_incident_id.as_deref())
    }
}

/// Checker decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl ApprovalDecision {
    /// Path segment used by the decision endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalDecision::Approve => "approve",
            ApprovalDecision::Reject => "reject",
        }
    }
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Active login session, as listed by `GET /sessions/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginSession {
    pub id: uuid::Uuid,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub created_at: String,
    pub last_active_at: String,
    #[serde(default)]
    pub is_revoked: bool,
    #[serde(default)]
    pub is_current: bool,
}
