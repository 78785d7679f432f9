//! Incident and approval-request model.
//!
//! JSON field names follow the web client (camelCase); the snake_case names emitted by
//! the REST API are accepted as aliases on input.

use crate::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};

/// Incident severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// All severities in cycle order.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Incident status.
///
/// Two vocabularies are in use: the lifecycle states (`open`/`resolved`/`closed`) and
/// the workflow labels written by the approval flow (`Waiting for Approval`/`Published`).
/// Both are accepted; neither is mapped onto the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "resolved")]
    Resolved,
    #[serde(rename = "closed")]
    Closed,
    #[serde(rename = "Waiting for Approval")]
    WaitingForApproval,
    #[serde(rename = "Published")]
    Published,
}

impl IncidentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IncidentStatus::Open => "open",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Closed => "closed",
            IncidentStatus::WaitingForApproval => "Waiting for Approval",
            IncidentStatus::Published => "Published",
        }
    }

    /// Whether an incident in this status carries a resolution timestamp.
    pub fn is_resolved(self) -> bool {
        matches!(
            self,
            IncidentStatus::Resolved | IncidentStatus::Closed | IncidentStatus::Published
        )
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Recorded operational risk event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: String,
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(alias = "report_title")]
    pub report_title: String,
    #[serde(alias = "client_code")]
    pub client_code: String,
    #[serde(alias = "risk_description")]
    pub risk_description: String,
    pub severity: Severity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: String,
    #[serde(default, alias = "action_taken", deserialize_with = "null_as_default")]
    pub action_taken: String,
    #[serde(default, alias = "follow_up_plan", deserialize_with = "null_as_default")]
    pub follow_up_plan: String,
    #[serde(default, alias = "additional_notes", deserialize_with = "null_as_default")]
    pub additional_notes: String,
    /// Base64-encoded image payloads.
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    pub status: IncidentStatus,
    #[serde(default, alias = "reported_by", deserialize_with = "null_as_default")]
    pub reported_by: String,
    #[serde(default, alias = "resolved_at")]
    pub resolved_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maker: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub approver: String,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, alias = "updated_at", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Incident {
    /// Check that `resolved_at` is present exactly when the status is a resolved one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resolved_at.is_some() != self.status.is_resolved() {
            return Err(ValidationError::ResolvedAtMismatch {
                id: self.id.clone(),
                status: self.status,
            });
        }
        Ok(())
    }
}

/// Partial incident: only the fields a change touches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, alias = "report_title", skip_serializing_if = "Option::is_none")]
    pub report_title: Option<String>,
    #[serde(default, alias = "client_code", skip_serializing_if = "Option::is_none")]
    pub client_code: Option<String>,
    #[serde(default, alias = "risk_description", skip_serializing_if = "Option::is_none")]
    pub risk_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, alias = "action_taken", skip_serializing_if = "Option::is_none")]
    pub action_taken: Option<String>,
    #[serde(default, alias = "follow_up_plan", skip_serializing_if = "Option::is_none")]
    pub follow_up_plan: Option<String>,
    #[serde(default, alias = "additional_notes", skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<IncidentStatus>,
}

impl IncidentPatch {
    pub fn is_empty(&self) -> bool {
        *self == IncidentPatch::default()
    }

    /// Apply the present fields onto an incident.
    pub fn apply_to(&self, incident: &mut Incident) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        set(&mut incident.date, &self.date);
        set(&mut incident.time, &self.time);
        set(&mut incident.report_title, &self.report_title);
        set(&mut incident.client_code, &self.client_code);
        set(&mut incident.risk_description, &self.risk_description);
        set(&mut incident.severity, &self.severity);
        set(&mut incident.impact, &self.impact);
        set(&mut incident.action_taken, &self.action_taken);
        set(&mut incident.follow_up_plan, &self.follow_up_plan);
        set(&mut incident.additional_notes, &self.additional_notes);
        set(&mut incident.images, &self.images);
        set(&mut incident.status, &self.status);
    }
}

/// Kind of change a maker asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Create,
    Edit,
    Delete,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Create => "create",
            ActionType::Edit => "edit",
            ActionType::Delete => "delete",
        }
    }

    /// Edit and delete act on an existing incident; create does not.
    pub fn requires_target(self) -> bool {
        !matches!(self, ActionType::Create)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A maker's change request as held by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub id: String,
    pub timestamp: String,
    pub action: ActionType,
    pub status: ApprovalStatus,
    #[serde(default)]
    pub payload: IncidentPatch,
    #[serde(default, alias = "target_incident_id", skip_serializing_if = "Option::is_none")]
    pub target_incident_id: Option<String>,
    #[serde(alias = "requested_by", alias = "requested_by_id")]
    pub requested_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(
        default,
        alias = "assessed_by",
        alias = "assessed_by_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub assessed_by: Option<String>,
}

impl ApprovalRequest {
    /// Check the target rule. An approved `create` carries the id of the incident it
    /// produced, so it is exempt.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.action == ActionType::Create && self.status == ApprovalStatus::Approved {
            return Ok(());
        }
        check_target(self.action, self.target_incident_id.as_deref())
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }
}

/// `create` must not name a target; `edit`/`delete` must.
pub(crate) fn check_target(
    action: ActionType,
    target: Option<&str>,
) -> Result<(), ValidationError> {
    match (action.requires_target(), target) {
        (true, None) | (true, Some("")) => Err(ValidationError::MissingTarget(action)),
        (false, Some(t)) if !t.is_empty() => Err(ValidationError::UnexpectedTarget(t.to_string())),
        _ => Ok(()),
    }
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}
