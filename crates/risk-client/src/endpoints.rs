//! Typed endpoints of the `/api/v1` REST API.

use crate::error::ClientError;
use crate::verbs::{ApiClient, RequestConfig};
use risk_types::{
    AccessToken, ApprovalDecision, ApprovalRequest, LoginSession, MessageResponse,
    NewApprovalRequest, ProfileUpdate, RiskEventFilter, RiskEventPage, UserProfile,
};

/// Risk-event, user and session endpoints.
#[derive(Clone, Debug)]
pub struct RiskApi {
    api: ApiClient,
}

impl RiskApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a bearer token and store it.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        otp: Option<&str>,
    ) -> Result<AccessToken, ClientError> {
        let mut form = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        if let Some(otp) = otp.filter(|o| !o.is_empty()) {
            form.push(("otp".to_string(), otp.to_string()));
        }
        let token: AccessToken = self.api.post_form("/auth/login", form).await?;
        self.api.transport().set_token(&token.access_token)?;
        tracing::info!(username, "logged in");
        Ok(token)
    }

    /// Forget the stored token. The server is not contacted.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.api.transport().clear_token()
    }

    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.api.get("/users/me").await
    }

    pub async fn update_me(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError> {
        self.api.put("/users/me", update).await
    }

    pub async fn list_risk_events(
        &self,
        filter: &RiskEventFilter,
    ) -> Result<RiskEventPage, ClientError> {
        self.api
            .get_with("/risk-events/", RequestConfig::params(filter.to_query()))
            .await
    }

    /// Pending requests awaiting a checker (needs `risk_event.approve`).
    pub async fn pending_approvals(&self) -> Result<Vec<ApprovalRequest>, ClientError> {
        self.api.get("/risk-events/approvals/pending").await
    }

    /// Requests submitted by the signed-in user, any status.
    pub async fn my_requests(&self) -> Result<Vec<ApprovalRequest>, ClientError> {
        self.api.get("/risk-events/requests/mine").await
    }

    /// Submit a maker request. The target rule is checked before anything is sent.
    pub async fn submit_request(
        &self,
        request: &NewApprovalRequest,
    ) -> Result<ApprovalRequest, ClientError> {
        request.validate()?;
        self.api.post("/risk-events/request", request).await
    }

    pub async fn decide(
        &self,
        request_id: &str,
        decision: ApprovalDecision,
    ) -> Result<MessageResponse, ClientError> {
        let path = format!(
            "/risk-events/approvals/{}/{}",
            path_segment("request", request_id)?,
            decision.as_str()
        );
        self.api.post(&path, &serde_json::json!({})).await
    }

    pub async fn sessions(&self) -> Result<Vec<LoginSession>, ClientError> {
        self.api.get("/sessions/").await
    }

    /// Revoke one of the user's sessions (answers 204).
    pub async fn revoke_session(&self, session_id: &str) -> Result<(), ClientError> {
        let path = format!("/sessions/{}", path_segment("session", session_id)?);
        self.api
            .delete::<serde_json::Value>(&path)
            .await
            .map(|_| ())
    }
}

/// An id spliced into a URL path must stay a single segment.
fn path_segment<'a>(kind: &str, id: &'a str) -> Result<&'a str, ClientError> {
    let bad = id.is_empty()
        || id == "."
        || id.contains("..")
        || id.contains(['/', '\\', '?', '#', '%'])
        || id.chars().any(char::is_control);
    if bad {
        return Err(ClientError::InvalidRequest(format!("bad {} id: {:?}", kind, id)));
    }
    Ok(id)
}
