//! Wiring of client, stores and fixtures behind the CLI commands.

use crate::cli::{default_state_path, Cli, Command, ThemeAction};
use crate::error::CliError;
use crate::render;
use risk_client::{ApiClient, AuthClient, ClientConfig, RiskApi, SessionExpiry};
use risk_fixtures::{
    format_date_id, generate_mock_incidents, generate_mock_incidents_from, severity_styles,
    status_color,
};
use risk_platform::{HeadlessShell, JsonFileStorage};
use risk_store::{ThemeStore, ToastStore, UserStore};
use risk_types::permissions::risk_event;
use risk_types::{
    ApprovalDecision, NewApprovalRequest, RiskEventFilter, Shell, Storage, UserProfile,
};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;

/// One CLI invocation's worth of state.
pub struct App {
    api: RiskApi,
    user: UserStore,
    theme: ThemeStore,
    toasts: ToastStore,
    json: bool,
}

impl App {
    /// Build from parsed flags: file-backed storage and a headless shell.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut config = ClientConfig::from_env();
        if let Some(base) = &cli.base_url {
            config = ClientConfig::new(base.clone()).with_timeout(config.timeout);
        }
        let path = cli.state.clone().unwrap_or_else(default_state_path);
        tracing::debug!(state = %path.display(), base_url = %config.base_url, "starting");
        let storage: Arc<dyn Storage> = Arc::new(JsonFileStorage::new(path));
        let shell: Arc<dyn Shell> = Arc::new(HeadlessShell::new());
        Self::with_parts(config, storage, shell, cli.json)
    }

    /// Build from explicit parts. The session-expiry interceptor is always installed.
    pub fn with_parts(
        config: ClientConfig,
        storage: Arc<dyn Storage>,
        shell: Arc<dyn Shell>,
        json: bool,
    ) -> Result<Self, CliError> {
        let expiry = SessionExpiry::new(Arc::clone(&storage), Arc::clone(&shell));
        let transport = AuthClient::builder(config, Arc::clone(&storage))
            .interceptor(Arc::new(expiry))
            .build()?;
        let api = ApiClient::new(transport);
        Ok(Self {
            user: UserStore::new(api.clone(), Arc::clone(&shell)),
            theme: ThemeStore::new(storage, shell),
            toasts: ToastStore::new(),
            api: RiskApi::new(api),
            json,
        })
    }

    pub fn toasts(&self) -> &ToastStore {
        &self.toasts
    }

    pub fn user(&self) -> &UserStore {
        &self.user
    }

    pub async fn run(&self, command: Command, out: &mut impl Write) -> Result<(), CliError> {
        match command {
            Command::Login {
                username,
                password,
                otp,
            } => {
                let password = password
                    .or_else(|| std::env::var("RISKCTL_PASSWORD").ok())
                    .ok_or_else(|| {
                        CliError::Usage("password required (--password or RISKCTL_PASSWORD)".into())
                    })?;
                self.api.login(&username, &password, otp.as_deref()).await?;
                let user = self.current_user().await?;
                self.toasts.success(format!("Signed in as {}", user.display_name()), None);
                self.emit(out, &user, || render::user(&user))
            }
            Command::Logout => {
                self.user.logout();
                self.toasts.info("Signed out", None);
                writeln!(out, "signed out")?;
                Ok(())
            }
            Command::Whoami => {
                let user = self.current_user().await?;
                self.emit(out, &user, || render::user(&user))
            }
            Command::Incidents {
                status,
                severity,
                maker,
                date_from,
                date_to,
                page,
                limit,
            } => {
                self.require(risk_event::READ).await?;
                let filter = RiskEventFilter {
                    status,
                    severity,
                    maker,
                    date_from: date_from.map(|d| d.to_string()),
                    date_to: date_to.map(|d| d.to_string()),
                    page,
                    limit,
                };
                let page = self.api.list_risk_events(&filter).await?;
                self.emit(out, &page, || render::page(&page))
            }
            Command::Pending => {
                self.require(risk_event::APPROVE).await?;
                let list = self.api.pending_approvals().await?;
                self.emit(out, &list, || render::requests(&list))
            }
            Command::Mine => {
                self.require(risk_event::CREATE).await?;
                let list = self.api.my_requests().await?;
                self.emit(out, &list, || render::requests(&list))
            }
            Command::Submit { file } => {
                let text = std::fs::read_to_string(&file)?;
                let request: NewApprovalRequest = serde_json::from_str(&text)?;
                self.require(risk_event::CREATE).await?;
                let created = self.api.submit_request(&request).await?;
                self.toasts.success(format!("Request {} submitted", created.id), None);
                self.emit(out, &created, || render::requests(std::slice::from_ref(&created)))
            }
            Command::Approve { id } => self.decide(&id, ApprovalDecision::Approve, out).await,
            Command::Reject { id } => self.decide(&id, ApprovalDecision::Reject, out).await,
            Command::Can { permission } => {
                self.user.fetch().await;
                let allowed = self.user.can(&permission);
                let body = serde_json::json!({ "permission": permission, "allowed": allowed });
                self.emit(out, &body, || {
                    format!("{}\n", if allowed { "yes" } else { "no" })
                })
            }
            Command::Sessions => {
                let list = self.api.sessions().await?;
                self.emit(out, &list, || render::sessions(&list))
            }
            Command::RevokeSession { id } => {
                self.api.revoke_session(&id).await?;
                self.toasts.success("Session revoked", None);
                writeln!(out, "revoked {}", id)?;
                Ok(())
            }
            Command::Theme { action } => {
                self.theme.init();
                match action {
                    Some(ThemeAction::Set { theme }) => self.theme.set(theme),
                    Some(ThemeAction::Toggle) => {
                        self.theme.toggle();
                    }
                    None => {}
                }
                let theme = self.theme.get();
                let dark = self.theme.is_dark();
                let body = serde_json::json!({ "theme": theme, "dark": dark });
                self.emit(out, &body, || {
                    format!("{} ({})\n", theme, if dark { "dark" } else { "light" })
                })
            }
            Command::Mock { anchor } => {
                let incidents = match anchor {
                    Some(date) => generate_mock_incidents_from(date),
                    None => generate_mock_incidents(),
                };
                if self.json {
                    let rows = incidents
                        .iter()
                        .map(|i| {
                            let mut row = serde_json::to_value(i)?;
                            row["formattedDate"] = format_date_id(&i.date).into();
                            row["severityBadge"] = severity_styles(i.severity.as_str()).badge.into();
                            row["statusBadge"] = status_color(i.status.as_str()).into();
                            Ok(row)
                        })
                        .collect::<Result<Vec<_>, serde_json::Error>>()?;
                    self.emit(out, &rows, String::new)
                } else {
                    write!(out, "{}", render::incidents(&incidents))?;
                    Ok(())
                }
            }
        }
    }

    async fn decide(
        &self,
        id: &str,
        decision: ApprovalDecision,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        self.require(risk_event::APPROVE).await?;
        let res = self.api.decide(id, decision).await?;
        self.toasts.success(res.message.clone(), None);
        self.emit(out, &res, || format!("{}\n", res.message))
    }

    /// Load the profile; `NotSignedIn` when there is no valid session.
    async fn current_user(&self) -> Result<UserProfile, CliError> {
        self.user.fetch().await;
        self.user.get().ok_or(CliError::NotSignedIn)
    }

    async fn require(&self, permission: &str) -> Result<UserProfile, CliError> {
        let user = self.current_user().await?;
        if !user.can(permission) {
            self.toasts.error(format!("Missing permission {}", permission), 0);
            return Err(CliError::PermissionDenied(permission.to_string()));
        }
        Ok(user)
    }

    fn emit<T: Serialize>(
        &self,
        out: &mut impl Write,
        value: &T,
        text: impl FnOnce() -> String,
    ) -> Result<(), CliError> {
        if self.json {
            serde_json::to_writer_pretty(&mut *out, value)?;
            writeln!(out)?;
        } else {
            write!(out, "{}", text())?;
        }
        Ok(())
    }
}
