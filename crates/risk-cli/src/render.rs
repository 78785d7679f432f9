//! Plain-text rendering for terminal output.

use risk_fixtures::format_date_id;
use risk_types::{ApprovalRequest, Incident, LoginSession, RiskEventPage, UserProfile};
use std::fmt::Write as _;

pub fn user(u: &UserProfile) -> String {
    let access = match &u.access {
        Some(list) if !list.is_empty() => list.join(", "),
        _ => "-".to_string(),
    };
    format!(
        "{} <{}>\nusername: {}\nrole:     {}\naccess:   {}\n",
        u.display_name(),
        u.email,
        u.username,
        u.role,
        access
    )
}

pub fn incident_row(i: &Incident) -> String {
    format!(
        "{:<14} {:<18} {:<5} {:<8} {:<20} {}",
        i.id,
        format_date_id(&i.date),
        i.time,
        i.severity,
        i.status,
        i.report_title
    )
}

pub fn incidents(items: &[Incident]) -> String {
    let mut out = String::new();
    for i in items {
        let _ = writeln!(out, "{}", incident_row(i));
    }
    out
}

pub fn page(p: &RiskEventPage) -> String {
    let mut out = incidents(&p.items);
    let _ = writeln!(
        out,
        "page {}/{} ({} total, {} per page)",
        p.page, p.pages, p.total, p.limit
    );
    out
}

pub fn requests(list: &[ApprovalRequest]) -> String {
    if list.is_empty() {
        return "no requests\n".to_string();
    }
    let mut out = String::new();
    for r in list {
        let target = r.target_incident_id.as_deref().unwrap_or("-");
        let title = r.payload.report_title.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "{:<12} {:<6} {:<9} {:<14} {}",
            r.id,
            r.action,
            r.status,
            target,
            title
        );
    }
    out
}

pub fn sessions(list: &[LoginSession]) -> String {
    let mut out = String::new();
    for s in list {
        let marker = if s.is_current { "*" } else { " " };
        let _ = writeln!(
            out,
            "{} {} {:<15} {:<20} last active {}",
            marker,
            s.id,
            s.ip_address.as_deref().unwrap_or("-"),
            s.location.as_deref().unwrap_or("-"),
            s.last_active_at
        );
    }
    out
}
