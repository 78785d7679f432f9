//! Mock incident list: four scenario records followed by generated filler.

use chrono::{Days, NaiveDate, Utc};
use risk_types::{Incident, IncidentStatus, Severity};

/// Number of generated records after the scenario records.
pub const GENERATED_COUNT: usize = 56;

const STATUSES: [IncidentStatus; 2] = [IncidentStatus::WaitingForApproval, IncidentStatus::Published];

const TITLES: [&str; 10] = [
    "System Timeout",
    "Data Sync Error",
    "API Latency",
    "Login Failure",
    "Report Delay",
    "Unauthorized Access",
    "Connectivity Loss",
    "Database Deadlock",
    "File Corruption",
    "Memory Leak",
];

const MAKERS: [&str; 5] = [
    "John Doe",
    "Jane Smith",
    "Mike Ross",
    "Rachel Green",
    "Harvey Specter",
];

const APPROVERS: [&str; 4] = ["Jessica Pearson", "Louis Litt", "Donna Paulsen", "-"];

/// Mock incidents dated back from today (UTC).
pub fn generate_mock_incidents() -> Vec<Incident> {
    generate_mock_incidents_from(Utc::now().date_naive())
}

/// Mock incidents dated back from `anchor`. Same anchor, same output.
pub fn generate_mock_incidents_from(anchor: NaiveDate) -> Vec<Incident> {
    let mut incidents = scenarios();
    incidents.extend((0..GENERATED_COUNT).map(|i| generated(anchor, i)));
    incidents
}

fn generated(anchor: NaiveDate, i: usize) -> Incident {
    let date = anchor
        .checked_sub_days(Days::new((i / 5) as u64))
        .unwrap_or(anchor);
    let severity = Severity::ALL[i % Severity::ALL.len()];
    let status = STATUSES[i % STATUSES.len()];
    let title = TITLES[i % TITLES.len()];
    let waiting = status == IncidentStatus::WaitingForApproval;

    Incident {
        id: format!("INC-AUTO-{}", 100 + i),
        date: date.format("%Y-%m-%d").to_string(),
        time: format!("{}:{:02}", 10 + i % 8, i % 60),
        report_title: format!("{} - Batch {}", title, i / 10),
        client_code: format!("CLI-{:03}", i + 10),
        risk_description: format!(
            "Automated testing entry for {}. Simulating various operational risks.",
            title
        ),
        severity,
        impact: format!("Impact analysis for {} on client operations.", title),
        action_taken: "Automated remediation script executed.".to_string(),
        follow_up_plan: "Standard post-incident review.".to_string(),
        additional_notes: "Generated mock data.".to_string(),
        images: Vec::new(),
        status,
        reported_by: "AutoBot".to_string(),
        resolved_at: (!waiting).then(|| "18:00".to_string()),
        maker: MAKERS[i % MAKERS.len()].to_string(),
        approver: if waiting {
            "-".to_string()
        } else {
            APPROVERS[i % APPROVERS.len()].to_string()
        },
        created_at: None,
        updated_at: None,
    }
}

struct Scenario {
    id: &'static str,
    date: &'static str,
    time: &'static str,
    title: &'static str,
    client_code: &'static str,
    description: &'static str,
    severity: Severity,
    impact: &'static str,
    action_taken: &'static str,
    follow_up_plan: &'static str,
    notes: &'static str,
    status: IncidentStatus,
    reported_by: &'static str,
    resolved_at: Option<&'static str>,
    maker: &'static str,
    approver: &'static str,
}

const SCENARIOS: [Scenario; 4] = [
    Scenario {
        id: "INC-2024-001",
        date: "2024-12-06",
        time: "09:15",
        title: "Market Data Feed Latency",
        client_code: "MKT-001",
        description: "Observed 500ms latency in spot price updates from primary vendor during market open.",
        severity: Severity::Critical,
        impact: "Potential arbitrage risk and delayed execution for high-frequency trading clients.",
        action_taken: "Switched to secondary feed provider immediately. Logged ticket with vendor.",
        follow_up_plan: "Review vendor SLA performance and conduct failover drill next week.",
        notes: "Latency normalized at 09:45.",
        status: IncidentStatus::Published,
        reported_by: "Ops Team",
        resolved_at: Some("09:45"),
        maker: "Mike Ross",
        approver: "Jessica Pearson",
    },
    Scenario {
        id: "INC-2024-002",
        date: "2024-12-06",
        time: "11:30",
        title: "Unauthorized API Access Attempt",
        client_code: "SEC-002",
        description: "Detection of multiple failed authentication attempts from unknown IP range targeting the trading API.",
        severity: Severity::High,
        impact: "Security integrity risk; potential for data breach if not blocked.",
        action_taken: "IP range blocked at firewall level. Account temporarily locked.",
        follow_up_plan: "Analyze access logs for pattern and enhance rate limiting rules.",
        notes: "No successful data exfiltration detected.",
        status: IncidentStatus::WaitingForApproval,
        reported_by: "Security SOC",
        resolved_at: None,
        maker: "Jane Smith",
        approver: "-",
    },
    Scenario {
        id: "INC-2024-003",
        date: "2024-12-06",
        time: "14:20",
        title: "Settlement Reconciliation Discrepancy",
        client_code: "OPS-003",
        description: "Mismatch of $50,000 in end-of-day settlement reports for Client A.",
        severity: Severity::Medium,
        impact: "Financial reporting inaccuracy and potential regulatory breach if not fixed T+1.",
        action_taken: "Manual trace of transaction logs initiated.",
        follow_up_plan: "Update reconciliation script to handle edge case in currency conversion.",
        notes: "Likely due to rounding error in new forex module.",
        status: IncidentStatus::WaitingForApproval,
        reported_by: "Back Office",
        resolved_at: None,
        maker: "Rachel Green",
        approver: "-",
    },
    Scenario {
        id: "INC-2024-004",
        date: "2024-12-05",
        time: "16:45",
        title: "Exchange Connectivity Fluctuation",
        client_code: "CON-004",
        description: "Intermittent packet loss (2%) to Exchange B connection.",
        severity: Severity::Low,
        impact: "Minor execution delays for non-critical orders.",
        action_taken: "Network team monitored the line; provider performed maintenance.",
        follow_up_plan: "Review dedicated line stability report.",
        notes: "Resolved automatically after provider maintenance.",
        status: IncidentStatus::Published,
        reported_by: "NetOps",
        resolved_at: Some("17:30"),
        maker: "John Doe",
        approver: "Louis Litt",
    },
];

fn scenarios() -> Vec<Incident> {
    SCENARIOS
        .iter()
        .map(|s| Incident {
            id: s.id.to_string(),
            date: s.date.to_string(),
            time: s.time.to_string(),
            report_title: s.title.to_string(),
            client_code: s.client_code.to_string(),
            risk_description: s.description.to_string(),
            severity: s.severity,
            impact: s.impact.to_string(),
            action_taken: s.action_taken.to_string(),
            follow_up_plan: s.follow_up_plan.to_string(),
            additional_notes: s.notes.to_string(),
            images: Vec::new(),
            status: s.status,
            reported_by: s.reported_by.to_string(),
            resolved_at: s.resolved_at.map(str::to_string),
            maker: s.maker.to_string(),
            approver: s.approver.to_string(),
            created_at: None,
            updated_at: None,
        })
        .collect()
}
