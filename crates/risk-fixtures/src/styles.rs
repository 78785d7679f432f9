//! Tailwind class tokens for severities and workflow statuses.

/// Classes for a severity marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityStyles {
    /// Solid fill (dots, bars).
    pub bg: &'static str,
    pub text: &'static str,
    pub badge: &'static str,
}

const GRAY: SeverityStyles = SeverityStyles {
    bg: "bg-gray-500",
    text: "text-gray-700",
    badge: "bg-gray-50 text-gray-700 border-gray-200",
};

/// Style tokens for a severity name; unknown names get gray.
pub fn severity_styles(severity: &str) -> SeverityStyles {
    match severity {
        "critical" => SeverityStyles {
            bg: "bg-red-500",
            text: "text-red-700",
            badge: "bg-red-50 text-red-700 border-red-200",
        },
        "high" => SeverityStyles {
            bg: "bg-orange-500",
            text: "text-orange-700",
            badge: "bg-orange-50 text-orange-700 border-orange-200",
        },
        "medium" => SeverityStyles {
            bg: "bg-yellow-500",
            text: "text-yellow-700",
            badge: "bg-yellow-50 text-yellow-700 border-yellow-200",
        },
        "low" => SeverityStyles {
            bg: "bg-blue-500",
            text: "text-blue-700",
            badge: "bg-blue-50 text-blue-700 border-blue-200",
        },
        _ => GRAY,
    }
}

/// Badge classes for a fixture status label; unknown labels get gray.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "Waiting for Approval" => "bg-yellow-50 text-yellow-700 border-yellow-200",
        "Published" => "bg-emerald-50 text-emerald-700 border-emerald-200",
        _ => GRAY.badge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_types::{IncidentStatus, Severity};

    #[test]
    fn every_severity_has_its_own_colour() {
        for sev in Severity::ALL {
            assert_ne!(severity_styles(sev.as_str()), GRAY, "{}", sev);
        }
        assert_eq!(severity_styles("critical").bg, "bg-red-500");
    }

    #[test]
    fn unknown_values_fall_back_to_gray() {
        assert_eq!(severity_styles("unknown"), GRAY);
        assert_eq!(severity_styles("CRITICAL"), GRAY);
        assert_eq!(status_color("unknown"), "bg-gray-50 text-gray-700 border-gray-200");
    }

    #[test]
    fn status_labels_match_serialized_form() {
        let label = serde_json::to_value(IncidentStatus::Published).unwrap();
        assert_eq!(
            status_color(label.as_str().unwrap()),
            "bg-emerald-50 text-emerald-700 border-emerald-200"
        );
        let label = serde_json::to_value(IncidentStatus::WaitingForApproval).unwrap();
        assert!(status_color(label.as_str().unwrap()).contains("yellow"));
        assert_eq!(status_color("open"), GRAY.badge);
    }
}
