/// CAP severity levels as published with each alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlertSeverity {
    Unknown,
    Minor,
    Moderate,
    Severe,
    Extreme,
}

impl AlertSeverity {
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("Extreme") => Self::Extreme,
            Some("Severe") => Self::Severe,
            Some("Moderate") => Self::Moderate,
            Some("Minor") => Self::Minor,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn is_severe(self) -> bool {
        matches!(self, Self::Severe | Self::Extreme)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Extreme => "Extreme",
            Self::Severe => "Severe",
            Self::Moderate => "Moderate",
            Self::Minor => "Minor",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub event: String,
    pub headline: String,
    pub description: Option<String>,
    pub severity: AlertSeverity,
}

impl Alert {
    #[must_use]
    pub fn new(
        event: Option<String>,
        headline: Option<String>,
        description: Option<String>,
        severity: Option<&str>,
    ) -> Self {
        Self {
            event: event
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "Alert".to_string()),
            headline: headline.unwrap_or_default(),
            description: description.filter(|d| !d.trim().is_empty()),
            severity: AlertSeverity::parse(severity),
        }
    }
}

/// True when any alert warrants the highlighted panel.
#[must_use]
pub fn has_severe(alerts: &[Alert]) -> bool {
    alerts.iter().any(|a| a.severity.is_severe())
}

/// Most severe first, keeping publication order among equals.
#[must_use]
pub fn sorted_by_severity(alerts: &[Alert]) -> Vec<Alert> {
    let mut sorted = alerts.to_vec();
    sorted.sort_by(|a, b| b.severity.cmp(&a.severity));
    sorted
}
