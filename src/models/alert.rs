use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Goal,
    Warning,
    Achievement,
    Reminder,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Goal => write!(f, "goal"),
            AlertKind::Warning => write!(f, "warning"),
            AlertKind::Achievement => write!(f, "achievement"),
            AlertKind::Reminder => write!(f, "reminder"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
}

impl fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertPriority::Low => write!(f, "low"),
            AlertPriority::Medium => write!(f, "medium"),
            AlertPriority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alert {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub timestamp: String,
    pub read: bool,
    pub priority: AlertPriority,
}

impl Default for Alert {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: AlertKind::Reminder,
            title: String::new(),
            message: String::new(),
            timestamp: String::new(),
            read: false,
            priority: AlertPriority::Low,
        }
    }
}

impl Alert {
    pub fn new(
        kind: AlertKind,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: AlertPriority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
            read: false,
            priority,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.read { " " } else { "*" };
        write!(
            f,
            "[{}] {} ({}/{}) - {}",
            marker, self.title, self.kind, self.priority, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_alert_is_unread() {
        let alert = Alert::new(
            AlertKind::Warning,
            "Meta ultrapassada",
            "Consumo acima de 110% da meta",
            AlertPriority::High,
        );
        assert!(!alert.read);
        assert_eq!(alert.kind, AlertKind::Warning);
        assert!(!alert.timestamp.is_empty());
    }

    #[test]
    fn test_kind_serializes_as_type_field() {
        let alert = Alert::new(AlertKind::Goal, "t", "m", AlertPriority::Low);
        let json = serde_json::to_string(&alert).unwrap();
        assert!(json.contains("\"type\":\"goal\""));
    }

    #[test]
    fn test_priority_ordering() {
        assert!(AlertPriority::High > AlertPriority::Medium);
        assert!(AlertPriority::Medium > AlertPriority::Low);
    }
}
