use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A logged exercise entry; `calories` is the total burned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseEntry {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub timestamp: String,
}

impl Default for ExerciseEntry {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            calories: 0.0,
            timestamp: String::new(),
        }
    }
}

impl ExerciseEntry {
    pub fn new(name: impl Into<String>, calories: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            calories,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl fmt::Display for ExerciseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {:.0} kcal", self.name, self.calories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_assigns_id_and_timestamp() {
        let entry = ExerciseEntry::new("Corrida", 300.0);
        assert_eq!(entry.name, "Corrida");
        assert_eq!(entry.calories, 300.0);
        assert!(!entry.timestamp.is_empty());
    }

    #[test]
    fn test_json_roundtrip() {
        let entry = ExerciseEntry::new("Natação", 450.0);
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: ExerciseEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
