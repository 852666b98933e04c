use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Append-only body-weight history entry (kg).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub weight: f64,
    pub date: NaiveDate,
}

impl WeightEntry {
    pub fn new(weight: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            weight,
            date,
        }
    }
}

impl fmt::Display for WeightEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1} kg", self.date, self.weight)
    }
}

/// Append-only waist-measurement history entry (cm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaistEntry {
    pub id: Uuid,
    pub waist: f64,
    pub date: NaiveDate,
}

impl WaistEntry {
    pub fn new(waist: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            waist,
            date,
        }
    }
}

impl fmt::Display for WaistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.1} cm", self.date, self.waist)
    }
}

/// Min/max/average over a measurement series. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

impl SeriesStats {
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            min,
            max,
            average: sum / count as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_weight_entry_new() {
        let entry = WeightEntry::new(80.0, date("2025-01-15"));
        assert_eq!(entry.weight, 80.0);
        assert_eq!(entry.date, date("2025-01-15"));
    }

    #[test]
    fn test_series_stats() {
        let stats = SeriesStats::of([80.0, 79.0, 81.5]).unwrap();
        assert_eq!(stats.min, 79.0);
        assert_eq!(stats.max, 81.5);
        assert!((stats.average - 80.166666).abs() < 1e-4);
    }

    #[test]
    fn test_series_stats_empty() {
        assert!(SeriesStats::of([]).is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let entry = WaistEntry::new(92.5, date("2025-02-01"));
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: WaistEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
