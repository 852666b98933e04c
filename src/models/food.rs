use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::nutrition::NutritionInfo;

/// A logged food entry. Immutable once created except for deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    /// Calories per unit; total contribution is `calories * quantity`.
    pub calories: f64,
    pub quantity: f64,
    pub unit: String,
    /// RFC3339 creation time, assigned at write.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
}

impl Default for FoodItem {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            calories: 0.0,
            quantity: 0.0,
            unit: String::new(),
            timestamp: String::new(),
            nutrition: None,
            barcode: None,
        }
    }
}

impl FoodItem {
    pub fn total_calories(&self) -> f64 {
        self.calories * self.quantity
    }
}

impl fmt::Display for FoodItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}) - {:.0} kcal",
            self.name,
            self.quantity,
            self.unit,
            self.total_calories()
        )
    }
}

/// Food entry as submitted by the caller; id and timestamp are assigned
/// by the tracker at write time.
#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub calories: f64,
    pub quantity: f64,
    pub unit: String,
    pub nutrition: Option<NutritionInfo>,
    pub barcode: Option<String>,
}

impl NewFood {
    pub fn new(
        name: impl Into<String>,
        calories: f64,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            calories,
            quantity,
            unit: unit.into(),
            nutrition: None,
            barcode: None,
        }
    }

    pub fn with_nutrition(mut self, nutrition: NutritionInfo) -> Self {
        self.nutrition = Some(nutrition);
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    pub fn into_item(self) -> FoodItem {
        FoodItem {
            id: Uuid::new_v4(),
            name: self.name,
            calories: self.calories,
            quantity: self.quantity,
            unit: self.unit,
            timestamp: Utc::now().to_rfc3339(),
            nutrition: self.nutrition,
            barcode: self.barcode,
        }
    }
}

/// Product data from a scanned barcode; nutrition is per serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeProduct {
    pub barcode: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub nutrition: NutritionInfo,
    pub serving_size: f64,
    pub serving_unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_calories() {
        let item = NewFood::new("Maçã", 52.0, 1.0, "unidade").into_item();
        assert_eq!(item.total_calories(), 52.0);

        let item = NewFood::new("Arroz", 130.0, 2.5, "100g").into_item();
        assert_eq!(item.total_calories(), 325.0);
    }

    #[test]
    fn test_into_item_assigns_id_and_timestamp() {
        let a = NewFood::new("Banana", 89.0, 1.0, "unidade").into_item();
        let b = NewFood::new("Banana", 89.0, 1.0, "unidade").into_item();
        assert_ne!(a.id, b.id);
        assert!(!a.timestamp.is_empty());
    }

    #[test]
    fn test_json_roundtrip_with_nutrition() {
        let item = NewFood::new("Ovo", 155.0, 2.0, "unidade")
            .with_nutrition(NutritionInfo::new(155.0, 13.0, 1.1, 11.0))
            .with_barcode("7891234567890")
            .into_item();

        let json = serde_json::to_string(&item).unwrap();
        let parsed: FoodItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let item = NewFood::new("Café", 2.0, 1.0, "xícara").into_item();
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("nutrition"));
        assert!(!json.contains("barcode"));
    }
}
