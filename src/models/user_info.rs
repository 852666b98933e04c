use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Activity level used as the TDEE multiplier key.
///
/// Stored documents use camelCase keys; anything unrecognized decodes to
/// `Sedentary` so the multiplier falls back to 1.2 instead of failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightlyActive",
            ActivityLevel::ModeratelyActive => "moderatelyActive",
            ActivityLevel::VeryActive => "veryActive",
            ActivityLevel::ExtraActive => "extraActive",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "lightlyActive" => ActivityLevel::LightlyActive,
            "moderatelyActive" => ActivityLevel::ModeratelyActive,
            "veryActive" => ActivityLevel::VeryActive,
            "extraActive" => ActivityLevel::ExtraActive,
            _ => ActivityLevel::Sedentary,
        }
    }
}

impl Serialize for ActivityLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_key())
    }
}

impl<'de> Deserialize<'de> for ActivityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Ok(ActivityLevel::from_key(&key))
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    Ectomorfo,
    Mesomorfo,
    Endomorfo,
}

/// User profile. Numeric fields are kept as free-text strings exactly as
/// entered; the metrics calculator parses and validates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfo {
    pub age: String,
    pub gender: Option<Gender>,
    pub height: String,
    pub weight: String,
    pub activity_level: ActivityLevel,
    pub goal_weight: String,
    pub weekly_goal: String,
    pub waist: String,
    pub body_fat: String,
    pub lean_mass: String,
    pub body_type: Option<BodyType>,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserInfoPatch {
    pub age: Option<String>,
    pub gender: Option<Gender>,
    pub height: Option<String>,
    pub weight: Option<String>,
    pub activity_level: Option<ActivityLevel>,
    pub goal_weight: Option<String>,
    pub weekly_goal: Option<String>,
    pub waist: Option<String>,
    pub body_fat: Option<String>,
    pub lean_mass: Option<String>,
    pub body_type: Option<BodyType>,
}

impl UserInfo {
    pub fn apply(&mut self, patch: UserInfoPatch) {
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(gender) = patch.gender {
            self.gender = Some(gender);
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(weight) = patch.weight {
            self.weight = weight;
        }
        if let Some(level) = patch.activity_level {
            self.activity_level = level;
        }
        if let Some(goal_weight) = patch.goal_weight {
            self.goal_weight = goal_weight;
        }
        if let Some(weekly_goal) = patch.weekly_goal {
            self.weekly_goal = weekly_goal;
        }
        if let Some(waist) = patch.waist {
            self.waist = waist;
        }
        if let Some(body_fat) = patch.body_fat {
            self.body_fat = body_fat;
        }
        if let Some(lean_mass) = patch.lean_mass {
            self.lean_mass = lean_mass;
        }
        if let Some(body_type) = patch.body_type {
            self.body_type = Some(body_type);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_activity_level_is_sedentary() {
        let info = UserInfo::default();
        assert_eq!(info.activity_level, ActivityLevel::Sedentary);
        assert!(info.gender.is_none());
    }

    #[test]
    fn test_unknown_activity_level_falls_back() {
        let info: UserInfo =
            serde_json::from_str(r#"{"activityLevel": "superhuman"}"#).unwrap();
        assert_eq!(info.activity_level, ActivityLevel::Sedentary);
        assert_eq!(info.activity_level.multiplier(), 1.2);
    }

    #[test]
    fn test_activity_level_camel_case_roundtrip() {
        let json = serde_json::to_string(&ActivityLevel::LightlyActive).unwrap();
        assert_eq!(json, "\"lightlyActive\"");
        let parsed: ActivityLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ActivityLevel::LightlyActive);
    }

    #[test]
    fn test_apply_patch_merges() {
        let mut info = UserInfo::default();
        info.apply(UserInfoPatch {
            age: Some("30".into()),
            weight: Some("80".into()),
            ..Default::default()
        });
        info.apply(UserInfoPatch {
            height: Some("180".into()),
            ..Default::default()
        });
        assert_eq!(info.age, "30");
        assert_eq!(info.weight, "80");
        assert_eq!(info.height, "180");
    }

    #[test]
    fn test_partial_document_decodes_with_defaults() {
        let info: UserInfo = serde_json::from_str(r#"{"age": "25"}"#).unwrap();
        assert_eq!(info.age, "25");
        assert_eq!(info.weight, "");
        assert_eq!(info.activity_level, ActivityLevel::Sedentary);
    }
}
