//! Derived nutrition metrics: BMI, basal metabolic rate and total daily
//! energy expenditure, computed from the free-text profile fields.

use serde::Serialize;

use crate::models::{Gender, UserInfo};

/// Computed metrics. All zeroes (and an empty category) when the profile
/// is incomplete; the calculator never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// Rounded to one decimal place.
    pub bmi: f64,
    /// kcal/day, rounded to the nearest integer.
    pub bmr: i64,
    /// kcal/day, rounded to the nearest integer.
    pub tdee: i64,
    pub bmi_category: String,
}

fn parse_positive(value: &str) -> Option<f64> {
    let parsed: f64 = value.trim().parse().ok()?;
    if parsed > 0.0 && parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}

pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Abaixo do Peso"
    } else if bmi < 25.0 {
        "Peso Normal"
    } else if bmi < 30.0 {
        "Sobrepeso"
    } else if bmi < 35.0 {
        "Obesidade Grau I"
    } else if bmi < 40.0 {
        "Obesidade Grau II"
    } else {
        "Obesidade Grau III"
    }
}

/// Calculates BMI, BMR and TDEE from the profile.
///
/// BMR uses Katch-McArdle when a body-fat percentage is present, otherwise
/// the revised Harris-Benedict formula per sex. TDEE applies the activity
/// multiplier (1.2 fallback is handled by `ActivityLevel` decoding).
pub fn calculate(info: &UserInfo) -> Metrics {
    let age = parse_positive(&info.age);
    let height = parse_positive(&info.height);
    let weight = parse_positive(&info.weight);

    let (age, height, weight, gender) = match (age, height, weight, info.gender) {
        (Some(a), Some(h), Some(w), Some(g)) => (a, h, w, g),
        _ => return Metrics::default(),
    };

    let height_m = height / 100.0;
    let bmi = weight / (height_m * height_m);

    let body_fat = parse_positive(&info.body_fat).unwrap_or(0.0);
    let bmr = if body_fat > 0.0 {
        let lean_mass = weight * (1.0 - body_fat / 100.0);
        370.0 + 21.6 * lean_mass
    } else {
        match gender {
            Gender::Male => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age,
            Gender::Female => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age,
        }
    };

    let tdee = bmr * info.activity_level.multiplier();

    Metrics {
        bmi: (bmi * 10.0).round() / 10.0,
        bmr: bmr.round() as i64,
        tdee: tdee.round() as i64,
        bmi_category: bmi_category(bmi).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityLevel;

    fn profile(age: &str, gender: Option<Gender>, height: &str, weight: &str) -> UserInfo {
        UserInfo {
            age: age.to_string(),
            gender,
            height: height.to_string(),
            weight: weight.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_profile_produces_positive_metrics() {
        let info = profile("30", Some(Gender::Male), "180", "80");
        let metrics = calculate(&info);
        assert!(metrics.bmi > 0.0);
        assert!(metrics.bmr > 0);
        assert!(metrics.tdee >= metrics.bmr);
        assert!(!metrics.bmi_category.is_empty());
    }

    #[test]
    fn test_missing_field_yields_all_zero() {
        for broken in [
            profile("", Some(Gender::Male), "180", "80"),
            profile("30", None, "180", "80"),
            profile("30", Some(Gender::Male), "", "80"),
            profile("30", Some(Gender::Male), "180", "abc"),
            profile("0", Some(Gender::Male), "180", "80"),
        ] {
            assert_eq!(calculate(&broken), Metrics::default());
        }
    }

    #[test]
    fn test_harris_benedict_male() {
        let info = profile("30", Some(Gender::Male), "180", "80");
        let metrics = calculate(&info);
        // 88.362 + 13.397*80 + 4.799*180 - 5.677*30 = 1853.632
        assert_eq!(metrics.bmr, 1854);
        assert_eq!(metrics.tdee, (1853.632_f64 * 1.2).round() as i64);
    }

    #[test]
    fn test_harris_benedict_female() {
        let info = profile("25", Some(Gender::Female), "165", "60");
        let metrics = calculate(&info);
        // 447.593 + 9.247*60 + 3.098*165 - 4.330*25 = 1405.333
        assert_eq!(metrics.bmr, 1405);
    }

    #[test]
    fn test_katch_mcardle_used_when_body_fat_set() {
        let mut info = profile("30", Some(Gender::Male), "180", "80");
        info.body_fat = "20".to_string();
        let metrics = calculate(&info);
        // lean mass 64kg -> 370 + 21.6*64 = 1752.4
        assert_eq!(metrics.bmr, 1752);
    }

    #[test]
    fn test_activity_multiplier_applied() {
        let mut info = profile("30", Some(Gender::Male), "180", "80");
        info.activity_level = ActivityLevel::ExtraActive;
        let metrics = calculate(&info);
        assert_eq!(metrics.tdee, (1853.632_f64 * 1.9).round() as i64);
    }

    #[test]
    fn test_bmi_rounded_to_one_decimal() {
        let info = profile("30", Some(Gender::Male), "180", "80");
        let metrics = calculate(&info);
        // 80 / 1.8^2 = 24.691 -> 24.7
        assert_eq!(metrics.bmi, 24.7);
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(bmi_category(18.4), "Abaixo do Peso");
        assert_eq!(bmi_category(18.5), "Peso Normal");
        assert_eq!(bmi_category(24.9), "Peso Normal");
        assert_eq!(bmi_category(25.0), "Sobrepeso");
        assert_eq!(bmi_category(30.0), "Obesidade Grau I");
        assert_eq!(bmi_category(35.0), "Obesidade Grau II");
        assert_eq!(bmi_category(40.0), "Obesidade Grau III");
    }
}
