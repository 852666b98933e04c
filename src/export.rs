//! Export of the full tracker state to JSON or CSV.

use crate::models::TrackerData;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Erro ao gerar JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Erro ao gerar CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),
    #[error("Saída CSV inválida: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Pretty-printed JSON of the whole aggregate.
pub fn to_json(data: &TrackerData) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Flattens every day's foods and exercises into CSV rows, days in
/// ascending date order. Exercise rows carry their burn in both calorie
/// columns with a unit quantity.
pub fn to_csv(data: &TrackerData) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "date",
        "type",
        "name",
        "quantity",
        "unit",
        "unit_calories",
        "total_calories",
    ])?;

    for (date, day) in &data.daily_data {
        for food in &day.foods {
            writer.write_record([
                date.as_str(),
                "food",
                food.name.as_str(),
                &food.quantity.to_string(),
                food.unit.as_str(),
                &food.calories.to_string(),
                &food.total_calories().to_string(),
            ])?;
        }
        for exercise in &day.exercises {
            writer.write_record([
                date.as_str(),
                "exercise",
                exercise.name.as_str(),
                "1",
                "",
                &exercise.calories.to_string(),
                &exercise.calories.to_string(),
            ])?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
