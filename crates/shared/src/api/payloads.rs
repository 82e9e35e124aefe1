use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUserPayload {
    pub username: String,
}

/// Raw duration as submitted. Form bodies always deliver a string; JSON
/// clients may send a number. Validation happens in [`DurationField::minutes`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Number(i64),
    // A fractional JSON number is caught here so it reports as an invalid
    // duration instead of a deserialization failure
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("duration must be a positive whole number of minutes, got {value:?}")]
pub struct InvalidDuration {
    pub value: String,
}

impl DurationField {
    /// The validated duration in minutes: a positive integer, whether it
    /// arrived as a number or a numeric string
    pub fn minutes(&self) -> Result<u32, InvalidDuration> {
        let parsed = match self {
            DurationField::Number(n) => Some(*n),
            DurationField::Float(_) => None,
            DurationField::Text(s) => s.trim().parse::<i64>().ok(),
        };

        match parsed {
            Some(n) if n > 0 && n <= i64::from(u32::MAX) => Ok(n as u32),
            _ => Err(InvalidDuration { value: self.raw() }),
        }
    }

    fn raw(&self) -> String {
        match self {
            DurationField::Number(n) => n.to_string(),
            DurationField::Float(f) => f.to_string(),
            DurationField::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExercisePayload {
    pub user_id: String,
    pub description: String,
    pub duration: DurationField,
    pub date: Option<String>,
}

/// Query-string parameters for the log endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogParams {
    pub user_id: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<i64>,
}
