use serde::{Deserialize, Serialize};

use crate::{
    log::LogResult,
    model::{Exercise, User},
    types::Uuid,
};

/// Response dates use the long display form, e.g. "Thu Jan 05 2023"
pub const DATE_DISPLAY_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { username: user.username, id: user.id }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExerciseResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub description: String,
    pub duration: u32,
    pub date: String,
}

impl AddExerciseResponse {
    pub fn new(user: User, exercise: Exercise) -> Self {
        Self {
            username: user.username,
            id: user.id,
            description: exercise.description,
            duration: exercise.duration,
            date: exercise.date.format(DATE_DISPLAY_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: u32,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: exercise.date.format(DATE_DISPLAY_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub log: Vec<LogEntry>,
    pub count: usize,
}

impl LogResponse {
    pub fn new(user: User, result: LogResult) -> Self {
        Self {
            username: user.username,
            id: user.id,
            log: result.entries.into_iter().map(LogEntry::from).collect(),
            count: result.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn dates_render_in_display_form() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(date.format(DATE_DISPLAY_FORMAT).to_string(), "Thu Jan 05 2023");
    }

    #[test]
    fn id_serializes_as_underscore_id() {
        let user = User { id: Uuid::new_v4(), username: "alice".into() };
        let json = serde_json::to_value(UserResponse::from(user.clone())).unwrap();
        assert_eq!(json["_id"], user.id.to_string());
        assert_eq!(json["username"], "alice");
    }
}
