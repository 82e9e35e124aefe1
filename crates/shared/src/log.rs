use chrono::NaiveDate;
use thiserror::Error;

use crate::{date, model::Exercise};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogQueryError {
    #[error("invalid {field} date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogResult {
    pub entries: Vec<Exercise>,
    pub count: usize,
}

/// Runs a log query over a user's exercise list, already read from the
/// store in insertion order.
///
/// `from`/`to` are inclusive calendar-date bounds and must be valid dates
/// when present; the whole query fails otherwise. `limit` truncates the
/// *filtered* sequence, keeping the earliest-submitted entries. A negative
/// limit is ignored. `count` is always the exact length of `entries`.
pub fn query_log(
    exercises: Vec<Exercise>,
    from: Option<&str>,
    to: Option<&str>,
    limit: Option<i64>,
) -> Result<LogResult, LogQueryError> {
    let from = parse_bound(from, "from")?;
    let to = parse_bound(to, "to")?;

    let mut entries: Vec<Exercise> = exercises
        .into_iter()
        .filter(|e| from.map_or(true, |f| e.date >= f))
        .filter(|e| to.map_or(true, |t| e.date <= t))
        .collect();

    if let Some(limit) = limit {
        if limit >= 0 {
            entries.truncate(limit as usize);
        }
    }

    let count = entries.len();
    Ok(LogResult { entries, count })
}

fn parse_bound(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, LogQueryError> {
    match value {
        None => Ok(None),
        Some(s) => date::parse_date(s)
            .map(Some)
            .ok_or_else(|| LogQueryError::InvalidDate { field, value: s.to_owned() }),
    }
}
