use crate::api::schemas::{non_empty, readable_date, required_text};
use crate::domain::date::parse_calendar_date;
use crate::domain::exercise::{Exercise, ExerciseLog, LogQuery};
use crate::error::{AppError, Result};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};
use time::Date;
use uuid::Uuid;

/// Form posts carry every value as text, JSON bodies may send a number.
/// Any other JSON value lands in `Other` and fails validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseRequest {
    pub user_id: Option<String>,
    pub description: Option<String>,
    pub duration: Option<NumberOrText>,
    pub date: Option<String>,
}

impl AddExerciseRequest {
    /// Checks fields in a fixed order and reports the first failure.
    ///
    /// `today` is used when no date was sent.
    ///
    /// # Errors
    /// Returns a message naming the first invalid field.
    pub fn validate(self, today: Date) -> std::result::Result<(String, Exercise), String> {
        let user_id = non_empty(self.user_id).ok_or("userId is required")?;
        let description = required_text(self.description, "description")?;

        let duration = match self.duration {
            None => return Err("duration is required".into()),
            Some(NumberOrText::Text(text)) if text.trim().is_empty() => return Err("duration is required".into()),
            Some(NumberOrText::Text(text)) => text.trim().parse::<f64>().map_err(|_| "duration must be a number")?,
            Some(NumberOrText::Number(n)) => n,
            Some(NumberOrText::Other(_)) => return Err("duration must be a number".into()),
        };
        if !duration.is_finite() {
            return Err("duration must be a number".into());
        }

        let date = match non_empty(self.date) {
            Some(raw) => parse_calendar_date(&raw).ok_or("date is invalid")?,
            None => today,
        };

        Ok((user_id, Exercise::new(description, duration, date)))
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub description: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration: f64,
    pub date: String,
}

impl ExerciseResponse {
    pub(crate) fn new(user_id: Uuid, exercise: Exercise) -> Result<Self> {
        Ok(Self {
            id: user_id,
            date: readable_date(exercise.date())?,
            duration: exercise.duration(),
            description: exercise.description,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogParams {
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

impl LogParams {
    /// Splits the parameters into the user id and the bounds to apply.
    ///
    /// # Errors
    /// Returns `AppError::MissingParameter` if no user id was given.
    /// Returns `AppError::Validation` if a bound is malformed.
    pub fn into_query(self) -> Result<(String, LogQuery)> {
        let user_id = non_empty(self.user_id).ok_or_else(|| AppError::MissingParameter("unknown userId".into()))?;

        let from = parse_bound(self.from, "from")?;
        let to = parse_bound(self.to, "to")?;
        let limit = match non_empty(self.limit) {
            Some(raw) => {
                let parsed =
                    raw.trim().parse::<i64>().map_err(|_| AppError::validation("limit must be an integer"))?;
                // Negative limits select nothing
                Some(usize::try_from(parsed.max(0)).unwrap_or(usize::MAX))
            }
            None => None,
        };

        Ok((user_id, LogQuery { from, to, limit }))
    }
}

fn parse_bound(value: Option<String>, name: &str) -> Result<Option<Date>> {
    non_empty(value)
        .map(|raw| parse_calendar_date(&raw).ok_or_else(|| AppError::validation(format!("{name} is invalid"))))
        .transpose()
}

#[derive(Debug, Serialize)]
pub struct LogEntryResponse {
    pub description: String,
    #[serde(serialize_with = "serialize_minutes")]
    pub duration: f64,
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub log: Vec<LogEntryResponse>,
    pub count: usize,
}

impl TryFrom<ExerciseLog> for LogResponse {
    type Error = AppError;

    fn try_from(log: ExerciseLog) -> Result<Self> {
        let entries = log
            .entries
            .into_iter()
            .map(|entry| -> Result<LogEntryResponse> {
                Ok(LogEntryResponse {
                    date: readable_date(entry.date)?,
                    duration: entry.duration,
                    description: entry.description,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { id: log.user.id, username: log.user.username, count: entries.len(), log: entries })
    }
}

/// Whole minutes are written as integers so `30` does not come back as `30.0`.
#[allow(clippy::trivially_copy_pass_by_ref, clippy::float_cmp, clippy::cast_possible_truncation)]
fn serialize_minutes<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::User;
    use time::macros::date;

    fn add_request(duration: Option<NumberOrText>, date: Option<&str>) -> AddExerciseRequest {
        AddExerciseRequest {
            user_id: Some("5f0c1c2e-0000-4000-8000-000000000000".into()),
            description: Some("run".into()),
            duration,
            date: date.map(str::to_string),
        }
    }

    fn log_params(user_id: Option<&str>, from: Option<&str>, to: Option<&str>, limit: Option<&str>) -> LogParams {
        LogParams {
            user_id: user_id.map(str::to_string),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_add_accepts_number_and_text_durations() {
        let today = date!(2024 - 06 - 01);

        let (_, from_json) = add_request(Some(NumberOrText::Number(30.0)), None).validate(today).unwrap();
        let (_, from_form) = add_request(Some(NumberOrText::Text("30".into())), None).validate(today).unwrap();

        assert_eq!(from_json, from_form);
        assert_eq!(from_json.duration(), 30.0);
    }

    #[test]
    fn test_add_defaults_to_today() {
        let today = date!(2024 - 06 - 01);
        let (_, exercise) = add_request(Some(NumberOrText::Number(10.0)), None).validate(today).unwrap();
        assert_eq!(exercise.date(), today);

        let (_, blank) = add_request(Some(NumberOrText::Number(10.0)), Some("")).validate(today).unwrap();
        assert_eq!(blank.date(), today);
    }

    #[test]
    fn test_add_uses_supplied_date() {
        let (_, exercise) =
            add_request(Some(NumberOrText::Number(30.0)), Some("2023-01-15")).validate(date!(2024 - 06 - 01)).unwrap();
        assert_eq!(exercise.date(), date!(2023 - 01 - 15));
    }

    #[test]
    fn test_add_reports_first_invalid_field() {
        let today = date!(2024 - 06 - 01);

        let mut request = add_request(None, Some("garbage"));
        request.description = None;
        assert_eq!(request.validate(today).unwrap_err(), "description is required");

        assert_eq!(add_request(None, Some("garbage")).validate(today).unwrap_err(), "duration is required");

        let bad_number = add_request(Some(NumberOrText::Text("half an hour".into())), None);
        assert_eq!(bad_number.validate(today).unwrap_err(), "duration must be a number");

        let bad_date = add_request(Some(NumberOrText::Number(5.0)), Some("garbage"));
        assert_eq!(bad_date.validate(today).unwrap_err(), "date is invalid");

        let mut no_user = add_request(Some(NumberOrText::Number(5.0)), None);
        no_user.user_id = Some(String::new());
        assert_eq!(no_user.validate(today).unwrap_err(), "userId is required");
    }

    #[test]
    fn test_description_is_trimmed_and_nul_rejected() {
        let today = date!(2024 - 06 - 01);

        let mut padded = add_request(Some(NumberOrText::Number(5.0)), None);
        padded.description = Some("  run  ".into());
        assert_eq!(padded.validate(today).unwrap().1.description(), "run");

        let mut with_nul = add_request(Some(NumberOrText::Number(5.0)), None);
        with_nul.description = Some("run\u{0}".into());
        assert_eq!(with_nul.validate(today).unwrap_err(), "description is invalid");
    }

    #[test]
    fn test_non_numeric_json_duration_is_rejected() {
        let request: AddExerciseRequest = serde_json::from_value(serde_json::json!({
            "userId": "5f0c1c2e-0000-4000-8000-000000000000",
            "description": "run",
            "duration": true,
        }))
        .unwrap();
        assert_eq!(request.validate(date!(2024 - 06 - 01)).unwrap_err(), "duration must be a number");

        let request: AddExerciseRequest =
            serde_json::from_value(serde_json::json!({"userId": "x", "description": "run", "duration": [1]})).unwrap();
        assert_eq!(request.validate(date!(2024 - 06 - 01)).unwrap_err(), "duration must be a number");
    }

    #[test]
    fn test_non_finite_duration_is_rejected() {
        let request = add_request(Some(NumberOrText::Text("inf".into())), None);
        assert_eq!(request.validate(date!(2024 - 06 - 01)).unwrap_err(), "duration must be a number");
    }

    #[test]
    fn test_log_params_require_user_id() {
        let err = log_params(None, None, None, None).into_query().unwrap_err();
        assert!(matches!(err, AppError::MissingParameter(ref m) if m == "unknown userId"));

        let err = log_params(Some(""), None, None, None).into_query().unwrap_err();
        assert!(matches!(err, AppError::MissingParameter(_)));
    }

    #[test]
    fn test_log_params_parse_bounds() {
        let (user_id, query) =
            log_params(Some("abc"), Some("2023-01-01"), Some("2023-01-31"), Some("2")).into_query().unwrap();

        assert_eq!(user_id, "abc");
        assert_eq!(
            query,
            LogQuery { from: Some(date!(2023 - 01 - 01)), to: Some(date!(2023 - 01 - 31)), limit: Some(2) }
        );
    }

    #[test]
    fn test_log_params_reject_malformed_values() {
        let err = log_params(Some("abc"), Some("soon"), None, None).into_query().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "from is invalid"));

        let err = log_params(Some("abc"), None, None, Some("many")).into_query().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "limit must be an integer"));
    }

    #[test]
    fn test_negative_limit_selects_nothing() {
        let (_, query) = log_params(Some("abc"), None, None, Some("-3")).into_query().unwrap();
        assert_eq!(query.limit, Some(0));
    }

    #[test]
    fn test_log_response_shape() {
        let user = User { id: Uuid::new_v4(), username: "runner".into() };
        let log = ExerciseLog {
            user: user.clone(),
            entries: vec![
                Exercise::new("run".into(), 30.0, date!(2023 - 01 - 15)),
                Exercise::new("swim".into(), 12.5, date!(2023 - 01 - 16)),
            ],
        };

        let json = serde_json::to_value(LogResponse::try_from(log).unwrap()).unwrap();

        assert_eq!(json["_id"], user.id.to_string());
        assert_eq!(json["username"], "runner");
        assert_eq!(json["count"], 2);
        assert_eq!(json["log"][0], serde_json::json!({"description": "run", "duration": 30, "date": "Sun Jan 15 2023"}));
        assert_eq!(json["log"][1]["duration"], 12.5);
    }

    #[test]
    fn test_exercise_response_shape() {
        let user_id = Uuid::new_v4();
        let exercise = Exercise::new("run".into(), 30.0, date!(2023 - 01 - 15));

        let json = serde_json::to_value(ExerciseResponse::new(user_id, exercise).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"_id": user_id.to_string(), "description": "run", "duration": 30, "date": "Sun Jan 15 2023"})
        );
    }
}
