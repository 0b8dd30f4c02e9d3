use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// Duration as sent by clients: either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DurationInput {
    Number(f64),
    Text(String),
}

/// Request payload for adding or updating an exercise.
///
/// Every field is optional on the wire so a missing field is reported by
/// [`ExerciseRequest::parse`] alongside the other validation failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ExerciseRequest {
    #[validate(
        required(message = "Username is required"),
        length(min = 1, message = "Username must not be empty")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description must not be empty")
    )]
    pub description: Option<String>,

    #[validate(
        required(message = "Duration is required"),
        custom(function = "validate_duration")
    )]
    pub duration: Option<DurationInput>,

    #[validate(
        required(message = "Date is required"),
        custom(function = "validate_date")
    )]
    #[schema(example = "2024-01-01")]
    pub date: Option<String>,
}

/// Typed exercise fields, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseFields {
    pub username: String,
    pub description: String,
    pub duration: f64,
    pub date: DateTime<Utc>,
}

impl ExerciseRequest {
    /// Validates the payload and coerces `duration` and `date` into their
    /// typed forms.
    pub fn parse(&self) -> Result<ExerciseFields, ValidationErrors> {
        self.validate()?;

        let (Some(username), Some(description), Some(duration), Some(date)) = (
            &self.username,
            &self.description,
            &self.duration,
            &self.date,
        ) else {
            unreachable!("required fields checked by validate()");
        };

        Ok(ExerciseFields {
            username: username.clone(),
            description: description.clone(),
            duration: coerce_duration(duration).map_err(|e| single_error("duration", e))?,
            date: coerce_date(date).map_err(|e| single_error("date", e))?,
        })
    }
}

/// Converts a client-supplied duration to a finite number.
pub fn coerce_duration(input: &DurationInput) -> Result<f64, ValidationError> {
    let value = match input {
        DurationInput::Number(n) => *n,
        DurationInput::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid("invalid_duration", "Duration must be a number"))?,
    };

    if !value.is_finite() {
        return Err(invalid("invalid_duration", "Duration must be a number"));
    }
    Ok(value)
}

/// Parses an RFC 3339 date-time, a naive date-time (taken as UTC) or a plain
/// `YYYY-MM-DD` date (midnight UTC).
pub fn coerce_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            invalid(
                "invalid_date",
                "Date must be YYYY-MM-DD or an RFC 3339 date-time",
            )
        })
}

fn validate_duration(input: &DurationInput) -> Result<(), ValidationError> {
    coerce_duration(input).map(|_| ())
}

fn validate_date(raw: &str) -> Result<(), ValidationError> {
    coerce_date(raw).map(|_| ())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn single_error(field: &'static str, error: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}
