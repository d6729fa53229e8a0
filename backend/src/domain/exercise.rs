//! Exercise data model.
//!
//! Exercises are immutable once stored. The calendar date is the canonical
//! representation; the human-readable `Www Mmm dd yyyy` form is produced only
//! when rendering responses.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::UserId;

/// Maximum allowed length for a description, in characters.
pub const DESCRIPTION_MAX: usize = 256;

/// Largest storable duration, bounded by the `INTEGER` column.
pub const DURATION_MAX: u32 = i32::MAX as u32;

/// Rendering used for dates in API responses, e.g. `Mon Jan 01 2024`.
pub const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Validation errors raised while turning raw exercise input into domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("duration must be a whole number of minutes")]
    InvalidDuration { value: String },
    #[error("duration must not be negative")]
    NegativeDuration { value: String },
    #[error("duration must be at most {max} minutes")]
    DurationTooLarge { value: String, max: u32 },
    #[error("{field} must be a valid date")]
    InvalidDate { field: &'static str, value: String },
}

impl ExerciseValidationError {
    /// Name of the request field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::InvalidDate { field, .. } => field,
            Self::EmptyDescription | Self::DescriptionTooLong { .. } => "description",
            Self::InvalidDuration { .. }
            | Self::NegativeDuration { .. }
            | Self::DurationTooLarge { .. } => "duration",
        }
    }

    /// Stable machine-readable validation code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::EmptyDescription => "empty_description",
            Self::DescriptionTooLong { .. } => "description_too_long",
            Self::InvalidDuration { .. } => "invalid_duration",
            Self::NegativeDuration { .. } => "negative_duration",
            Self::DurationTooLarge { .. } => "duration_too_large",
            Self::InvalidDate { .. } => "invalid_date",
        }
    }

    /// Offending raw value, when one was supplied.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::InvalidDuration { value }
            | Self::NegativeDuration { value }
            | Self::DurationTooLarge { value, .. }
            | Self::InvalidDate { value, .. } => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Stable exercise identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID loaded from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text description of an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Validate and construct a description, trimming surrounding whitespace.
    pub fn new(description: impl AsRef<str>) -> Result<Self, ExerciseValidationError> {
        let trimmed = description.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        if trimmed.chars().count() > DESCRIPTION_MAX {
            return Err(ExerciseValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Exercise duration in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DurationMinutes(u32);

impl DurationMinutes {
    /// Construct a duration from a minute count.
    pub fn new(minutes: u32) -> Result<Self, ExerciseValidationError> {
        if minutes > DURATION_MAX {
            return Err(ExerciseValidationError::DurationTooLarge {
                value: minutes.to_string(),
                max: DURATION_MAX,
            });
        }
        Ok(Self(minutes))
    }

    /// Coerce textual input into a duration.
    ///
    /// Only plain decimal digits are accepted; signs, fractions and
    /// exponents are rejected.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::DurationMinutes;
    ///
    /// assert_eq!(DurationMinutes::parse("30").map(|d| d.get()), Ok(30));
    /// assert!(DurationMinutes::parse("-5").is_err());
    /// assert!(DurationMinutes::parse("12.5").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ExerciseValidationError> {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix('-') {
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ExerciseValidationError::NegativeDuration {
                    value: raw.to_owned(),
                });
            }
        }
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ExerciseValidationError::InvalidDuration {
                value: raw.to_owned(),
            });
        }
        let too_large = || ExerciseValidationError::DurationTooLarge {
            value: raw.to_owned(),
            max: DURATION_MAX,
        };
        let minutes: u32 = trimmed.parse().map_err(|_| too_large())?;
        if minutes > DURATION_MAX {
            return Err(too_large());
        }
        Ok(Self(minutes))
    }

    /// Minute count.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// Calendar date an exercise was performed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseDate(NaiveDate);

impl ExerciseDate {
    /// Wrap a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Current UTC calendar date according to `clock`.
    pub fn today(clock: &dyn Clock) -> Self {
        Self(clock.utc().date_naive())
    }

    /// Parse a client-supplied date.
    ///
    /// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, RFC 3339 and RFC 2822
    /// timestamps (date taken in UTC) and the response form `Www Mmm dd yyyy`.
    /// Returns `None` when no format matches.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::ExerciseDate;
    ///
    /// let date = ExerciseDate::parse("2023-01-01").expect("ISO date");
    /// assert_eq!(date.to_string(), "Sun Jan 01 2023");
    /// assert_eq!(ExerciseDate::parse("Sun Jan 01 2023"), Some(date));
    /// assert!(ExerciseDate::parse("yesterday").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|ts| ts.with_timezone(&Utc).date_naive())
            })
            .or_else(|| {
                NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
                    .ok()
                    .map(|ts| ts.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc2822(trimmed)
                    .ok()
                    .map(|ts| ts.with_timezone(&Utc).date_naive())
            })
            .or_else(|| NaiveDate::parse_from_str(trimmed, DISPLAY_DATE_FORMAT).ok())
            .map(Self)
    }

    /// Access the underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_DATE_FORMAT))
    }
}

/// Raw exercise fields as received from a client.
///
/// Empty `date` values count as absent; the service then falls back to
/// today's date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

impl ExerciseDraft {
    /// Validate the draft into a [`NewExercise`] owned by `user_id`.
    pub fn validate(
        self,
        user_id: UserId,
        today: ExerciseDate,
    ) -> Result<NewExercise, ExerciseValidationError> {
        let description = self
            .description
            .ok_or(ExerciseValidationError::MissingField {
                field: "description",
            })
            .and_then(Description::new)?;
        let duration = self
            .duration
            .filter(|raw| !raw.trim().is_empty())
            .ok_or(ExerciseValidationError::MissingField { field: "duration" })
            .and_then(|raw| DurationMinutes::parse(&raw))?;
        let date = match self.date.filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => ExerciseDate::parse(&raw)
                .ok_or(ExerciseValidationError::InvalidDate { field: "date", value: raw })?,
            None => today,
        };

        Ok(NewExercise {
            user_id,
            description,
            duration,
            date,
        })
    }
}

/// Validated exercise awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub user_id: UserId,
    pub description: Description,
    pub duration: DurationMinutes,
    pub date: ExerciseDate,
}

/// Stored exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseId,
    user_id: UserId,
    description: Description,
    duration: DurationMinutes,
    date: ExerciseDate,
}

impl Exercise {
    /// Attach a storage identifier to a validated exercise.
    pub fn new(id: ExerciseId, new_exercise: NewExercise) -> Self {
        let NewExercise {
            user_id,
            description,
            duration,
            date,
        } = new_exercise;
        Self {
            id,
            user_id,
            description,
            duration,
            date,
        }
    }

    pub fn id(&self) -> ExerciseId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    pub fn date(&self) -> ExerciseDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn date(year: i32, month: u32, day: u32) -> ExerciseDate {
        ExerciseDate::new(NaiveDate::from_ymd_opt(year, month, day).expect("valid date"))
    }

    #[fixture]
    fn today() -> ExerciseDate {
        date(2024, 3, 15)
    }

    #[rstest]
    #[case("2023-01-01", date(2023, 1, 1))]
    #[case(" 2023-01-01 ", date(2023, 1, 1))]
    #[case("2023-01-01T23:30:00Z", date(2023, 1, 1))]
    #[case("2023-01-01T23:30:00-05:00", date(2023, 1, 2))]
    #[case("2023-06-15T08:00:00", date(2023, 6, 15))]
    #[case("Sun, 01 Jan 2023 10:00:00 +0000", date(2023, 1, 1))]
    #[case("Mon Jan 01 2024", date(2024, 1, 1))]
    fn parses_supported_date_formats(#[case] raw: &str, #[case] expected: ExerciseDate) {
        assert_eq!(ExerciseDate::parse(raw), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-date")]
    #[case("2023-13-01")]
    #[case("2023-02-30")]
    #[case("Tue Jan 02 2023")]
    #[case("2023/01/01")]
    #[case("January 1, 2023")]
    #[case("2023-01-01T10:00")]
    fn rejects_unsupported_dates(#[case] raw: &str) {
        assert_eq!(ExerciseDate::parse(raw), None);
    }

    #[rstest]
    #[case(date(2023, 1, 1), "Sun Jan 01 2023")]
    #[case(date(2024, 2, 29), "Thu Feb 29 2024")]
    #[case(date(1999, 12, 31), "Fri Dec 31 1999")]
    fn renders_display_format(#[case] value: ExerciseDate, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case("0", 0)]
    #[case("30", 30)]
    #[case(" 45 ", 45)]
    #[case("2147483647", 2_147_483_647)]
    fn parses_durations(#[case] raw: &str, #[case] expected: u32) {
        let duration = DurationMinutes::parse(raw).expect("valid duration");
        assert_eq!(duration.get(), expected);
    }

    #[rstest]
    #[case("-5", "negative_duration")]
    #[case("12.5", "invalid_duration")]
    #[case("abc", "invalid_duration")]
    #[case("1e3", "invalid_duration")]
    #[case("+3", "invalid_duration")]
    #[case("2147483648", "duration_too_large")]
    #[case("99999999999999999999", "duration_too_large")]
    fn rejects_invalid_durations(#[case] raw: &str, #[case] code: &str) {
        let err = DurationMinutes::parse(raw).expect_err("invalid duration");
        assert_eq!(err.code(), code);
        assert_eq!(err.field(), "duration");
        assert_eq!(err.value(), Some(raw));
    }

    #[rstest]
    fn description_is_trimmed_and_bounded() {
        assert_eq!(
            Description::new("  run ").expect("valid").as_ref(),
            "run"
        );
        assert_eq!(
            Description::new("   "),
            Err(ExerciseValidationError::EmptyDescription)
        );
        assert!(Description::new("x".repeat(DESCRIPTION_MAX + 1)).is_err());
    }

    #[rstest]
    fn draft_defaults_missing_date_to_today(today: ExerciseDate) {
        let draft = ExerciseDraft {
            description: Some("run".to_owned()),
            duration: Some("30".to_owned()),
            date: None,
        };
        let user_id = UserId::random();
        let exercise = draft.validate(user_id.clone(), today).expect("valid draft");
        assert_eq!(exercise.user_id, user_id);
        assert_eq!(exercise.date, today);
        assert_eq!(exercise.duration.get(), 30);
    }

    #[rstest]
    fn draft_treats_blank_date_as_absent(today: ExerciseDate) {
        let draft = ExerciseDraft {
            description: Some("swim".to_owned()),
            duration: Some("10".to_owned()),
            date: Some("  ".to_owned()),
        };
        let exercise = draft.validate(UserId::random(), today).expect("valid draft");
        assert_eq!(exercise.date, today);
    }

    #[rstest]
    #[case(ExerciseDraft { description: None, duration: Some("1".into()), date: None }, "description", "missing_field")]
    #[case(ExerciseDraft { description: Some("run".into()), duration: None, date: None }, "duration", "missing_field")]
    #[case(ExerciseDraft { description: Some("run".into()), duration: Some(" ".into()), date: None }, "duration", "missing_field")]
    #[case(ExerciseDraft { description: Some("run".into()), duration: Some("x".into()), date: None }, "duration", "invalid_duration")]
    #[case(ExerciseDraft { description: Some("run".into()), duration: Some("5".into()), date: Some("soon".into()) }, "date", "invalid_date")]
    fn draft_reports_offending_field(
        today: ExerciseDate,
        #[case] draft: ExerciseDraft,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = draft
            .validate(UserId::random(), today)
            .expect_err("invalid draft");
        assert_eq!(err.field(), field);
        assert_eq!(err.code(), code);
    }
}
