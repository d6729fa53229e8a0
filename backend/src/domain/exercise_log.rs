//! Exercise log query construction.
//!
//! Turns the raw `from`, `to` and `limit` parameters of a log request into an
//! [`ExerciseFilter`] that persistence adapters evaluate. Every filter is
//! scoped to a single user; date bounds are inclusive and the limit caps the
//! result after filtering.

use crate::domain::{Exercise, ExerciseDate, User, UserId};

/// Raw log parameters as received from a client. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Errors raised when a log parameter cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogQueryError {
    #[error("{field} must be a valid date")]
    InvalidDate { field: &'static str, value: String },
    #[error("limit must be a non-negative integer")]
    InvalidLimit { value: String },
}

impl LogQueryError {
    /// Name of the offending query parameter.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidDate { field, .. } => field,
            Self::InvalidLimit { .. } => "limit",
        }
    }

    /// Stable machine-readable validation code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidLimit { .. } => "invalid_limit",
        }
    }

    /// Raw value that failed to parse.
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidDate { value, .. } | Self::InvalidLimit { value } => value.as_str(),
        }
    }
}

/// Conjunctive filter over a user's exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseFilter {
    user_id: UserId,
    from: Option<ExerciseDate>,
    to: Option<ExerciseDate>,
    limit: Option<u32>,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

fn parse_bound(
    value: Option<&String>,
    field: &'static str,
) -> Result<Option<ExerciseDate>, LogQueryError> {
    present(value)
        .map(|raw| {
            ExerciseDate::parse(raw).ok_or_else(|| LogQueryError::InvalidDate {
                field,
                value: raw.to_owned(),
            })
        })
        .transpose()
}

/// Parse a limit; digit strings beyond `u32::MAX` saturate.
fn parse_limit(value: Option<&String>) -> Result<Option<u32>, LogQueryError> {
    present(value)
        .map(|raw| {
            if !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LogQueryError::InvalidLimit {
                    value: raw.to_owned(),
                });
            }
            Ok(raw.parse::<u32>().unwrap_or(u32::MAX))
        })
        .transpose()
}

impl ExerciseFilter {
    /// Filter matching every exercise of `user_id`.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
            limit: None,
        }
    }

    /// Build the filter for `user` from raw log parameters.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::{ExerciseFilter, LogQuery, UserId};
    ///
    /// let query = LogQuery {
    ///     from: Some("2023-01-01".to_owned()),
    ///     to: None,
    ///     limit: Some("2".to_owned()),
    /// };
    /// let filter = ExerciseFilter::from_query(&UserId::random(), &query).expect("valid query");
    /// assert_eq!(filter.limit(), Some(2));
    /// assert!(filter.to().is_none());
    /// ```
    pub fn from_query(user_id: &UserId, query: &LogQuery) -> Result<Self, LogQueryError> {
        Ok(Self {
            user_id: user_id.clone(),
            from: parse_bound(query.from.as_ref(), "from")?,
            to: parse_bound(query.to.as_ref(), "to")?,
            limit: parse_limit(query.limit.as_ref())?,
        })
    }

    /// Build the filter scoped to a resolved user.
    pub fn for_log(user: &User, query: &LogQuery) -> Result<Self, LogQueryError> {
        Self::from_query(user.id(), query)
    }

    /// Add an inclusive lower date bound.
    pub fn with_from(mut self, from: ExerciseDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Add an inclusive upper date bound.
    pub fn with_to(mut self, to: ExerciseDate) -> Self {
        self.to = Some(to);
        self
    }

    /// Cap the number of returned exercises.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn from(&self) -> Option<ExerciseDate> {
        self.from
    }

    pub fn to(&self) -> Option<ExerciseDate> {
        self.to
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// True when the filter can never match, either because the range is
    /// inverted or the limit is zero.
    pub fn is_unsatisfiable(&self) -> bool {
        let inverted = matches!((self.from, self.to), (Some(from), Some(to)) if from > to);
        inverted || self.limit == Some(0)
    }

    /// Whether `exercise` satisfies the user and date predicates.
    ///
    /// The limit is not considered here; callers apply it after filtering.
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let date = exercise.date();
        exercise.user_id() == &self.user_id
            && self.from.is_none_or(|from| date >= from)
            && self.to.is_none_or(|to| date <= to)
    }
}

/// A user's exercise log as returned by the log query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLog {
    user: User,
    entries: Vec<Exercise>,
}

impl ExerciseLog {
    pub fn new(user: User, entries: Vec<Exercise>) -> Self {
        Self { user, entries }
    }

    /// Split into the owning user and the entries in repository order.
    pub fn into_parts(self) -> (User, Vec<Exercise>) {
        (self.user, self.entries)
    }
}
