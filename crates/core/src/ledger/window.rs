//! Reporting periods and date windows.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rentdesk_shared::{AppError, AppResult, types::parse_timestamp};
use serde::{Deserialize, Serialize};

/// Named reporting period, ending now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Since the first day of the current month.
    Month,
    /// Since the first day of the current calendar quarter.
    Quarter,
    /// Since January 1 of the current year.
    Year,
    /// No bound.
    #[default]
    All,
}

impl Period {
    /// First instant of the period containing `now`, or `None` for [`Period::All`].
    #[must_use]
    pub fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let year = now.year();
        let first_month = match self {
            Self::Month => now.month(),
            Self::Quarter => (now.month0() / 3) * 3 + 1,
            Self::Year => 1,
            Self::All => return None,
        };
        NaiveDate::from_ymd_opt(year, first_month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}

impl std::str::FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            other => Err(AppError::bad_request(format!(
                "period must be one of month, quarter, year, all; got {other}"
            ))),
        }
    }
}

/// Inclusive time bounds on a timestamp column. Both ends optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    /// Lower bound (inclusive).
    pub from: Option<DateTime<Utc>>,
    /// Upper bound (inclusive).
    pub to: Option<DateTime<Utc>>,
}

impl DateWindow {
    /// A window without bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Parses optional `from`/`to` strings.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if either value is not a date.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> AppResult<Self> {
        Ok(Self {
            from: from.map(|s| parse_bound("from", s)).transpose()?,
            to: to.map(|s| parse_bound("to", s)).transpose()?,
        })
    }

    /// Resolves the window of a summary request.
    ///
    /// Explicit `from`/`to` take precedence over `period`; without them the
    /// period runs from its start until `now`, and `all` (the default) is unbounded.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for malformed dates.
    pub fn resolve(
        period: Option<Period>,
        from: Option<&str>,
        to: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        if from.is_some() || to.is_some() {
            return Self::parse(from, to);
        }
        Ok(period.unwrap_or_default().start(now).map_or_else(Self::unbounded, |start| Self {
            from: Some(start),
            to: Some(now),
        }))
    }

    /// Whether `at` falls inside the window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| at >= from) && self.to.is_none_or(|to| at <= to)
    }
}

fn parse_bound(name: &str, value: &str) -> AppResult<DateTime<Utc>> {
    parse_timestamp(value)
        .ok_or_else(|| AppError::bad_request(format!("{name} must be an ISO-8601 date")))
}
