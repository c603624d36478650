use crate::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use ohno::{IntoAppError, app_err};

/// Date format accepted on the command line and used in headers (`31.12.2021`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// An interval of time used to filter issues by one of their timestamps.
///
/// Both bounds are inclusive: a timestamp `t` lies inside the window when `since <= t <= till`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    since: DateTime<Utc>,
    till: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if `since` is later than `till`.
    pub fn new(since: DateTime<Utc>, till: DateTime<Utc>) -> Result<Self> {
        if since > till {
            return Err(app_err!("time window starts at {since} which is after its end at {till}"));
        }

        Ok(Self { since, till })
    }

    /// Create the window covering the `days` days that end at `till`.
    ///
    /// # Errors
    ///
    /// Returns an error if `days` is negative or the start of the window is not representable.
    pub fn ending_at(till: DateTime<Utc>, days: i64) -> Result<Self> {
        if days < 0 {
            return Err(app_err!("number of days must not be negative, got {days}"));
        }

        let span = Duration::try_days(days).into_app_err_with(|| format!("{days} days is too long a time window"))?;
        let since = till
            .checked_sub_signed(span)
            .into_app_err_with(|| format!("{days} days before {till} is out of range"))?;

        Self::new(since, till)
    }

    /// Parse a `DD.MM.YYYY` date into midnight UTC of that day.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid date in that format.
    pub fn parse_day(text: &str) -> Result<DateTime<Utc>> {
        let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
            .into_app_err_with(|| format!("'{text}' is not a date in DD.MM.YYYY format"))?;

        Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    #[must_use]
    pub const fn since(&self) -> DateTime<Utc> {
        self.since
    }

    #[must_use]
    pub const fn till(&self) -> DateTime<Utc> {
        self.till
    }

    /// Whether `t` falls inside the window, bounds included.
    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.since <= t && t <= self.till
    }

    /// Short label for the window, e.g. `01.12.-31.12.2021`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}-{}", self.since.format("%d.%m."), self.till.format(DATE_FORMAT))
    }
}
