//! Expiration calendar generation
//!
//! Candidates come from two pools relative to `today`:
//! - weekly: the first Friday on or after `today + 7w`, for w in 1..=12
//! - monthly: the third Friday of each of the next three months
//!
//! Candidates outside the DTE window are dropped. The weekly pool is listed
//! before the monthly pool and the result is not re-sorted or de-duplicated,
//! so a monthly date may repeat a weekly one or sort before it.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Number of weekly candidates generated
pub const WEEKLY_CANDIDATES: u32 = 12;
/// Number of monthly candidates generated
pub const MONTHLY_CANDIDATES: u32 = 3;
/// Maximum number of expirations kept
pub const MAX_EXPIRATIONS: usize = 3;

/// Days between two dates (positive when `to` is after `from`)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// First Friday on or after `date`, `None` past the end of the calendar
pub fn next_friday(date: NaiveDate) -> Option<NaiveDate> {
    let today = date.weekday().num_days_from_monday() as i64;
    let friday = Weekday::Fri.num_days_from_monday() as i64;
    date.checked_add_signed(Duration::days((friday - today).rem_euclid(7)))
}

/// Third Friday of the month `months` after the month containing `date`
pub fn third_friday(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    // The 15th is the earliest day a third Friday can fall on
    let fifteenth = date
        .with_day(1)?
        .checked_add_months(Months::new(months))?
        .with_day(15)?;
    next_friday(fifteenth)
}

/// Weekly candidates in generation order
///
/// Candidates that would fall past `NaiveDate::MAX` are skipped.
pub fn weekly_candidates(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=WEEKLY_CANDIDATES)
        .filter_map(|weeks| {
            today
                .checked_add_signed(Duration::days(7 * weeks as i64))
                .and_then(next_friday)
        })
        .collect()
}

/// Monthly (third Friday) candidates in generation order
pub fn monthly_candidates(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=MONTHLY_CANDIDATES)
        .filter_map(|months| third_friday(today, months))
        .collect()
}

/// Up to three expirations inside the DTE window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationCalendar {
    today: NaiveDate,
    dates: Vec<NaiveDate>,
}

impl ExpirationCalendar {
    /// Build the calendar for `[min_dte, max_dte]` (inclusive) as of `today`
    pub fn generate(today: NaiveDate, min_dte: i64, max_dte: i64) -> Self {
        let in_window = |date: &NaiveDate| {
            let dte = days_between(today, *date);
            dte >= min_dte && dte <= max_dte
        };

        let dates = weekly_candidates(today)
            .into_iter()
            .chain(monthly_candidates(today))
            .filter(in_window)
            .take(MAX_EXPIRATIONS)
            .collect();

        Self { today, dates }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Expiry used for every leg of a strategy
    pub fn primary(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// DTE of the primary expiry
    pub fn primary_dte(&self) -> Option<i64> {
        self.primary().map(|expiry| days_between(self.today, expiry))
    }
}
