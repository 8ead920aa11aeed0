use std::{fmt, str::FromStr};

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::Serialize;

use crate::errors::{LedgerError, Result};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar-month difference between `start` and `date`; day-of-month is ignored.
pub fn months_between(start: NaiveDate, date: NaiveDate) -> i32 {
    (date.year() - start.year()) * 12 + (date.month() as i32 - start.month() as i32)
}

/// A displayed `(year, month)` pair, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CalendarMonth(NaiveDate);

impl CalendarMonth {
    /// Validates `month` (1..=12) and the year range.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::invalid(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| LedgerError::invalid(format!("year {} is out of range", year)))
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self(date - chrono::Duration::days(date.day0() as i64))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Returns the date for `day`, or `None` when the month is shorter.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.0.with_day(day)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Weekday of day 1 counted from Sunday (Sunday = 0).
    pub fn leading_blank_count(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Weekday of day 1 counted from an arbitrary first column.
    pub fn leading_blanks_from(&self, week_start: Weekday) -> u32 {
        (self.leading_blank_count() + 7 - week_start.num_days_from_sunday()) % 7
    }

    /// The month `months` after this one, or `None` past the representable range.
    pub fn plus_months(&self, months: u32) -> Option<Self> {
        self.0.checked_add_months(Months::new(months)).map(Self)
    }

    /// Following month; saturates at the end of the representable range.
    pub fn next(self) -> Self {
        self.plus_months(1).unwrap_or(self)
    }

    /// Preceding month; saturates at the start of the representable range.
    pub fn previous(self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .map(Self)
            .unwrap_or(self)
    }

    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.0.month0() as usize], self.year())
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for CalendarMonth {
    type Err = LedgerError;

    /// Parses `YYYY-MM`.
    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let invalid =
            || LedgerError::invalid(format!("`{}` is not a valid YYYY-MM month", trimmed));
        if !super::has_fixed_shape(trimmed, &[4], 7) {
            return Err(invalid());
        }
        let year: i32 = trimmed[..4].parse().map_err(|_| invalid())?;
        let month: u32 = trimmed[5..].parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
