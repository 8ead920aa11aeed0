//! Rent calendar engine: compound escalation amounts and month views derived
//! from a property's contract terms.
//!
//! Every function in this module is pure. Dates are [`NaiveDate`] values, so
//! comparisons happen at civil-date granularity with no time-of-day or
//! timezone component involved.

pub mod escalation;
pub mod month;
pub mod view;

use chrono::NaiveDate;

use crate::errors::{LedgerError, Result};

pub use escalation::{
    compute_rent_for_date, escalation_schedule, escalation_steps, round_currency,
    validate_terms, EscalationStep,
};
pub use month::{months_between, CalendarMonth};
pub use view::{build_month_view, build_view_for, CalendarCell, MonthView};

/// Format accepted for dates crossing the engine boundary.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_civil_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let invalid =
        || LedgerError::invalid(format!("`{}` is not a valid YYYY-MM-DD date", trimmed));
    if !has_fixed_shape(trimmed, &[4, 7], 10) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).map_err(|_| invalid())
}

/// True when `raw` is exactly `len` bytes, with `-` at each of `dashes` and
/// ASCII digits everywhere else.
pub(crate) fn has_fixed_shape(raw: &str, dashes: &[usize], len: usize) -> bool {
    raw.len() == len
        && raw.bytes().enumerate().all(|(idx, byte)| {
            if dashes.contains(&idx) {
                byte == b'-'
            } else {
                byte.is_ascii_digit()
            }
        })
}
