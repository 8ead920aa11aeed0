use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use super::escalation::{compute_rent_for_date, validate_terms};
use super::month::{months_between, CalendarMonth};
use crate::errors::Result;
use crate::ledger::Property;

/// Annotations for a single day of a rendered month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_contract_boundary: bool,
    pub is_rent_due: bool,
    pub is_escalation_anniversary: bool,
    /// Present only when `is_rent_due` is set.
    pub amount_due: Option<f64>,
}

/// A month of [`CalendarCell`]s plus the grid offset of day 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthView {
    pub month: CalendarMonth,
    /// Weekday of day 1 counted from Sunday.
    pub leading_blank_count: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthView {
    pub fn year(&self) -> i32 {
        self.month.year()
    }

    pub fn month_number(&self) -> u32 {
        self.month.month()
    }

    pub fn leading_blanks_from(&self, week_start: Weekday) -> u32 {
        self.month.leading_blanks_from(week_start)
    }

    pub fn cell(&self, day: u32) -> Option<&CalendarCell> {
        self.cells.get(day.checked_sub(1)? as usize)
    }

    pub fn due_cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.cells.iter().filter(|cell| cell.is_rent_due)
    }
}

/// Builds the month view for `(year, month)`; `month` is 1-based.
pub fn build_month_view(
    property: &Property,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<MonthView> {
    build_view_for(property, CalendarMonth::new(year, month)?, today)
}

pub fn build_view_for(
    property: &Property,
    month: CalendarMonth,
    today: NaiveDate,
) -> Result<MonthView> {
    validate_terms(property)?;
    let start = property.contract_start_date;
    let end = property.contract_end_date;

    // Same for every day of the month; shared with the amount computation.
    let months_diff = months_between(start, month.first_day());
    let anniversary_month =
        months_diff > 0 && (months_diff as i64) % (property.increase_frequency as i64) == 0;

    let mut cells = Vec::with_capacity(month.days_in_month() as usize);
    for date in (1..=month.days_in_month()).filter_map(|day| month.day(day)) {
        let day = date.day();
        let in_contract = start <= date && date <= end;
        let is_rent_due = in_contract && day == property.rent_due_day;
        let amount_due = if is_rent_due {
            Some(compute_rent_for_date(property, date)?)
        } else {
            None
        };
        cells.push(CalendarCell {
            day,
            date,
            is_today: date == today,
            is_contract_boundary: date == start || date == end,
            is_rent_due,
            is_escalation_anniversary: anniversary_month && day == start.day() && date <= end,
            amount_due,
        });
    }

    debug!(
        property = %property.id,
        month = %month,
        due_days = cells.iter().filter(|cell| cell.is_rent_due).count(),
        "built rent calendar"
    );

    Ok(MonthView {
        month,
        leading_blank_count: month.leading_blank_count(),
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LedgerError;
    use crate::ledger::property::tests::sample_property;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn far_away_today() -> NaiveDate {
        date(2000, 1, 1)
    }

    #[test]
    fn one_cell_per_day_in_order() {
        let property = sample_property();
        let view = build_month_view(&property, 2024, 2, far_away_today()).unwrap();
        assert_eq!(view.cells.len(), 29);
        let days: Vec<_> = view.cells.iter().map(|cell| cell.day).collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
        assert_eq!(view.leading_blank_count, 4);
        assert_eq!(view.year(), 2024);
        assert_eq!(view.month_number(), 2);
    }

    #[test]
    fn due_day_carries_escalated_amount() {
        let property = sample_property();
        let view = build_month_view(&property, 2024, 7, far_away_today()).unwrap();
        let due: Vec<_> = view.due_cells().collect();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].day, 5);
        assert_eq!(due[0].amount_due, Some(1100.0));
        assert!(view
            .cells
            .iter()
            .filter(|cell| !cell.is_rent_due)
            .all(|cell| cell.amount_due.is_none()));
    }

    #[test]
    fn due_day_beyond_month_length_never_matches() {
        let mut property = sample_property();
        property.rent_due_day = 31;
        let april = build_month_view(&property, 2024, 4, far_away_today()).unwrap();
        assert_eq!(april.due_cells().count(), 0);
        let may = build_month_view(&property, 2024, 5, far_away_today()).unwrap();
        assert_eq!(may.due_cells().count(), 1);
    }

    #[test]
    fn months_outside_contract_have_no_due_days() {
        let property = sample_property();
        for (year, month) in [(2023, 12), (2024, 1), (2026, 1), (2027, 5)] {
            let view = build_month_view(&property, year, month, far_away_today()).unwrap();
            assert!(
                view.cells.iter().all(|cell| !cell.is_rent_due),
                "unexpected due day in {year}-{month}"
            );
        }
    }

    #[test]
    fn due_day_respects_partial_first_month() {
        let mut property = sample_property();
        property.rent_due_day = 20;
        let view = build_month_view(&property, 2024, 1, far_away_today()).unwrap();
        let due = view.cell(20).unwrap();
        assert!(due.is_rent_due);
        assert_eq!(due.amount_due, Some(1000.0));
    }

    #[test]
    fn contract_boundaries_are_flagged() {
        let property = sample_property();
        let start = build_month_view(&property, 2024, 1, far_away_today()).unwrap();
        let flagged: Vec<_> = start
            .cells
            .iter()
            .filter(|cell| cell.is_contract_boundary)
            .map(|cell| cell.day)
            .collect();
        assert_eq!(flagged, vec![15]);
        let end = build_month_view(&property, 2025, 12, far_away_today()).unwrap();
        assert!(end.cell(31).unwrap().is_contract_boundary);
    }

    #[test]
    fn today_is_flagged_only_in_its_month() {
        let property = sample_property();
        let today = date(2024, 3, 9);
        let march = build_month_view(&property, 2024, 3, today).unwrap();
        let flagged: Vec<_> = march.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].day, 9);
        let march_next_year = build_month_view(&property, 2025, 3, today).unwrap();
        assert!(march_next_year.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn anniversaries_fall_on_start_day_every_frequency_months() {
        let property = sample_property();
        let marked = |year, month| {
            build_month_view(&property, year, month, far_away_today())
                .unwrap()
                .cells
                .iter()
                .filter(|cell| cell.is_escalation_anniversary)
                .map(|cell| cell.day)
                .collect::<Vec<_>>()
        };
        assert_eq!(marked(2024, 1), Vec::<u32>::new());
        assert_eq!(marked(2024, 6), Vec::<u32>::new());
        assert_eq!(marked(2024, 7), vec![15]);
        assert_eq!(marked(2025, 1), vec![15]);
        assert_eq!(marked(2025, 4), Vec::<u32>::new());
        // Past the contract end.
        assert_eq!(marked(2026, 1), Vec::<u32>::new());
    }

    #[test]
    fn anniversary_skipped_when_month_is_shorter_than_start_day() {
        let mut property = sample_property();
        property.contract_start_date = date(2024, 1, 31);
        property.increase_frequency = 3;
        let april = build_month_view(&property, 2024, 4, far_away_today()).unwrap();
        assert!(april.cells.iter().all(|c| !c.is_escalation_anniversary));
        let july = build_month_view(&property, 2024, 7, far_away_today()).unwrap();
        assert!(july.cell(31).unwrap().is_escalation_anniversary);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let mut property = sample_property();
        assert!(matches!(
            build_month_view(&property, 2024, 13, far_away_today()),
            Err(LedgerError::InvalidArgument(_))
        ));
        property.increase_frequency = 0;
        assert!(matches!(
            build_month_view(&property, 2024, 7, far_away_today()),
            Err(LedgerError::InvalidArgument(_))
        ));
    }
}
