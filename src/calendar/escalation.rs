use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::month::{months_between, CalendarMonth};
use crate::errors::{LedgerError, Result};
use crate::ledger::Property;

/// One scheduled escalation inside the contract window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EscalationStep {
    /// 1-based count of escalations applied from this date on.
    pub step: u32,
    pub date: NaiveDate,
    pub amount: f64,
}

/// Rejects escalation terms the engine cannot compute with.
pub fn validate_terms(property: &Property) -> Result<()> {
    if property.increase_frequency == 0 {
        return Err(LedgerError::invalid(
            "increase frequency must be a positive number of months",
        ));
    }
    if !property.increase_rate.is_finite() || property.increase_rate < 0.0 {
        return Err(LedgerError::invalid(format!(
            "increase rate must be a non-negative percentage, got {}",
            property.increase_rate
        )));
    }
    Ok(())
}

/// Number of escalations in force on `date`.
///
/// Zero before the contract starts and during the first
/// `increase_frequency` calendar months.
pub fn escalation_steps(property: &Property, date: NaiveDate) -> Result<u32> {
    validate_terms(property)?;
    Ok(steps_unchecked(property, date))
}

/// Rent due on `date` under compound escalation, rounded with [`round_currency`].
///
/// Dates before the contract start, and dates with no completed escalation
/// period, return the base price untouched.
pub fn compute_rent_for_date(property: &Property, date: NaiveDate) -> Result<f64> {
    validate_terms(property)?;
    Ok(rent_after_steps(property, steps_unchecked(property, date)))
}

/// Rounds to the nearest whole currency unit, ties away from zero.
///
/// `2.5` becomes `3.0` and `-2.5` becomes `-3.0`.
pub fn round_currency(value: f64) -> f64 {
    value.round()
}

/// Escalation anniversaries inside the contract window, with the rent in
/// force from each one.
///
/// Anniversaries fall on the start day-of-month; a month shorter than that
/// day has no anniversary date and is skipped, matching the calendar marker.
pub fn escalation_schedule(property: &Property) -> Result<Vec<EscalationStep>> {
    validate_terms(property)?;
    let start = property.contract_start_date;
    let end = property.contract_end_date;
    let start_month = CalendarMonth::containing(start);
    let mut schedule = Vec::new();

    let mut step: u32 = 1;
    while let Some(month) = step
        .checked_mul(property.increase_frequency)
        .and_then(|offset| start_month.plus_months(offset))
    {
        if month.first_day() > end {
            break;
        }
        if let Some(date) = month.day(start.day()) {
            if date <= end {
                schedule.push(EscalationStep {
                    step,
                    date,
                    amount: rent_after_steps(property, step),
                });
            }
        }
        step += 1;
    }
    Ok(schedule)
}

fn steps_unchecked(property: &Property, date: NaiveDate) -> u32 {
    if date < property.contract_start_date {
        return 0;
    }
    let elapsed = months_between(property.contract_start_date, date) as i64;
    let steps = elapsed.div_euclid(property.increase_frequency as i64);
    u32::try_from(steps.max(0)).unwrap_or(u32::MAX)
}

fn rent_after_steps(property: &Property, steps: u32) -> f64 {
    if steps == 0 {
        return property.price;
    }
    let factor = 1.0 + property.increase_rate / 100.0;
    let exponent = i32::try_from(steps).unwrap_or(i32::MAX);
    round_currency(property.price * factor.powi(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::property::tests::sample_property;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn step_count_follows_completed_periods() {
        let property = sample_property();
        assert_eq!(escalation_steps(&property, date(2023, 12, 31)).unwrap(), 0);
        assert_eq!(escalation_steps(&property, date(2024, 6, 30)).unwrap(), 0);
        assert_eq!(escalation_steps(&property, date(2024, 7, 1)).unwrap(), 1);
        assert_eq!(escalation_steps(&property, date(2025, 12, 31)).unwrap(), 3);

        let mut broken = sample_property();
        broken.increase_frequency = 0;
        assert!(matches!(
            escalation_steps(&broken, date(2024, 7, 1)),
            Err(LedgerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn base_price_before_first_escalation() {
        let property = sample_property();
        let amount = compute_rent_for_date(&property, date(2024, 6, 15)).unwrap();
        assert_eq!(amount, 1000.0);
    }

    #[test]
    fn first_escalation_after_frequency_months() {
        let property = sample_property();
        let amount = compute_rent_for_date(&property, date(2024, 7, 15)).unwrap();
        assert_eq!(amount, 1100.0);
    }

    #[test]
    fn escalations_compound() {
        let property = sample_property();
        let amount = compute_rent_for_date(&property, date(2025, 1, 15)).unwrap();
        assert_eq!(amount, 1210.0);
        let amount = compute_rent_for_date(&property, date(2025, 7, 1)).unwrap();
        assert_eq!(amount, 1331.0);
    }

    #[test]
    fn day_of_month_does_not_delay_escalation() {
        let property = sample_property();
        // July 1st is before the 15th but already six calendar months in.
        let amount = compute_rent_for_date(&property, date(2024, 7, 1)).unwrap();
        assert_eq!(amount, 1100.0);
    }

    #[test]
    fn dates_before_start_keep_base_price() {
        let mut property = sample_property();
        property.price = 999.4;
        for d in [date(2023, 1, 15), date(2024, 1, 14), date(1990, 12, 31)] {
            assert_eq!(compute_rent_for_date(&property, d).unwrap(), 999.4);
        }
    }

    #[test]
    fn rounds_exact_halves_away_from_zero() {
        let mut property = sample_property();
        property.price = 3.0;
        property.increase_rate = 50.0;
        property.increase_frequency = 1;
        // 3 * 1.5 = 4.5 exactly.
        let amount = compute_rent_for_date(&property, date(2024, 2, 15)).unwrap();
        assert_eq!(amount, 5.0);
        // 3 * 1.5^2 = 6.75.
        let amount = compute_rent_for_date(&property, date(2024, 3, 15)).unwrap();
        assert_eq!(amount, 7.0);
        assert_eq!(round_currency(2.5), 3.0);
        assert_eq!(round_currency(-2.5), -3.0);
        assert_eq!(round_currency(2.49), 2.0);
    }

    #[test]
    fn zero_frequency_is_invalid_argument() {
        let mut property = sample_property();
        property.increase_frequency = 0;
        let err = compute_rent_for_date(&property, date(2024, 7, 15)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidArgument(_)), "{err}");
    }

    #[test]
    fn negative_or_nan_rate_is_invalid_argument() {
        let mut property = sample_property();
        property.increase_rate = -1.0;
        assert!(matches!(
            compute_rent_for_date(&property, date(2024, 7, 15)),
            Err(LedgerError::InvalidArgument(_))
        ));
        property.increase_rate = f64::NAN;
        assert!(matches!(
            compute_rent_for_date(&property, date(2024, 7, 15)),
            Err(LedgerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn amount_is_monotonic_in_elapsed_months() {
        let property = sample_property();
        let mut previous = 0.0;
        let mut month = CalendarMonth::new(2023, 6).unwrap();
        for _ in 0..60 {
            let amount = compute_rent_for_date(&property, month.first_day()).unwrap();
            assert!(amount >= previous, "{amount} < {previous} at {month}");
            previous = amount;
            month = month.next();
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let property = sample_property();
        let d = date(2026, 3, 15);
        assert_eq!(
            compute_rent_for_date(&property, d).unwrap(),
            compute_rent_for_date(&property, d).unwrap()
        );
    }

    #[test]
    fn schedule_lists_anniversaries_inside_window() {
        let property = sample_property();
        let schedule = escalation_schedule(&property).unwrap();
        let dates: Vec<_> = schedule.iter().map(|step| step.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 7, 15), date(2025, 1, 15), date(2025, 7, 15)]
        );
        let amounts: Vec<_> = schedule.iter().map(|step| step.amount).collect();
        assert_eq!(amounts, vec![1100.0, 1210.0, 1331.0]);
        assert_eq!(schedule[2].step, 3);
    }

    #[test]
    fn schedule_skips_months_shorter_than_start_day() {
        let mut property = sample_property();
        property.contract_start_date = date(2024, 1, 31);
        property.contract_end_date = date(2024, 12, 31);
        property.increase_frequency = 1;
        let schedule = escalation_schedule(&property).unwrap();
        let months: Vec<_> = schedule.iter().map(|step| step.date.month()).collect();
        assert_eq!(months, vec![3, 5, 7, 8, 10, 12]);
        // Step numbering follows elapsed periods, not list position.
        assert_eq!(schedule[0].step, 2);
    }

    #[test]
    fn schedule_excludes_anniversary_after_end_date() {
        let mut property = sample_property();
        property.contract_end_date = date(2025, 7, 14);
        let schedule = escalation_schedule(&property).unwrap();
        assert_eq!(schedule.len(), 2);
    }
}
