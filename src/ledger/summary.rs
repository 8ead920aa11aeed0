use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::Property;
use crate::calendar::compute_rent_for_date;
use crate::errors::Result;

/// One property's contribution to the income overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeLine {
    pub id: Uuid,
    pub address: String,
    pub price: f64,
}

/// Dashboard figures: property count and base monthly income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceSummary {
    pub property_count: usize,
    pub total_income: f64,
    pub breakdown: Vec<IncomeLine>,
}

impl FinanceSummary {
    /// Sums base prices; escalations are not applied here.
    pub fn from_properties(properties: &[Property]) -> Self {
        let breakdown: Vec<IncomeLine> = properties
            .iter()
            .map(|property| IncomeLine {
                id: property.id,
                address: property.address.clone(),
                price: property.price,
            })
            .collect();
        Self {
            property_count: properties.len(),
            total_income: breakdown.iter().map(|line| line.price).sum(),
            breakdown,
        }
    }
}

/// Escalated rent in force on `date` across properties whose contract
/// window contains it.
pub fn projected_income(properties: &[Property], date: NaiveDate) -> Result<f64> {
    let mut total = 0.0;
    for property in properties {
        if property.contract_start_date <= date && date <= property.contract_end_date {
            total += compute_rent_for_date(property, date)?;
        }
    }
    Ok(total)
}
