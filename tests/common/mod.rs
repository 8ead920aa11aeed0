#![allow(dead_code)]

use chrono::NaiveDate;
use rent_ledger::ledger::{Property, PropertyDraft};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// 1000 a month, +10% every 6 months, 2024-01-15 to 2025-12-31, due on the 5th.
pub fn harbour_lane() -> PropertyDraft {
    PropertyDraft {
        address: "12 Harbour Lane".into(),
        tenant_name: "R. Okafor".into(),
        price: 1000.0,
        increase_rate: 10.0,
        increase_frequency: 6,
        contract_start_date: date(2024, 1, 15),
        contract_end_date: date(2025, 12, 31),
        rent_due_day: 5,
        photo_url: None,
        contract: None,
    }
}

pub fn property(draft: PropertyDraft) -> Property {
    Property::from_draft(draft).expect("valid test draft")
}
