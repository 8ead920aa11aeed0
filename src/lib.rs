#![doc(test(attr(deny(warnings))))]

//! Rent Ledger records rental properties and derives rent calendars with
//! compound escalation from their contract terms.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Rent Ledger tracing initialized.");
    });
}
