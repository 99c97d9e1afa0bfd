#![doc(test(attr(deny(warnings))))]

//! Ledger Core offers the transaction ledger, budget, and recurring-obligation
//! primitives that power finance dashboards: totals, category breakdowns,
//! running-balance series, budget utilization, and due-obligation scheduling.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
