#![doc(test(attr(deny(warnings))))]

//! Onboard Core offers the step-wizard engine, validation rules, and
//! account-creation flow that power the booking app's onboarding screens.

pub mod auth;
pub mod errors;
pub mod signup;
pub mod storage;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Onboard Core tracing initialized.");
    });
}
