#![doc(test(attr(deny(warnings))))]

//! Advisor Core collects an investor's financial profile through an
//! interactive questionnaire, submits it to a scoring service, and renders
//! the returned portfolio allocation in the terminal.

pub mod cli;
pub mod config;
pub mod errors;
pub mod profile;
pub mod scoring;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Advisor Core tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("advisor_core=info"));

    fmt().with_env_filter(filter).init();
}
