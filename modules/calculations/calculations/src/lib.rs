//! Calculations Module Implementation
//!
//! The public API is defined in `calculations-sdk` and re-exported here.

pub use calculations_sdk::{Calculation, CalculationsApi, CalculationsError};

pub mod module;
pub use module::CalculationsModule;

pub mod config;
pub use config::CalculationsConfig;

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod errors;
#[doc(hidden)]
pub mod infra;
