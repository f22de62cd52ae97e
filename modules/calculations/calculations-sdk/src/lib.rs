//! Calculations SDK
//!
//! This crate provides the public API for the calculations module:
//! - `CalculationsApi` trait for in-process consumers
//! - Model type (`Calculation`)
//! - Error type (`CalculationsError`)
//!
//! ```ignore
//! let client: Arc<dyn CalculationsApi> = module.client();
//! let created = client.create("3 + 4".to_owned()).await?;
//! assert_eq!(created.result, "7");
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod errors;
pub mod models;

pub use api::CalculationsApi;
pub use errors::CalculationsError;
pub use models::Calculation;
