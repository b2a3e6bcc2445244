//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod error;
pub mod loan;
pub mod log;
pub mod rate;
pub mod refresh;
pub mod store;

// Re-export main types for cleaner imports
pub use error::{Error, NetworkFailureKind, Result};
pub use rate::{BASE_CURRENCY, RateInfo, RateMap, RateSource};
pub use store::{RateRecord, RateStore};
