//! Error type for parameter validation.
//!
//! The band computations themselves are total functions; domain sentinels
//! are `Option`s, never errors. Validation is a separate seam callers hit
//! once, before entering the core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DaaError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} window [{b}, {t}] is invalid: start must satisfy 0 <= start <= end")]
    InvalidWindow { name: &'static str, b: f64, t: f64 },
}
