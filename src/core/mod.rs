//! Core data types for the strategy scanner
//!
//! Defines fundamental types:
//! - Greeks: per-leg and aggregated sensitivities
//! - Leg: one priced option position
//! - Strategy: an assembled multi-leg trade
//! - ScanError: crate-wide error type

pub mod error;
pub mod greeks;
pub mod option;
pub mod strategy;

pub use error::*;
pub use greeks::*;
pub use option::*;
pub use strategy::*;
