//! Pricing Models
//!
//! Implements:
//! - Black-Scholes (European leg pricing and Greeks)

pub mod black_scholes;

pub use black_scholes::*;
