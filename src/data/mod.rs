//! Market data
//!
//! Handles:
//! - Polygon.io previous-close quotes
//! - Reference and synthetic fallback prices
//! - The provider seam the scanner prices against

pub mod fallback;
pub mod polygon;
pub mod provider;

pub use fallback::*;
pub use polygon::*;
pub use provider::*;
