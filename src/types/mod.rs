//! Core domain types for pxscan.
//!
//! This module contains the fundamental types used throughout the scan:
//! - `Colour` - RGBA colour values with tolerance matching
//! - `Point` - pixel coordinates

mod colour;
mod point;

pub use colour::Colour;
pub use point::Point;
