//! pxscan - Raster region segmentation
//!
//! A library for decomposing a raster image into connected colour regions:
//! flood-fill component labelling with tolerance-based colour matching,
//! classifying each region as a single pixel, a single line, or a polygon
//! for a downstream vector-shape emitter.

pub mod cli;
pub mod error;
pub mod index;
pub mod region;
pub mod scan;
pub mod types;

pub use error::{Result, ScanError};
pub use index::ColourIndex;
pub use region::{Classification, Region};
pub use scan::{ScanResult, Scanner, DEFAULT_TOLERANCE};
pub use types::{Colour, Point};
