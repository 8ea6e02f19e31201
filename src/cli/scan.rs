//! The `scan` subcommand - segment an image and report its regions.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{Result, ScanError};
use crate::index::ColourIndex;
use crate::scan::Scanner;

/// Scan an image into classified colour regions
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Image file to scan
    pub input: PathBuf,

    /// Per-channel colour tolerance (0 = exact matches only)
    #[arg(short, long, default_value_t = 0)]
    pub tolerance: u8,

    /// Emit the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Region counts reported after a scan.
#[derive(Debug, Serialize)]
struct Summary {
    width: u32,
    height: u32,
    tolerance: u8,
    single_pixels: usize,
    single_lines: usize,
    polygons: usize,
}

pub fn run(args: ScanArgs) -> Result<()> {
    let image = image::open(&args.input)
        .map_err(|e| ScanError::Image {
            path: args.input.clone(),
            message: format!("Failed to decode image: {}", e),
        })?
        .to_rgba8();

    let index = ColourIndex::from(&image);
    let result = Scanner::new(index).with_tolerance(args.tolerance).scan()?;

    let summary = Summary {
        width: result.width(),
        height: result.height(),
        tolerance: args.tolerance,
        single_pixels: result.single_pixels().len(),
        single_lines: result.single_lines().len(),
        polygons: result.polygons().len(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{}: {}x{} px, tolerance {}",
            args.input.display(),
            summary.width,
            summary.height,
            summary.tolerance
        );
        println!("  single pixels: {}", summary.single_pixels);
        println!("  single lines:  {}", summary.single_lines);
        println!("  polygons:      {}", summary.polygons);
    }

    Ok(())
}
