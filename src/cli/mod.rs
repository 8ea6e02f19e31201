pub mod scan;

use clap::{Parser, Subcommand};

/// pxscan - Raster region segmentation
#[derive(Parser, Debug)]
#[command(name = "pxscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan an image into classified colour regions
    Scan(scan::ScanArgs),
}
