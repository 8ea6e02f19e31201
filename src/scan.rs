//! Scan driver - partitions an image into classified regions.
//!
//! The driver walks the index in a fixed order (ascending column, then
//! ascending row), grows one region per seed, and files each frozen region
//! by its classification. Every iteration claims at least the seed pixel,
//! so a run over a width x height image files at most width x height
//! regions before the uncovered set is exhausted.

use crate::error::{Result, ScanError};
use crate::index::ColourIndex;
use crate::region::{CheckedMask, Classification, Region};

/// Default per-channel tolerance: exact colour matches only.
pub const DEFAULT_TOLERANCE: u8 = 0;

/// Configuration and state for one scan run.
#[derive(Debug)]
pub struct Scanner {
    index: ColourIndex,
    tolerance: u8,
}

impl Scanner {
    /// Create a scanner over an index with the default tolerance.
    pub fn new(index: ColourIndex) -> Self {
        Self {
            index,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the per-channel colour tolerance.
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Partition the image into classified regions.
    ///
    /// Regions are grown strictly one at a time; seeds are taken in
    /// ascending column-then-row order, so runs over the same image file
    /// the same regions in the same order. The final partition itself is
    /// order-independent.
    pub fn scan(mut self) -> Result<ScanResult> {
        let mut result = ScanResult::new(self.index.width(), self.index.height());
        let mut checked = CheckedMask::new(self.index.width(), self.index.height());

        while let Some(seed) = self.index.first_uncovered() {
            let region = Region::fill(seed, self.tolerance, &self.index, &mut checked)?;

            for p in region.members() {
                self.index.mark_covered(p);
            }

            // Pixels this fill probed but rejected stay claimable by the
            // region that actually owns them.
            for (p, member) in region.tested() {
                if !member {
                    checked.clear(p);
                }
            }

            result.file(region)?;
        }

        Ok(result)
    }
}

/// Regions produced by one scan, partitioned by classification.
///
/// Each bucket keeps its regions in filing order.
#[derive(Debug)]
pub struct ScanResult {
    width: u32,
    height: u32,
    single_pixels: Vec<Region>,
    single_lines: Vec<Region>,
    polygons: Vec<Region>,
}

impl ScanResult {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            single_pixels: Vec::new(),
            single_lines: Vec::new(),
            polygons: Vec::new(),
        }
    }

    fn file(&mut self, region: Region) -> Result<()> {
        match region.classification() {
            Classification::SinglePixel => self.single_pixels.push(region),
            Classification::SingleLine => self.single_lines.push(region),
            Classification::Polygon => self.polygons.push(region),
            Classification::Unknown => {
                // Mis-filing would corrupt whatever renders these regions
                // downstream, so a non-exhaustive classification is a hard
                // error.
                let seed = region.seed();
                return Err(ScanError::UnclassifiableRegion {
                    x: seed.x,
                    y: seed.y,
                    points: region.len(),
                });
            }
        }
        Ok(())
    }

    /// Scanned image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Scanned image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Regions with exactly one member.
    pub fn single_pixels(&self) -> &[Region] {
        &self.single_pixels
    }

    /// Regions confined to one row or column.
    pub fn single_lines(&self) -> &[Region] {
        &self.single_lines
    }

    /// Regions spanning at least two rows and two columns.
    pub fn polygons(&self) -> &[Region] {
        &self.polygons
    }

    /// All regions, bucket by bucket.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.single_pixels
            .iter()
            .chain(&self.single_lines)
            .chain(&self.polygons)
    }

    /// Total number of regions filed.
    pub fn len(&self) -> usize {
        self.single_pixels.len() + self.single_lines.len() + self.polygons.len()
    }

    /// Check if the scan filed no regions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::{Colour, Point};

    /// Build an index from rows of glyphs; each glyph becomes a distinct
    /// grey level, so different glyphs never match at tolerance 0.
    fn index_of(rows: &[&str]) -> ColourIndex {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        ColourIndex::from_fn(width, height, |x, y| {
            let level = rows[y as usize].as_bytes()[x as usize];
            Colour::rgb(level, level, level)
        })
    }

    fn scan(rows: &[&str], tolerance: u8) -> ScanResult {
        Scanner::new(index_of(rows))
            .with_tolerance(tolerance)
            .scan()
            .unwrap()
    }

    #[test]
    fn test_scan_single_pixel_image() {
        let result = scan(&["a"], 0);
        assert_eq!(result.len(), 1);
        assert_eq!(result.single_pixels().len(), 1);
        assert_eq!(result.single_pixels()[0].len(), 1);
    }

    #[test]
    fn test_scan_uniform_row() {
        let result = scan(&["aaa"], 0);
        assert_eq!(result.len(), 1);
        assert_eq!(result.single_lines().len(), 1);
        assert_eq!(result.single_lines()[0].len(), 3);
    }

    #[test]
    fn test_scan_uniform_square() {
        let result = scan(&["aa", "aa"], 0);
        assert_eq!(result.len(), 1);
        assert_eq!(result.polygons().len(), 1);
        assert_eq!(result.polygons()[0].len(), 4);
    }

    #[test]
    fn test_scan_split_rows() {
        // Top row one colour, bottom row another: two horizontal lines.
        let result = scan(&["aa", "bb"], 0);
        assert_eq!(result.len(), 2);
        assert_eq!(result.single_lines().len(), 2);
        for region in result.single_lines() {
            assert_eq!(region.len(), 2);
        }
    }

    #[test]
    fn test_scan_checkerboard() {
        // Diagonal colour placement: no 4-connected pair matches.
        let result = scan(&["ab", "ba"], 0);
        assert_eq!(result.len(), 4);
        assert_eq!(result.single_pixels().len(), 4);
    }

    #[test]
    fn test_scan_tolerance_merges_across_boundary() {
        let index = || {
            ColourIndex::from_fn(2, 2, |_, y| {
                let level = if y == 0 { 100 } else { 103 };
                Colour::rgb(level, level, level)
            })
        };

        let split = Scanner::new(index()).with_tolerance(0).scan().unwrap();
        assert_eq!(split.len(), 2);
        assert_eq!(split.single_lines().len(), 2);

        let merged = Scanner::new(index()).with_tolerance(3).scan().unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.polygons().len(), 1);
        assert_eq!(merged.polygons()[0].len(), 4);
    }

    #[test]
    fn test_scan_empty_image() {
        let index = ColourIndex::from_fn(0, 0, |_, _| Colour::BLACK);
        let result = Scanner::new(index).scan().unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_partitions_every_pixel() {
        let rows = ["aabc", "aabc", "ddbc", "ddee"];
        let result = scan(&rows, 0);

        let mut claims: BTreeMap<Point, usize> = BTreeMap::new();
        for region in result.regions() {
            for p in region.members() {
                *claims.entry(p).or_default() += 1;
            }
        }

        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(
                    claims.get(&Point::new(x, y)),
                    Some(&1),
                    "pixel ({x}, {y}) must belong to exactly one region"
                );
            }
        }
    }

    #[test]
    fn test_scan_rejected_pixels_form_their_own_regions() {
        // The first fill (colour a) probes and rejects the b pixels; they
        // must still end up in a filed region of their own.
        let result = scan(&["ab", "ab"], 0);
        assert_eq!(result.len(), 2);
        assert_eq!(result.single_lines().len(), 2);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let rows = ["abca", "abca", "aaaa"];
        let first = scan(&rows, 0);
        let second = scan(&rows, 0);

        let seeds = |r: &ScanResult| -> Vec<Point> { r.regions().map(|rg| rg.seed()).collect() };
        assert_eq!(seeds(&first), seeds(&second));
    }

    #[test]
    fn test_scan_region_count_bounded_by_pixel_count() {
        let result = scan(&["abc", "def"], 0);
        assert_eq!(result.len(), 6);
        assert!(result.polygons().is_empty());
        assert!(result.single_lines().is_empty());
    }
}
