//! Colour index - a one-time sampling of the source raster.
//!
//! The index records every pixel's colour up front so the scan never
//! touches the source image again, and tracks which pixels have been
//! claimed by a region. A per-column "fully covered" cache lets the scan
//! driver skip resolved columns without re-walking them.

use image::RgbaImage;

use crate::types::{Colour, Point};

/// Immutable colour map plus mutable coverage state for one scan run.
///
/// Coverage is monotonic: a pixel can go from uncovered to covered, never
/// back. `column_covered[x]` holds exactly when every pixel in column `x`
/// is covered.
#[derive(Debug, Clone)]
pub struct ColourIndex {
    width: u32,
    height: u32,
    /// Row-major colour samples.
    colours: Vec<Colour>,
    covered: Vec<bool>,
    column_covered: Vec<bool>,
}

impl ColourIndex {
    /// Build an index by calling `sample` exactly once per pixel over
    /// `[0, width) x [0, height)`.
    ///
    /// A zero-sized image yields an empty index; a scan over it files no
    /// regions.
    pub fn from_fn(width: u32, height: u32, mut sample: impl FnMut(u32, u32) -> Colour) -> Self {
        let len = width as usize * height as usize;
        let mut colours = Vec::with_capacity(len);

        for y in 0..height {
            for x in 0..width {
                colours.push(sample(x, y));
            }
        }

        Self {
            width,
            height,
            colours,
            covered: vec![false; len],
            // A zero-height column is vacuously covered.
            column_covered: vec![height == 0; width as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the index holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Check if a point lies within the image extents.
    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    fn offset(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// The colour at `p`, or `None` outside the image extents.
    pub fn colour_at(&self, p: Point) -> Option<Colour> {
        self.offset(p).map(|i| self.colours[i])
    }

    /// Check if a pixel has been claimed by a region.
    ///
    /// Points outside the image count as covered: there is nothing there
    /// left to claim.
    pub fn is_covered(&self, p: Point) -> bool {
        self.offset(p).map_or(true, |i| self.covered[i])
    }

    /// Claim `p` for a region and refresh the column cache for `p`'s
    /// column.
    ///
    /// The refresh re-walks the column once per touch, an amortized
    /// O(height) check that keeps `column_covered` exact without a
    /// per-pixel recount. Out-of-range points are ignored.
    pub fn mark_covered(&mut self, p: Point) {
        if let Some(i) = self.offset(p) {
            self.covered[i] = true;
            self.refresh_column(p.x);
        }
    }

    /// Check if every pixel in column `x` is covered.
    pub fn column_covered(&self, x: u32) -> bool {
        self.column_covered.get(x as usize).copied().unwrap_or(true)
    }

    fn refresh_column(&mut self, x: u32) {
        let all = (0..self.height)
            .all(|y| self.covered[y as usize * self.width as usize + x as usize]);
        self.column_covered[x as usize] = all;
    }

    /// The first unclaimed pixel in scan order: ascending column, then
    /// ascending row within the column.
    ///
    /// Columns whose cache flag is set are skipped without inspection.
    pub fn first_uncovered(&self) -> Option<Point> {
        (0..self.width)
            .filter(|&x| !self.column_covered(x))
            .find_map(|x| (0..self.height).map(|y| Point::new(x, y)).find(|&p| !self.is_covered(p)))
    }
}

impl From<&RgbaImage> for ColourIndex {
    fn from(image: &RgbaImage) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| {
            Colour::from_rgba(image.get_pixel(x, y).0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> ColourIndex {
        ColourIndex::from_fn(width, height, |x, y| Colour::rgb(x as u8, y as u8, 0))
    }

    #[test]
    fn test_from_fn_samples_every_pixel() {
        let index = gradient(3, 2);
        assert_eq!(index.size(), (3, 2));
        assert_eq!(index.len(), 6);
        assert_eq!(index.colour_at(Point::new(0, 0)), Some(Colour::rgb(0, 0, 0)));
        assert_eq!(index.colour_at(Point::new(2, 1)), Some(Colour::rgb(2, 1, 0)));
    }

    #[test]
    fn test_colour_at_out_of_bounds() {
        let index = gradient(3, 2);
        assert_eq!(index.colour_at(Point::new(3, 0)), None);
        assert_eq!(index.colour_at(Point::new(0, 2)), None);
        assert!(!index.contains(Point::new(3, 2)));
    }

    #[test]
    fn test_empty_image() {
        let index = ColourIndex::from_fn(0, 0, |_, _| Colour::BLACK);
        assert!(index.is_empty());
        assert_eq!(index.first_uncovered(), None);
    }

    #[test]
    fn test_zero_height_image() {
        let index = ColourIndex::from_fn(4, 0, |_, _| Colour::BLACK);
        assert!(index.is_empty());
        assert!(index.column_covered(0));
        assert_eq!(index.first_uncovered(), None);
    }

    #[test]
    fn test_mark_covered_refreshes_column_cache() {
        let mut index = gradient(2, 3);
        assert!(!index.column_covered(0));

        index.mark_covered(Point::new(0, 0));
        index.mark_covered(Point::new(0, 1));
        assert!(!index.column_covered(0));

        index.mark_covered(Point::new(0, 2));
        assert!(index.column_covered(0));
        assert!(!index.column_covered(1));
    }

    #[test]
    fn test_is_covered_out_of_bounds() {
        let index = gradient(2, 2);
        assert!(index.is_covered(Point::new(5, 5)));
    }

    #[test]
    fn test_first_uncovered_scan_order() {
        let mut index = gradient(3, 2);
        assert_eq!(index.first_uncovered(), Some(Point::new(0, 0)));

        index.mark_covered(Point::new(0, 0));
        assert_eq!(index.first_uncovered(), Some(Point::new(0, 1)));

        index.mark_covered(Point::new(0, 1));
        assert_eq!(index.first_uncovered(), Some(Point::new(1, 0)));
    }

    #[test]
    fn test_first_uncovered_skips_covered_columns() {
        let mut index = gradient(2, 2);
        for y in 0..2 {
            index.mark_covered(Point::new(0, y));
        }
        assert!(index.column_covered(0));
        assert_eq!(index.first_uncovered(), Some(Point::new(1, 0)));
    }
}
