//! Connected colour regions.
//!
//! A region is grown by flood fill from a seed pixel: the maximal
//! 4-connected set of pixels whose colour matches the seed's within the
//! configured tolerance, reachable from the seed through other matching
//! pixels. Once grown, the point set is frozen and classified by its
//! footprint: a lone pixel, a single row or column, or a proper polygon.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use serde::Serialize;

use crate::error::{Result, ScanError};
use crate::index::ColourIndex;
use crate::types::{Colour, Point};

/// Topological category of a frozen region's point set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    /// Exactly one member pixel.
    SinglePixel,

    /// Two or more members confined to one row or one column.
    SingleLine,

    /// Members spanning at least two rows and two columns.
    Polygon,

    /// Neither rule applied. Unreachable for any non-empty membership;
    /// seeing it means a scan invariant was broken.
    Unknown,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::SinglePixel => write!(f, "single-pixel"),
            Classification::SingleLine => write!(f, "single-line"),
            Classification::Polygon => write!(f, "polygon"),
            Classification::Unknown => write!(f, "unknown"),
        }
    }
}

/// Shared record of which pixels have been colour-tested.
///
/// One mask spans a whole scan run. A fill marks every pixel it tests;
/// the driver clears the pixels a fill tested but rejected, so the region
/// that actually owns them can claim them later.
#[derive(Debug, Clone)]
pub struct CheckedMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl CheckedMask {
    /// Create a mask with every pixel untested.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    fn offset(&self, p: Point) -> Option<usize> {
        if p.x < self.width && p.y < self.height {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Check if a pixel has been tested. Points outside the mask count as
    /// tested: there is nothing there to test.
    pub fn is_checked(&self, p: Point) -> bool {
        self.offset(p).map_or(true, |i| self.bits[i])
    }

    /// Record that a pixel has been tested.
    pub fn mark(&mut self, p: Point) {
        if let Some(i) = self.offset(p) {
            self.bits[i] = true;
        }
    }

    /// Release a pixel so a later fill may test it again.
    pub fn clear(&mut self, p: Point) {
        if let Some(i) = self.offset(p) {
            self.bits[i] = false;
        }
    }
}

/// One connected colour component, frozen after its flood fill completes.
#[derive(Debug, Clone)]
pub struct Region {
    seed: Point,
    colour: Colour,
    /// Every pixel the fill tested: `true` for members, `false` for pixels
    /// probed at the boundary and rejected.
    points: BTreeMap<Point, bool>,
    members: usize,
    classification: Classification,
}

impl Region {
    /// Grow a region from `seed` by flood fill and freeze it.
    ///
    /// The reference colour is the index colour at the seed; a seed outside
    /// the image is an error. A FIFO queue drives the walk: each popped
    /// pixel is tested once against the reference, and only matching pixels
    /// enqueue their unchecked axis-neighbours, so membership never leaks
    /// across a non-matching boundary. Neighbours outside the image are
    /// skipped.
    pub fn fill(
        seed: Point,
        tolerance: u8,
        index: &ColourIndex,
        checked: &mut CheckedMask,
    ) -> Result<Self> {
        let colour = index.colour_at(seed).ok_or(ScanError::OutOfBounds {
            x: seed.x,
            y: seed.y,
            width: index.width(),
            height: index.height(),
        })?;

        let mut points = BTreeMap::new();
        let mut members = 0;
        let mut queue = VecDeque::new();
        queue.push_back(seed);

        while let Some(p) = queue.pop_front() {
            // A pixel may be queued twice before it is popped; the mask
            // makes the second visit a no-op.
            if checked.is_checked(p) {
                continue;
            }
            checked.mark(p);

            let matched = index
                .colour_at(p)
                .is_some_and(|c| c.matches(colour, tolerance));
            points.insert(p, matched);

            if matched {
                members += 1;
                for n in p.neighbours() {
                    if index.contains(n) && !checked.is_checked(n) {
                        queue.push_back(n);
                    }
                }
            }
        }

        let classification = classify_points(&points);

        Ok(Self {
            seed,
            colour,
            points,
            members,
            classification,
        })
    }

    /// The pixel this region was grown from.
    pub fn seed(&self) -> Point {
        self.seed
    }

    /// The reference colour all members matched.
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Number of member pixels.
    pub fn len(&self) -> usize {
        self.members
    }

    /// Check if the region has no members.
    pub fn is_empty(&self) -> bool {
        self.members == 0
    }

    /// Member pixels in ascending column-then-row order.
    pub fn members(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .filter(|&(_, &member)| member)
            .map(|(&p, _)| p)
    }

    /// Check if a pixel is a member of this region.
    pub fn contains(&self, p: Point) -> bool {
        self.points.get(&p).copied().unwrap_or(false)
    }

    /// Every tested pixel and whether it was accepted.
    pub(crate) fn tested(&self) -> impl Iterator<Item = (Point, bool)> + '_ {
        self.points.iter().map(|(&p, &member)| (p, member))
    }

    /// The smallest and largest member coordinates, as (min, max) corners.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let mut members = self.members();
        let first = members.next()?;

        let (mut min, mut max) = (first, first);
        for p in members {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }

    /// The category assigned when the region was frozen.
    pub fn classification(&self) -> Classification {
        self.classification
    }
}

/// Classify a frozen point set by the columns and rows its members occupy.
///
/// One member is a single pixel. Two or more members confined to one
/// column or one row form a single line; members spanning at least two of
/// each form a polygon. The final arm is defensive: for two or more
/// members the line and polygon rules are exhaustive.
fn classify_points(points: &BTreeMap<Point, bool>) -> Classification {
    let mut columns = BTreeSet::new();
    let mut rows = BTreeSet::new();
    let mut members = 0usize;

    for (p, &member) in points {
        if member {
            members += 1;
            columns.insert(p.x);
            rows.insert(p.y);
        }
    }

    match members {
        0 => Classification::Unknown,
        1 => Classification::SinglePixel,
        _ if columns.len() == 1 || rows.len() == 1 => Classification::SingleLine,
        _ if columns.len() >= 2 && rows.len() >= 2 => Classification::Polygon,
        _ => Classification::Unknown,
    }
}
