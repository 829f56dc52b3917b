//! Map tile addressing.
//!
//! A tile `(x, y, zoom)` of a `2^zoom x 2^zoom` grid is addressed by the path
//! of quadrants leading to it from the whole-world tile. The quadrant
//! numbering is shared with the quad-tree, so a tile path can be handed to
//! [`QuadNode::get_subtree`](crate::quadtree::QuadNode::get_subtree) as-is.
//!
//! ```text
//!   x < half | x >= half
//! +----------+----------+
//! |    0     |    1     |  y < half
//! +----------+----------+
//! |    2     |    3     |  y >= half
//! +----------+----------+
//! ```

use crate::error::{IndexError, Result};
use geo::{Rect, coord};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Paths up to this length are stored inline.
const INLINE_DEPTH: usize = 16;

/// One of the four sub-squares of a node or tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    /// All quadrants in digit order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Pick the quadrant holding `(x, y)` in a square split at `(half_x, half_y)`.
    ///
    /// Positions on a split line belong to the higher quadrant.
    #[inline]
    pub fn locate<T: PartialOrd>(x: T, y: T, half_x: T, half_y: T) -> Self {
        match (y >= half_y, x >= half_x) {
            (false, false) => Quadrant::NorthWest,
            (false, true) => Quadrant::NorthEast,
            (true, false) => Quadrant::SouthWest,
            (true, true) => Quadrant::SouthEast,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Quadrant::NorthWest),
            '1' => Some(Quadrant::NorthEast),
            '2' => Some(Quadrant::SouthWest),
            '3' => Some(Quadrant::SouthEast),
            _ => None,
        }
    }

    #[inline]
    pub fn as_digit(self) -> char {
        (b'0' + self as u8) as char
    }

    /// Whether this quadrant lies in the eastern (right) half.
    #[inline]
    pub fn is_east(self) -> bool {
        self as u8 & 1 == 1
    }

    /// Whether this quadrant lies in the southern (bottom) half.
    #[inline]
    pub fn is_south(self) -> bool {
        self as u8 & 2 == 2
    }
}

/// Root-to-node sequence of quadrants.
///
/// Displays as a string of digits `'0'..='3'` and parses back from one.
///
/// # Examples
///
/// ```
/// use quadtile::tile::{TilePath, tile_path};
///
/// let path = tile_path(1, 2, 2);
/// assert_eq!(path.to_string(), "21");
///
/// let parsed: TilePath = "21".parse().unwrap();
/// assert_eq!(parsed, path);
/// assert!("24".parse::<TilePath>().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePath {
    quadrants: SmallVec<[Quadrant; INLINE_DEPTH]>,
}

impl TilePath {
    /// The empty path, addressing the whole domain.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_quadrants(quadrants: &[Quadrant]) -> Self {
        Self {
            quadrants: SmallVec::from_slice(quadrants),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.quadrants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quadrants.is_empty()
    }

    #[inline]
    pub fn quadrants(&self) -> &[Quadrant] {
        &self.quadrants
    }

    pub fn push(&mut self, quadrant: Quadrant) {
        self.quadrants.push(quadrant);
    }

    /// Path of the enclosing tile one zoom level up, `None` at the root.
    pub fn parent(&self) -> Option<TilePath> {
        let (_, head) = self.quadrants.split_last()?;
        Some(Self::from_quadrants(head))
    }

    /// Whether `prefix` addresses this tile or one of its ancestors.
    pub fn starts_with(&self, prefix: &TilePath) -> bool {
        self.quadrants.starts_with(&prefix.quadrants)
    }

    /// Recover `(x, y, zoom)` of the tile this path addresses.
    ///
    /// Returns `None` when the path is deeper than a `u32` tile grid can
    /// express.
    pub fn to_tile(&self) -> Option<(u32, u32, u8)> {
        if self.quadrants.len() > u32::BITS as usize {
            return None;
        }

        let (x, y) = self.quadrants.iter().fold((0u32, 0u32), |(x, y), q| {
            ((x << 1) | q.is_east() as u32, (y << 1) | q.is_south() as u32)
        });

        Some((x, y, self.quadrants.len() as u8))
    }
}

impl fmt::Display for TilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for quadrant in &self.quadrants {
            write!(f, "{}", quadrant.as_digit())?;
        }
        Ok(())
    }
}

impl FromStr for TilePath {
    type Err = IndexError;

    fn from_str(path: &str) -> Result<Self> {
        let quadrants = path
            .chars()
            .enumerate()
            .map(|(position, found)| {
                Quadrant::from_digit(found).ok_or_else(|| IndexError::InvalidPath {
                    path: path.to_string(),
                    position,
                    found,
                })
            })
            .collect::<Result<SmallVec<_>>>()?;

        Ok(Self { quadrants })
    }
}

impl From<&[Quadrant]> for TilePath {
    fn from(quadrants: &[Quadrant]) -> Self {
        Self::from_quadrants(quadrants)
    }
}

/// Compute the quadrant path of tile `(x, y)` at `zoom`.
///
/// Zoom 0 yields the empty path. Otherwise the path has exactly `zoom`
/// quadrants, starting from the split of the whole grid at `2^(zoom-1)`.
pub fn tile_path(x: u32, y: u32, zoom: u8) -> TilePath {
    let mut path = TilePath::root();
    let (mut x, mut y) = (x, y);

    for level in (0..u32::from(zoom)).rev() {
        // Grid halves wider than u32 contain every tile in their first half.
        let Some(half) = 1u32.checked_shl(level) else {
            path.push(Quadrant::NorthWest);
            continue;
        };

        path.push(Quadrant::locate(x, y, half, half));
        x %= half;
        y %= half;
    }

    path
}

/// Planar rectangle covered by tile `(x, y, zoom)` of a `width x height` domain.
pub fn tile_rect(x: u32, y: u32, zoom: u8, width: f64, height: f64) -> Rect {
    let tiles = 2f64.powi(i32::from(zoom));
    let (tile_w, tile_h) = (width / tiles, height / tiles);
    let (min_x, min_y) = (f64::from(x) * tile_w, f64::from(y) * tile_h);

    Rect::new(
        coord! { x: min_x, y: min_y },
        coord! { x: min_x + tile_w, y: min_y + tile_h },
    )
}
