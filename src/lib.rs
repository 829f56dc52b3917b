//! Tile-addressed quad-tree index of geographic points.
//!
//! Records are projected from WGS84 longitude/latitude onto a square
//! Mercator plane and stored in a region quad-tree whose quadrant numbering
//! matches map tile addressing. A map tile `(x, y, zoom)` becomes a path of
//! quadrant digits, and the objects inside the tile are the objects under the
//! node that path reaches.
//!
//! ```rust
//! use quadtile::{IndexBuilder, Place};
//!
//! let index = IndexBuilder::new()
//!     .max_items(1)
//!     .build(vec![
//!         Place::new(1, 37.618916, 55.751401, "Moscow"),
//!         Place::new(2, 151.2093, -33.8688, "Sydney"),
//!     ])?;
//!
//! let south_east = index.query(1, 1, 1);
//! assert_eq!(south_east.len(), 1);
//! assert_eq!(south_east[0].address, "Sydney");
//!
//! // The same node by its path string.
//! assert_eq!(index.get("3")?.len(), 1);
//! # Ok::<(), quadtile::IndexError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod geojson;
pub mod loader;
pub mod projection;
pub mod quadtree;
pub mod service;
pub mod tile;
pub mod types;

pub use builder::IndexBuilder;
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use service::TileIndex;

pub use geo::{Point, Rect};

pub use loader::{TileLoader, TileSource};
pub use projection::{project, project_point, unproject};
pub use quadtree::{Entry, QuadNode, QuadTree};
pub use tile::{Quadrant, TilePath, tile_path, tile_rect};
pub use types::{GeoRecord, Place, PlanarPoint, TreeStats};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{IndexBuilder, IndexError, Result, TileIndex};

    pub use geo::Point;

    pub use crate::{GeoRecord, IndexConfig, Place};

    pub use crate::{TilePath, tile_path};

    pub use crate::{TileLoader, TileSource};
}
