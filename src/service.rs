//! Tile index over a geographic dataset.
//!
//! `TileIndex` owns a quad-tree of projected records and answers map tile
//! requests with every record whose projected position falls inside the
//! requested tile. Once built, the index is immutable and can be shared
//! between threads freely.
//!
//! ```rust
//! use quadtile::{IndexBuilder, Place, TileIndex};
//!
//! let places = vec![
//!     Place::new(1, 37.618916, 55.751401, "Moscow"),
//!     Place::new(2, -74.0060, 40.7128, "New York"),
//! ];
//!
//! // Two records fit in the root leaf, which answers every tile.
//! let index = TileIndex::build(places.clone())?;
//! assert_eq!(index.query(0, 0, 0).len(), 2);
//! assert_eq!(index.query(0, 0, 1).len(), 2);
//!
//! // With one record per leaf the root splits and zoom 1 separates them:
//! // Moscow is north-east, New York north-west.
//! let index = IndexBuilder::new().max_items(1).build(places)?;
//! assert_eq!(index.query(1, 0, 1)[0].id, 1);
//! assert_eq!(index.query(0, 0, 1)[0].id, 2);
//! # Ok::<(), quadtile::IndexError>(())
//! ```

use crate::builder::IndexBuilder;
use crate::config::IndexConfig;
use crate::error::Result;
use crate::geojson::to_feature_collection;
use crate::quadtree::QuadTree;
use crate::tile::{TilePath, tile_path, tile_rect};
use crate::types::{GeoRecord, TreeStats};
use geo::Rect;
use geojson::FeatureCollection;
use serde::Serialize;

/// Immutable spatial index answering tile queries.
#[derive(Debug)]
pub struct TileIndex<T> {
    tree: QuadTree<T>,
    config: IndexConfig,
}

impl<T: GeoRecord> TileIndex<T> {
    /// Build an index with the default configuration.
    ///
    /// Use [`IndexBuilder`] to tune `max_items` and `max_depth`.
    pub fn build<I>(dataset: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        IndexBuilder::new().build(dataset)
    }

    /// Records of tile `(x, y, zoom)` as a GeoJSON feature collection.
    pub fn query_geojson(&self, x: u32, y: u32, zoom: u8) -> Result<FeatureCollection>
    where
        T: Serialize,
    {
        to_feature_collection(self.query(x, y, zoom))
    }
}

impl<T> TileIndex<T> {
    pub(crate) fn from_parts(tree: QuadTree<T>, config: IndexConfig) -> Self {
        Self { tree, config }
    }

    /// Records inside tile `(x, y)` at `zoom`.
    ///
    /// If the tree is shallower than `zoom` along the tile's path, the
    /// records of the covering leaf are returned, which may include records
    /// from neighbouring tiles of the same leaf.
    pub fn query(&self, x: u32, y: u32, zoom: u8) -> Vec<&T> {
        self.query_path(&tile_path(x, y, zoom))
    }

    pub fn query_path(&self, path: &TilePath) -> Vec<&T> {
        self.tree.subtree(path).collect()
    }

    /// Records under the node addressed by a digit path such as `"0312"`.
    pub fn get(&self, path: &str) -> Result<Vec<&T>> {
        Ok(self.tree.get_subtree(path)?.collect())
    }

    /// Planar rectangle covered by tile `(x, y, zoom)`.
    pub fn tile_bounds(&self, x: u32, y: u32, zoom: u8) -> Rect {
        tile_rect(x, y, zoom, self.config.width, self.config.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn tree(&self) -> &QuadTree<T> {
        &self.tree
    }
}
