//! Client-side tile loading.
//!
//! A map client requests every visible tile whenever the viewport changes, so
//! the same tile is asked for many times and neighbouring tiles at different
//! zoom levels return overlapping objects. [`TileLoader`] fetches each tile
//! once and hands out each object once, keyed by [`GeoRecord::id`].

use crate::error::Result;
use crate::service::TileIndex;
use crate::tile::{TilePath, tile_path};
use crate::types::GeoRecord;
use rustc_hash::FxHashSet;

/// Something that answers tile requests, usually across a transport.
pub trait TileSource {
    type Object: GeoRecord;

    /// Objects under the node addressed by `path`.
    fn get(&self, path: &TilePath) -> Result<Vec<&Self::Object>>;
}

impl<T: GeoRecord> TileSource for TileIndex<T> {
    type Object = T;

    fn get(&self, path: &TilePath) -> Result<Vec<&T>> {
        Ok(self.query_path(path))
    }
}

type IdOf<S> = <<S as TileSource>::Object as GeoRecord>::Id;

/// De-duplicating tile fetcher.
pub struct TileLoader<'a, S: TileSource> {
    source: &'a S,
    loaded_tiles: FxHashSet<TilePath>,
    seen: FxHashSet<IdOf<S>>,
}

impl<'a, S: TileSource> TileLoader<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            loaded_tiles: FxHashSet::default(),
            seen: FxHashSet::default(),
        }
    }

    /// Fetch tile `(x, y, zoom)` and return the objects not returned before.
    ///
    /// An already loaded tile returns nothing without asking the source. A
    /// failed fetch is logged and reads as an empty tile; the tile stays
    /// unloaded so a later call retries it.
    pub fn load(&mut self, x: u32, y: u32, zoom: u8) -> Vec<&'a S::Object> {
        let path = tile_path(x, y, zoom);
        if self.loaded_tiles.contains(&path) {
            log::debug!("Tile {:?} already loaded, skipping", path.to_string());
            return Vec::new();
        }

        let source: &'a S = self.source;
        let objects = match source.get(&path) {
            Ok(objects) => objects,
            Err(e) => {
                log::warn!("No data for tile {:?}: {}", path.to_string(), e);
                return Vec::new();
            }
        };

        log::debug!(
            "Tile {:?}: received {} objects",
            path.to_string(),
            objects.len()
        );
        self.loaded_tiles.insert(path);

        objects
            .into_iter()
            .filter(|object| self.seen.insert(object.id()))
            .collect()
    }

    pub fn is_loaded(&self, x: u32, y: u32, zoom: u8) -> bool {
        self.loaded_tiles.contains(&tile_path(x, y, zoom))
    }

    pub fn has_seen(&self, id: &IdOf<S>) -> bool {
        self.seen.contains(id)
    }

    pub fn loaded_tile_count(&self) -> usize {
        self.loaded_tiles.len()
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
