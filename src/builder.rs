//! Builder for tile indexes.
//!
//! The builder collects configuration, then consumes a dataset in one pass:
//! every record is projected onto the Mercator plane and inserted into a
//! fresh quad-tree. The index is only handed out once every record has been
//! placed, so callers never observe a partially built tree.

use crate::config::IndexConfig;
use crate::error::{IndexError, Result};
use crate::projection::project_point;
use crate::quadtree::QuadTree;
use crate::service::TileIndex;
use crate::types::GeoRecord;

/// Builder for [`TileIndex`] with custom tree tuning.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    config: IndexConfig,
}

impl IndexBuilder {
    /// Create a builder with the default Mercator-sized configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how many entries a leaf holds before subdividing.
    pub fn max_items(mut self, max_items: usize) -> Self {
        self.config = self.config.with_max_items(max_items);
        self
    }

    /// Set the maximum number of subdivisions below the root.
    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config = self.config.with_max_depth(max_depth);
        self
    }

    /// Build the index from `dataset`.
    ///
    /// Fails with [`IndexError::InvalidConfig`] before touching the dataset if
    /// the configuration is invalid, and with
    /// [`IndexError::DatasetRecordInvalid`] on the first record without a
    /// location.
    pub fn build<T, I>(self, dataset: I) -> Result<TileIndex<T>>
    where
        T: GeoRecord,
        I: IntoIterator<Item = T>,
    {
        self.config.validate().map_err(IndexError::InvalidConfig)?;

        let mut tree = QuadTree::with_config(&self.config);
        for (index, record) in dataset.into_iter().enumerate() {
            let location = record
                .location()
                .ok_or_else(|| IndexError::DatasetRecordInvalid {
                    index,
                    reason: "missing longitude or latitude".to_string(),
                })?;

            let planar = project_point(&location);
            tree.insert(planar.x, planar.y, record);
        }

        let stats = tree.stats();
        log::info!(
            "Built tile index: {} objects in {} leaves, depth {}",
            stats.object_count,
            stats.leaf_count,
            stats.depth
        );

        Ok(TileIndex::from_parts(tree, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Place;

    #[test]
    fn test_builder_default() {
        let builder = IndexBuilder::new();
        assert_eq!(builder.config, IndexConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let builder = IndexBuilder::new().max_items(8).max_depth(4);
        assert_eq!(builder.config.max_items, 8);
        assert_eq!(builder.config.max_depth, 4);

        let index = builder.build(Vec::<Place>::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.config().max_items, 8);
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = IndexConfig {
            width: -5.0,
            ..Default::default()
        };
        let err = IndexBuilder::new()
            .config(config)
            .build(vec![Place::new(1, 0.0, 0.0, "x")])
            .unwrap_err();
        assert!(matches!(err, IndexError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_zero_max_items_is_invalid_config() {
        let err = IndexBuilder::new()
            .max_items(0)
            .build(vec![Place::new(1, 0.0, 0.0, "x")])
            .unwrap_err();
        match err {
            IndexError::InvalidConfig(reason) => assert!(reason.contains("max_items")),
            other => panic!("expected InvalidConfig, got {}", other),
        }
    }

    #[test]
    fn test_builder_fails_on_record_without_location() {
        let dataset = vec![
            Place::new(1, 37.6, 55.7, "ok"),
            Place {
                id: 2,
                lng: Some(37.6),
                lat: None,
                address: "no latitude".to_string(),
            },
        ];

        match IndexBuilder::new().build(dataset) {
            Err(IndexError::DatasetRecordInvalid { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected DatasetRecordInvalid, got {:?}", other.map(|i| i.len())),
        }
    }

    #[test]
    fn test_builder_places_every_record() {
        let dataset: Vec<Place> = (0..250)
            .map(|i| Place::new(i, -180.0 + i as f64 * 1.4, -60.0 + i as f64 * 0.5, ""))
            .collect();

        let index = IndexBuilder::new().max_items(10).build(dataset).unwrap();
        assert_eq!(index.len(), 250);
        assert_eq!(index.stats().object_count, 250);
        assert!(index.stats().internal_count > 0);
    }
}
