//! Constants of the projected domain and index configuration.
//!
//! The constants describe the WGS84 ellipsoid and the square Mercator plane
//! the quad-tree partitions. `IndexConfig` carries the tuning knobs of the
//! tree and can be loaded from JSON, or TOML with the `toml` feature.
#[cfg(feature = "toml")]
use crate::error::IndexError;
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Equatorial radius of the Earth in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Length of the equator in meters; side of the projected square domain.
pub const EARTH_EQUATOR_LENGTH: f64 = 2.0 * PI * EARTH_RADIUS;

/// Half the equator; offset placing the projection origin at the top-left corner.
pub const HALF_EQUATOR: f64 = EARTH_EQUATOR_LENGTH / 2.0;

/// Eccentricity of the WGS84 reference ellipse.
pub const WGS84_ECCENTRICITY: f64 = 0.0818191908426;

pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Margin kept away from the latitude clamp bounds.
pub const LATITUDE_EPSILON: f64 = 1e-10;

/// Depth past which cells shrink to a few meters.
const MAX_RECOMMENDED_DEPTH: u32 = 24;

/// Quad-tree configuration.
///
/// # Example
///
/// ```rust
/// use quadtile::IndexConfig;
///
/// let config = IndexConfig::default();
/// assert_eq!(config.max_items, 100);
/// assert_eq!(config.max_depth, 12);
///
/// let json = r#"{ "max_items": 16, "max_depth": 8 }"#;
/// let config = IndexConfig::from_json(json).unwrap();
/// assert_eq!(config.max_items, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Width of the indexed plane in meters
    #[serde(default = "IndexConfig::default_extent")]
    pub width: f64,

    /// Height of the indexed plane in meters
    #[serde(default = "IndexConfig::default_extent")]
    pub height: f64,

    /// Entries a leaf holds before it subdivides
    #[serde(default = "IndexConfig::default_max_items")]
    pub max_items: usize,

    /// Maximum number of subdivisions below the root
    #[serde(default = "IndexConfig::default_max_depth")]
    pub max_depth: u32,
}

impl IndexConfig {
    const fn default_extent() -> f64 {
        EARTH_EQUATOR_LENGTH
    }

    const fn default_max_items() -> usize {
        100
    }

    const fn default_max_depth() -> u32 {
        12
    }

    /// Index an arbitrary `width` x `height` plane instead of the Mercator square.
    pub fn with_extent(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Zero is accepted here and rejected by [`validate`](Self::validate).
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        if max_depth > MAX_RECOMMENDED_DEPTH {
            log::warn!(
                "max_depth of {} subdivides cells below a few meters; \
                deep tile requests will mostly address near-empty leaves",
                max_depth
            );
        }

        self.max_depth = max_depth;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(format!(
                "width must be finite and positive, got: {}",
                self.width
            ));
        }

        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(format!(
                "height must be finite and positive, got: {}",
                self.height
            ));
        }

        if self.max_items == 0 {
            return Err("max_items must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: IndexConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        let config: IndexConfig = toml::from_str(toml_str)?;
        config.validate().map_err(IndexError::InvalidConfig)?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            width: Self::default_extent(),
            height: Self::default_extent(),
            max_items: Self::default_max_items(),
            max_depth: Self::default_max_depth(),
        }
    }
}
