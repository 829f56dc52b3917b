//! WGS84 to elliptical Mercator projection.
//!
//! Geographic coordinates are mapped onto a square plane whose side is the
//! length of the equator. The origin sits at the top-left (north-west) corner
//! of the plane so that quadrant numbering in the quad-tree reads like a map:
//! `x` grows eastwards and `y` grows southwards.
//!
//! Inputs are never rejected. Out-of-range or non-finite coordinates are
//! clamped into the projectable band, which keeps every output finite.

use crate::config::{
    DEG_TO_RAD, EARTH_EQUATOR_LENGTH, EARTH_RADIUS, HALF_EQUATOR, LATITUDE_EPSILON,
    WGS84_ECCENTRICITY,
};
use crate::types::PlanarPoint;
use geo::Point;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

const INVERSE_MAX_ITERATIONS: usize = 16;
const INVERSE_TOLERANCE: f64 = 1e-12;

/// Project a longitude/latitude pair (degrees) onto the Mercator plane.
///
/// # Examples
///
/// ```
/// use quadtile::projection::project;
/// use quadtile::config::HALF_EQUATOR;
///
/// let origin = project(0.0, 0.0);
/// assert_eq!(origin.x, HALF_EQUATOR);
/// assert_eq!(origin.y, HALF_EQUATOR);
///
/// // Moscow is east of Greenwich and north of the equator.
/// let moscow = project(37.618916, 55.751401);
/// assert!(moscow.x > HALF_EQUATOR);
/// assert!(moscow.y < HALF_EQUATOR);
/// ```
pub fn project(longitude: f64, latitude: f64) -> PlanarPoint {
    let x = HALF_EQUATOR + longitude_to_x(longitude);
    let y = HALF_EQUATOR - latitude_to_y(latitude);

    PlanarPoint::new(
        x.clamp(0.0, EARTH_EQUATOR_LENGTH),
        y.clamp(0.0, EARTH_EQUATOR_LENGTH),
    )
}

/// Project a `geo::Point` holding `(longitude, latitude)` in degrees.
#[inline]
pub fn project_point(point: &Point) -> PlanarPoint {
    project(point.x(), point.y())
}

/// Map a plane position back to `(longitude, latitude)` in degrees.
///
/// The latitude is recovered iteratively; points projected from latitudes
/// inside the Mercator band round-trip to well under a micro-degree.
pub fn unproject(planar: PlanarPoint) -> Point {
    let lon = (planar.x - HALF_EQUATOR) / EARTH_RADIUS;

    let t = (-(HALF_EQUATOR - planar.y) / EARTH_RADIUS).exp();
    let half_e = WGS84_ECCENTRICITY / 2.0;
    let mut lat = FRAC_PI_2 - 2.0 * t.atan();

    for _ in 0..INVERSE_MAX_ITERATIONS {
        let e_sin_lat = WGS84_ECCENTRICITY * lat.sin();
        let ratio = ((1.0 - e_sin_lat) / (1.0 + e_sin_lat)).powf(half_e);
        let next = FRAC_PI_2 - 2.0 * (t * ratio).atan();
        let delta = (next - lat).abs();
        lat = next;
        if delta < INVERSE_TOLERANCE {
            break;
        }
    }

    Point::new(lon / DEG_TO_RAD, lat / DEG_TO_RAD)
}

/// Clamp to `[min, max]`, mapping NaN to zero.
#[inline]
fn restrict(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}

fn longitude_to_x(lng: f64) -> f64 {
    EARTH_RADIUS * restrict(lng * DEG_TO_RAD, -PI, PI)
}

fn latitude_to_y(lat: f64) -> f64 {
    // Past the poles the tangent changes sign and the logarithm is undefined.
    let latitude = restrict(
        lat * DEG_TO_RAD,
        -FRAC_PI_2 + LATITUDE_EPSILON,
        FRAC_PI_2 - LATITUDE_EPSILON,
    );

    let e_sin_lat = WGS84_ECCENTRICITY * latitude.sin();
    let tan_pt = (FRAC_PI_4 + latitude * 0.5).tan();
    let pow_pt = ((1.0 - e_sin_lat) / (1.0 + e_sin_lat)).powf(WGS84_ECCENTRICITY / 2.0);

    EARTH_RADIUS * (tan_pt * pow_pt).ln()
}
