//! GeoJSON export of tile contents.

use crate::error::Result;
use crate::types::GeoRecord;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Converts one record into a point feature.
///
/// The record's serialized fields become the feature properties. A record
/// that does not serialize to a JSON object is stored under `"value"`.
/// Records without a location produce a feature with no geometry.
pub fn to_feature<T>(record: &T) -> Result<Feature>
where
    T: GeoRecord + Serialize,
{
    let geometry = record
        .location()
        .map(|point| Geometry::new(Value::Point(vec![point.x(), point.y()])));

    let properties = match serde_json::to_value(record)? {
        JsonValue::Object(map) => map,
        JsonValue::Null => JsonObject::new(),
        other => {
            let mut map = JsonObject::new();
            map.insert("value".to_string(), other);
            map
        }
    };

    Ok(Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// Converts query results into a feature collection, preserving order.
pub fn to_feature_collection<'a, T, I>(records: I) -> Result<FeatureCollection>
where
    T: GeoRecord + Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let features = records
        .into_iter()
        .map(to_feature)
        .collect::<Result<Vec<_>>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Serializes query results as a GeoJSON `FeatureCollection` string.
pub fn to_geojson_string<'a, T, I>(records: I) -> Result<String>
where
    T: GeoRecord + Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let collection = to_feature_collection(records)?;
    Ok(serde_json::to_string(&collection)?)
}
