use std::collections::HashSet;
use std::fmt;

use geojson::{Feature, FeatureCollection, JsonValue};
use serde::Deserialize;

use crate::error::StoreError;

/// Identity of a feature: the scalar stored under `properties.id`.
///
/// Numbers are compared by value, so `1` and `1.0` are the same key, while
/// the string `"1"` and the number `1` are not.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKey {
    Text(String),
    Number(String),
    Flag(bool),
}

impl FeatureKey {
    /// Key for an id value. Null, arrays and objects never identify a feature.
    pub fn of(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::String(s) => Some(FeatureKey::Text(s.clone())),
            JsonValue::Number(n) => {
                let v = n.as_f64()?;
                // -0 and 0 are the same id
                let v = if v == 0.0 { 0.0 } else { v };
                Some(FeatureKey::Number(v.to_string()))
            }
            JsonValue::Bool(b) => Some(FeatureKey::Flag(*b)),
            JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        }
    }

    /// `""`, `0` and `false` cannot be used to delete a feature.
    pub fn is_truthy(&self) -> bool {
        match self {
            FeatureKey::Text(s) => !s.is_empty(),
            FeatureKey::Number(n) => n != "0",
            FeatureKey::Flag(b) => *b,
        }
    }
}

impl From<&str> for FeatureKey {
    fn from(id: &str) -> Self {
        FeatureKey::Text(id.to_string())
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureKey::Text(s) | FeatureKey::Number(s) => f.write_str(s),
            FeatureKey::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Identifiers of shapes removed on the map surface.
pub type DeletionSet = HashSet<FeatureKey>;

/// Identity used to match edited and deleted shapes, read from `properties.id`.
pub fn feature_id(feature: &Feature) -> Option<FeatureKey> {
    feature
        .properties
        .as_ref()
        .and_then(|props| props.get("id"))
        .and_then(FeatureKey::of)
}

/// Collect the ids of removed shapes. Shapes lacking an id, or carrying a
/// falsy one, add nothing, so they can never be deleted this way.
pub fn deletion_ids<'a>(removed: impl IntoIterator<Item = &'a Feature>) -> DeletionSet {
    removed
        .into_iter()
        .filter_map(feature_id)
        .filter(FeatureKey::is_truthy)
        .collect()
}

/// Parse one shape as emitted by the map surface on create.
pub fn parse_feature(text: &str) -> Result<Feature, StoreError> {
    serde_json::from_str(text).map_err(StoreError::InvalidShape)
}

// Edit/delete callbacks hand over either a bare array or a whole layer group.
#[derive(Deserialize)]
#[serde(untagged)]
enum Shapes {
    List(Vec<Feature>),
    Group(FeatureCollection),
}

/// Parse the shapes of an edit or delete callback, keeping their order.
pub fn parse_features(text: &str) -> Result<Vec<Feature>, StoreError> {
    let shapes: Shapes = serde_json::from_str(text).map_err(StoreError::InvalidShape)?;
    Ok(match shapes {
        Shapes::List(features) => features,
        Shapes::Group(collection) => collection.features,
    })
}

/// Geometry kind of a feature, used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Point,
    MultiPoint,
    Line,
    MultiLine,
    Polygon,
    MultiPolygon,
    Collection,
    Empty,
}

impl ShapeKind {
    pub fn of(feature: &Feature) -> Self {
        use geojson::Value;
        match feature.geometry.as_ref().map(|g| &g.value) {
            Some(Value::Point(_)) => ShapeKind::Point,
            Some(Value::MultiPoint(_)) => ShapeKind::MultiPoint,
            Some(Value::LineString(_)) => ShapeKind::Line,
            Some(Value::MultiLineString(_)) => ShapeKind::MultiLine,
            Some(Value::Polygon(_)) => ShapeKind::Polygon,
            Some(Value::MultiPolygon(_)) => ShapeKind::MultiPolygon,
            Some(Value::GeometryCollection(_)) => ShapeKind::Collection,
            None => ShapeKind::Empty,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Point => "point",
            ShapeKind::MultiPoint => "multi-point",
            ShapeKind::Line => "line",
            ShapeKind::MultiLine => "multi-line",
            ShapeKind::Polygon => "polygon",
            ShapeKind::MultiPolygon => "multi-polygon",
            ShapeKind::Collection => "geometry collection",
            ShapeKind::Empty => "empty",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of(text: &str) -> Option<FeatureKey> {
        feature_id(&parse_feature(text).unwrap())
    }

    #[test]
    fn id_is_read_from_properties() {
        assert_eq!(
            key_of(r#"{"type":"Feature","geometry":null,"properties":{"id":"7","name":"lot"}}"#),
            Some(FeatureKey::from("7"))
        );
    }

    #[test]
    fn numeric_ids_compare_by_value() {
        let int = key_of(r#"{"type":"Feature","geometry":null,"properties":{"id":7}}"#);
        let float = key_of(r#"{"type":"Feature","geometry":null,"properties":{"id":7.0}}"#);
        let text = key_of(r#"{"type":"Feature","geometry":null,"properties":{"id":"7"}}"#);
        assert!(int.is_some());
        assert_eq!(int, float);
        assert_ne!(int, text);
        assert_eq!(int.unwrap().to_string(), "7");
    }

    #[test]
    fn null_or_missing_ids_are_not_identities() {
        assert_eq!(key_of(r#"{"type":"Feature","geometry":null,"properties":{"id":null}}"#), None);
        assert_eq!(key_of(r#"{"type":"Feature","geometry":null,"properties":null}"#), None);
        assert_eq!(key_of(r#"{"type":"Feature","geometry":null,"properties":{"id":[1]}}"#), None);
    }

    #[test]
    fn deletion_ids_skip_shapes_without_usable_ids() {
        let shapes = parse_features(
            r#"[
                {"type":"Feature","geometry":null,"properties":{"id":"a"}},
                {"type":"Feature","geometry":null,"properties":{}},
                {"type":"Feature","geometry":null,"properties":{"id":""}},
                {"type":"Feature","geometry":null,"properties":{"id":0}},
                {"type":"Feature","geometry":null,"properties":{"id":false}},
                {"type":"Feature","geometry":null,"properties":{"id":3}}
            ]"#,
        )
        .unwrap();
        let ids = deletion_ids(&shapes);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&FeatureKey::from("a")));
        assert!(ids.contains(&FeatureKey::of(&JsonValue::from(3)).unwrap()));
    }

    #[test]
    fn layer_group_is_accepted_as_shape_list() {
        let shapes = parse_features(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":{"id":"p"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(ShapeKind::of(&shapes[0]), ShapeKind::Point);
    }

    #[test]
    fn garbage_shape_is_rejected() {
        assert!(matches!(
            parse_feature("{\"type\":\"Nope\"}"),
            Err(StoreError::InvalidShape(_))
        ));
    }
}
