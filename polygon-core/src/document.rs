use geojson::{Feature, FeatureCollection, JsonValue};
use serde::Serialize;

use crate::ops::empty_collection;

/// Everything the editor holds: normally a feature collection, but an import
/// that parsed as JSON without being one is kept verbatim until replaced.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Collection(FeatureCollection),
    Unrecognized(JsonValue),
}

impl Default for Document {
    fn default() -> Self {
        Document::Collection(empty_collection())
    }
}

impl Document {
    pub fn features(&self) -> Option<&[Feature]> {
        match self {
            Document::Collection(c) => Some(&c.features),
            Document::Unrecognized(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.features().map_or(0, <[Feature]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<FeatureCollection> for Document {
    fn from(collection: FeatureCollection) -> Self {
        Document::Collection(collection)
    }
}
