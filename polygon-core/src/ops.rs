//! Transitions of the feature collection. Each one consumes the old collection
//! and returns the new one; nothing is mutated behind the caller's back.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use geojson::{Feature, FeatureCollection};

use crate::feature::{DeletionSet, FeatureKey, feature_id};

pub fn empty_collection() -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: Vec::new(),
        foreign_members: None,
    }
}

/// Append a freshly drawn feature.
pub fn create(mut collection: FeatureCollection, feature: Feature) -> FeatureCollection {
    collection.features.push(feature);
    collection
}

/// Replace, in place, every feature whose id matches an edited one.
///
/// When several edited features share an id the first wins. Edited features
/// whose id matches nothing in the collection are dropped, never appended.
pub fn edit(collection: FeatureCollection, edited: Vec<Feature>) -> FeatureCollection {
    let mut by_id: HashMap<FeatureKey, Feature> = HashMap::with_capacity(edited.len());
    for feature in edited {
        let Some(id) = feature_id(&feature) else {
            continue;
        };
        if let Entry::Vacant(slot) = by_id.entry(id) {
            slot.insert(feature);
        }
    }

    let FeatureCollection {
        bbox,
        features,
        foreign_members,
    } = collection;
    let features = features
        .into_iter()
        .map(|existing| match feature_id(&existing).and_then(|id| by_id.get(&id)) {
            Some(replacement) => replacement.clone(),
            None => existing,
        })
        .collect();

    FeatureCollection {
        bbox,
        features,
        foreign_members,
    }
}

/// Drop every feature whose id is listed. Features without an id always stay.
pub fn delete(mut collection: FeatureCollection, ids: &DeletionSet) -> FeatureCollection {
    collection
        .features
        .retain(|f| !feature_id(f).is_some_and(|id| ids.contains(&id)));
    collection
}
