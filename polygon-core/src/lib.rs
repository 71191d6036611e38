//! Feature store behind the polygon editor.
//!
//! The map surface draws, edits and deletes shapes; this crate keeps the
//! resulting GeoJSON feature collection and hands it back for a full redraw
//! after every change. Nothing here touches the DOM, so the whole crate builds
//! and tests natively.

mod config;
mod document;
mod error;
mod feature;
mod io;
mod ops;
mod session;
mod store;

pub use config::{DrawTools, EditorConfig, MapView, get_query_param};
pub use document::Document;
pub use error::StoreError;
pub use feature::{
    DeletionSet, FeatureKey, ShapeKind, deletion_ids, feature_id, parse_feature, parse_features,
};
pub use io::{EXPORT_FILE_NAME, EXPORT_MIME, ExportFile, export, parse_import};
pub use ops::{create, delete, edit, empty_collection};
pub use session::{Session, Surface};
pub use store::{Event, FeatureStore};

pub use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
