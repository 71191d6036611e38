use geojson::{FeatureCollection, JsonValue};

use crate::document::Document;
use crate::error::StoreError;

pub const EXPORT_FILE_NAME: &str = "polygons.geojson";
pub const EXPORT_MIME: &str = "application/json";

/// A rendered export, ready to be offered as a download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime: &'static str,
    pub contents: String,
}

pub fn export(document: &Document, name: &str) -> Result<ExportFile, StoreError> {
    let contents = serde_json::to_string(document).map_err(StoreError::Serialize)?;
    Ok(ExportFile {
        name: name.to_string(),
        mime: EXPORT_MIME,
        contents,
    })
}

/// Parse imported file contents.
///
/// Only JSON syntax is checked. A value that is not a feature collection is
/// still accepted and kept as [`Document::Unrecognized`].
pub fn parse_import(text: &str) -> Result<Document, StoreError> {
    let value: JsonValue = serde_json::from_str(text).map_err(StoreError::MalformedJson)?;
    match serde_json::from_value::<FeatureCollection>(value.clone()) {
        Ok(collection) => Ok(Document::Collection(collection)),
        Err(e) => {
            log::warn!("imported JSON is not a feature collection, keeping it as-is: {e}");
            Ok(Document::Unrecognized(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_exports_an_empty_collection() {
        let file = export(&Document::default(), EXPORT_FILE_NAME).unwrap();
        assert_eq!(file.name, "polygons.geojson");
        assert_eq!(file.mime, "application/json");
        let value: JsonValue = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"], serde_json::json!([]));
    }

    #[test]
    fn kml_is_rejected() {
        let kml = r#"<?xml version="1.0"?><kml xmlns="http://www.opengis.net/kml/2.2"></kml>"#;
        assert!(matches!(parse_import(kml), Err(StoreError::MalformedJson(_))));
    }

    #[test]
    fn non_collection_json_is_kept_verbatim() {
        let doc = parse_import(r#"{"hello":[1,2,3]}"#).unwrap();
        assert_eq!(
            doc,
            Document::Unrecognized(serde_json::json!({"hello": [1, 2, 3]}))
        );
        let file = export(&doc, "out.geojson").unwrap();
        assert_eq!(file.contents, r#"{"hello":[1,2,3]}"#);
    }

    #[test]
    fn collection_is_recognized() {
        let doc = parse_import(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[-0.09,51.505]},"properties":{"id":"m"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.len(), 1);
    }
}
