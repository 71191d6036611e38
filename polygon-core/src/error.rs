use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("imported file is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("shape handed over by the map surface is not a GeoJSON feature: {0}")]
    InvalidShape(#[source] serde_json::Error),
    /// The held document came from an import that was not a feature collection.
    #[error("current document is not a feature collection")]
    NotACollection,
    #[error("failed to encode feature collection: {0}")]
    Serialize(#[source] serde_json::Error),
}
