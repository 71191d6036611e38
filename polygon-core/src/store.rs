use geojson::{Feature, FeatureCollection};

use crate::document::Document;
use crate::error::StoreError;
use crate::feature::{DeletionSet, ShapeKind};
use crate::io::{self, ExportFile};
use crate::ops;

/// Something that happened on the map surface or through the file bridge.
#[derive(Clone, Debug)]
pub enum Event {
    Created(Feature),
    Edited(Vec<Feature>),
    Deleted(DeletionSet),
    Imported(Document),
}

/// Single owner of the editor's document. Every event swaps in a new value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureStore {
    document: Document,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Apply one event. On error the held document is left as it was.
    pub fn dispatch(&mut self, event: Event) -> Result<(), StoreError> {
        let next = match event {
            Event::Imported(document) => {
                log::info!("imported document with {} feature(s)", document.len());
                self.document = document;
                return Ok(());
            }
            Event::Created(feature) => {
                let collection = self.take_collection()?;
                log::debug!("created {} feature", ShapeKind::of(&feature));
                ops::create(collection, feature)
            }
            Event::Edited(features) => {
                let collection = self.take_collection()?;
                log::debug!("applying {} edited shape(s)", features.len());
                ops::edit(collection, features)
            }
            Event::Deleted(ids) => {
                let collection = self.take_collection()?;
                let before = collection.features.len();
                let next = ops::delete(collection, &ids);
                log::debug!("deleted {} feature(s)", before - next.features.len());
                next
            }
        };
        self.document = Document::Collection(next);
        Ok(())
    }

    pub fn create(&mut self, feature: Feature) -> Result<(), StoreError> {
        self.dispatch(Event::Created(feature))
    }

    pub fn edit(&mut self, features: Vec<Feature>) -> Result<(), StoreError> {
        self.dispatch(Event::Edited(features))
    }

    pub fn delete(&mut self, ids: DeletionSet) -> Result<(), StoreError> {
        self.dispatch(Event::Deleted(ids))
    }

    /// Replace the document with the parsed file contents. Text that is not
    /// JSON is logged and leaves the store untouched.
    pub fn import(&mut self, text: &str) -> Result<(), StoreError> {
        match io::parse_import(text) {
            Ok(document) => self.dispatch(Event::Imported(document)),
            Err(e) => {
                log::error!("error parsing imported file: {e}");
                Err(e)
            }
        }
    }

    pub fn export(&self, name: &str) -> Result<ExportFile, StoreError> {
        let file = io::export(&self.document, name)?;
        log::info!("exported {} feature(s) to {}", self.document.len(), file.name);
        Ok(file)
    }

    // Moves the collection out, leaving an empty one until the caller puts
    // the successor back.
    fn take_collection(&mut self) -> Result<FeatureCollection, StoreError> {
        match &mut self.document {
            Document::Collection(c) => Ok(std::mem::replace(c, ops::empty_collection())),
            Document::Unrecognized(_) => {
                log::warn!("ignoring change: current document is not a feature collection");
                Err(StoreError::NotACollection)
            }
        }
    }
}
