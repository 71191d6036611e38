use std::fmt;

use geojson::Feature;

use crate::document::Document;
use crate::error::StoreError;
use crate::feature::{DeletionSet, deletion_ids};
use crate::io::ExportFile;
use crate::store::{Event, FeatureStore};

/// The map surface as seen from the store: it only ever receives the whole
/// document and is expected to clear what it drew before drawing it again.
pub trait Surface {
    type Error: fmt::Debug;

    fn redraw(&mut self, document: &Document) -> Result<(), Self::Error>;
}

/// A feature store wired to the surface that displays it.
pub struct Session<S: Surface> {
    store: FeatureStore,
    surface: S,
}

impl<S: Surface> Session<S> {
    pub fn new(surface: S) -> Self {
        let mut session = Session {
            store: FeatureStore::new(),
            surface,
        };
        session.redraw();
        session
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn created(&mut self, feature: Feature) -> Result<(), StoreError> {
        self.apply(Event::Created(feature))
    }

    pub fn edited(&mut self, features: Vec<Feature>) -> Result<(), StoreError> {
        self.apply(Event::Edited(features))
    }

    /// Remove the given shapes, matched by their `properties.id`.
    pub fn deleted(&mut self, removed: &[Feature]) -> Result<(), StoreError> {
        self.delete_ids(deletion_ids(removed))
    }

    pub fn delete_ids(&mut self, ids: DeletionSet) -> Result<(), StoreError> {
        self.apply(Event::Deleted(ids))
    }

    pub fn import(&mut self, text: &str) -> Result<(), StoreError> {
        self.store.import(text)?;
        self.redraw();
        Ok(())
    }

    pub fn export(&self, name: &str) -> Result<ExportFile, StoreError> {
        self.store.export(name)
    }

    fn apply(&mut self, event: Event) -> Result<(), StoreError> {
        self.store.dispatch(event)?;
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        if let Err(e) = self.surface.redraw(self.store.document()) {
            log::warn!("map surface failed to draw the document: {e:?}");
        }
    }
}
