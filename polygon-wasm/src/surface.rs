use js_sys::{Function, JSON};
use polygon_core::{Document, Surface};
use wasm_bindgen::JsValue;

/// Map surface living on the JS side. The host page passes a callback that
/// removes every GeoJSON layer it drew and adds the given collection again.
///
/// Redraws are queued as a [`Frame`] and drawn by the caller once the editor
/// state is no longer borrowed, so the callback may call back into the editor.
pub struct JsSurface {
    render: Function,
    pending: Option<String>,
}

/// A serialized document waiting to be handed to the render callback.
pub struct Frame {
    render: Function,
    text: String,
}

impl JsSurface {
    pub fn new(render: Function) -> Self {
        JsSurface {
            render,
            pending: None,
        }
    }

    /// Only the latest document is kept; older queued ones are superseded.
    pub fn take_frame(&mut self) -> Option<Frame> {
        self.pending.take().map(|text| Frame {
            render: self.render.clone(),
            text,
        })
    }
}

impl Surface for JsSurface {
    type Error = serde_json::Error;

    fn redraw(&mut self, document: &Document) -> Result<(), serde_json::Error> {
        self.pending = Some(serde_json::to_string(document)?);
        Ok(())
    }
}

impl Frame {
    pub fn draw(self) -> Result<(), JsValue> {
        let value = JSON::parse(&self.text)?;
        self.render.call1(&JsValue::NULL, &value)?;
        Ok(())
    }
}
