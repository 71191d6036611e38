use std::cell::RefCell;
use std::rc::Rc;

use polygon_core::{EditorConfig, Session};
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::surface::JsSurface;

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct State {
    pub document: Document,
    pub config: EditorConfig,
    pub session: Session<JsSurface>,
}

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}

/// Run `f` against the state, then draw whatever it queued for the map
/// surface after the borrow is released.
pub fn update<R>(
    state: &Rc<RefCell<State>>,
    f: impl FnOnce(&mut State) -> Result<R, JsValue>,
) -> Result<R, JsValue> {
    let (result, frame) = {
        let mut s = state
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("editor state is busy"))?;
        let result = f(&mut s);
        (result, s.session.surface_mut().take_frame())
    };
    if let Some(frame) = frame
        && let Err(e) = frame.draw()
    {
        log::warn!("map surface failed to draw the document: {e:?}");
    }
    result
}
