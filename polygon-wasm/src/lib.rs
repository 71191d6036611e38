//! Browser glue for the polygon editor.
//!
//! The host page owns the map surface (tiles, draw toolbar, layers) and calls
//! into this module whenever a shape is created, edited or deleted. The editor
//! keeps the feature collection and hands the whole of it back through the
//! render callback passed to [`start_editor`].

use std::cell::RefCell;
use std::rc::Rc;

use polygon_core::{EditorConfig, Session, parse_feature, parse_features};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

mod constants;
mod download;
mod state;
mod surface;
mod upload;
mod utils;

use constants::EXPORT_BUTTON_ID;
use state::{STATE, State, update};
use surface::JsSurface;
use utils::{to_js_error, to_json_text};

/// Set up the editor. `render` receives the full feature collection after
/// every change.
#[wasm_bindgen(js_name = startEditor)]
pub fn start_editor(render: js_sys::Function) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let search = window.location().search().unwrap_or_default();
    let config = EditorConfig::default().with_query(&search);
    utils::init_logging(config.level());

    let state = Rc::new(RefCell::new(State {
        document,
        config,
        session: Session::new(JsSurface::new(render)),
    }));
    STATE.with(|st| st.replace(Some(state.clone())));
    // first draw of the empty collection
    update(&state, |_| Ok(()))?;

    upload::attach_file_input(state.clone())?;
    attach_export_button(state)?;
    log::info!("polygon editor started");
    Ok(())
}

fn attach_export_button(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    let Some(btn) = doc.get_element_by_id(EXPORT_BUTTON_ID) else {
        return Ok(());
    };
    let btn: HtmlElement = btn.dyn_into()?;
    let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        if let Err(e) = update(&state, |s| export_state(s)) {
            log::error!("export failed: {e:?}");
        }
    }));
    btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
    Ok(())
}

fn export_state(s: &State) -> Result<(), JsValue> {
    let file = s
        .session
        .export(&s.config.export_file_name)
        .map_err(to_js_error)?;
    download::save_export(&s.document, &file)
}

fn with_state<R>(f: impl FnOnce(&mut State) -> Result<R, JsValue>) -> Result<R, JsValue> {
    let state = STATE
        .with(|st| st.borrow().clone())
        .ok_or("editor not started")?;
    update(&state, f)
}

/// A shape was drawn; `shape` is its GeoJSON feature.
#[wasm_bindgen(js_name = onCreated)]
pub fn on_created(shape: JsValue) -> Result<(), JsValue> {
    let feature = parse_feature(&to_json_text(&shape)?).map_err(to_js_error)?;
    with_state(|s| s.session.created(feature).map_err(to_js_error))
}

/// Shapes were edited; `shapes` is an array of features or a feature collection.
#[wasm_bindgen(js_name = onEdited)]
pub fn on_edited(shapes: JsValue) -> Result<(), JsValue> {
    let features = parse_features(&to_json_text(&shapes)?).map_err(to_js_error)?;
    with_state(|s| s.session.edited(features).map_err(to_js_error))
}

/// Shapes were removed; only those carrying `properties.id` take effect.
#[wasm_bindgen(js_name = onDeleted)]
pub fn on_deleted(shapes: JsValue) -> Result<(), JsValue> {
    let removed = parse_features(&to_json_text(&shapes)?).map_err(to_js_error)?;
    with_state(|s| s.session.deleted(&removed).map_err(to_js_error))
}

/// Download the current collection.
#[wasm_bindgen(js_name = exportGeojson)]
pub fn export_geojson() -> Result<(), JsValue> {
    with_state(|s| export_state(s))
}

/// Replace the collection with `text`. Returns `false` when the text is not
/// JSON, in which case nothing changes.
#[wasm_bindgen(js_name = importGeojson)]
pub fn import_geojson(text: &str) -> Result<bool, JsValue> {
    with_state(|s| Ok(s.session.import(text).is_ok()))
}

/// The current document as JSON text.
#[wasm_bindgen(js_name = featureCollection)]
pub fn feature_collection() -> Result<String, JsValue> {
    with_state(|s| serde_json::to_string(s.session.document()).map_err(to_js_error))
}

/// Map view and draw tool settings for the host page, as JSON text.
#[wasm_bindgen(js_name = mapOptions)]
pub fn map_options() -> Result<String, JsValue> {
    with_state(|s| serde_json::to_string(&s.config).map_err(to_js_error))
}
