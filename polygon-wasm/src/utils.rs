use wasm_bindgen::JsValue;

/// Route the `log` facade to the browser console and report panics there.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}

/// Read a JS value handed over by the map surface back as JSON text.
pub fn to_json_text(value: &JsValue) -> Result<String, JsValue> {
    js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("shape cannot be serialized to JSON"))
}

pub fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
