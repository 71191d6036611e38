use js_sys::Array;
use polygon_core::ExportFile;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, HtmlElement, Url};

/// Offer an export to the user through a temporary object URL.
pub fn save_export(document: &Document, file: &ExportFile) -> Result<(), JsValue> {
    let array = Array::new();
    array.push(&JsValue::from_str(&file.contents));
    let options = BlobPropertyBag::new();
    options.set_type(file.mime);
    let blob = Blob::new_with_str_sequence_and_options(&array, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let a = document.create_element("a")?.dyn_into::<HtmlElement>()?;
    a.set_attribute("href", &url)?;
    a.set_attribute("download", &file.name)?;
    a.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}
