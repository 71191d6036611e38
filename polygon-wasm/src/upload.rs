use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, FileReader, HtmlInputElement};

use crate::constants::FILE_INPUT_ID;
use crate::state::{State, update};

// Wires up the file input that replaces the document with an uploaded file.
pub fn attach_file_input(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (doc, accept) = {
        let s = state.borrow();
        (s.document.clone(), s.config.import_accept.clone())
    };
    let Some(input) = doc.get_element_by_id(FILE_INPUT_ID) else {
        log::debug!("no #{FILE_INPUT_ID} element, file import disabled");
        return Ok(());
    };
    let input: HtmlInputElement = input.dyn_into()?;
    input.set_accept(&accept);

    let input_for_closure = input.clone();
    let onchange = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_e: Event| {
        let Some(file) = input_for_closure.files().and_then(|files| files.item(0)) else {
            log::debug!("no file selected");
            return;
        };
        // Allow picking the same file again later.
        input_for_closure.set_value("");
        if let Err(e) = read_into_state(&state, &file) {
            log::error!("failed to read {}: {:?}", file.name(), e);
        }
    }));
    input.set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget();
    Ok(())
}

// The store only changes once the reader's load event fires.
fn read_into_state(state: &Rc<RefCell<State>>, file: &web_sys::File) -> Result<(), JsValue> {
    let reader = FileReader::new()?;
    let st = state.clone();
    let name = file.name();
    let reader_for_closure = reader.clone();
    let onload = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_ev: Event| {
        let text = match reader_for_closure.result() {
            Ok(result) => result.as_string().unwrap_or_default(),
            Err(e) => {
                log::error!("could not read {name}: {e:?}");
                return;
            }
        };
        log::info!("importing {name} ({} bytes)", text.len());
        let imported = update(&st, |s| {
            // Parse failures are already logged by the store.
            let _ = s.session.import(&text);
            Ok(())
        });
        if let Err(e) = imported {
            log::error!("could not import {name}: {e:?}");
        }
    }));
    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.read_as_text(file)?;
    onload.forget();
    Ok(())
}
