use eframe::wasm_bindgen::{JsCast as _, JsValue};

use crate::error::ExportError;

fn js_error(err: JsValue) -> ExportError {
    ExportError::Download(format!("{err:?}"))
}

/// Hand PNG bytes to the browser as a file download
pub(crate) fn download_png(bytes: &[u8], file_name: &str) -> Result<(), ExportError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ExportError::Download("no document".to_owned()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let blob = web_sys::Blob::new_with_u8_array_sequence(&parts).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Download("created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url).map_err(js_error)?;
    Ok(())
}
