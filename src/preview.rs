use futures_util::future::join_all;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileList, FileReader};

use crate::controller::DecodedFile;
use crate::error::js_detail;

pub fn file_list_to_vec(files: &FileList) -> Vec<File> {
    let mut out = Vec::new();
    for i in 0..files.length() {
        if let Some(f) = files.get(i) {
            out.push(f);
        }
    }
    out
}

async fn read_as_data_url(file: &File) -> Result<String, JsValue> {
    let reader = FileReader::new()?;
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader.read_as_data_url(file)?;
    JsFuture::from(done).await?;
    reader
        .result()?
        .as_string()
        .ok_or_else(|| JsValue::from_str("reader result is not a string"))
}

/// Decodes every file into a `data:` URL preview.
///
/// All reads run concurrently but the result keeps the order of `files`.
/// Files that fail to decode are left out.
pub async fn decode_all(files: Vec<File>) -> Vec<DecodedFile<File>> {
    let reads = files.iter().map(read_as_data_url);
    let previews = join_all(reads).await;

    files
        .into_iter()
        .zip(previews)
        .filter_map(|(file, preview)| {
            let name = file.name();
            match preview {
                Ok(preview) => Some(DecodedFile {
                    name,
                    preview,
                    file,
                }),
                Err(err) => {
                    log::warn!("skipping {name}: preview failed: {}", js_detail(&err));
                    None
                }
            }
        })
        .collect()
}
