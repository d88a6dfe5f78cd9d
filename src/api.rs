//! `fetch` plumbing for the three backend endpoints.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, FormData, Headers, HtmlAnchorElement, Request, RequestInit, Response, Url};

use crate::config::Endpoints;
use crate::error::{ClientError, js_detail};
use crate::request::{FormField, Submission};
use crate::response::{ConcatReply, ListFolderResponse, ReplyKind};

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

async fn send(request: &Request) -> Result<Response, JsValue> {
    let resp = JsFuture::from(window()?.fetch_with_request(request)).await?;
    resp.dyn_into::<Response>()
}

async fn body_text(resp: &Response) -> Result<String, JsValue> {
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

/// `POST /list_folder` with `folder=<path>`; yields the image names.
pub async fn list_folder(endpoints: &Endpoints, folder: &str) -> Result<Vec<String>, ClientError> {
    let body = serde_urlencoded::to_string([("folder", folder)])
        .map_err(|e| ClientError::network(e.to_string()))?;
    log::info!("listing folder {folder:?}");

    let text = async {
        let headers = Headers::new()?;
        headers.set("Content-Type", "application/x-www-form-urlencoded")?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        let request = Request::new_with_str_and_init(&endpoints.list_folder(), &init)?;
        let resp = send(&request).await?;
        body_text(&resp).await
    }
    .await
    .map_err(ClientError::from_js)?;

    ListFolderResponse::from_json(&text)?.into_images()
}

/// Copies the fields into a `FormData` in order.
pub fn form_data(fields: &[FormField<File>]) -> Result<FormData, JsValue> {
    let fd = FormData::new()?;
    for field in fields {
        match field {
            FormField::Text { name, value } => fd.append_with_str(name, value)?,
            FormField::File {
                name,
                filename,
                file,
            } => fd.append_with_blob_and_filename(name, file, filename)?,
        }
    }
    Ok(fd)
}

/// `POST /concatenate`. A JSON reply comes back as its body text; anything
/// else as a blob for download. See [`ConcatReply::settle`].
pub async fn concatenate(
    endpoints: &Endpoints,
    submission: &Submission<File>,
) -> Result<ConcatReply<Blob>, ClientError> {
    log::info!(
        "submitting {} fields to {}",
        submission.fields.len(),
        endpoints.concatenate()
    );
    let resp = async {
        let init = RequestInit::new();
        init.set_method("POST");
        let fd = form_data(&submission.fields)?;
        init.set_body(&fd);
        let request = Request::new_with_str_and_init(&endpoints.concatenate(), &init)?;
        send(&request).await
    }
    .await
    .map_err(ClientError::from_js)?;

    let content_type = resp.headers().get("Content-Type").ok().flatten();
    match ReplyKind::from_content_type(content_type.as_deref()) {
        ReplyKind::Json => {
            let text = body_text(&resp).await.map_err(ClientError::from_js)?;
            Ok(ConcatReply::Json(text))
        }
        ReplyKind::Binary => {
            let blob = async { JsFuture::from(resp.blob()?).await?.dyn_into::<Blob>() }
                .await
                .map_err(ClientError::from_js)?;
            log::debug!("received {} byte image", blob.size());
            Ok(ConcatReply::Binary(blob))
        }
    }
}

/// Saves `blob` through a throwaway `<a download>` link.
pub fn download_blob(blob: &Blob, filename: &str) -> Result<(), ClientError> {
    let save = || -> Result<(), JsValue> {
        let url = Url::create_object_url_with_blob(blob)?;
        let doc = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;

        let a: HtmlAnchorElement = doc.create_element("a")?.dyn_into()?;
        a.set_href(&url);
        a.set_download(filename);
        a.set_attribute("style", "display:none;")?;

        body.append_child(&a)?;
        a.click();
        a.remove();

        Url::revoke_object_url(&url)
    };
    save().map_err(|e| ClientError::Download {
        detail: js_detail(&e),
    })
}
