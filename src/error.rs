use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can stop a listing or a submission from completing.
///
/// The `Display` text is what ends up in the page, so transport details are
/// kept out of it and only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("No files to upload.")]
    NoUploads,

    #[error("No server-side images selected.")]
    NoSelection,

    #[error("A request is already in progress.")]
    Busy,

    #[error("{0}")]
    Server(String),

    #[error("Network error")]
    Network { detail: String },

    #[error("Download failed")]
    Download { detail: String },
}

impl ClientError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    /// Server-reported failure; an absent message becomes a bare "Error".
    pub fn server(message: Option<String>) -> Self {
        Self::Server(message.unwrap_or_else(|| "Error".to_string()))
    }

    pub(crate) fn from_js(err: JsValue) -> Self {
        Self::network(js_detail(&err))
    }
}

pub(crate) fn js_detail(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
