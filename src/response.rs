//! Reply types of `/list_folder` and `/concatenate`, and how each one is
//! interpreted.

use serde::Deserialize;

use crate::error::ClientError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ListFolderResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl ListFolderResponse {
    pub fn from_json(body: &str) -> Result<Self, ClientError> {
        serde_json::from_str(body)
            .map_err(|e| ClientError::network(format!("bad /list_folder body: {e}")))
    }

    /// Image names of a successful listing; `ok:false` becomes
    /// [`ClientError::Server`].
    pub fn into_images(self) -> Result<Vec<String>, ClientError> {
        if !self.ok {
            return Err(ClientError::server(self.error));
        }
        Ok(self.images.unwrap_or_default())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ConcatResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub saved: Option<bool>,
    #[serde(default)]
    pub path: Option<String>,
}

/// How a `/concatenate` reply is read, decided by its content type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyKind {
    Json,
    Binary,
}

impl ReplyKind {
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(ct) if ct.to_ascii_lowercase().contains("application/json") => Self::Json,
            _ => Self::Binary,
        }
    }
}

/// A `/concatenate` reply before it is interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConcatReply<B> {
    /// Body text of a JSON reply.
    Json(String),
    /// Any other reply; the concatenated image.
    Binary(B),
}

impl<B> ConcatReply<B> {
    /// Resolves the reply into an outcome. Only a binary reply reaches
    /// `download`, and it is called once with `filename`.
    pub fn settle(
        self,
        filename: &str,
        download: impl FnOnce(&B, &str) -> Result<(), ClientError>,
    ) -> Result<ConcatOutcome, ClientError> {
        match self {
            Self::Json(body) => ConcatOutcome::from_json(&body),
            Self::Binary(blob) => {
                download(&blob, filename)?;
                Ok(ConcatOutcome::Downloaded {
                    filename: filename.to_string(),
                })
            }
        }
    }
}

/// What a finished submission amounts to for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConcatOutcome {
    Saved { path: String },
    Done,
    Downloaded { filename: String },
}

impl ConcatOutcome {
    /// Interprets a JSON reply body.
    pub fn from_json(body: &str) -> Result<Self, ClientError> {
        let reply: ConcatResponse = serde_json::from_str(body)
            .map_err(|e| ClientError::network(format!("bad /concatenate body: {e}")))?;
        if !reply.ok {
            return Err(ClientError::server(reply.error));
        }
        if reply.saved.unwrap_or(false) {
            return Ok(Self::Saved {
                path: reply.path.unwrap_or_default(),
            });
        }
        Ok(Self::Done)
    }

    /// Success text shown in the result area, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Saved { path } => Some(format!("Saved on server: {path}")),
            Self::Done => Some("Done.".to_string()),
            Self::Downloaded { .. } => None,
        }
    }
}
