use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

/// Element id of the optional JSON config block in `index.html`.
pub const CONFIG_ELEMENT_ID: &str = "app-config";

// Same set `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for every endpoint; empty means same origin.
    pub api_base: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the config block from the current document. A page without
    /// the block gets the defaults.
    pub fn load() -> Result<Self, serde_json::Error> {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        match raw {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }

    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            base: self.api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn list_folder(&self) -> String {
        format!("{}/list_folder", self.base)
    }

    pub fn concatenate(&self) -> String {
        format!("{}/concatenate", self.base)
    }

    pub fn thumbnail(&self, folder: &str, name: &str) -> String {
        format!(
            "{}/thumbnail/{}/{}",
            self.base,
            utf8_percent_encode(folder, URI_COMPONENT),
            utf8_percent_encode(name, URI_COMPONENT)
        )
    }
}
