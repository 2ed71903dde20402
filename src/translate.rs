//! Card text translation through the MyMemory API.

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config;
use crate::error::{MtgManagerError, Result};
use crate::http;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub original_text: String,
    pub translated_text: String,
}

/// MyMemory `/get` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    pub response_status: serde_json::Value,
    pub response_data: Option<MyMemoryData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryData {
    pub translated_text: String,
}

impl MyMemoryResponse {
    /// MyMemory reports `responseStatus` as a number or a numeric string.
    pub fn status(&self) -> Option<u16> {
        match &self.response_status {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Extract the translation, rejecting non-200 statuses.
    pub fn into_translation(self, original: &str) -> Result<Translation> {
        match (self.status(), self.response_data) {
            (Some(200), Some(data)) => Ok(Translation {
                original_text: original.to_string(),
                translated_text: data.translated_text,
            }),
            (status, _) => Err(MtgManagerError::Upstream(format!(
                "MyMemory translation failed with status {status:?}"
            ))),
        }
    }
}

pub struct Translator {
    base_url: String,
    langpair: String,
    offline: bool,
    timeout: Duration,
    client: OnceCell<Client>,
}

impl Translator {
    pub fn new(base_url: impl Into<String>, offline: bool, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            langpair: config::TRANSLATE_LANGPAIR.to_string(),
            offline,
            timeout,
            client: OnceCell::new(),
        }
    }

    /// Override the language pair, e.g. `"en|es"`.
    pub fn with_langpair(mut self, langpair: impl Into<String>) -> Self {
        self.langpair = langpair.into();
        self
    }

    fn client(&self) -> Result<&Client> {
        http::lazy_client(&self.client, self.offline, self.timeout, "Translation")
    }

    /// Translate `text`. Empty text is rejected.
    pub fn translate(&self, text: &str) -> Result<Translation> {
        if text.trim().is_empty() {
            return Err(MtgManagerError::InvalidArgument(
                "Text to translate is required".to_string(),
            ));
        }
        let url = format!("{}/get", self.base_url);
        let resp: MyMemoryResponse = self
            .client()?
            .get(&url)
            .query(&[("q", text), ("langpair", self.langpair.as_str())])
            .send()?
            .error_for_status()?
            .json()?;
        resp.into_translation(text)
    }

    /// Translate `text`, returning it unchanged if translation fails.
    pub fn translate_or_original(&self, text: &str) -> String {
        match self.translate(text) {
            Ok(t) => t.translated_text,
            Err(e) => {
                log::warn!("Translation unavailable: {e}");
                text.to_string()
            }
        }
    }
}
