//! Google translate (`translate_a/single`) translator.

use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use tracing::instrument;

use flashdrill_core::traits::Translator;

use crate::error::ProviderError;

pub(crate) const TIMEOUT_SECS: u64 = 30;
const TRANSLATE_PATH: &str = "translate_a/single";

/// Translator backed by the public Google translate endpoint.
pub struct GoogleTranslator {
    base_url: String,
    client: Client,
}

impl GoogleTranslator {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, text: &str, source: &str, target: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            &format!("{}/{TRANSLATE_PATH}", self.base_url),
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )?;
        Ok(url)
    }
}

/// Join the translated sentence fragments of a `translate_a/single` response.
///
/// The body is a nested array whose first element lists
/// `[translated, original, ...]` fragments.
pub fn extract_translation(body: &str) -> Result<String, ProviderError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let fragments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::MalformedResponse("missing sentence list".into()))?;

    let translation: String = fragments
        .iter()
        .filter_map(|fragment| fragment.get(0).and_then(Value::as_str))
        .collect();

    if translation.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "no translated text in response".into(),
        ));
    }
    Ok(translation)
}

impl Translator for GoogleTranslator {
    #[instrument(skip(self))]
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let url = self.url(text, source, target)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(ProviderError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let body = response.text().map_err(ProviderError::from)?;
        Ok(extract_translation(&body)?)
    }
}
