use async_trait::async_trait;
use linku_config::source::SourceConfig;
use linku_types::{DatasetKind, LogicalKey};
use reqwest::Url;
use serde_json::Value;

use crate::error::{DecodeError, FetchError, SourceError};

/// Remote provider of lexical documents
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the latest document for `key`
    async fn fetch(&self, key: &LogicalKey) -> Result<Value, SourceError>;
}

/// Parse a fetched body into a document.
///
/// Every document served by the source is a JSON object (word key -> entry,
/// or language code -> metadata); anything else is rejected.
pub fn decode_document(body: &[u8]) -> Result<Value, DecodeError> {
    let value: Value = serde_json::from_slice(body)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(DecodeError::NotAnObject {
            found: json_type_name(&value),
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `RemoteSource` over HTTP(S)
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    config: SourceConfig,
}

impl HttpSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(client: reqwest::Client, config: SourceConfig) -> Self {
        Self { client, config }
    }

    /// Build the request URL for `key`
    pub fn url_for(&self, key: &LogicalKey) -> Result<Url, FetchError> {
        let route = match key.kind() {
            DatasetKind::Words => &self.config.words_route,
            DatasetKind::Sandbox => &self.config.sandbox_route,
            DatasetKind::Languages => &self.config.languages_route,
        };

        let raw = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| FetchError::Unavailable(format!("invalid URL {raw}: {e}")))?;

        if !key.is_catalog() {
            url.query_pairs_mut()
                .append_pair(&self.config.language_param, key.language());
        }

        Ok(url)
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch(&self, key: &LogicalKey) -> Result<Value, SourceError> {
        let url = self.url_for(key)?;
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            }
            .into());
        }

        let body = response.bytes().await.map_err(FetchError::from)?;
        Ok(decode_document(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base_url: &str) -> HttpSource {
        HttpSource::new(SourceConfig {
            base_url: base_url.to_string(),
            ..SourceConfig::default()
        })
    }

    #[test]
    fn test_word_list_urls_carry_language() {
        let source = source("https://api.linku.la/v1/");

        let url = source.url_for(&LogicalKey::words("de")).unwrap();
        assert_eq!(url.as_str(), "https://api.linku.la/v1/words?lang=de");

        let url = source.url_for(&LogicalKey::sandbox("pt-BR")).unwrap();
        assert_eq!(url.as_str(), "https://api.linku.la/v1/sandbox?lang=pt-BR");
    }

    #[test]
    fn test_catalog_url_has_no_query() {
        let url = source("https://api.linku.la/v1")
            .url_for(&LogicalKey::catalog())
            .unwrap();
        assert_eq!(url.as_str(), "https://api.linku.la/v1/languages");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = source("not a url").url_for(&LogicalKey::catalog()).unwrap_err();
        assert!(matches!(err, FetchError::Unavailable(_)));
    }

    #[test]
    fn test_decode_document() {
        let value = decode_document(br#"{"pona": {"word": "pona"}}"#).unwrap();
        assert!(value.get("pona").is_some());

        assert!(matches!(
            decode_document(b"[1, 2]"),
            Err(DecodeError::NotAnObject { found: "array" })
        ));
        assert!(matches!(
            decode_document(b"<html>"),
            Err(DecodeError::Json(_))
        ));
    }
}
