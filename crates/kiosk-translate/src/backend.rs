//! The external translation capability.
//!
//! [`TranslationBackend`] is the seam between the [`Translator`] and whatever
//! service performs the translation. [`MyMemory`] is the production
//! implementation.
//!
//! [`Translator`]: crate::Translator

use std::future::Future;

use reqwest::Client;
use serde::Deserialize;

use crate::{Error, Result, TranslatorConfig};

/// Translates a single chunk of text. Implementations report every kind of
/// failure as an [`Error`]; they never substitute text themselves.
pub trait TranslationBackend: Send + Sync {
  fn translate<'a>(
    &'a self,
    text: &'a str,
    source: &'a str,
    target: &'a str,
  ) -> impl Future<Output = Result<String>> + Send + 'a;
}

// ─── MyMemory ────────────────────────────────────────────────────────────────

/// Client for the MyMemory `GET /get?q=…&langpair=src|tgt` endpoint.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct MyMemory {
  client:        Client,
  base_url:      String,
  contact_email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
  response_data:    Option<MyMemoryData>,
  /// A number on success; MyMemory has been seen to send it as a string on
  /// quota errors.
  response_status:  serde_json::Value,
  #[serde(default)]
  response_details: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryData {
  translated_text: Option<String>,
}

impl MyMemory {
  pub fn new(config: &TranslatorConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout()).build()?;
    Ok(Self {
      client,
      base_url: config.base_url.clone(),
      contact_email: config.contact_email.clone().filter(|e| !e.is_empty()),
    })
  }
}

fn status_code(value: &serde_json::Value) -> Option<u64> {
  match value {
    serde_json::Value::Number(n) => n.as_u64(),
    serde_json::Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

impl TranslationBackend for MyMemory {
  async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
    let langpair = format!("{source}|{target}");
    let mut query: Vec<(&str, &str)> = vec![("q", text), ("langpair", langpair.as_str())];
    if let Some(email) = &self.contact_email {
      query.push(("de", email.as_str()));
    }

    let resp = self.client.get(&self.base_url).query(&query).send().await?;
    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }

    let body: MyMemoryResponse = resp
      .json()
      .await
      .map_err(|e| Error::Malformed(e.to_string()))?;

    if status_code(&body.response_status) != Some(200) {
      let details = match body.response_details {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
      };
      return Err(Error::Provider {
        status: body.response_status.to_string(),
        details,
      });
    }

    body
      .response_data
      .and_then(|d| d.translated_text)
      .filter(|t| !t.trim().is_empty())
      .ok_or_else(|| Error::Malformed("missing responseData.translatedText".into()))
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
  };

  use super::*;

  fn client_for(server: &MockServer, email: Option<&str>) -> MyMemory {
    MyMemory::new(&TranslatorConfig {
      base_url:      format!("{}/get", server.uri()),
      contact_email: email.map(str::to_owned),
      timeout_secs:  5,
      max_chunk_len: 500,
    })
    .unwrap()
  }

  #[tokio::test]
  async fn returns_translated_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/get"))
      .and(query_param("q", "Hello"))
      .and(query_param("langpair", "en|hi"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "responseData": { "translatedText": "नमस्ते" },
        "responseStatus": 200,
        "responseDetails": ""
      })))
      .expect(1)
      .mount(&server)
      .await;

    let client = client_for(&server, None);
    assert_eq!(client.translate("Hello", "en", "hi").await.unwrap(), "नमस्ते");
  }

  #[tokio::test]
  async fn sends_contact_email_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(query_param("de", "ops@campus.example"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "responseData": { "translatedText": "ok" },
        "responseStatus": 200
      })))
      .expect(1)
      .mount(&server)
      .await;

    let client = client_for(&server, Some("ops@campus.example"));
    assert_eq!(client.translate("x", "en", "pa").await.unwrap(), "ok");
  }

  #[tokio::test]
  async fn http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(503))
      .mount(&server)
      .await;

    let client = client_for(&server, None);
    let err = client.translate("Hello", "en", "hi").await.unwrap_err();
    assert!(matches!(err, Error::Status(s) if s.as_u16() == 503));
  }

  #[tokio::test]
  async fn provider_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "responseData": { "translatedText": "MYMEMORY WARNING: YOU USED ALL AVAILABLE FREE TRANSLATIONS FOR TODAY" },
        "responseStatus": "429",
        "responseDetails": "quota exceeded"
      })))
      .mount(&server)
      .await;

    let client = client_for(&server, None);
    let err = client.translate("Hello", "en", "hi").await.unwrap_err();
    assert!(matches!(err, Error::Provider { ref details, .. } if details == "quota exceeded"));
  }

  #[tokio::test]
  async fn malformed_payload_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
      .mount(&server)
      .await;

    let client = client_for(&server, None);
    let err = client.translate("Hello", "en", "hi").await.unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
  }
}
