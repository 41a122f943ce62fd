use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

const PROVIDER: &str = "MyMemory";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    response_data: Option<ApiResponseData>,
    // Number on success, sometimes a string on errors
    #[serde(default)]
    response_status: Value,
    #[serde(default)]
    response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponseData {
    #[serde(default)]
    translated_text: Option<String>,
}

/// Free MyMemory translation endpoint, no API key
#[derive(Clone)]
pub struct MyMemoryTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl MyMemoryTranslator {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let langpair = format!("{}|{}", from, to);
        tracing::debug!("Translating {:?} ({})", text, langpair);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let body = response.text().await?;
        let translated = parse_response(&body, text)?;

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: PROVIDER.to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: PROVIDER.to_string(),
            requires_api_key: false,
        }
    }
}

/// Extract the translated text; only a `responseStatus` of 200 counts
pub fn parse_response(body: &str, text: &str) -> Result<String, TranslateError> {
    let parsed: ApiResponse =
        serde_json::from_str(body).map_err(|e| TranslateError::ApiError(e.to_string()))?;

    let status = match &parsed.response_status {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    match status {
        Some(200) => {}
        Some(429) => return Err(TranslateError::RateLimitExceeded),
        _ => {
            return Err(TranslateError::ApiError(
                parsed
                    .response_details
                    .unwrap_or_else(|| "unexpected response status".to_string()),
            ));
        }
    }

    parsed
        .response_data
        .and_then(|d| d.translated_text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| TranslateError::Unavailable(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success() {
        let body = r#"{
            "responseData": { "translatedText": "नमस्ते", "match": 1 },
            "responseStatus": 200,
            "responseDetails": ""
        }"#;
        assert_eq!(parse_response(body, "hello").unwrap(), "नमस्ते");
    }

    #[test]
    fn test_parse_error_status() {
        let body = r#"{
            "responseData": { "translatedText": "INVALID LANGUAGE PAIR" },
            "responseStatus": "403",
            "responseDetails": "INVALID LANGUAGE PAIR SPECIFIED"
        }"#;
        match parse_response(body, "hello") {
            Err(TranslateError::ApiError(details)) => {
                assert_eq!(details, "INVALID LANGUAGE PAIR SPECIFIED")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_text() {
        let body = r#"{ "responseData": { "translatedText": "" }, "responseStatus": 200 }"#;
        assert!(matches!(
            parse_response(body, "hello"),
            Err(TranslateError::Unavailable(_))
        ));
        assert!(matches!(
            parse_response("<html>", "hello"),
            Err(TranslateError::ApiError(_))
        ));
    }
}
