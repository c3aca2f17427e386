use anyhow::{anyhow, Context};
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::error::{Error, Result};

/// A single JSON-RPC endpoint. Holds a clone of the shared http client, which
/// carries the configured request timeout.
pub struct Endpoint {
    http_client: reqwest::Client,
    url: Url,
    label: String,
}

impl Endpoint {
    pub fn new(http_client: reqwest::Client, url: Url, label: Option<String>) -> Self {
        // Make label default to the url if not specified
        let label = label.unwrap_or_else(|| url.to_string());

        Self {
            http_client,
            url,
            label,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Executes a single JSON-RPC call and returns the full response envelope.
    ///
    /// An `error` object in the envelope is mapped to `Error::Rpc`; extracting
    /// `result` is left to the caller. No retries.
    pub async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let body = request_envelope(method, params);

        let res = self.send_impl(&body).await;

        if let Err(e) = res.as_ref() {
            let req_str = serde_json::to_string(&body)
                .unwrap_or_else(|_| "Failed to serialize request".to_string());
            log::warn!(
                "rpc request to {} failed: {:?} . The request body was: {}",
                self.label,
                e,
                req_str
            );
        }

        res
    }

    async fn send_impl(&self, body: &serde_json::Value) -> Result<serde_json::Value> {
        let res = self
            .http_client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?
            .text()
            .await
            .map_err(Error::Transport)?;

        parse_envelope(res)
    }
}

pub fn request_envelope(method: &str, params: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        // calls are strictly sequential so no correlation is needed
        "id": 1,
    })
}

fn parse_envelope(body: String) -> Result<serde_json::Value> {
    let mut body = body.into_bytes();
    let envelope: serde_json::Value = simd_json::serde::from_slice(&mut body)
        .context("parse response json")
        .map_err(Error::Protocol)?;

    if let Some(error) = envelope.get("error") {
        let code = error.get("code").and_then(|c| c.as_i64());
        let message = error.get("message").and_then(|m| m.as_str());

        return Err(match (code, message) {
            (Some(code), Some(message)) => Error::Rpc {
                code,
                message: message.to_owned(),
            },
            _ => Error::Decoding(anyhow!("malformed error object in response: {}", error)),
        });
    }

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope_fields() {
        let body = request_envelope("eth_blockNumber", serde_json::json!([]));

        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["method"], "eth_blockNumber");
        assert_eq!(body["params"], serde_json::json!([]));
        assert_eq!(body["id"], 1);
    }

    #[test]
    fn test_parse_result_envelope() {
        let envelope =
            parse_envelope(r#"{"jsonrpc":"2.0","id":1,"result":"0xaaa8de"}"#.to_owned()).unwrap();
        assert_eq!(envelope["result"], "0xaaa8de");
    }

    #[test]
    fn test_parse_error_envelope() {
        let err = parse_envelope(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid params"}}"#
                .to_owned(),
        )
        .unwrap_err();

        match err {
            Error::Rpc { code, message } => {
                assert_eq!(code, -32602);
                assert_eq!(message, "invalid params");
            }
            other => panic!("expected rpc error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_non_json_body() {
        let err = parse_envelope("<html>502 Bad Gateway</html>".to_owned()).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn test_parse_malformed_error_object() {
        let err =
            parse_envelope(r#"{"jsonrpc":"2.0","id":1,"error":"boom"}"#.to_owned()).unwrap_err();
        assert!(matches!(err, Error::Decoding(_)));
    }
}
