use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, AUTHORIZATION, HeaderMap, HeaderValue};
use std::str::FromStr;

use crate::config::EmitterConfig;
use crate::error::{Error, Result};
use crate::transport::EventSink;

/// Parsed form of an Event Hub connection string.
///
/// Expected shape: `Endpoint=sb://<namespace>/;SharedAccessSignature=<token>`.
/// The `sb://` scheme is rewritten to `https://` for the REST endpoint.
/// The signature is optional so local emulators without auth still work.
#[derive(Debug, Clone)]
pub struct ConnectionString {
    pub endpoint: String,
    pub shared_access_signature: Option<String>,
}

impl FromStr for ConnectionString {
    type Err = Error;

    fn from_str(raw: &str) -> Result<ConnectionString> {
        let mut endpoint: Option<String> = None;
        let mut shared_access_signature: Option<String> = None;

        for pair in raw.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }

            // SAS tokens contain '=' themselves, only split on the first one
            let Some((key, value)) = pair.split_once('=') else {
                return Err(Error::InvalidConnectionString(format!("Expected 'Key=Value' component, got '{}'", pair)));
            };

            match key {
                "Endpoint" => {
                    let url = value.strip_prefix("sb://").map(|rest| format!("https://{}", rest)).unwrap_or_else(|| value.to_string());
                    endpoint = Some(url.trim_end_matches('/').to_string());
                }
                "SharedAccessSignature" => shared_access_signature = Some(value.to_string()),
                _ => {}
            }
        }

        match endpoint {
            Some(endpoint) => Ok(ConnectionString { endpoint, shared_access_signature }),
            None => Err(Error::InvalidConnectionString("No 'Endpoint' component found".to_string())),
        }
    }
}

/// HTTP client posting each record as one message to the configured hub.
pub struct EventHubSink {
    client: reqwest::Client,
    post_url: String,
}

impl EventHubSink {
    pub fn new(config: &EmitterConfig) -> Result<EventHubSink> {
        let connection = ConnectionString::from_str(&config.connection_string)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        if let Some(signature) = &connection.shared_access_signature {
            let value = HeaderValue::from_str(signature)
                .map_err(|e| Error::InvalidConnectionString(format!("SharedAccessSignature is not a valid header value: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder().default_headers(headers).build()?;
        let post_url = format!("{}/{}/messages", connection.endpoint, config.event_hub_name);

        log::info!("Event Hub client created for '{}'.", post_url);

        Ok(EventHubSink { client, post_url })
    }
}

#[async_trait]
impl EventSink for EventHubSink {
    async fn send(&self, payload: &str) -> Result<()> {
        let response = self.client.post(&self.post_url).body(payload.to_string()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            log::error!(
                "Sending to Event Hub failed. The following request was unsuccessfull:\nUrl: <<{}>>\nResponse-Status-Code: <<{}>>\nResponse-Body: <<{}>>",
                self.post_url,
                status,
                body_text
            );
            return Err(Error::TransportError(format!("HTTP status {}", status)));
        }

        Ok(())
    }

    async fn close(&self) -> Result<()> {
        // reqwest clients have no explicit shutdown; dropping releases the pool
        log::info!("Event Hub client released.");
        Ok(())
    }
}
