use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform wrapper the upstream employee service puts around every payload.
///
/// `status` is informational; only `data` is looked at.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub status: String,
}

impl<T> Envelope<T> {
    pub fn new(data: Option<T>, status: impl Into<String>) -> Self {
        Self {
            data,
            status: status.into(),
        }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Decodes a raw upstream body into its payload.
///
/// An empty body and an envelope without `data` both yield `Ok(None)`. Anything
/// else that is not a valid envelope is a decode error.
pub fn unwrap_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    Ok(envelope.into_data())
}

/// Error body returned to callers of the facade.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiErrorResponse {
    pub fn of(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Response for the `/headpat` health check endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct HeadpatResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Employee;

    #[test]
    fn empty_body_is_absent() {
        let output: Option<Vec<Employee>> = unwrap_envelope(b"").unwrap();
        assert!(output.is_none());

        let output: Option<bool> = unwrap_envelope(b" \n").unwrap();
        assert!(output.is_none());
    }

    #[test]
    fn null_or_missing_data_is_absent() {
        let output: Option<Employee> =
            unwrap_envelope(br#"{"data": null, "status": "ok"}"#).unwrap();
        assert!(output.is_none());

        let output: Option<Employee> = unwrap_envelope(br#"{"status": "ok"}"#).unwrap();
        assert!(output.is_none());
    }

    #[test]
    fn data_is_unwrapped() {
        let output: Option<bool> =
            unwrap_envelope(br#"{"data": true, "status": "Successfully processed request."}"#)
                .unwrap();
        assert_eq!(output, Some(true));
    }

    #[test]
    fn missing_status_is_tolerated() {
        let output: Option<Vec<String>> = unwrap_envelope(br#"{"data": ["a"]}"#).unwrap();
        assert_eq!(output, Some(vec!["a".to_string()]));
    }

    #[test]
    fn garbage_is_an_error() {
        let output: Result<Option<Employee>, _> = unwrap_envelope(b"<html>oops</html>");
        assert!(output.is_err());

        let output: Result<Option<bool>, _> = unwrap_envelope(br#"{"data": "yes"}"#);
        assert!(output.is_err());
    }
}
