use std::time::Duration;

use async_trait::async_trait;
use opentelemetry::global;
use opentelemetry_http::HeaderInjector;
use reqwest::{Client, Method, Url, header::HeaderMap};
use serde::de::DeserializeOwned;
use shared::responses::unwrap_envelope;
use shared::types::{Employee, EmployeeInput};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::domain::client::EmployeeClient;
use crate::error::{EmployeeServiceError, UpstreamFault, UpstreamOperation};

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the upstream employee service, with OpenTelemetry trace propagation.
///
/// Makes exactly one attempt per call.
pub struct HttpEmployeeClient {
    client: Client,
    base_url: Url,
}

impl HttpEmployeeClient {
    /// Builds a client with its own connection pool and the given request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Uses an already configured `reqwest::Client`. Its timeout settings apply as-is.
    pub fn with_client(client: Client, mut base_url: Url) -> Self {
        if let Ok(mut segments) = base_url.path_segments_mut() {
            segments.pop_if_empty();
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{id}`, or `None` when `id` cannot name a single path segment.
    ///
    /// `push` silently drops `.` and `..`, which would address the collection instead.
    fn item_url(
        &self,
        operation: UpstreamOperation,
        id: &str,
    ) -> Result<Option<Url>, UpstreamFault> {
        if matches!(id, "" | "." | "..") {
            return Ok(None);
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UpstreamFault::new(operation, None, "base URL cannot carry a path"))?
            .push(id);
        Ok(Some(url))
    }

    /// Sends one request and decodes the envelope of a 2xx answer.
    async fn exchange<T>(
        &self,
        operation: UpstreamOperation,
        method: Method,
        url: Url,
        body: Option<&EmployeeInput>,
    ) -> Result<Option<T>, UpstreamFault>
    where
        T: DeserializeOwned + Send,
    {
        tracing::debug!(%operation, %method, %url, "Calling employee service");

        let mut request = self
            .client
            .request(method, url)
            .headers(trace_context_headers());
        if let Some(body) = body {
            request = request.json(body);
        }

        let res = request
            .send()
            .await
            .map_err(|e| transport_fault(operation, e.status().map(|s| s.as_u16()), &e))?;

        let status = res.status();
        tracing::debug!(%status, "Employee service responded");

        if !status.is_success() {
            return Err(UpstreamFault::new(
                operation,
                Some(status.as_u16()),
                format!("Employee service returned status {status}"),
            ));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| transport_fault(operation, Some(status.as_u16()), &e))?;

        unwrap_envelope(&bytes).map_err(|e| {
            UpstreamFault::new(
                operation,
                Some(status.as_u16()),
                format!("Failed to deserialize response: {e}"),
            )
        })
    }
}

fn trace_context_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let cx = tracing::Span::current().context();
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(&cx, &mut HeaderInjector(&mut headers));
    });
    headers
}

fn transport_fault(
    operation: UpstreamOperation,
    status: Option<u16>,
    e: &reqwest::Error,
) -> UpstreamFault {
    let reason = if e.is_timeout() {
        format!("Request timed out: {e}")
    } else if e.is_connect() {
        format!("Failed to connect: {e}")
    } else {
        e.to_string()
    };
    tracing::warn!(%operation, error = %e, "Request to employee service failed");
    UpstreamFault::new(operation, status, reason)
}

#[async_trait]
impl EmployeeClient for HttpEmployeeClient {
    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Employee>, EmployeeServiceError> {
        let employees: Option<Vec<Employee>> = self
            .exchange(
                UpstreamOperation::ListAll,
                Method::GET,
                self.base_url.clone(),
                None,
            )
            .await?;

        match employees {
            Some(employees) => {
                tracing::debug!(count = employees.len(), "Received employees");
                Ok(employees)
            }
            None => {
                tracing::info!("No employees found");
                Ok(Vec::new())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<Employee>, EmployeeServiceError> {
        let operation = UpstreamOperation::GetById;
        let Some(url) = self.item_url(operation, id)? else {
            tracing::warn!(%id, "Id does not address a single employee, skipping upstream call");
            return Ok(None);
        };
        Ok(self.exchange(operation, Method::GET, url, None).await?)
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, input: EmployeeInput) -> Result<Option<Employee>, EmployeeServiceError> {
        Ok(self
            .exchange(
                UpstreamOperation::Create,
                Method::POST,
                self.base_url.clone(),
                Some(&input),
            )
            .await?)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> Result<Option<bool>, EmployeeServiceError> {
        let operation = UpstreamOperation::DeleteById;
        let Some(url) = self.item_url(operation, id)? else {
            tracing::warn!(%id, "Id does not address a single employee, skipping upstream call");
            return Ok(None);
        };
        Ok(self.exchange(operation, Method::DELETE, url, None).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpEmployeeClient {
        HttpEmployeeClient::new(Url::parse(base).unwrap(), DEFAULT_REQUEST_TIMEOUT).unwrap()
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let c = client("http://localhost:8112/api/v1/employee/");
        assert_eq!(c.base_url().as_str(), "http://localhost:8112/api/v1/employee");
    }

    #[test]
    fn item_url_appends_one_segment() {
        let c = client("http://localhost:8112/api/v1/employee");
        let url = c.item_url(UpstreamOperation::GetById, "42").unwrap().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8112/api/v1/employee/42");
    }

    #[test]
    fn item_url_escapes_path_characters() {
        let c = client("http://localhost:8112/api/v1/employee");
        let url = c
            .item_url(UpstreamOperation::DeleteById, "a/b c")
            .unwrap()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8112/api/v1/employee/a%2Fb%20c"
        );
    }

    #[test]
    fn item_url_refuses_dot_segments_and_empty_id() {
        let c = client("http://localhost:8112/api/v1/employee");
        for id in ["", ".", ".."] {
            let url = c.item_url(UpstreamOperation::GetById, id).unwrap();
            assert!(url.is_none(), "id {id:?} must not address the collection");
        }

        let url = c
            .item_url(UpstreamOperation::GetById, "...")
            .unwrap()
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8112/api/v1/employee/...");
    }
}
