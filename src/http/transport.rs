use async_trait::async_trait;
use reqwest::{Client, Method};

use crate::curl::ResolvedRequest;
use crate::error::HttpError;
use crate::http::HttpMethod;

use super::client::build_client;

/// Opaque send-a-request capability the workers drive.
///
/// Implementations must be safe to share across workers; the real transport
/// multiplexes over a pooled client, test transports return synthetic
/// outcomes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one resolved request and returns the response status code.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures (connect, timeout, protocol)
    /// and for methods the transport does not support. Callers convert
    /// errors into failure samples; they are never fatal to the run.
    async fn send(&self, request: &ResolvedRequest) -> Result<u16, HttpError>;
}

/// reqwest-backed [`Transport`] with the shared connection pool.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates the transport and its pooled client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new() -> Result<Self, HttpError> {
        Ok(Self {
            client: build_client()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ResolvedRequest) -> Result<u16, HttpError> {
        let method = resolve_method(&request.method)?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if request.method.supports_body()
            && let Some(body) = request.body.as_ref()
        {
            builder = builder.body(body.clone());
        }

        let built = builder
            .build()
            .map_err(|err| HttpError::BuildRequestFailed { source: err })?;
        let response = self
            .client
            .execute(built)
            .await
            .map_err(|err| HttpError::RequestFailed { source: err })?;
        let status = response.status().as_u16();

        // Latency covers the full round trip, so the body is drained before
        // the caller stops its timer.
        response
            .bytes()
            .await
            .map_err(|err| HttpError::RequestFailed { source: err })?;

        Ok(status)
    }
}

fn resolve_method(method: &HttpMethod) -> Result<Method, HttpError> {
    match method {
        HttpMethod::Get => Ok(Method::GET),
        HttpMethod::Post => Ok(Method::POST),
        HttpMethod::Put => Ok(Method::PUT),
        HttpMethod::Delete => Ok(Method::DELETE),
        HttpMethod::Patch => Ok(Method::PATCH),
        HttpMethod::Head => Ok(Method::HEAD),
        HttpMethod::Options => Ok(Method::OPTIONS),
        HttpMethod::Other(name) => Err(HttpError::UnsupportedMethod {
            method: name.clone(),
        }),
    }
}
