//! Generic REST client for one resource type.
//!
//! Every operation is a single round trip through a [`Transport`]; there are
//! no retries, timeouts or caching, and every failure is handed back to the
//! caller as a [`ClientError`].

use crate::config::ApiConfig;
use crate::id::RecordId;
use crate::resource::Resource;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    fn reads_error_body(self) -> bool {
        self != Method::Get
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure of a backend call. Unreachable backends and non-2xx answers end up
/// here alike.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// No response: network failure, aborted request or unencodable body.
    #[error("Error de red: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status, or with a body that could
    /// not be decoded.
    #[error("Error HTTP: {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        /// Raw response body, kept for mutating calls only.
        detail: Option<String>,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport(_) => None,
            ClientError::Http { status, .. } => Some(*status),
        }
    }

    pub fn status_text(&self) -> &str {
        match self {
            ClientError::Transport(reason) => reason,
            ClientError::Http { status_text, .. } => status_text,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Transport(_) => None,
            ClientError::Http { detail, .. } => detail.as_deref(),
        }
    }
}

/// Carries requests to the backend. The browser build uses `fetch`, tests use
/// an in-memory backend.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

/// A create or an update, decided by whether the draft had an id.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<P> {
    Create(P),
    Update(RecordId, P),
}

impl<P> Submission<P> {
    pub fn is_update(&self) -> bool {
        matches!(self, Submission::Update(..))
    }
}

#[derive(Debug, Clone)]
pub struct ResourceClient<R, T> {
    config: ApiConfig,
    transport: T,
    marker: PhantomData<fn() -> R>,
}

impl<R: Resource, T: Transport> ResourceClient<R, T> {
    pub fn new(config: ApiConfig, transport: T) -> Self {
        ResourceClient {
            config,
            transport,
            marker: PhantomData,
        }
    }

    pub fn collection_url(&self) -> String {
        self.config.url(R::path())
    }

    pub fn record_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    pub async fn list_all(&self) -> Result<Vec<R>, ClientError> {
        let response = self.call(Method::Get, self.collection_url(), None).await?;
        decode(&response)
    }

    pub async fn get_by_id(&self, id: &RecordId) -> Result<R, ClientError> {
        let response = self.call(Method::Get, self.record_url(id), None).await?;
        decode(&response)
    }

    /// The server assigns the id; the returned record carries it.
    pub async fn create<P: Serialize>(&self, payload: &P) -> Result<R, ClientError> {
        let body = encode(payload)?;
        let response = self.call(Method::Post, self.collection_url(), Some(body)).await?;
        decode(&response)
    }

    pub async fn update<P: Serialize>(&self, id: &RecordId, payload: &P) -> Result<R, ClientError> {
        let body = encode(payload)?;
        let response = self.call(Method::Put, self.record_url(id), Some(body)).await?;
        decode(&response)
    }

    /// `true` on any 2xx; the (empty) body is never decoded.
    pub async fn delete(&self, id: &RecordId) -> Result<bool, ClientError> {
        self.call(Method::Delete, self.record_url(id), None).await?;
        Ok(true)
    }

    pub async fn submit<P: Serialize>(&self, submission: &Submission<P>) -> Result<R, ClientError> {
        match submission {
            Submission::Create(payload) => self.create(payload).await,
            Submission::Update(id, payload) => self.update(id, payload).await,
        }
    }

    async fn call(&self, method: Method, url: String, body: Option<Value>) -> Result<ApiResponse, ClientError> {
        tracing::debug!(method = method.as_str(), url = %url, "api request");
        let response = self.transport.send(ApiRequest { method, url, body }).await?;
        if response.is_success() {
            return Ok(response);
        }
        let detail = if method.reads_error_body() {
            Some(response.body)
        } else {
            None
        };
        Err(ClientError::Http {
            status: response.status,
            status_text: response.status_text,
            detail,
        })
    }
}

fn encode<P: Serialize>(payload: &P) -> Result<Value, ClientError> {
    serde_json::to_value(payload)
        .map_err(|e| ClientError::Transport(format!("no se pudo codificar la solicitud: {}", e)))
}

fn decode<X: DeserializeOwned>(response: &ApiResponse) -> Result<X, ClientError> {
    serde_json::from_str(&response.body).map_err(|e| ClientError::Http {
        status: response.status,
        status_text: format!("respuesta inválida: {}", e),
        detail: None,
    })
}
