use seed::prelude::*;
use shared::{ApiRequest, ApiResponse, ClientError, Method, Transport};

/// Sends requests with the browser's `fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let method = match request.method {
            Method::Get => fetch::Method::Get,
            Method::Post => fetch::Method::Post,
            Method::Put => fetch::Method::Put,
            Method::Delete => fetch::Method::Delete,
        };
        let mut outgoing = fetch::Request::new(request.url).method(method);
        if let Some(body) = &request.body {
            outgoing = outgoing.json(body).map_err(network_error)?;
        }

        let response = outgoing.fetch().await.map_err(network_error)?;
        let status = response.status();
        let body = response.text().await.map_err(network_error)?;
        Ok(ApiResponse {
            status: status.code,
            status_text: status.text,
            body,
        })
    }
}

fn network_error(err: fetch::FetchError) -> ClientError {
    ClientError::Transport(format!("{:?}", err))
}
