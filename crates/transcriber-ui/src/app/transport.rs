//! gloo-net implementations of the HTTP seams.

use crate::core::api::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::core::ports::UploadSink;
use crate::core::startup::{DocumentLoader, LoadError};
use async_trait::async_trait;
use gloo_net::http::{Method as HttpMethod, Request};
use web_sys::File;

/// Fetch-backed API transport.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FetchTransport;

const fn http_method(method: Method) -> HttpMethod {
    match method {
        Method::Get => HttpMethod::GET,
        Method::Put => HttpMethod::PUT,
        Method::Patch => HttpMethod::PATCH,
        Method::Delete => HttpMethod::DELETE,
        Method::Head => HttpMethod::HEAD,
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut req = Request::new(&request.url).method(http_method(request.method));
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }
        let response = req
            .send()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        let status = response.status();
        let body = if request.method == Method::Head {
            String::new()
        } else {
            response
                .text()
                .await
                .map_err(|err| TransportError::new(err.to_string()))?
        };
        Ok(ApiResponse { status, body })
    }
}

/// Loads static documents relative to the page.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FetchLoader;

#[async_trait(?Send)]
impl DocumentLoader for FetchLoader {
    async fn load(&self, path: &str) -> Result<String, LoadError> {
        let failed = |message: String| LoadError {
            path: path.to_string(),
            message,
        };
        let response = Request::get(path)
            .send()
            .await
            .map_err(|err| failed(err.to_string()))?;
        if !response.ok() {
            return Err(failed(format!("status {}", response.status())));
        }
        response.text().await.map_err(|err| failed(err.to_string()))
    }
}

/// A user-selected file uploaded straight to a signed URL.
pub(crate) struct FileUpload {
    file: File,
}

impl FileUpload {
    pub(crate) fn new(file: File) -> Self {
        Self { file }
    }
}

#[async_trait(?Send)]
impl UploadSink for FileUpload {
    fn file_name(&self) -> String {
        self.file.name()
    }

    async fn put(&self, signed_url: &str) -> Result<(), TransportError> {
        let response = Request::put(signed_url)
            .body(self.file.clone())
            .send()
            .await
            .map_err(|err| TransportError::new(err.to_string()))?;
        if response.ok() {
            Ok(())
        } else {
            Err(TransportError::new(format!(
                "upload rejected with status {}",
                response.status()
            )))
        }
    }
}
