use async_trait::async_trait;

use crate::error::{AcmError, Result};

/// Status code and body of a completed GET request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP GET used by every adapter.
///
/// Implementations report transport faults as errors and return any HTTP
/// status, success or not, as a response. Status handling is up to the
/// caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = reqwest::Client::get(self, url)
            .send()
            .await
            .map_err(|e| AcmError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| AcmError::ResponseBody {
            url: url.to_owned(),
            source: e,
        })?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Serves canned pages by exact URL and records every request.
    /// Unknown URLs answer 404.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        pages: HashMap<String, HttpResponse>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(
                url.to_string(),
                HttpResponse {
                    status: 200,
                    body: body.to_string(),
                },
            );
            self
        }

        pub(crate) fn status(mut self, url: &str, status: u16, body: &str) -> Self {
            self.pages.insert(
                url.to_string(),
                HttpResponse {
                    status,
                    body: body.to_string(),
                },
            );
            self
        }

        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(self.pages.get(url).cloned().unwrap_or(HttpResponse {
                status: 404,
                body: String::new(),
            }))
        }
    }
}
