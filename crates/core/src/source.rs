use std::time::Duration;

use async_trait::async_trait;

use crate::error::FetchError;

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch a feed body. Non-2xx responses are `FetchError::Status`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("scout/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(body.to_vec())
    }
}

#[cfg(any(test, feature = "testing"))]
pub mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Serves canned responses keyed by URL. Unknown URLs answer 404.
    #[derive(Debug, Default)]
    pub struct StaticFeedSource {
        responses: Mutex<HashMap<String, Result<Vec<u8>, FetchError>>>,
        requests: Mutex<Vec<String>>,
    }

    impl StaticFeedSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
            self.responses
                .lock()
                .unwrap()
                .insert(url.into(), Ok(body.into()));
        }

        pub fn fail(&self, url: impl Into<String>, err: FetchError) {
            self.responses.lock().unwrap().insert(url.into(), Err(err));
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FeedSource for StaticFeedSource {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.responses
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .unwrap_or(Err(FetchError::Status(404)))
        }
    }
}
