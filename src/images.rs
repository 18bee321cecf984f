//! Raw image fetching.
//!
//! One remote fetch per call; no retry and no caching policy of its own;
//! the caller decides what to keep. `HistoryCache` caches base photos
//! and deliberately re-fetches rendered variants on view.

use crate::api::ApiClient;
use crate::error::FetchError;
use crate::model::Token;
use std::sync::Arc;

/// Fetches raw image bytes by content identifier.
pub struct ImageStore {
    api: Arc<ApiClient>,
}

impl ImageStore {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetch the bytes for one image. `NotFound` and `NetworkFailure`
    /// stay distinct so the caller can drop the referencing entry or
    /// retry, respectively.
    pub async fn get_bytes(&self, token: &Token, image_id: &str) -> Result<Vec<u8>, FetchError> {
        self.api.image_bytes(token, image_id).await
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> ImageStore {
        ImageStore::new(Arc::new(
            ApiClient::new(ClientConfig::new(server.uri())).unwrap(),
        ))
    }

    #[tokio::test]
    async fn fetches_bytes_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/3f2a"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1, 2, 3], "image/jpeg"))
            .expect(1)
            .mount(&server)
            .await;

        let bytes = store(&server)
            .get_bytes(&Token("tok-1".into()), "3f2a")
            .await
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_image_is_not_found_not_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/images/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let store = store(&server);
        let token = Token("tok-1".into());

        assert!(matches!(
            store.get_bytes(&token, "gone").await.unwrap_err(),
            FetchError::NotFound(_)
        ));
        assert!(matches!(
            store.get_bytes(&token, "flaky").await.unwrap_err(),
            FetchError::NetworkFailure(_)
        ));
    }
}
