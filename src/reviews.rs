//! Paint reviews.
//!
//! No local cache: reviews are low-volume and freshness matters more
//! than latency, so every call is a remote round trip.

use crate::api::ApiClient;
use crate::error::SyncResult;
use crate::model::Review;
use crate::session::AuthSession;
use std::sync::Arc;

/// Fetch and create reviews for a paint.
pub struct ReviewService {
    api: Arc<ApiClient>,
    session: AuthSession,
}

impl ReviewService {
    pub(crate) fn new(api: Arc<ApiClient>, session: AuthSession) -> Self {
        Self { api, session }
    }

    /// All reviews for a paint, newest-first as the remote orders them.
    pub async fn list(&self, paint_id: &str) -> SyncResult<Vec<Review>> {
        let creds = self.session.credentials()?;
        self.api.reviews(&creds.token, paint_id).await
    }

    /// Post a review as the current user.
    pub async fn create(&self, paint_id: &str, text: &str) -> SyncResult<()> {
        let creds = self.session.credentials()?;
        self.api.review_create(&creds.token, paint_id, text).await
    }
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::SyncError;
    use crate::events::EventBus;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn logged_in_service(server: &MockServer) -> ReviewService {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "tok-1",
                "user": {"id": "u1", "firstname": "Jane", "lastname": "Doe"}
            })))
            .mount(server)
            .await;

        let api = Arc::new(ApiClient::new(ClientConfig::new(server.uri())).unwrap());
        let session = AuthSession::new(api.clone(), EventBus::new());
        session.login("jane@example.com", "hunter22").await.unwrap();
        ReviewService::new(api, session)
    }

    #[tokio::test]
    async fn list_parses_reviews() {
        let server = MockServer::start().await;
        let service = logged_in_service(&server).await;

        Mock::given(method("GET"))
            .and(path("/reviews/bm-2000-70"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"reviewerFirst": "John", "reviewerLast": "Doe", "date": "2024-07-17", "text": "ayo this slaps"}
            ])))
            .mount(&server)
            .await;

        let reviews = service.list("bm-2000-70").await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].reviewer_first, "John");
        assert_eq!(reviews[0].text, "ayo this slaps");
    }

    #[tokio::test]
    async fn create_posts_review_text() {
        let server = MockServer::start().await;
        let service = logged_in_service(&server).await;

        Mock::given(method("POST"))
            .and(path("/reviews/de5921"))
            .and(body_json(serde_json::json!({"text": "great coverage"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        service.create("de5921", "great coverage").await.unwrap();
    }

    #[tokio::test]
    async fn list_every_call_hits_the_remote() {
        let server = MockServer::start().await;
        let service = logged_in_service(&server).await;

        Mock::given(method("GET"))
            .and(path("/reviews/de5921"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(2)
            .mount(&server)
            .await;

        service.list("de5921").await.unwrap();
        service.list("de5921").await.unwrap();
    }

    #[tokio::test]
    async fn logout_then_list_fails_unauthenticated() {
        let server = MockServer::start().await;
        let service = logged_in_service(&server).await;

        service.session.logout();
        assert!(matches!(
            service.list("de5921").await.unwrap_err(),
            SyncError::Unauthenticated
        ));
    }
}
