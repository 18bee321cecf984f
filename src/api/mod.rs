//! HTTP client for the remote paint service.
//!
//! Thin reqwest wrapper: one method per remote operation, bearer-token
//! auth, and uniform status→error mapping. No retries and no caching;
//! policy belongs to the components on top.

pub(crate) mod types;

use crate::config::ClientConfig;
use crate::error::{AuthError, FetchError, SyncError, SyncResult};
use crate::model::{Review, Token};
use std::time::Duration;
use types::{
    FavoriteAdd, FavoriteRef, HistoryImages, HistorySummary, LoginRequest, LoginResponse,
    RegisterRequest, ReviewCreate,
};

/// Remote API client shared by all components of one session.
pub(crate) struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Build the client with the configured timeouts and user agent.
    pub(crate) fn new(config: ClientConfig) -> SyncResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent())
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    // ── Auth ─────────────────────────────────────────────────────

    /// `POST /auth/login`. A 401/403 means rejected credentials; any
    /// other non-success status is a transport-level failure.
    pub(crate) async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::NetworkFailure(format!(
                "login failed ({status}): {body}"
            )));
        }

        Ok(resp.json().await?)
    }

    /// `POST /auth/register`.
    pub(crate) async fn register(&self, request: &RegisterRequest<'_>) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.url("/auth/register"))
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::RegistrationFailed(format!("{status}: {body}")));
        }
        Ok(())
    }

    // ── Favorites ────────────────────────────────────────────────

    /// `GET /favorites`: the full remote list of favorite references.
    pub(crate) async fn favorites(&self, token: &Token) -> SyncResult<Vec<FavoriteRef>> {
        let resp = self
            .http
            .get(self.url("/favorites"))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        json_body(resp).await
    }

    /// `POST /favorites`.
    pub(crate) async fn favorite_add(&self, token: &Token, paint_id: &str) -> SyncResult<()> {
        let resp = self
            .http
            .post(self.url("/favorites"))
            .bearer_auth(token.as_str())
            .json(&FavoriteAdd { paint_id })
            .send()
            .await?;
        unit_body(resp).await
    }

    /// `DELETE /favorites/{paintId}`.
    pub(crate) async fn favorite_delete(&self, token: &Token, paint_id: &str) -> SyncResult<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/favorites/{paint_id}")))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        unit_body(resp).await
    }

    // ── History ──────────────────────────────────────────────────

    /// `GET /history`: all history summaries for the current user.
    pub(crate) async fn history(&self, token: &Token) -> SyncResult<Vec<HistorySummary>> {
        let resp = self
            .http
            .get(self.url("/history"))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        json_body(resp).await
    }

    /// `GET /history/{baseImageId}/images`: image ids for one entry.
    pub(crate) async fn history_images(
        &self,
        token: &Token,
        base_image_id: &str,
    ) -> SyncResult<HistoryImages> {
        let resp = self
            .http
            .get(self.url(&format!("/history/{base_image_id}/images")))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        json_body(resp).await
    }

    // ── Images ───────────────────────────────────────────────────

    /// `GET /images/{imageId}`: raw bytes. 404 is reported separately
    /// from transport failure so the caller can drop vs. retry.
    pub(crate) async fn image_bytes(
        &self,
        token: &Token,
        image_id: &str,
    ) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .http
            .get(self.url(&format!("/images/{image_id}")))
            .bearer_auth(token.as_str())
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(image_id.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::NetworkFailure(format!(
                "image fetch failed ({status})"
            )));
        }

        Ok(resp.bytes().await?.to_vec())
    }

    // ── Reviews ──────────────────────────────────────────────────

    /// `GET /reviews/{paintId}`.
    pub(crate) async fn reviews(&self, token: &Token, paint_id: &str) -> SyncResult<Vec<Review>> {
        let resp = self
            .http
            .get(self.url(&format!("/reviews/{paint_id}")))
            .bearer_auth(token.as_str())
            .send()
            .await?;
        json_body(resp).await
    }

    /// `POST /reviews/{paintId}`.
    pub(crate) async fn review_create(
        &self,
        token: &Token,
        paint_id: &str,
        text: &str,
    ) -> SyncResult<()> {
        let resp = self
            .http
            .post(self.url(&format!("/reviews/{paint_id}")))
            .bearer_auth(token.as_str())
            .json(&ReviewCreate { text })
            .send()
            .await?;
        unit_body(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────

/// Map an authenticated JSON response: 401 → `Unauthenticated`, other
/// non-success → `NetworkFailure` with status and body.
async fn json_body<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> SyncResult<T> {
    let resp = ok_status(resp).await?;
    Ok(resp.json().await?)
}

/// Same mapping for endpoints whose body we ignore.
async fn unit_body(resp: reqwest::Response) -> SyncResult<()> {
    ok_status(resp).await?;
    Ok(())
}

async fn ok_status(resp: reqwest::Response) -> SyncResult<reqwest::Response> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(SyncError::Unauthenticated);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SyncError::NetworkFailure(format!(
            "request failed ({status}): {body}"
        )));
    }
    Ok(resp)
}

// ── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_client(server: &MockServer) -> ApiClient {
        ApiClient::new(ClientConfig::new(server.uri())).unwrap()
    }

    fn token() -> Token {
        Token("tok-123".into())
    }

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(serde_json::json!({
                "email": "jane@example.com",
                "password": "hunter22"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "tok-abc",
                "user": {"id": "u1", "firstname": "Jane", "lastname": "Doe"}
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let resp = client.login("jane@example.com", "hunter22").await.unwrap();
        assert_eq!(resp.user.firstname, "Jane");
        assert_eq!(resp.token.as_str(), "tok-abc");
    }

    #[tokio::test]
    async fn login_rejection_is_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let err = client.login("jane@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_server_error_is_network_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let err = client.login("jane@example.com", "pw").await.unwrap_err();
        match err {
            AuthError::NetworkFailure(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn authenticated_call_sends_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/favorites"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let favs = client.favorites(&token()).await.unwrap();
        assert!(favs.is_empty());
    }

    #[tokio::test]
    async fn expired_token_maps_to_unauthenticated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let err = client.history(&token()).await.unwrap_err();
        assert!(matches!(err, SyncError::Unauthenticated));
    }

    #[tokio::test]
    async fn image_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let err = client.image_bytes(&token(), "missing").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn image_bytes_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images/3f2a"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(vec![0xFF, 0xD8, 0xFF], "image/jpeg"),
            )
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let bytes = client.image_bytes(&token(), "3f2a").await.unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
    }
}
