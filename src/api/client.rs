//! HTTP client for the tipping REST backend.
//!
//! # Responsibilities
//! - Build endpoint URLs under the configured base URL
//! - Apply the per-request timeout
//! - Turn non-2xx answers and malformed bodies into `ApiError`

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::alerts::TipFeed;
use crate::api::types::{
    ApiError, ApiResult, CheckoutRequest, CheckoutSession, CheckoutStatus, CreatorProfile, TipEvent,
};
use crate::config::BackendConfig;
use crate::payments::CheckoutStatusSource;

/// Typed client for the backend's `/api` surface.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base: Url,
}

impl BackendClient {
    /// Create a client for the configured backend.
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let mut base = Url::parse(&config.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.join("api/")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /api/checkout/status/{session_id}`
    pub async fn checkout_status(&self, session_id: &str) -> ApiResult<CheckoutStatus> {
        let url = self.endpoint(&["checkout", "status", session_id])?;
        tracing::debug!(%url, "Querying checkout status");
        let res = self.http.get(url).send().await?;
        decode(res).await
    }

    /// `GET /api/tips/recent?limit=N`, newest first.
    pub async fn recent_tips(&self, limit: u32) -> ApiResult<Vec<TipEvent>> {
        let mut url = self.endpoint(&["tips", "recent"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        let res = self.http.get(url).send().await?;
        decode(res).await
    }

    /// `GET /api/creator`
    pub async fn creator(&self) -> ApiResult<CreatorProfile> {
        let url = self.endpoint(&["creator"])?;
        let res = self.http.get(url).send().await?;
        decode(res).await
    }

    /// `POST /api/checkout/session`
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> ApiResult<CheckoutSession> {
        let url = self.endpoint(&["checkout", "session"])?;
        let res = self.http.post(url).json(request).send().await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> ApiResult<T> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl CheckoutStatusSource for BackendClient {
    async fn checkout_status(&self, session_id: &str) -> ApiResult<CheckoutStatus> {
        BackendClient::checkout_status(self, session_id).await
    }
}

#[async_trait]
impl TipFeed for BackendClient {
    async fn recent_tips(&self, limit: u32) -> ApiResult<Vec<TipEvent>> {
        BackendClient::recent_tips(self, limit).await
    }
}
