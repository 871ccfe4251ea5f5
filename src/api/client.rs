use std::future::Future;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    api::{
        config::ClientConfig,
        wire::{FrameConfigResponse, ReelEditData, ReelEditRequest, RenderJobResponse},
    },
    foundation::error::{ReelError, ReelResult},
};

/// The slice of the reel backend an edit session talks to.
pub trait ReelBackend {
    /// Fetches the reel record; a missing reel is [`ReelError::ReelNotFound`].
    fn get_reel(&self, reel_id: u64) -> impl Future<Output = ReelResult<ReelEditData>> + Send;

    /// Persists the editable fields and returns the stored record.
    fn update_reel(
        &self,
        reel_id: u64,
        request: &ReelEditRequest,
    ) -> impl Future<Output = ReelResult<ReelEditData>> + Send;

    /// Queues a render of the reel's saved configuration.
    fn request_render(
        &self,
        reel_id: u64,
    ) -> impl Future<Output = ReelResult<RenderJobResponse>> + Send;
}

/// [`ReelBackend`] over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpReelBackend {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpReelBackend {
    /// Client with `config.timeout` applied to every request.
    pub fn new(config: ClientConfig) -> ReelResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ReelError::transport(format!("build http client: {e}")))?;
        Ok(Self { http, config })
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Frame variants advertised by the backend. Entries the client cannot render are
    /// rejected rather than silently passed through.
    pub async fn list_frames(&self) -> ReelResult<Vec<FrameConfigResponse>> {
        let frames: Vec<FrameConfigResponse> = self
            .send_json(self.http.get(self.config.reels_url("frames/list")), None)
            .await?;
        for frame in &frames {
            frame.variant_id()?;
        }
        Ok(frames)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        reel_id: Option<u64>,
    ) -> ReelResult<T> {
        let response = self.authorized(builder).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND
            && let Some(id) = reel_id
        {
            return Err(ReelError::ReelNotFound(id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReelError::Backend {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pulls `detail` out of an error body (`{"detail": "..."}`), falling back to the raw text.
pub(crate) fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ if body.trim().is_empty() => "request failed".to_string(),
        _ => body.trim().to_string(),
    }
}

impl ReelBackend for HttpReelBackend {
    async fn get_reel(&self, reel_id: u64) -> ReelResult<ReelEditData> {
        tracing::debug!(reel_id, "fetching reel");
        self.send_json(self.http.get(self.config.reels_url(&reel_id.to_string())), Some(reel_id))
            .await
    }

    async fn update_reel(
        &self,
        reel_id: u64,
        request: &ReelEditRequest,
    ) -> ReelResult<ReelEditData> {
        tracing::debug!(reel_id, "patching reel");
        let builder = self
            .http
            .patch(self.config.reels_url(&reel_id.to_string()))
            .json(request);
        self.send_json(builder, Some(reel_id)).await
    }

    async fn request_render(&self, reel_id: u64) -> ReelResult<RenderJobResponse> {
        tracing::debug!(reel_id, "requesting render");
        let builder = self
            .http
            .post(self.config.reels_url(&format!("{reel_id}/render")));
        self.send_json(builder, Some(reel_id)).await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/api/client.rs"]
mod tests;
