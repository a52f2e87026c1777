//! Reqwest-backed gateway for the PhotoShare HTTP API.
//!
//! This adapter owns transport details only: the shared cookie jar, the
//! request timeout, HTTP error mapping and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use pagination::PageRequest;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::dto::{
    ErrorBodyDto, LoginRequestDto, MediaDto, RegisterRequestDto, UserDto, UserEnvelopeDto,
};
use crate::domain::ports::{AuthGateway, GatewayError, MediaGateway};
use crate::domain::{
    FeedQuery, LoginCredentials, MediaDetail, MediaId, MediaSummary, Registration, User, UserId,
};

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    base_url: Url,
    timeout: Duration,
}

impl GatewaySettings {
    /// Settings for `base_url`. A missing trailing slash is added so that
    /// endpoint paths resolve beneath any path prefix.
    pub fn new(mut base_url: Url, timeout: Duration) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { base_url, timeout }
    }

    /// API root, always ending in `/`.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Gateway adapter sharing one cookie-carrying client across all calls.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Build an adapter with a cookie store and the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: &GatewaySettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(settings.timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url().clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url.join(path).map_err(|error| {
            GatewayError::invalid_request(format!("cannot resolve endpoint {path}: {error}"))
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let error = map_status_error(status, body.as_ref());
            debug!(status = status.as_u16(), error = %error, "api request failed");
            return Err(error);
        }
        Ok(body.to_vec())
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let body = self.send(self.client.get(url)).await?;
        decode(&body)
    }

    async fn fetch_media_list(&self, request: RequestBuilder) -> Result<Vec<MediaSummary>, GatewayError> {
        let body = self.send(request).await?;
        let items: Vec<MediaDto> = decode(&body)?;
        items
            .into_iter()
            .map(MediaDto::into_summary)
            .collect::<Result<_, _>>()
            .map_err(GatewayError::decode)
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn current_user(&self) -> Result<User, GatewayError> {
        let envelope: UserEnvelopeDto = self.get_json("api/auth/me").await?;
        Ok(envelope.user.into())
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, GatewayError> {
        let url = self.endpoint("api/auth/login")?;
        let body = self
            .send(self.client.post(url).json(&LoginRequestDto::from(credentials)))
            .await?;
        let envelope: UserEnvelopeDto = decode(&body)?;
        Ok(envelope.user.into())
    }

    async fn register(&self, registration: &Registration) -> Result<Value, GatewayError> {
        let url = self.endpoint("api/auth/register")?;
        let body = self
            .send(
                self.client
                    .post(url)
                    .json(&RegisterRequestDto::from(registration)),
            )
            .await?;
        if is_blank(&body) {
            return Ok(Value::Null);
        }
        decode(&body)
    }

    async fn logout(&self) -> Result<(), GatewayError> {
        let url = self.endpoint("api/auth/logout")?;
        self.send(self.client.post(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl MediaGateway for HttpGateway {
    async fn fetch_media_page(
        &self,
        query: &FeedQuery,
        request: PageRequest,
    ) -> Result<Vec<MediaSummary>, GatewayError> {
        let builder = match query.search_term() {
            Some(term) => self
                .client
                .get(self.endpoint("api/media/search")?)
                .query(&[("q", term)]),
            None => self.client.get(self.endpoint("api/media")?),
        };
        self.fetch_media_list(builder.query(&request)).await
    }

    async fn fetch_media(&self, id: MediaId) -> Result<MediaDetail, GatewayError> {
        let url = self.endpoint(&format!("api/media/{id}"))?;
        let body = self.send(self.client.get(url)).await?;
        let dto: Option<MediaDto> = if is_blank(&body) { None } else { decode(&body)? };
        let Some(dto) = dto else {
            return Err(GatewayError::not_found(format!("media {id}")));
        };
        dto.into_detail().map_err(GatewayError::decode)
    }

    async fn fetch_profile(&self, id: UserId) -> Result<User, GatewayError> {
        let profile: UserDto = self.get_json(&format!("api/users/{id}")).await?;
        Ok(profile.into())
    }

    async fn fetch_user_media(&self, id: UserId) -> Result<Vec<MediaSummary>, GatewayError> {
        let url = self.endpoint(&format!("api/users/{id}/media"))?;
        self.fetch_media_list(self.client.get(url)).await
    }
}

fn decode<T>(body: &[u8]) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body)
        .map_err(|error| GatewayError::decode(format!("invalid API JSON payload: {error}")))
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::timeout(error.to_string())
    } else {
        GatewayError::connectivity(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let detail = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(ErrorBodyDto::into_message);
    let summary = detail.as_ref().map_or_else(
        || format!("status {}", status.as_u16()),
        |detail| format!("status {}: {detail}", status.as_u16()),
    );

    match status {
        StatusCode::NOT_FOUND => GatewayError::not_found(summary),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::timeout(summary),
        _ if status.is_client_error() => {
            GatewayError::rejected(status.as_u16(), detail.unwrap_or_default())
        }
        _ => GatewayError::connectivity(summary),
    }
}
