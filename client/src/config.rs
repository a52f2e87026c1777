//! Client configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PHOTOSHARE_*` environment variables or a
//! config file, in OrthoConfig's usual precedence. Every field is optional and
//! falls back to the defaults below.

use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{PageSize, PageSizeError};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::http::GatewaySettings;

/// API root used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `base_url` is not an absolute HTTP(S) URL.
    #[error("invalid base_url {raw:?}: {reason}")]
    InvalidBaseUrl {
        /// Configured value.
        raw: String,
        /// Why it was refused.
        reason: String,
    },
    /// `request_timeout_secs` is zero.
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
    /// `page_size` is zero.
    #[error("invalid page_size: {0}")]
    PageSize(#[from] PageSizeError),
}

/// Configuration values for talking to the PhotoShare API.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PHOTOSHARE")]
pub struct ClientSettings {
    /// API root, e.g. `https://photos.example.com`.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Feed page size.
    pub page_size: Option<u32>,
}

impl ClientSettings {
    /// Return the configured API root, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] for unparsable or non-HTTP
    /// URLs.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = Url::parse(raw).map_err(|error| SettingsError::InvalidBaseUrl {
            raw: raw.to_owned(),
            reason: error.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SettingsError::InvalidBaseUrl {
                raw: raw.to_owned(),
                reason: format!("unsupported scheme {other}"),
            }),
        }
    }

    /// Return the configured request timeout, falling back to ten seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] when configured as zero.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_secs {
            Some(0) => Err(SettingsError::ZeroTimeout),
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Ok(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        }
    }

    /// Return the configured feed page size, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::PageSize`] when configured as zero.
    pub fn page_size(&self) -> Result<PageSize, SettingsError> {
        Ok(self.page_size.map(PageSize::new).transpose()?.unwrap_or_default())
    }

    /// Gateway settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Propagates any invalid base URL or timeout.
    pub fn gateway_settings(&self) -> Result<GatewaySettings, SettingsError> {
        Ok(GatewaySettings::new(self.base_url()?, self.request_timeout()?))
    }
}
