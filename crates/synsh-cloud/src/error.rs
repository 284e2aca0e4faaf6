//! Cloud error types

use thiserror::Error;

/// Errors surfaced by registry lookups and server resolution
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("No available clouds to connect")]
    NoCloudsConfigured,

    #[error("Unknown cloud '{0}'")]
    UnknownCloud(String),

    #[error("Cloud '{cloud}' does not expose a '{service}' service endpoint")]
    EndpointResolution { cloud: String, service: String },

    #[error("API error on cloud '{cloud}': {source}")]
    Api {
        cloud: String,
        #[source]
        source: ApiError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] synsh_config::ConfigError),
}

impl CloudError {
    /// Tag an API failure with the cloud it came from
    pub fn api(cloud: impl Into<String>, source: ApiError) -> Self {
        Self::Api {
            cloud: cloud.into(),
            source,
        }
    }
}

/// Failure reported by a [`CloudApi`](crate::CloudApi) implementation
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, CloudError>;
