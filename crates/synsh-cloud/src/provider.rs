//! Cloud service trait definitions

use crate::error::{ApiError, Result};
use crate::model::{NetworkRecord, ServerRecord, ServerSummary};
use crate::registry::CloudEntry;
use async_trait::async_trait;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Compute and network services of a single cloud, scoped to one token
///
/// Implementations report failures as [`ApiError`]; callers tag them with the
/// cloud name.
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// List servers in summary form
    async fn list_servers(&self) -> ApiResult<Vec<ServerSummary>>;

    /// Fetch the full record of a server
    async fn get_server_details(&self, id: &str) -> ApiResult<ServerRecord>;

    async fn list_networks(&self) -> ApiResult<Vec<NetworkRecord>>;
}

/// Produces a [`CloudApi`] for a configured cloud
///
/// Connecting resolves the service endpoints for the entry's token and fails
/// with `EndpointResolution` when a required service is missing.
#[async_trait]
pub trait CloudConnector: Send + Sync {
    async fn connect(&self, cloud: &CloudEntry) -> Result<Box<dyn CloudApi>>;
}
