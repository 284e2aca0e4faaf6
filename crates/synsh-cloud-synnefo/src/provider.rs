//! Synnefo implementation of the synsh cloud traits

use crate::compute::ComputeClient;
use crate::identity::{AstakosClient, COMPUTE_SERVICE, NETWORK_SERVICE, ServiceCatalog};
use crate::network::NetworkClient;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use synsh_cloud::{
    ApiResult, CloudApi, CloudConnector, CloudEntry, CloudError, NetworkRecord, ServerRecord,
    ServerSummary,
};

/// Compute and network clients of one Synnefo cloud
pub struct SynnefoClient {
    compute: ComputeClient,
    network: NetworkClient,
}

impl SynnefoClient {
    pub fn new(client: reqwest::Client, compute_url: &str, network_url: &str, token: &str) -> Self {
        Self {
            compute: ComputeClient::new(client.clone(), compute_url, token),
            network: NetworkClient::new(client, network_url, token),
        }
    }
}

#[async_trait]
impl CloudApi for SynnefoClient {
    async fn list_servers(&self) -> ApiResult<Vec<ServerSummary>> {
        Ok(self.compute.list_servers().await?)
    }

    async fn get_server_details(&self, id: &str) -> ApiResult<ServerRecord> {
        Ok(self.compute.get_server_details(id).await?)
    }

    async fn list_networks(&self) -> ApiResult<Vec<NetworkRecord>> {
        Ok(self.network.list_networks().await?)
    }
}

/// Builds [`SynnefoClient`]s, resolving endpoints through Astakos
///
/// Catalogs are cached per (identity URL, token) for the lifetime of the
/// connector.
pub struct SynnefoConnector {
    client: reqwest::Client,
    catalogs: Mutex<HashMap<(String, String), ServiceCatalog>>,
}

impl SynnefoConnector {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            catalogs: Mutex::new(HashMap::new()),
        }
    }

    /// Service catalog for a cloud, fetched once per (URL, token)
    pub async fn catalog(&self, cloud: &CloudEntry) -> synsh_cloud::Result<ServiceCatalog> {
        let key = (cloud.api_base_url.clone(), cloud.token().to_string());
        if let Some(catalog) = self.cached(&key) {
            tracing::debug!(cloud = %cloud.name, "Using cached service catalog");
            return Ok(catalog);
        }

        tracing::debug!(cloud = %cloud.name, url = %cloud.api_base_url, "Resolving service catalog");
        let catalog = AstakosClient::new(self.client.clone(), &cloud.api_base_url, cloud.token())
            .authenticate()
            .await
            .map_err(|e| CloudError::api(&cloud.name, e.into()))?;

        self.catalogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, catalog.clone());
        Ok(catalog)
    }

    fn cached(&self, key: &(String, String)) -> Option<ServiceCatalog> {
        self.catalogs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl Default for SynnefoConnector {
    fn default() -> Self {
        Self::new()
    }
}

fn require_endpoint<'c>(
    catalog: &'c ServiceCatalog,
    cloud: &CloudEntry,
    service: &str,
) -> synsh_cloud::Result<&'c str> {
    catalog
        .endpoint(service)
        .ok_or_else(|| CloudError::EndpointResolution {
            cloud: cloud.name.clone(),
            service: service.to_string(),
        })
}

#[async_trait]
impl CloudConnector for SynnefoConnector {
    async fn connect(&self, cloud: &CloudEntry) -> synsh_cloud::Result<Box<dyn CloudApi>> {
        let catalog = self.catalog(cloud).await?;
        let compute_url = require_endpoint(&catalog, cloud, COMPUTE_SERVICE)?;
        let network_url = require_endpoint(&catalog, cloud, NETWORK_SERVICE)?;

        Ok(Box::new(SynnefoClient::new(
            self.client.clone(),
            compute_url,
            network_url,
            cloud.token(),
        )))
    }
}
