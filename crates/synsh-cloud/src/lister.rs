//! Server listing across clouds

use crate::error::{CloudError, Result};
use crate::provider::CloudConnector;
use crate::registry::CloudRegistry;
use indexmap::IndexMap;

/// Server names per cloud, in registry order
pub type ServerListing = IndexMap<String, Vec<String>>;

pub struct ServerLister<'a> {
    registry: &'a CloudRegistry,
    connector: &'a dyn CloudConnector,
}

impl<'a> ServerLister<'a> {
    pub fn new(registry: &'a CloudRegistry, connector: &'a dyn CloudConnector) -> Self {
        Self {
            registry,
            connector,
        }
    }

    /// List server names of one cloud, or of every cloud when no filter is given
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, cloud_filter: Option<&str>) -> Result<ServerListing> {
        let clouds = match cloud_filter {
            Some(name) => vec![self.registry.get(name)?],
            None => self.registry.entries().collect(),
        };

        let mut listing = ServerListing::new();
        for cloud in clouds {
            let api = self.connector.connect(cloud).await?;
            let servers = api
                .list_servers()
                .await
                .map_err(|e| CloudError::api(&cloud.name, e))?;

            tracing::debug!(cloud = %cloud.name, servers = servers.len(), "Listed servers");
            listing.insert(
                cloud.name.clone(),
                servers.into_iter().map(|s| s.name).collect(),
            );
        }

        Ok(listing)
    }
}
