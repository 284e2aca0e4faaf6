//! Server name resolution
//!
//! Turns `name` or `name.cloud` into an [`SshInfo`] by searching the
//! configured clouds in registry order. The first cloud that has a server
//! with that exact name wins; clouds are never aggregated.

use crate::error::{CloudError, Result};
use crate::model::{NetworkRecord, NicAttachment, Resolution, ServerRecord, ServerSummary, SshInfo};
use crate::provider::CloudConnector;
use crate::registry::{CloudEntry, CloudRegistry};
use std::collections::HashSet;
use tracing::{debug, info};

/// Split `name.cloud` on the first dot
///
/// ```
/// use synsh_cloud::parse_server_name;
///
/// assert_eq!(parse_server_name("web1.cloudA"), ("web1", Some("cloudA")));
/// assert_eq!(parse_server_name("web1"), ("web1", None));
/// assert_eq!(parse_server_name("a.b.c"), ("a", Some("b.c")));
/// ```
pub fn parse_server_name(server_name: &str) -> (&str, Option<&str>) {
    match server_name.split_once('.') {
        Some((name, cloud)) => (name, Some(cloud)),
        None => (server_name, None),
    }
}

/// Resolves server names across the clouds of a registry
pub struct ServerResolver<'a> {
    registry: &'a CloudRegistry,
    connector: &'a dyn CloudConnector,
    scope: Option<&'a CloudEntry>,
}

impl<'a> ServerResolver<'a> {
    /// Create a resolver, optionally fixed to a single cloud
    pub fn new(
        registry: &'a CloudRegistry,
        connector: &'a dyn CloudConnector,
        cloud: Option<&str>,
    ) -> Result<Self> {
        let scope = cloud.map(|name| registry.get(name)).transpose()?;

        Ok(Self {
            registry,
            connector,
            scope,
        })
    }

    /// Clouds to search, in order, for an optional cloud hint
    fn candidates(&self, hint: Option<&str>) -> Result<Vec<&'a CloudEntry>> {
        match (hint, self.scope) {
            (Some(hint), Some(scope)) if hint == scope.name => Ok(vec![scope]),
            (Some(hint), Some(_)) => Err(CloudError::UnknownCloud(hint.to_string())),
            (Some(hint), None) => Ok(vec![self.registry.get(hint)?]),
            (None, Some(scope)) => Ok(vec![scope]),
            (None, None) => Ok(self.registry.entries().collect()),
        }
    }

    /// Resolve `name` or `name.cloud`
    ///
    /// Any API failure aborts the whole lookup, even when later clouds
    /// were not searched yet.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, server_name: &str) -> Result<Resolution> {
        let (name, hint) = parse_server_name(server_name);
        let candidates = self.candidates(hint)?;

        for cloud in candidates {
            debug!(server = name, cloud = %cloud.name, "Looking up server");
            if let Some(resolution) = self.resolve_in(cloud, name).await? {
                return Ok(resolution);
            }
        }

        debug!(server = name, "Server not found in any cloud");
        Ok(Resolution::NotFound)
    }

    async fn resolve_in(&self, cloud: &CloudEntry, name: &str) -> Result<Option<Resolution>> {
        let api = self.connector.connect(cloud).await?;

        let servers = api
            .list_servers()
            .await
            .map_err(|e| CloudError::api(&cloud.name, e))?;
        let Some(summary) = find_server(&servers, name) else {
            return Ok(None);
        };

        info!(server = name, cloud = %cloud.name, id = %summary.id, "Found server");
        let server = api
            .get_server_details(&summary.id)
            .await
            .map_err(|e| CloudError::api(&cloud.name, e))?;

        if server.network_attachments.is_empty() {
            return Ok(Some(Resolution::NoInterfaces {
                server_name: name.to_string(),
                cloud_name: cloud.name.clone(),
            }));
        }

        let networks = api
            .list_networks()
            .await
            .map_err(|e| CloudError::api(&cloud.name, e))?;
        let public = public_network_ids(&networks);

        Ok(Some(Resolution::Found(build_ssh_info(
            name,
            &cloud.name,
            &server,
            &public,
        ))))
    }
}

/// First server with exactly this name
pub fn find_server<'s>(servers: &'s [ServerSummary], name: &str) -> Option<&'s ServerSummary> {
    servers.iter().find(|s| s.name == name)
}

pub fn public_network_ids(networks: &[NetworkRecord]) -> HashSet<&str> {
    networks
        .iter()
        .filter(|n| n.is_public)
        .map(|n| n.id.as_str())
        .collect()
}

/// First non-empty address on a public network, in attachment order
///
/// `field` picks the address family, so IPv4 and IPv6 may come from
/// different interfaces.
pub fn select_address<'s>(
    nics: &'s [NicAttachment],
    public: &HashSet<&str>,
    field: impl Fn(&'s NicAttachment) -> Option<&'s str>,
) -> Option<&'s str> {
    nics.iter()
        .filter(|nic| public.contains(nic.network_id.as_str()))
        .filter_map(field)
        .find(|addr| !addr.is_empty())
}

fn build_ssh_info(
    name: &str,
    cloud_name: &str,
    server: &ServerRecord,
    public: &HashSet<&str>,
) -> SshInfo {
    let nics = &server.network_attachments;

    SshInfo {
        server_name: name.to_string(),
        cloud_name: cloud_name.to_string(),
        user: server.user().map(str::to_string),
        fqdn: server.fqdn.clone(),
        ipv4: select_address(nics, public, |nic| nic.ipv4.as_deref()).map(str::to_string),
        ipv6: select_address(nics, public, |nic| nic.ipv6.as_deref()).map(str::to_string),
        port_forwarding: server.ssh_port_forwarding().cloned(),
    }
}
