//! Cyclades compute client

use crate::error::Result;
use crate::http::{ApiClient, deserialize_id};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use synsh_cloud::{NicAttachment, PortForward, ServerRecord, ServerSummary};

pub struct ComputeClient {
    api: ApiClient,
}

impl ComputeClient {
    pub fn new(client: reqwest::Client, endpoint: &str, token: &str) -> Self {
        Self {
            api: ApiClient::new(client, endpoint, token),
        }
    }

    /// List servers without details
    pub async fn list_servers(&self) -> Result<Vec<ServerSummary>> {
        let response: ServersResponse = self.api.get("servers").await?;
        Ok(response
            .servers
            .into_iter()
            .map(|s| ServerSummary {
                id: s.id,
                name: s.name,
            })
            .collect())
    }

    pub async fn get_server_details(&self, id: &str) -> Result<ServerRecord> {
        let response: ServerResponse = self.api.get(&format!("servers/{}", id)).await?;
        Ok(response.server.into())
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ServersResponse {
    #[serde(default)]
    servers: Vec<ApiServerSummary>,
}

#[derive(Debug, Deserialize)]
struct ApiServerSummary {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ServerResponse {
    server: ApiServer,
}

#[derive(Debug, Deserialize)]
struct ApiServer {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    name: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
    #[serde(default)]
    attachments: Vec<ApiAttachment>,
    #[serde(rename = "SNF:fqdn", default)]
    fqdn: Option<String>,
    #[serde(rename = "SNF:port_forwarding", default)]
    port_forwarding: Option<HashMap<String, ApiPortForward>>,
}

#[derive(Debug, Deserialize)]
struct ApiAttachment {
    #[serde(deserialize_with = "deserialize_id")]
    network_id: String,
    #[serde(default)]
    ipv4: Option<String>,
    #[serde(default)]
    ipv6: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPortForward {
    #[serde(default)]
    host: Option<String>,
    #[serde(deserialize_with = "deserialize_id")]
    port: String,
}

impl From<ApiServer> for ServerRecord {
    fn from(s: ApiServer) -> Self {
        ServerRecord {
            id: s.id,
            name: s.name,
            status: s.status,
            metadata: s.metadata,
            network_attachments: s
                .attachments
                .into_iter()
                .map(|a| NicAttachment {
                    network_id: a.network_id,
                    ipv4: a.ipv4,
                    ipv6: a.ipv6,
                })
                .collect(),
            port_forwarding: s
                .port_forwarding
                .unwrap_or_default()
                .into_iter()
                .map(|(port, pf)| {
                    (
                        port,
                        PortForward {
                            host: pf.host,
                            port: pf.port,
                        },
                    )
                })
                .collect::<BTreeMap<_, _>>(),
            fqdn: s.fqdn,
        }
    }
}
