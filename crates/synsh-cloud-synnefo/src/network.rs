//! Cyclades network client

use crate::error::Result;
use crate::http::{ApiClient, deserialize_id};
use serde::Deserialize;
use synsh_cloud::NetworkRecord;

pub struct NetworkClient {
    api: ApiClient,
}

impl NetworkClient {
    pub fn new(client: reqwest::Client, endpoint: &str, token: &str) -> Self {
        Self {
            api: ApiClient::new(client, endpoint, token),
        }
    }

    pub async fn list_networks(&self) -> Result<Vec<NetworkRecord>> {
        let response: NetworksResponse = self.api.get("networks").await?;
        Ok(response
            .networks
            .into_iter()
            .map(|n| NetworkRecord {
                id: n.id,
                is_public: n.public,
            })
            .collect())
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct NetworksResponse {
    #[serde(default)]
    networks: Vec<ApiNetwork>,
}

#[derive(Debug, Deserialize)]
struct ApiNetwork {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    #[serde(default)]
    public: bool,
}
