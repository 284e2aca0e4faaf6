//! Astakos identity client
//!
//! Authenticating a token returns the service catalog, which maps service
//! types (`compute`, `network`, ...) to their public endpoints.

use crate::error::Result;
use crate::http::ApiClient;
use serde::{Deserialize, Serialize};

pub const COMPUTE_SERVICE: &str = "compute";
pub const NETWORK_SERVICE: &str = "network";

pub struct AstakosClient {
    api: ApiClient,
}

impl AstakosClient {
    pub fn new(client: reqwest::Client, auth_url: &str, token: &str) -> Self {
        Self {
            api: ApiClient::new(client, auth_url, token),
        }
    }

    /// Authenticate the token and fetch its service catalog
    pub async fn authenticate(&self) -> Result<ServiceCatalog> {
        let request = AuthRequest {
            auth: AuthBody {
                token: TokenRef {
                    id: self.api.token(),
                },
            },
        };

        let response: AuthResponse = self.api.post("tokens", &request).await?;
        let catalog = ServiceCatalog {
            services: response.access.service_catalog,
        };

        tracing::debug!(services = catalog.services.len(), "Resolved service catalog");
        Ok(catalog)
    }
}

/// Services available to a token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    services: Vec<CatalogService>,
}

impl ServiceCatalog {
    pub fn services(&self) -> &[CatalogService] {
        &self.services
    }

    /// First public URL of the service with this type
    pub fn endpoint(&self, service_type: &str) -> Option<&str> {
        self.services
            .iter()
            .find(|s| s.service_type == service_type)
            .and_then(|s| s.endpoints.first())
            .map(|e| e.public_url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogService {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEndpoint {
    #[serde(rename = "publicURL")]
    pub public_url: String,
}

// ============ API Types ============

#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    auth: AuthBody<'a>,
}

#[derive(Debug, Serialize)]
struct AuthBody<'a> {
    token: TokenRef<'a>,
}

#[derive(Debug, Serialize)]
struct TokenRef<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access: Access,
}

#[derive(Debug, Deserialize)]
struct Access {
    #[serde(rename = "serviceCatalog", default)]
    service_catalog: Vec<CatalogService>,
}
