use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use synsh_cloud::{
    ApiError, ApiResult, CloudApi, CloudConnector, CloudEntry, CloudError, CloudRegistry,
    NetworkRecord, NicAttachment, PortForward, ServerRecord, ServerSummary,
};

pub type CallLog = Arc<Mutex<Vec<String>>>;

/// In-memory cloud with canned servers and networks
#[derive(Clone, Default)]
pub struct MockCloud {
    pub servers: Vec<ServerRecord>,
    pub networks: Vec<NetworkRecord>,
    pub fail_listing: bool,
}

impl MockCloud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server(mut self, server: ServerRecord) -> Self {
        self.servers.push(server);
        self
    }

    pub fn with_network(mut self, id: &str, is_public: bool) -> Self {
        self.networks.push(NetworkRecord {
            id: id.to_string(),
            is_public,
        });
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_listing: true,
            ..Default::default()
        }
    }
}

struct MockApi {
    cloud: String,
    data: MockCloud,
    log: CallLog,
}

impl MockApi {
    fn record(&self, call: &str) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.cloud, call));
    }
}

#[async_trait]
impl CloudApi for MockApi {
    async fn list_servers(&self) -> ApiResult<Vec<ServerSummary>> {
        self.record("list_servers");
        if self.data.fail_listing {
            return Err(ApiError::Status {
                status: 503,
                url: format!("https://{}/servers", self.cloud),
            });
        }
        Ok(self
            .data
            .servers
            .iter()
            .map(|s| ServerSummary {
                id: s.id.clone(),
                name: s.name.clone(),
            })
            .collect())
    }

    async fn get_server_details(&self, id: &str) -> ApiResult<ServerRecord> {
        self.record(&format!("get_server_details({})", id));
        self.data
            .servers
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                url: format!("https://{}/servers/{}", self.cloud, id),
            })
    }

    async fn list_networks(&self) -> ApiResult<Vec<NetworkRecord>> {
        self.record("list_networks");
        Ok(self.data.networks.clone())
    }
}

/// Connector handing out [`MockCloud`]s by cloud name
#[derive(Default)]
pub struct MockConnector {
    clouds: HashMap<String, MockCloud>,
    pub log: CallLog,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cloud(mut self, name: &str, cloud: MockCloud) -> Self {
        self.clouds.insert(name.to_string(), cloud);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl CloudConnector for MockConnector {
    async fn connect(&self, cloud: &CloudEntry) -> synsh_cloud::Result<Box<dyn CloudApi>> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:connect", cloud.name));
        let data = self
            .clouds
            .get(&cloud.name)
            .cloned()
            .ok_or_else(|| CloudError::EndpointResolution {
                cloud: cloud.name.clone(),
                service: "compute".to_string(),
            })?;
        Ok(Box::new(MockApi {
            cloud: cloud.name.clone(),
            data,
            log: self.log.clone(),
        }))
    }
}

pub fn registry(names: &[&str]) -> CloudRegistry {
    CloudRegistry::from_entries(names.iter().map(|name| {
        CloudEntry::new(
            *name,
            format!("https://accounts.{}.example/identity/v2.0", name),
            format!("token-{}", name),
        )
    }))
    .unwrap()
}

pub fn server(id: &str, name: &str, nics: Vec<NicAttachment>) -> ServerRecord {
    ServerRecord {
        id: id.to_string(),
        name: name.to_string(),
        status: "ACTIVE".to_string(),
        network_attachments: nics,
        ..Default::default()
    }
}

pub fn nic(network: &str, ipv4: Option<&str>, ipv6: Option<&str>) -> NicAttachment {
    NicAttachment {
        network_id: network.to_string(),
        ipv4: ipv4.map(str::to_string),
        ipv6: ipv6.map(str::to_string),
    }
}

#[allow(dead_code)]
pub fn ssh_forward(host: &str, port: &str) -> PortForward {
    PortForward {
        host: Some(host.to_string()),
        port: port.to_string(),
    }
}
