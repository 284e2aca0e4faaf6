//! Typed records exchanged with cloud APIs and the resolution result

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Metadata key holding the login user(s) of a server image
pub const USERS_METADATA_KEY: &str = "users";

/// Port whose forwarding entry overrides the SSH endpoint
pub const SSH_PORT: &str = "22";

/// Summary form of a server as returned by a listing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub id: String,
    pub name: String,
}

/// Full server record as returned by a details call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub id: String,
    pub name: String,
    pub status: String,
    pub metadata: HashMap<String, String>,

    /// Network interfaces in the order the API reports them
    pub network_attachments: Vec<NicAttachment>,

    /// Forwarded ports keyed by the server-side port
    pub port_forwarding: BTreeMap<String, PortForward>,

    pub fqdn: Option<String>,
}

impl ServerRecord {
    pub fn user(&self) -> Option<&str> {
        self.metadata.get(USERS_METADATA_KEY).map(String::as_str)
    }

    pub fn ssh_port_forwarding(&self) -> Option<&PortForward> {
        self.port_forwarding.get(SSH_PORT)
    }
}

/// A server network interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NicAttachment {
    pub network_id: String,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub id: String,
    pub is_public: bool,
}

/// Externally reachable endpoint that forwards to a server port
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortForward {
    pub host: Option<String>,
    pub port: String,
}

/// Everything needed to open an SSH session to a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshInfo {
    pub server_name: String,
    pub cloud_name: String,
    pub user: Option<String>,
    pub fqdn: Option<String>,
    pub ipv4: Option<String>,
    pub ipv6: Option<String>,
    pub port_forwarding: Option<PortForward>,
}

/// Outcome of resolving a server name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(SshInfo),

    /// The server exists but has no network interfaces at all
    NoInterfaces {
        server_name: String,
        cloud_name: String,
    },

    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn ssh_info(&self) -> Option<&SshInfo> {
        match self {
            Resolution::Found(info) => Some(info),
            _ => None,
        }
    }

    pub fn into_ssh_info(self) -> Option<SshInfo> {
        match self {
            Resolution::Found(info) => Some(info),
            _ => None,
        }
    }
}
