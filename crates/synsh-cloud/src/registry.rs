//! Named cloud accounts available to the resolver

use crate::error::{CloudError, Result};
use indexmap::IndexMap;
use secrecy::{ExposeSecret, SecretString};
use synsh_config::{CloudCredentials, CredentialStore};

/// A configured cloud account
#[derive(Debug)]
pub struct CloudEntry {
    pub name: String,
    pub api_base_url: String,
    pub auth_token: SecretString,
}

impl CloudEntry {
    pub fn new(
        name: impl Into<String>,
        api_base_url: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_base_url: api_base_url.into(),
            auth_token: SecretString::from(auth_token.into()),
        }
    }

    pub fn token(&self) -> &str {
        self.auth_token.expose_secret()
    }
}

impl From<CloudCredentials> for CloudEntry {
    fn from(creds: CloudCredentials) -> Self {
        Self::new(creds.name, creds.url, creds.token)
    }
}

/// Cloud entries in configuration order
#[derive(Debug)]
pub struct CloudRegistry {
    clouds: IndexMap<String, CloudEntry>,
    default_cloud: Option<String>,
}

impl CloudRegistry {
    /// Load the registry from the user's credential file
    pub fn load() -> Result<Self> {
        let store = synsh_config::load_credentials()?;
        Self::from_store(store)
    }

    pub fn from_store(store: CredentialStore) -> Result<Self> {
        let registry = Self::from_entries(store.clouds.into_iter().map(CloudEntry::from))?;
        Ok(registry.with_default_cloud(store.default_cloud))
    }

    /// Build a registry, keeping the iteration order of `entries`
    pub fn from_entries(entries: impl IntoIterator<Item = CloudEntry>) -> Result<Self> {
        let mut clouds = IndexMap::new();
        for entry in entries {
            clouds.insert(entry.name.clone(), entry);
        }

        if clouds.is_empty() {
            return Err(CloudError::NoCloudsConfigured);
        }

        tracing::debug!(clouds = clouds.len(), "Cloud registry ready");
        Ok(Self {
            clouds,
            default_cloud: None,
        })
    }

    /// Record the account marked as default; names that are not configured
    /// are ignored
    pub fn with_default_cloud(mut self, name: Option<String>) -> Self {
        self.default_cloud = name.filter(|name| {
            let known = self.clouds.contains_key(name);
            if !known {
                tracing::warn!(cloud = %name, "default_cloud names an unknown cloud");
            }
            known
        });
        self
    }

    pub fn default_cloud(&self) -> Option<&CloudEntry> {
        self.default_cloud
            .as_deref()
            .and_then(|name| self.clouds.get(name))
    }

    pub fn is_default(&self, name: &str) -> bool {
        self.default_cloud.as_deref() == Some(name)
    }

    pub fn get(&self, name: &str) -> Result<&CloudEntry> {
        self.clouds
            .get(name)
            .ok_or_else(|| CloudError::UnknownCloud(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clouds.contains_key(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CloudEntry> {
        self.clouds.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clouds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}
