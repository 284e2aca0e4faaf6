//! Cloud credential store for synsh
//!
//! Credentials live in a kamaki-compatible INI file:
//!
//! ```ini
//! [global]
//! default_cloud = okeanos
//!
//! [cloud "okeanos"]
//! url = https://accounts.okeanos.grnet.gr/identity/v2.0
//! token = XXXX
//! ```
//!
//! Clouds are returned in the order they appear in the file.

pub mod error;

pub use error::*;

use ini::{Ini, ParseOption, Properties};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable pointing at an explicit credential file
pub const CONFIG_PATH_ENV: &str = "KAMAKI_CONFIG";

/// Default credential file name inside the home directory
pub const CONFIG_FILENAME: &str = ".kamakirc";

/// Credentials for a single cloud account
#[derive(Clone, PartialEq, Eq)]
pub struct CloudCredentials {
    pub name: String,
    pub url: String,
    pub token: String,
}

impl fmt::Debug for CloudCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudCredentials")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Parsed credential file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialStore {
    /// `default_cloud` from the `[global]` section
    pub default_cloud: Option<String>,

    /// Clouds in file order
    pub clouds: Vec<CloudCredentials>,
}

impl CredentialStore {
    pub fn cloud_names(&self) -> impl Iterator<Item = &str> {
        self.clouds.iter().map(|c| c.name.as_str())
    }
}

/// Locate the credential file
///
/// Search order:
/// 1. `KAMAKI_CONFIG` environment variable
/// 2. `~/.kamakirc`
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(path_str) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&path_str);
        if path.exists() {
            debug!(config_path = %path.display(), "Using credential file from {}", CONFIG_PATH_ENV);
            return Ok(path);
        }
        warn!(env_path = %path_str, "{} is set but file does not exist", CONFIG_PATH_ENV);
        return Err(ConfigError::ConfigFileNotFound(path));
    }

    let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
    let path = home.join(CONFIG_FILENAME);
    if path.exists() {
        debug!(config_path = %path.display(), "Using default credential file");
        Ok(path)
    } else {
        Err(ConfigError::ConfigFileNotFound(path))
    }
}

/// Find and load the credential file
pub fn load_credentials() -> Result<CredentialStore> {
    let path = find_config_file()?;
    load_credentials_from(&path)
}

/// Load credentials from a specific file
pub fn load_credentials_from(path: &Path) -> Result<CredentialStore> {
    let content = std::fs::read_to_string(path)?;
    let store = parse_credentials(&content)?;
    debug!(
        config_path = %path.display(),
        clouds = store.clouds.len(),
        "Loaded cloud credentials"
    );
    Ok(store)
}

#[derive(Default)]
struct PartialCloud {
    name: String,
    url: Option<String>,
    token: Option<String>,
}

fn parse_option() -> ParseOption {
    // kamaki writes the file with Python's ConfigParser: no quoting or
    // escapes, and indented lines continue the previous value.
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    }
}

/// Parse the INI content of a credential file
///
/// Keys are case-insensitive. A repeated `[cloud "name"]` section continues
/// the first one and keeps its position.
pub fn parse_credentials(content: &str) -> Result<CredentialStore> {
    let ini = Ini::load_from_str_opt(content, parse_option())?;

    let mut default_cloud = None;
    let mut clouds: Vec<PartialCloud> = Vec::new();

    for (section, props) in ini.iter() {
        let Some(section) = section else {
            if let Some((key, _)) = props.iter().next() {
                return Err(ConfigError::SettingOutsideSection(key.to_string()));
            }
            continue;
        };
        let section = section.trim();

        if section == "global" {
            if let Some(value) = lookup(props, "default_cloud") {
                default_cloud = Some(value);
            }
            continue;
        }

        let Some(name) = cloud_name(section)? else {
            continue;
        };
        let idx = match clouds.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                clouds.push(PartialCloud {
                    name: name.to_string(),
                    ..Default::default()
                });
                clouds.len() - 1
            }
        };
        if let Some(url) = lookup(props, "url") {
            clouds[idx].url = Some(url);
        }
        if let Some(token) = lookup(props, "token") {
            clouds[idx].token = Some(token);
        }
    }

    let clouds = clouds
        .into_iter()
        .map(|c| {
            let url = c.url.ok_or_else(|| ConfigError::MissingField {
                cloud: c.name.clone(),
                field: "url",
            })?;
            let token = c.token.ok_or_else(|| ConfigError::MissingField {
                cloud: c.name.clone(),
                field: "token",
            })?;
            Ok(CloudCredentials {
                name: c.name,
                url,
                token,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CredentialStore {
        default_cloud,
        clouds,
    })
}

/// Name of a `cloud "name"` section, `None` for unrelated sections
fn cloud_name(section: &str) -> Result<Option<&str>> {
    let Some(rest) = section.strip_prefix("cloud") else {
        return Ok(None);
    };
    if !rest.starts_with(char::is_whitespace) {
        return Ok(None);
    }

    let name = rest.trim().trim_matches('"').trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidSection(section.to_string()));
    }
    Ok(Some(name))
}

/// Last value of `key`, matched case-insensitively, with continuation lines
/// joined by newlines
fn lookup(props: &Properties, key: &str) -> Option<String> {
    props
        .iter()
        .filter(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .last()
        .map(|(_, v)| {
            v.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
}
