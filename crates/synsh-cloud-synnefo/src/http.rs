//! Token-authenticated JSON requests shared by the service clients

use crate::error::{Result, SynnefoError};
use secrecy::{ExposeSecret, SecretString};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

const AUTH_HEADER: &str = "X-Auth-Token";

pub(crate) struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl ApiClient {
    pub(crate) fn new(client: reqwest::Client, base_url: &str, token: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: SecretString::from(token.to_string()),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .header(AUTH_HEADER, self.token.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        decode(url, response).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        decode(url, response).await
    }

    pub(crate) fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

async fn decode<T: DeserializeOwned>(url: String, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %url, status = status.as_u16(), "Request failed");
        return Err(SynnefoError::Status {
            status: status.as_u16(),
            url,
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Synnefo returns numeric ids for some resources and strings for others
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}
