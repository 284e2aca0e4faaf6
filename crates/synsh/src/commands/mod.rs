pub mod clouds;
pub mod connect;
pub mod list;
pub mod show;

use synsh_cloud::{Resolution, ServerResolver, SshInfo};

/// Resolve a server name, turning the non-connectable outcomes into errors
pub async fn resolve_connectable(
    resolver: &ServerResolver<'_>,
    server: &str,
) -> anyhow::Result<SshInfo> {
    match resolver.resolve(server).await? {
        Resolution::Found(info) => Ok(info),
        Resolution::NoInterfaces {
            server_name,
            cloud_name,
        } => Err(anyhow::anyhow!(
            "Server '{}' on cloud '{}' has no network interfaces",
            server_name,
            cloud_name
        )),
        Resolution::NotFound => Err(anyhow::anyhow!("Server '{}' not found", server)),
    }
}
