use colored::Colorize;
use synsh_cloud::{CloudConnector, CloudRegistry, ServerResolver, SshInfo};

pub async fn handle(
    registry: &CloudRegistry,
    connector: &dyn CloudConnector,
    cloud: Option<&str>,
    target: &str,
    json: bool,
) -> anyhow::Result<()> {
    let resolver = ServerResolver::new(registry, connector, cloud)?;
    let info = super::resolve_connectable(&resolver, target).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_info(&info);
    }
    Ok(())
}

fn print_info(info: &SshInfo) {
    let field = |value: Option<&str>| value.unwrap_or("-").to_string();
    let forward = info
        .port_forwarding
        .as_ref()
        .map(|pf| format!("{}:{}", pf.host.as_deref().unwrap_or("-"), pf.port))
        .unwrap_or_else(|| "-".to_string());

    println!("{:<8} {}", "server".bold(), info.server_name.cyan());
    println!("{:<8} {}", "cloud".bold(), info.cloud_name);
    println!("{:<8} {}", "user".bold(), field(info.user.as_deref()));
    println!("{:<8} {}", "fqdn".bold(), field(info.fqdn.as_deref()));
    println!("{:<8} {}", "ipv4".bold(), field(info.ipv4.as_deref()));
    println!("{:<8} {}", "ipv6".bold(), field(info.ipv6.as_deref()));
    println!("{:<8} {}", "ssh port".bold(), forward);
}
