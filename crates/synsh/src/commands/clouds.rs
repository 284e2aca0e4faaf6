use colored::Colorize;
use synsh_cloud::CloudRegistry;
use synsh_cloud_synnefo::SynnefoConnector;

/// List configured clouds, optionally with their service endpoints
///
/// The `default_cloud` from the credential file is marked with `*`.
pub async fn handle(
    registry: &CloudRegistry,
    connector: &SynnefoConnector,
    cloud: Option<&str>,
    services: bool,
) -> anyhow::Result<()> {
    let entries = match cloud {
        Some(name) => vec![registry.get(name)?],
        None => registry.entries().collect(),
    };

    for entry in entries {
        let marker = if registry.is_default(&entry.name) { "*" } else { " " };
        println!(
            "{} {:<20} {}",
            marker.green(),
            entry.name.cyan(),
            entry.api_base_url.dimmed()
        );

        if services {
            let catalog = connector.catalog(entry).await?;
            for service in catalog.services() {
                let url = service
                    .endpoints
                    .first()
                    .map(|e| e.public_url.as_str())
                    .unwrap_or("-");
                println!("    {:<18} {:<24} {}", service.service_type, service.name.dimmed(), url);
            }
        }
    }

    Ok(())
}
