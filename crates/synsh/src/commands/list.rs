use colored::Colorize;
use synsh_cloud::{CloudConnector, CloudRegistry, ServerLister, ServerListing};

pub async fn handle(
    registry: &CloudRegistry,
    connector: &dyn CloudConnector,
    cloud: Option<&str>,
) -> anyhow::Result<()> {
    let lister = ServerLister::new(registry, connector);
    let listing = lister.list(cloud).await?;
    print_listing(&listing);
    Ok(())
}

fn print_listing(listing: &ServerListing) {
    if listing.values().all(Vec::is_empty) {
        println!("{}", "No servers found".dimmed());
        return;
    }

    println!("{}", format!("{:<20} {:<40}", "CLOUD", "SERVER").bold());
    println!("{}", "─".repeat(60).dimmed());

    for (cloud, servers) in listing {
        for server in servers {
            println!("{:<20} {:<40}", cloud.cyan(), server);
        }
    }
}
