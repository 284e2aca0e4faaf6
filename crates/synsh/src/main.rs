mod commands;
mod ssh;

use clap::{Parser, Subcommand};
use commands::connect::ConnectArgs;
use ssh::AddressFamily;
use synsh_cloud::CloudRegistry;
use synsh_cloud_synnefo::SynnefoConnector;

#[derive(Parser)]
#[command(name = "synsh")]
#[command(about = "Easy SSH to Synnefo virtual servers", long_about = None)]
struct Cli {
    /// Restrict every lookup to a single cloud
    #[arg(short, long, global = true, env = "SYNSH_CLOUD")]
    cloud: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an SSH session to a server
    Connect {
        /// [user@]server[.cloud]
        target: String,
        /// Login user (overrides user@ and the image's default user)
        #[arg(short, long)]
        login: Option<String>,
        /// Prefer IPv4 addresses (default)
        #[arg(short = '4', conflicts_with = "ipv6")]
        ipv4: bool,
        /// Prefer IPv6 addresses
        #[arg(short = '6')]
        ipv6: bool,
        /// Print the ssh command instead of running it
        #[arg(long)]
        dry_run: bool,
        /// Arguments passed to ssh after the host (after --)
        #[arg(last = true)]
        ssh_args: Vec<String>,
    },
    /// List servers per cloud
    List,
    /// Show connection details of a server
    Show {
        /// server[.cloud]
        target: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List configured clouds
    Clouds {
        /// Also show each cloud's service endpoints
        #[arg(long)]
        services: bool,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    // version works without a credentials file
    if matches!(cli.command, Commands::Version) {
        println!("synsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let registry = CloudRegistry::load()?;
    let connector = SynnefoConnector::new();
    let cloud = cli.cloud.as_deref();

    tracing::debug!(clouds = registry.len(), "Loaded cloud registry");

    match cli.command {
        Commands::Connect {
            target,
            login,
            ipv4: _,
            ipv6,
            dry_run,
            ssh_args,
        } => {
            let family = if ipv6 {
                AddressFamily::Ipv6
            } else {
                AddressFamily::Ipv4
            };
            let args = ConnectArgs {
                target,
                login,
                family,
                dry_run,
                ssh_args,
            };
            commands::connect::handle(&registry, &connector, cloud, args).await?;
        }
        Commands::List => {
            commands::list::handle(&registry, &connector, cloud).await?;
        }
        Commands::Show { target, json } => {
            commands::show::handle(&registry, &connector, cloud, &target, json).await?;
        }
        Commands::Clouds { services } => {
            commands::clouds::handle(&registry, &connector, cloud, services).await?;
        }
        Commands::Version => {}
    }

    Ok(())
}
