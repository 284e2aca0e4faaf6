use crate::ssh::{self, AddressFamily, SshOptions};
use colored::Colorize;
use synsh_cloud::{CloudConnector, CloudRegistry, ServerResolver};

pub struct ConnectArgs {
    pub target: String,
    pub login: Option<String>,
    pub family: AddressFamily,
    pub dry_run: bool,
    pub ssh_args: Vec<String>,
}

pub async fn handle(
    registry: &CloudRegistry,
    connector: &dyn CloudConnector,
    cloud: Option<&str>,
    args: ConnectArgs,
) -> anyhow::Result<()> {
    let (login, server) = ssh::split_login(&args.target);
    let resolver = ServerResolver::new(registry, connector, cloud)?;
    let info = super::resolve_connectable(&resolver, server).await?;

    let options = SshOptions {
        login: args.login.or_else(|| login.map(str::to_string)),
        family: args.family,
        extra_args: args.ssh_args,
    };
    let command = ssh::build_ssh_command(&info, &options)?;

    if args.dry_run {
        println!("{}", command.display());
        return Ok(());
    }

    eprintln!(
        "{} {} ({})",
        "Connecting to".dimmed(),
        info.server_name.cyan(),
        info.cloud_name.dimmed()
    );
    command.exec()
}
