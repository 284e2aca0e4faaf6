//! ssh command derivation from resolved server information

use std::process::Command;
use synsh_cloud::SshInfo;

pub const SSH_PROGRAM: &str = "ssh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFamily {
    #[default]
    Ipv4,
    Ipv6,
}

#[derive(Debug, Clone, Default)]
pub struct SshOptions {
    /// Login user overriding the image's default user
    pub login: Option<String>,
    pub family: AddressFamily,
    /// Arguments appended after the host (ssh options or a remote command)
    pub extra_args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SshCommand {
    /// Shell-ready rendering of the command
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_escape)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace the current process with ssh
    #[cfg(unix)]
    pub fn exec(self) -> anyhow::Result<()> {
        use std::os::unix::process::CommandExt;

        tracing::debug!(command = %self.display(), "exec");
        let err = Command::new(&self.program).args(&self.args).exec();

        // exec() only returns on error
        anyhow::bail!("Failed to exec {}: {}", self.program, err)
    }

    #[cfg(not(unix))]
    pub fn exec(self) -> anyhow::Result<()> {
        tracing::debug!(command = %self.display(), "spawn");
        let status = Command::new(&self.program).args(&self.args).status()?;
        std::process::exit(status.code().unwrap_or(1));
    }
}

/// Split `user@server` into its login and server parts
pub fn split_login(target: &str) -> (Option<&str>, &str) {
    match target.split_once('@') {
        Some((user, server)) if !user.is_empty() => (Some(user), server),
        Some((_, server)) => (None, server),
        None => (None, target),
    }
}

/// Build the ssh invocation for a resolved server
///
/// A forwarding for port 22 takes precedence over direct addresses. Without
/// one, the preferred address family is tried first, then the other, then the
/// FQDN.
pub fn build_ssh_command(info: &SshInfo, opts: &SshOptions) -> anyhow::Result<SshCommand> {
    let address = match opts.family {
        AddressFamily::Ipv4 => info.ipv4.as_ref().or(info.ipv6.as_ref()),
        AddressFamily::Ipv6 => info.ipv6.as_ref().or(info.ipv4.as_ref()),
    };

    let mut args = Vec::new();

    let host = match &info.port_forwarding {
        Some(pf) => {
            args.push("-p".to_string());
            args.push(pf.port.clone());
            pf.host.as_ref().or(address).or(info.fqdn.as_ref())
        }
        None => address.or(info.fqdn.as_ref()),
    };
    let host = host.ok_or_else(|| {
        anyhow::anyhow!(
            "Server '{}' on cloud '{}' has no reachable address",
            info.server_name,
            info.cloud_name
        )
    })?;

    let user = opts.login.clone().or_else(|| default_user(info));
    if let Some(user) = user {
        args.push("-l".to_string());
        args.push(user);
    }

    args.push(host.clone());
    args.extend(opts.extra_args.iter().cloned());

    Ok(SshCommand {
        program: SSH_PROGRAM.to_string(),
        args,
    })
}

/// First user listed in the image metadata
fn default_user(info: &SshInfo) -> Option<String> {
    info.user
        .as_deref()
        .and_then(|users| users.split_whitespace().next())
        .map(str::to_string)
}

fn shell_escape(s: &str) -> String {
    let safe = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.:/@=%+,".contains(c));
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}
