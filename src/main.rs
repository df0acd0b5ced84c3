//! Binary entry point for the `vvctl` CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vvctl::options::{CreateVolumeOptions, SnapshotOptions};
use vvctl::{
    ArrayClient, ArrayConfig, ArrayError, ArrayShell, CliChannel, HttpTransport, Transport,
};

mod cli;

use cli::{
    Cli, QosCommand, RemoteCopyCommand, ScheduleCommand, SystemCommand, VolumeCommand,
    VolumeSetCommand,
};

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "VVCTL_LOG";

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Array(#[from] ArrayError),
    #[error("{0}")]
    Usage(String),
    #[error("failed to write output: {0}")]
    Output(String),
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config =
        ArrayConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    let mut stdout = io::stdout();

    if let Cli::Schedule(command) = cli {
        config
            .validate()
            .map_err(|err| CliError::Config(err.to_string()))?;
        let shell_config = config
            .shell_config()
            .map_err(|err| CliError::Config(err.to_string()))?;
        return run_schedule(&ArrayShell::over_ssh(shell_config), command);
    }

    let transport = HttpTransport::connect(&config).await?;
    let mut client = ArrayClient::new(transport);
    client
        .discover_capabilities(config.capability_overrides())
        .await?;
    let result = run_api(&client, cli, &mut stdout).await;
    if let Err(err) = client.transport_mut().logout().await {
        warn!(error = %err, "failed to close array session");
    }
    result
}

async fn run_api<T: Transport>(
    client: &ArrayClient<T>,
    cli: Cli,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match cli {
        Cli::System(SystemCommand::Info) => emit(out, &client.get_storage_system_info().await?),
        Cli::System(SystemCommand::Capabilities) => emit(out, client.capabilities()),
        Cli::Volume(command) => run_volume(client, command, out).await,
        Cli::Vvset(command) => run_volume_set(client, command, out).await,
        Cli::Qos(command) => run_qos(client, command, out).await,
        Cli::Rcopy(command) => run_remote_copy(client, command, out).await,
        Cli::Schedule(_) => Err(CliError::Usage(String::from(
            "schedule commands run over SSH, not the management API",
        ))),
    }
}

async fn run_volume<T: Transport>(
    client: &ArrayClient<T>,
    command: VolumeCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        VolumeCommand::List => emit(out, &client.get_volumes().await?),
        VolumeCommand::Show { name } => emit(out, &client.get_volume(&name).await?),
        VolumeCommand::Create {
            name,
            cpg,
            size_mib,
            tpvv,
            comment,
        } => {
            let options = CreateVolumeOptions {
                tpvv: tpvv.then_some(true),
                comment,
                ..CreateVolumeOptions::default()
            };
            client.create_volume(&name, &cpg, size_mib, options).await?;
            info!(volume = %name, "created volume");
            Ok(())
        }
        VolumeCommand::Delete { name } => {
            client.delete_volume(&name).await?;
            info!(volume = %name, "deleted volume");
            Ok(())
        }
        VolumeCommand::Grow { name, gib } => {
            client.grow_volume(&name, gib).await?;
            Ok(())
        }
        VolumeCommand::Snapshot {
            name,
            parent,
            read_only,
        } => {
            let options = SnapshotOptions {
                read_only: read_only.then_some(true),
                ..SnapshotOptions::default()
            };
            client.create_snapshot(&name, &parent, options).await?;
            Ok(())
        }
        VolumeCommand::Snapshots { name } => {
            emit(out, &client.get_volume_snapshots(&name).await?)
        }
    }
}

async fn run_volume_set<T: Transport>(
    client: &ArrayClient<T>,
    command: VolumeSetCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        VolumeSetCommand::List => emit(out, &client.get_volume_sets().await?),
        VolumeSetCommand::Show { name } => emit(out, &client.get_volume_set(&name).await?),
        VolumeSetCommand::Create {
            name,
            domain,
            comment,
            members,
        } => {
            client
                .create_volume_set(&name, domain.as_deref(), comment.as_deref(), &members)
                .await?;
            Ok(())
        }
        VolumeSetCommand::Delete { name } => {
            client.delete_volume_set(&name).await?;
            Ok(())
        }
        VolumeSetCommand::Add { set, volume } => {
            client.add_volume_to_volume_set(&set, &volume).await?;
            Ok(())
        }
        VolumeSetCommand::Remove { set, volume } => {
            client.remove_volume_from_volume_set(&set, &volume).await?;
            Ok(())
        }
    }
}

async fn run_qos<T: Transport>(
    client: &ArrayClient<T>,
    command: QosCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        QosCommand::Show { set } => emit(out, &client.query_qos_rule(&set).await?),
        QosCommand::Set {
            set,
            max_io,
            max_bw_mb,
        } => {
            client.set_qos_rule(&set, max_io, max_bw_mb).await?;
            Ok(())
        }
        QosCommand::Delete { set } => {
            client.delete_qos_rules(&set).await?;
            Ok(())
        }
    }
}

async fn run_remote_copy<T: Transport>(
    client: &ArrayClient<T>,
    command: RemoteCopyCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        RemoteCopyCommand::List => emit(out, &client.get_remote_copy_groups().await?),
        RemoteCopyCommand::Show { name } => {
            emit(out, &client.get_remote_copy_group(&name).await?)
        }
        RemoteCopyCommand::Start { name } => {
            client.start_remote_copy(&name).await?;
            Ok(())
        }
        RemoteCopyCommand::Stop { name } => {
            client.stop_remote_copy(&name).await?;
            Ok(())
        }
        RemoteCopyCommand::Sync { name } => {
            client.synchronize_remote_copy_group(&name).await?;
            Ok(())
        }
    }
}

fn run_schedule<C: CliChannel>(
    shell: &ArrayShell<C>,
    command: ScheduleCommand,
) -> Result<(), CliError> {
    match command {
        ScheduleCommand::Create {
            name,
            command,
            recurrence,
        } => shell.create_schedule(&name, &command, &recurrence)?,
        ScheduleCommand::Delete { name } => shell.delete_schedule(&name)?,
        ScheduleCommand::Suspend { name } => shell.suspend_schedule(&name)?,
        ScheduleCommand::Resume { name } => shell.resume_schedule(&name)?,
    }
    Ok(())
}

fn emit(out: &mut impl Write, value: &impl Serialize) -> Result<(), CliError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| CliError::Output(err.to_string()))?;
    writeln!(out, "{rendered}").map_err(|err| CliError::Output(err.to_string()))
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
