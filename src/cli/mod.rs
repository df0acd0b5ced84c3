//! Command-line interface definitions for the `vvctl` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::{Parser, Subcommand};

/// Top-level CLI for the `vvctl` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vvctl",
    about = "Manage volumes, volume sets, QoS and remote copy on a storage array",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Inspect the storage system.
    #[command(subcommand)]
    System(SystemCommand),
    /// Manage volumes and snapshots.
    #[command(subcommand)]
    Volume(VolumeCommand),
    /// Manage volume sets.
    #[command(subcommand)]
    Vvset(VolumeSetCommand),
    /// Manage QoS rules of volume sets.
    #[command(subcommand)]
    Qos(QosCommand),
    /// Manage remote-copy groups.
    #[command(subcommand)]
    Rcopy(RemoteCopyCommand),
    /// Manage array schedules over the CLI channel.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
}

/// `vvctl system` subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum SystemCommand {
    /// Print the array's identity and firmware version.
    Info,
    /// Print the capabilities derived from the firmware version.
    Capabilities,
}

/// `vvctl volume` subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum VolumeCommand {
    /// List every volume.
    List,
    /// Show one volume.
    Show {
        /// Volume name.
        name: String,
    },
    /// Create a volume.
    Create {
        /// Volume name.
        name: String,
        /// CPG providing user space.
        #[arg(long)]
        cpg: String,
        /// Size in MiB.
        #[arg(long, value_name = "MIB")]
        size_mib: u64,
        /// Create a thinly provisioned volume.
        #[arg(long)]
        tpvv: bool,
        /// Free-form comment.
        #[arg(long)]
        comment: Option<String>,
    },
    /// Delete a volume.
    Delete {
        /// Volume name.
        name: String,
    },
    /// Grow a volume by a number of GiB.
    Grow {
        /// Volume name.
        name: String,
        /// Growth in GiB.
        #[arg(value_name = "GIB")]
        gib: u64,
    },
    /// Take a snapshot of a volume.
    Snapshot {
        /// Snapshot name.
        name: String,
        /// Parent volume.
        #[arg(long)]
        parent: String,
        /// Create the snapshot read-only.
        #[arg(long)]
        read_only: bool,
    },
    /// List the snapshots of a volume.
    Snapshots {
        /// Parent volume.
        name: String,
    },
}

/// `vvctl vvset` subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum VolumeSetCommand {
    /// List every volume set.
    List,
    /// Show one volume set.
    Show {
        /// Set name.
        name: String,
    },
    /// Create a volume set.
    Create {
        /// Set name.
        name: String,
        /// Domain the set belongs to.
        #[arg(long)]
        domain: Option<String>,
        /// Free-form comment.
        #[arg(long)]
        comment: Option<String>,
        /// Initial members.
        #[arg(long = "member", value_name = "VOLUME")]
        members: Vec<String>,
    },
    /// Delete a volume set.
    Delete {
        /// Set name.
        name: String,
    },
    /// Add a volume to a set.
    Add {
        /// Set name.
        set: String,
        /// Volume name.
        volume: String,
    },
    /// Remove a volume from a set.
    Remove {
        /// Set name.
        set: String,
        /// Volume name.
        volume: String,
    },
}

/// `vvctl qos` subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum QosCommand {
    /// Show the QoS rule of a set.
    Show {
        /// Set name.
        set: String,
    },
    /// Set IOPS and bandwidth limits, creating the rule when missing.
    Set {
        /// Set name.
        set: String,
        /// IOPS ceiling.
        #[arg(long, value_name = "IOPS")]
        max_io: Option<u64>,
        /// Bandwidth ceiling in MB/s.
        #[arg(long, value_name = "MB")]
        max_bw_mb: Option<u64>,
    },
    /// Delete the QoS rule of a set.
    Delete {
        /// Set name.
        set: String,
    },
}

/// `vvctl rcopy` subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum RemoteCopyCommand {
    /// List every remote-copy group.
    List,
    /// Show one remote-copy group.
    Show {
        /// Group name.
        name: String,
    },
    /// Start replication.
    Start {
        /// Group name.
        name: String,
    },
    /// Stop replication.
    Stop {
        /// Group name.
        name: String,
    },
    /// Resynchronise a started group.
    Sync {
        /// Group name.
        name: String,
    },
}

/// `vvctl schedule` subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum ScheduleCommand {
    /// Create a schedule running an array CLI command.
    Create {
        /// Schedule name.
        name: String,
        /// Array CLI command to run.
        #[arg(long)]
        command: String,
        /// Cron-style recurrence, for example `"0 * * * *"`.
        #[arg(long)]
        recurrence: String,
    },
    /// Delete a schedule.
    Delete {
        /// Schedule name.
        name: String,
    },
    /// Suspend a schedule.
    Suspend {
        /// Schedule name.
        name: String,
    },
    /// Resume a suspended schedule.
    Resume {
        /// Schedule name.
        name: String,
    },
}
