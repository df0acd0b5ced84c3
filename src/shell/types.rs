//! Delivery of array CLI commands and the SSH settings they travel with.

use std::ffi::OsString;
use std::process::Command;

use crate::error::ArrayError;

use super::util::expand_tilde;

/// What the array CLI printed for one command.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CliReply {
    /// Exit status of the SSH session; `None` when it was killed.
    pub status: Option<i32>,
    /// Text the CLI wrote to stdout.
    pub stdout: String,
    /// Text the CLI or SSH wrote to stderr.
    pub stderr: String,
}

impl CliReply {
    /// Whether the session exited cleanly. The array CLI still reports
    /// many failures as text, so a clean exit is not a success on its own.
    #[must_use]
    pub const fn exited_cleanly(&self) -> bool {
        matches!(self.status, Some(0))
    }
}

/// Carries one quoted CLI command line to the array and back.
pub trait CliChannel {
    /// Sends `command` to the array described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::Spawn`] when the channel cannot be opened.
    fn send(&self, config: &ShellConfig, command: &str) -> Result<CliReply, ArrayError>;
}

/// Channel that runs the configured `ssh` client once per command.
#[derive(Clone, Copy, Debug, Default)]
pub struct SshChannel;

impl CliChannel for SshChannel {
    fn send(&self, config: &ShellConfig, command: &str) -> Result<CliReply, ArrayError> {
        let output = Command::new(&config.ssh_bin)
            .args(config.ssh_args(command))
            .output()
            .map_err(|err| ArrayError::Spawn {
                program: config.ssh_bin.clone(),
                message: err.to_string(),
            })?;

        Ok(CliReply {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// How to reach the array's CLI over SSH.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShellConfig {
    /// Path to the `ssh` executable.
    pub ssh_bin: String,
    /// Array host name or address.
    pub host: String,
    /// Array user.
    pub user: String,
    /// SSH port.
    pub port: u16,
    /// Private key; `~/` is expanded.
    pub identity_file: Option<String>,
    /// Pass `BatchMode=yes` so SSH never prompts.
    pub batch_mode: bool,
    /// Leave host key checking on.
    pub strict_host_key_checking: bool,
}

impl ShellConfig {
    /// Arguments for `ssh_bin` that run `command` on the array.
    #[must_use]
    pub fn ssh_args(&self, command: &str) -> Vec<OsString> {
        let mut args = vec![OsString::from("-p"), OsString::from(self.port.to_string())];
        if let Some(identity_file) = &self.identity_file {
            args.push(OsString::from("-i"));
            args.push(OsString::from(expand_tilde(identity_file)));
        }
        if self.batch_mode {
            args.push(OsString::from("-o"));
            args.push(OsString::from("BatchMode=yes"));
        }
        if !self.strict_host_key_checking {
            args.push(OsString::from("-o"));
            args.push(OsString::from("StrictHostKeyChecking=no"));
        }
        args.push(OsString::from(format!("{}@{}", self.user, self.host)));
        args.push(OsString::from(command));
        args
    }
}

/// Changes applied by `modify_schedule`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScheduleChanges {
    /// Rename the schedule.
    pub new_name: Option<String>,
    /// New recurrence, either a keyword such as `hourly` or a cron-style
    /// specification.
    pub recurrence: Option<String>,
}
