//! Array CLI channel.
//!
//! A handful of array actions have no management API endpoint: remote-copy
//! link and target administration, schedules, and stopping an online
//! physical copy. [`ArrayShell`] sends the corresponding array CLI commands
//! through a [`CliChannel`], SSH in production, and maps their textual output
//! onto [`ArrayError`].

mod types;
mod util;

use tracing::debug;

use crate::error::{ArrayError, Fault};
use crate::model::ReplicationMode;

pub use types::{CliChannel, CliReply, ScheduleChanges, ShellConfig, SshChannel};
pub use util::expand_tilde;

use util::quote_command;

/// Runs array CLI commands through a [`CliChannel`].
#[derive(Clone, Debug)]
pub struct ArrayShell<C: CliChannel> {
    config: ShellConfig,
    channel: C,
}

impl ArrayShell<SshChannel> {
    /// Shell that reaches the array with the system `ssh` client.
    #[must_use]
    pub const fn over_ssh(config: ShellConfig) -> Self {
        Self::new(config, SshChannel)
    }
}

impl<C: CliChannel> ArrayShell<C> {
    /// Creates a shell sending commands through `channel`.
    #[must_use]
    pub const fn new(config: ShellConfig, channel: C) -> Self {
        Self { config, channel }
    }

    /// Returns a reference to the SSH settings.
    #[must_use]
    pub const fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Runs one CLI command and returns its non-empty stdout lines.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Conflict` or `BadRequest` when the output says
    /// so, and [`ArrayError::CommandFailure`] for any other unsuccessful
    /// exit.
    pub fn run_command(&self, words: &[&str]) -> Result<Vec<String>, ArrayError> {
        let command = quote_command(words);
        debug!(host = %self.config.host, %command, "array CLI");
        let reply = self.channel.send(&self.config, &command)?;
        classify_reply(words.first().copied().unwrap_or_default(), &reply)
    }

    /// Admits a remote-copy link from `source_port` to `target_port`.
    ///
    /// # Errors
    ///
    /// See [`ArrayShell::run_command`].
    pub fn admit_remote_copy_links(
        &self,
        target: &str,
        source_port: &str,
        target_port: &str,
    ) -> Result<Vec<String>, ArrayError> {
        let link = format!("{source_port}:{target_port}");
        self.run_command(&["admitrcopylink", target, &link])
    }

    /// Dismisses a remote-copy link.
    ///
    /// # Errors
    ///
    /// See [`ArrayShell::run_command`].
    pub fn dismiss_remote_copy_links(
        &self,
        target: &str,
        source_port: &str,
        target_port: &str,
    ) -> Result<Vec<String>, ArrayError> {
        let link = format!("{source_port}:{target_port}");
        self.run_command(&["dismissrcopylink", target, &link])
    }

    /// Starts the remote-copy service.
    ///
    /// # Errors
    ///
    /// See [`ArrayShell::run_command`].
    pub fn start_rcopy(&self) -> Result<Vec<String>, ArrayError> {
        self.run_command(&["startrcopy"])
    }

    /// Adds `target` to `group`, optionally pairing local and remote volumes.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` for a mode the CLI cannot express.
    pub fn admit_remote_copy_target(
        &self,
        target: &str,
        mode: ReplicationMode,
        group: &str,
        pairs: &[(&str, &str)],
    ) -> Result<Vec<String>, ArrayError> {
        let mode_word = cli_mode(mode)?;
        let pair_words: Vec<String> = pairs
            .iter()
            .map(|(local, remote)| format!("{local}:{remote}"))
            .collect();
        let mut words = vec!["admitrcopytarget", target, mode_word, group];
        words.extend(pair_words.iter().map(String::as_str));
        self.run_command(&words)
    }

    /// Removes `target` from `group`.
    ///
    /// # Errors
    ///
    /// See [`ArrayShell::run_command`].
    pub fn dismiss_remote_copy_target(
        &self,
        target: &str,
        group: &str,
    ) -> Result<Vec<String>, ArrayError> {
        self.run_command(&["dismissrcopytarget", "-f", target, group])
    }

    /// Schedules `command` to run on `recurrence`.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` when a schedule of that name exists.
    pub fn create_schedule(
        &self,
        name: &str,
        command: &str,
        recurrence: &str,
    ) -> Result<(), ArrayError> {
        require_non_empty("schedule name", name)?;
        require_non_empty("schedule command", command)?;
        self.run_command(&["createsched", command, recurrence, name])?;
        Ok(())
    }

    /// Deletes a schedule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing schedule.
    pub fn delete_schedule(&self, name: &str) -> Result<(), ArrayError> {
        self.run_command(&["removesched", "-f", name])?;
        Ok(())
    }

    /// Renames a schedule or changes its recurrence. A rename is applied
    /// first, so the recurrence change targets the new name.
    ///
    /// # Errors
    ///
    /// Returns a client-side `BadRequest` when `changes` is empty.
    pub fn modify_schedule(&self, name: &str, changes: &ScheduleChanges) -> Result<(), ArrayError> {
        if changes == &ScheduleChanges::default() {
            return Err(ArrayError::bad_request("no schedule changes supplied"));
        }
        let mut current = name;
        if let Some(new_name) = changes.new_name.as_deref() {
            require_non_empty("schedule name", new_name)?;
            self.run_command(&["setsched", "-name", new_name, name])?;
            current = new_name;
        }
        if let Some(recurrence) = changes.recurrence.as_deref() {
            self.run_command(&["setsched", "-s", recurrence, current])?;
        }
        Ok(())
    }

    /// Suspends a schedule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing schedule.
    pub fn suspend_schedule(&self, name: &str) -> Result<(), ArrayError> {
        self.run_command(&["setsched", "-suspend", name])?;
        Ok(())
    }

    /// Resumes a suspended schedule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing schedule.
    pub fn resume_schedule(&self, name: &str) -> Result<(), ArrayError> {
        self.run_command(&["setsched", "-resume", name])?;
        Ok(())
    }

    /// Stops an online physical copy and removes the partial destination.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `volume` does not exist.
    pub fn stop_online_physical_copy(&self, volume: &str) -> Result<(), ArrayError> {
        self.run_command(&["stopvvcopy", volume])?;
        self.run_command(&["removevv", "-f", volume])?;
        Ok(())
    }

}

fn cli_mode(mode: ReplicationMode) -> Result<&'static str, ArrayError> {
    match mode {
        ReplicationMode::Sync => Ok("sync"),
        ReplicationMode::Periodic => Ok("periodic"),
        ReplicationMode::Async => Ok("async"),
        ReplicationMode::Other(code) => Err(ArrayError::bad_request(format!(
            "replication mode {code} has no CLI name"
        ))),
    }
}

fn require_non_empty(what: &str, value: &str) -> Result<(), ArrayError> {
    if value.trim().is_empty() {
        return Err(ArrayError::bad_request(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Maps a CLI reply onto the error taxonomy.
///
/// The array CLI reports most failures as text with a zero exit status, so
/// every line of both streams is inspected before the exit status.
fn classify_reply(verb: &str, reply: &CliReply) -> Result<Vec<String>, ArrayError> {
    let all_lines = reply.stdout.lines().chain(reply.stderr.lines());
    for line in all_lines.map(str::trim).filter(|line| !line.is_empty()) {
        let lower = line.to_ascii_lowercase();
        if lower.contains("does not exist") || lower.contains("not found") {
            return Err(ArrayError::NotFound(Fault::array(None, line)));
        }
        if lower.contains("already exists") {
            return Err(ArrayError::Conflict(Fault::array(None, line)));
        }
        if line.starts_with("Error") {
            return Err(ArrayError::BadRequest(Fault::array(None, line)));
        }
    }

    if !reply.exited_cleanly() {
        return Err(ArrayError::CommandFailure {
            program: verb.to_owned(),
            status: reply.status,
            status_text: reply
                .status
                .map_or_else(|| String::from("terminated by signal"), |code| code.to_string()),
            stderr: reply.stderr.trim().to_owned(),
        });
    }

    Ok(reply
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}
