//! Configuration loading via `ortho-config`.

use std::time::Duration;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::capabilities::CapabilityOverrides;
use crate::shell::{ShellConfig, expand_tilde};

/// Connection settings for a single array, merged from defaults,
/// configuration files, environment variables and CLI flags.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "VVCTL",
    discovery(
        app_name = "vvctl",
        env_var = "VVCTL_CONFIG_PATH",
        config_file_name = "vvctl.toml",
        dotfile_name = ".vvctl.toml",
        project_file_name = "vvctl.toml"
    )
)]
pub struct ArrayConfig {
    /// Management API root, for example `https://array:8080/api/v1`.
    pub api_url: String,
    /// Array user name used for the session and for CLI access.
    pub username: String,
    /// Inline password. Mutually exclusive with `password_file`.
    pub password: Option<String>,
    /// File holding the password; surrounding whitespace is trimmed.
    /// Supports `~/` expansion.
    pub password_file: Option<String>,
    /// Whether to verify the array's TLS certificate. Arrays commonly ship
    /// self-signed certificates, so this can be switched off.
    #[ortho_config(default = true)]
    pub verify_tls: bool,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 30)]
    pub timeout_secs: u64,
    /// Host for array CLI access; defaults to the API host.
    pub ssh_host: Option<String>,
    /// User for array CLI access; defaults to `username`.
    pub ssh_user: Option<String>,
    /// Port for array CLI access.
    #[ortho_config(default = 22)]
    pub ssh_port: u16,
    /// Path to the `ssh` executable.
    #[ortho_config(default = "ssh".to_owned())]
    pub ssh_bin: String,
    /// Private key used for array CLI access. Supports `~/` expansion.
    pub ssh_identity_file: Option<String>,
    /// Whether to force batch mode for SSH to avoid password prompts.
    #[ortho_config(default = true)]
    pub ssh_batch_mode: bool,
    /// Whether to enforce host key checking.
    #[ortho_config(default = true)]
    pub ssh_strict_host_key_checking: bool,
    /// Forces primera-style validation instead of discovering it.
    pub primera: Option<bool>,
    /// Forces the compression capability instead of discovering it.
    pub compression: Option<bool>,
    /// Forces merlin-style validation instead of discovering it.
    pub merlin: Option<bool>,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }

    fn missing(&self) -> ConfigError {
        ConfigError::MissingField(format!(
            "missing {}: set {} or add {} to vvctl.toml",
            self.description, self.env_var, self.toml_key
        ))
    }
}

impl ArrayConfig {
    fn require_field(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(metadata.missing());
        }
        Ok(())
    }

    fn require_optional(value: Option<&str>, metadata: &FieldMetadata) -> Result<(), ConfigError> {
        match value {
            None => Ok(()),
            Some(inner) => Self::require_field(inner, metadata),
        }
    }

    /// Loads configuration using the `ortho-config` derive. Values merge
    /// defaults, configuration files, environment variables, and CLI flags in
    /// that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the loader fails to merge sources.
    pub fn load_from_sources() -> Result<Self, ConfigError> {
        Self::load().map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads configuration without attempting to parse CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("vvctl")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation. Error messages name the environment
    /// variable and TOML key that supply the missing value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when a required field is empty,
    /// [`ConfigError::InvalidUrl`] when the API URL has no host, and
    /// [`ConfigError::Conflict`] when both password sources are set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_field(
            &self.api_url,
            &FieldMetadata::new("array API URL", "VVCTL_API_URL", "api_url"),
        )?;
        Self::require_field(
            &self.username,
            &FieldMetadata::new("array user name", "VVCTL_USERNAME", "username"),
        )?;
        Self::require_field(
            &self.ssh_bin,
            &FieldMetadata::new("ssh executable", "VVCTL_SSH_BIN", "ssh_bin"),
        )?;
        Self::require_optional(
            self.ssh_identity_file.as_deref(),
            &FieldMetadata::new(
                "ssh identity file",
                "VVCTL_SSH_IDENTITY_FILE",
                "ssh_identity_file",
            ),
        )?;
        match (&self.password, &self.password_file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Conflict(String::from(
                    "set only one of VVCTL_PASSWORD and VVCTL_PASSWORD_FILE",
                )));
            }
            (None, None) => {
                return Err(
                    FieldMetadata::new("array password", "VVCTL_PASSWORD", "password").missing(),
                );
            }
            _ => {}
        }
        self.api_host().map(|_| ())
    }

    /// Returns the host portion of `api_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when the URL does not parse or has
    /// no host.
    pub fn api_host(&self) -> Result<String, ConfigError> {
        let url = reqwest::Url::parse(self.api_url.trim())
            .map_err(|err| ConfigError::InvalidUrl(format!("{}: {err}", self.api_url)))?;
        url.host_str()
            .map(str::to_owned)
            .ok_or_else(|| ConfigError::InvalidUrl(format!("{}: missing host", self.api_url)))
    }

    /// Resolves the password from the inline value or the password file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PasswordFile`] when the file cannot be read or
    /// is empty, and [`ConfigError::MissingField`] when no source is set.
    pub fn resolve_password(&self) -> Result<String, ConfigError> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        let Some(path) = self.password_file.as_deref() else {
            return Err(FieldMetadata::new("array password", "VVCTL_PASSWORD", "password").missing());
        };
        let expanded = expand_tilde(path);
        let content =
            read_to_string_ambient(&expanded).map_err(|message| ConfigError::PasswordFile {
                path: path.to_owned(),
                message,
            })?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::PasswordFile {
                path: path.to_owned(),
                message: String::from("password file is empty"),
            });
        }
        Ok(trimmed.to_owned())
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Capability values forced through configuration.
    #[must_use]
    pub const fn capability_overrides(&self) -> CapabilityOverrides {
        CapabilityOverrides {
            primera: self.primera,
            compression: self.compression,
            merlin: self.merlin,
        }
    }

    /// Builds the settings used to run array CLI commands over SSH.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when no SSH host is configured and
    /// none can be derived from `api_url`.
    pub fn shell_config(&self) -> Result<ShellConfig, ConfigError> {
        let host = match &self.ssh_host {
            Some(host) if !host.trim().is_empty() => host.trim().to_owned(),
            _ => self.api_host()?,
        };
        Ok(ShellConfig {
            ssh_bin: self.ssh_bin.clone(),
            host,
            user: self
                .ssh_user
                .clone()
                .unwrap_or_else(|| self.username.clone()),
            port: self.ssh_port,
            identity_file: self.ssh_identity_file.clone(),
            batch_mode: self.ssh_batch_mode,
            strict_host_key_checking: self.ssh_strict_host_key_checking,
        })
    }
}

fn read_to_string_ambient(path: &str) -> Result<String, String> {
    let path_buf = Utf8Path::new(path);

    let (dir_path, file_path) = if path_buf.is_absolute() {
        let parent = path_buf
            .parent()
            .ok_or_else(|| format!("path has no parent directory: {path_buf}"))?;
        let file_name = path_buf
            .file_name()
            .ok_or_else(|| format!("path has no file name: {path_buf}"))?;
        (parent, Utf8Path::new(file_name))
    } else {
        (Utf8Path::new("."), path_buf)
    };

    let dir =
        Dir::open_ambient_dir(dir_path, ambient_authority()).map_err(|err| err.to_string())?;
    dir.read_to_string(file_path).map_err(|err| err.to_string())
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
    /// The API URL is malformed.
    #[error("invalid API URL {0}")]
    InvalidUrl(String),
    /// Two settings that exclude each other were both supplied.
    #[error("conflicting configuration: {0}")]
    Conflict(String),
    /// The password file could not be used.
    #[error("failed to read password file {path}: {message}")]
    PasswordFile {
        /// Path as configured.
        path: String,
        /// Reason the file was rejected.
        message: String,
    },
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
