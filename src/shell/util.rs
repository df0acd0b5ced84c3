//! Path and quoting helpers for SSH invocations.

use std::borrow::Cow;

/// Expands a leading `~/` prefix to the user's home directory.
///
/// Without `HOME` the path is returned unchanged.
///
/// # Examples
///
/// ```
/// # use vvctl::shell::expand_tilde;
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return format!("{}/{rest}", home.to_string_lossy());
    }
    path.to_owned()
}

/// Joins CLI words into one remote command line, quoting each word for the
/// array's shell.
pub(crate) fn quote_command(words: &[&str]) -> String {
    words
        .iter()
        .map(|word| shell_escape::unix::escape(Cow::Borrowed(*word)).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
