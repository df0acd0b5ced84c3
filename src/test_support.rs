//! Test support utilities shared across unit and integration tests.

use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::env;
use std::ffi::OsString;
use std::rc::Rc;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use serde_json::{Value, json};
use tokio::sync::{Mutex, MutexGuard};

use crate::error::ArrayError;
use crate::shell::{CliChannel, CliReply, ShellConfig};
use crate::transport::{ApiRequest, ApiResponse, Transport, TransportFuture};

#[derive(Debug, Default)]
struct TransportScript {
    responses: VecDeque<ApiResponse>,
    requests: Vec<ApiRequest>,
}

/// Scripted transport that answers requests from a FIFO queue and records
/// every request it receives.
///
/// Clones share the same script, so a test can keep one handle while the
/// client owns another.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    script: Arc<StdMutex<TransportScript>>,
}

impl ScriptedTransport {
    /// Creates a transport with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_script<T>(&self, action: impl FnOnce(&mut TransportScript) -> T) -> T {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        action(&mut script)
    }

    /// Queues a response.
    pub fn push_response(&self, response: ApiResponse) {
        self.with_script(|script| script.responses.push_back(response));
    }

    /// Queues a response with a JSON body.
    pub fn push_json(&self, status: u16, body: Value) {
        self.push_response(ApiResponse::new(status, Some(body)));
    }

    /// Queues a response without a body.
    pub fn push_empty(&self, status: u16) {
        self.push_response(ApiResponse::new(status, None));
    }

    /// Queues an error response carrying an array fault body.
    pub fn push_fault(&self, status: u16, code: u32, description: &str) {
        self.push_json(status, json!({"code": code, "desc": description}));
    }

    /// Returns every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.with_script(|script| script.requests.clone())
    }

    /// Returns the most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.with_script(|script| script.requests.last().cloned())
    }

    /// Number of responses still queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.with_script(|script| script.responses.len())
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
        let next = self.with_script(|script| {
            let description = format!("{} {}", request.method, request.path);
            script.requests.push(request);
            script
                .responses
                .pop_front()
                .ok_or_else(|| ArrayError::Transport {
                    message: format!("no scripted response for {description}"),
                })
        });
        Box::pin(async move { next })
    }
}

/// Scripted CLI channel that returns pre-seeded replies in FIFO order.
///
/// Used to drive deterministic array CLI outcomes without spawning `ssh`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedChannel {
    replies: Rc<RefCell<VecDeque<CliReply>>>,
    sent: Rc<RefCell<Vec<SentCommand>>>,
}

/// One command line delivered through [`ScriptedChannel`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentCommand {
    /// Host the command was addressed to.
    pub host: String,
    /// Quoted CLI command line.
    pub command: String,
}

impl ScriptedChannel {
    /// Creates a channel with no queued replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every command sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<SentCommand> {
        self.sent.borrow().clone()
    }

    /// Command lines sent so far, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .map(|sent| sent.command.clone())
            .collect()
    }

    /// Queues a clean exit with no output.
    pub fn push_success(&self) {
        self.push_reply(Some(0), "", "");
    }

    /// Queues a failing exit status with stderr text.
    pub fn push_failure(&self, status: i32) {
        self.push_reply(Some(status), "", "simulated failure");
    }

    /// Queues an explicit reply.
    pub fn push_reply(
        &self,
        status: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) {
        self.replies.borrow_mut().push_back(CliReply {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        });
    }
}

impl CliChannel for ScriptedChannel {
    fn send(&self, config: &ShellConfig, command: &str) -> Result<CliReply, ArrayError> {
        self.sent.borrow_mut().push(SentCommand {
            host: config.host.clone(),
            command: command.to_owned(),
        });
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ArrayError::Spawn {
                program: config.ssh_bin.clone(),
                message: String::from("no scripted reply available"),
            })
    }
}

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: Mutex<()> = Mutex::const_new(());

/// Guard that holds the env mutex and cleans up variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets multiple environment variables while holding a global mutex.
    pub async fn set_vars(pairs: &[(&str, &str)]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                pairs.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard::set_vars"
        );

        let guard = ENV_LOCK.lock().await;
        let mut previous = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe { env::set_var(key, value) };
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }

    /// Removes variables for the lifetime of the guard, restoring them on
    /// drop.
    pub async fn remove_vars(keys: &[&str]) -> Self {
        let guard = ENV_LOCK.lock().await;
        let mut previous = Vec::with_capacity(keys.len());
        for key in keys {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe { env::remove_var(key) };
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

/// A volume body as the array returns it.
#[must_use]
pub fn volume_json(name: &str, size_mib: u64) -> Value {
    json!({"name": name, "id": 1, "sizeMiB": size_mib, "provisioningType": 2, "tpvv": true})
}

/// A snapshot body whose `copyOf` names `parent`.
#[must_use]
pub fn snapshot_json(name: &str, parent: &str) -> Value {
    json!({"name": name, "copyOf": parent, "provisioningType": 3, "sizeMiB": 0})
}

/// A collection body wrapping `members`.
#[must_use]
pub fn collection_json(members: &[Value]) -> Value {
    json!({"total": members.len(), "members": members})
}
