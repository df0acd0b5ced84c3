//! `reqwest`-backed [`Transport`] with WSAPI session handling.

use reqwest::header::{ACCEPT, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::config::ArrayConfig;
use crate::error::ArrayError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportFuture};

/// Header carrying the session key on every authenticated request.
pub const SESSION_HEADER: &str = "X-HP3PAR-WSAPI-SessionKey";

#[derive(Deserialize)]
struct SessionResponse {
    key: String,
}

/// HTTP transport talking to the array's management endpoint.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    session_key: Option<String>,
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

impl HttpTransport {
    /// Builds an unauthenticated transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::Config`] when validation fails and
    /// [`ArrayError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: &ArrayConfig) -> Result<Self, ArrayError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|err| ArrayError::Transport {
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: config.api_url.trim().trim_end_matches('/').to_owned(),
            session_key: None,
        })
    }

    /// Builds a transport and opens a session with the configured
    /// credentials.
    ///
    /// # Errors
    ///
    /// Returns the configuration or login failure.
    pub async fn connect(config: &ArrayConfig) -> Result<Self, ArrayError> {
        let mut transport = Self::new(config)?;
        let password = config.resolve_password()?;
        transport.login(&config.username, &password).await?;
        Ok(transport)
    }

    /// Returns `true` once a session key is held.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session_key.is_some()
    }

    /// Opens a session and stores the returned key.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::Unauthorized`] for rejected credentials, or the
    /// transport/decode failure.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ArrayError> {
        let request = ApiRequest::post(
            "/credentials",
            json!({"user": username, "password": password}),
        );
        let body = self.dispatch(request).await?.into_result()?;
        let session: SessionResponse = crate::transport::decode_body(body, "login")?;
        self.session_key = Some(session.key);
        info!(user = username, "opened array session");
        Ok(())
    }

    /// Closes the current session. Does nothing when no session is open.
    ///
    /// # Errors
    ///
    /// Returns the array's error when it refuses to close the session.
    pub async fn logout(&mut self) -> Result<(), ArrayError> {
        let Some(key) = self.session_key.clone() else {
            return Ok(());
        };
        let path = format!("/credentials/{}", urlencoding::encode(&key));
        self.dispatch(ApiRequest::delete(path)).await?.into_result()?;
        self.session_key = None;
        debug!("closed array session");
        Ok(())
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ArrayError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.session_key {
            builder = builder.header(SESSION_HEADER, key);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, path = %request.path, "sending array request");
        let response = builder.send().await.map_err(|err| ArrayError::Transport {
            message: err.to_string(),
        })?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(|err| ArrayError::Transport {
            message: err.to_string(),
        })?;
        debug!(status, path = %request.path, "array responded");

        let body = parse_body(status, &bytes, &request.path)?;
        Ok(ApiResponse::new(status, body))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
        Box::pin(self.dispatch(request))
    }
}

/// Error bodies that are not JSON are dropped so the status still maps to
/// the right error; success bodies must decode.
fn parse_body(status: u16, bytes: &[u8], path: &str) -> Result<Option<Value>, ArrayError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(Some(value)),
        Err(_) if !(200..300).contains(&status) => Ok(None),
        Err(err) => Err(ArrayError::Decode {
            context: path.to_owned(),
            message: err.to_string(),
        }),
    }
}
