//! Uniform request interface between operations and the array endpoint.
//!
//! Operations build an [`ApiRequest`], hand it to a [`Transport`] and turn
//! the resulting [`ApiResponse`] into either a decoded value or an
//! [`ArrayError`]. The transport owns authentication, TLS and connection
//! reuse; operations never see them.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ArrayError;

/// Boxed future returned by [`Transport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ApiResponse, ArrayError>> + Send + 'a>>;

/// HTTP method used by the management API.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single call against the management API.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API root, including any query string.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// `GET` without a body.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// `POST` with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// `PUT` with a JSON body.
    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    /// `DELETE` without a body.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Status and decoded body returned by the array.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded JSON body; `None` when the response was empty.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Builds a response.
    #[must_use]
    pub const fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the body on success, or the classified error otherwise.
    ///
    /// # Errors
    ///
    /// Returns the [`ArrayError`] matching the response status.
    pub fn into_result(self) -> Result<Option<Value>, ArrayError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ArrayError::from_status(self.status, self.body.as_ref()))
        }
    }
}

/// Decodes a successful response body.
///
/// # Errors
///
/// Returns [`ArrayError::Decode`] when the body is missing or does not match
/// `T`.
pub fn decode_body<T: DeserializeOwned>(body: Option<Value>, context: &str) -> Result<T, ArrayError> {
    let value = body.ok_or_else(|| ArrayError::Decode {
        context: context.to_owned(),
        message: String::from("response body was empty"),
    })?;
    serde_json::from_value(value).map_err(|err| ArrayError::Decode {
        context: context.to_owned(),
        message: err.to_string(),
    })
}

/// Delivers requests to the array.
///
/// Implementations must be shareable across tasks; operations only ever hold
/// a shared reference.
pub trait Transport: Send + Sync {
    /// Sends `request` and resolves to the array's response.
    ///
    /// Non-success statuses are returned as responses, not errors. Errors
    /// are reserved for failures to deliver the request or read the reply.
    fn send(&self, request: ApiRequest) -> TransportFuture<'_>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: ApiRequest) -> TransportFuture<'_> {
        (**self).send(request)
    }
}
