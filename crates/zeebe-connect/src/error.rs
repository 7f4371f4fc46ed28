//! Error types for the zeebe-connect crate

use crate::endpoint::EndpointKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tonic::Code;

/// Failure to build a client from an endpoint descriptor
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Invalid endpoint address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("OAuth client setup failed: {0}")]
    OAuthClient(String),
}

/// Raw fault reported by the gateway SDK.
///
/// Mirrors what the transport gives us: an optional numeric gRPC status
/// code, an optional human readable message and optional details.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", self.message.as_deref().unwrap_or("unknown gateway error"))]
pub struct GatewayError {
    pub code: Option<i32>,
    pub message: Option<String>,
    pub details: Option<String>,
}

impl GatewayError {
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        Self {
            code: Some(code as i32),
            message: Some(message.into()),
            details: None,
        }
    }

    /// A fault without a status code, e.g. from the OAuth token endpoint
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
            details: None,
        }
    }

    pub fn grpc_code(&self) -> Option<Code> {
        self.code.map(Code::from_i32)
    }
}

impl From<tonic::Status> for GatewayError {
    fn from(status: tonic::Status) -> Self {
        let message = status.message();
        let details = status.details();

        Self {
            code: Some(status.code() as i32),
            message: (!message.is_empty()).then(|| message.to_string()),
            details: (!details.is_empty()).then(|| String::from_utf8_lossy(details).into_owned()),
        }
    }
}

impl From<ConnectError> for GatewayError {
    fn from(err: ConnectError) -> Self {
        GatewayError::from_message(error_chain(&err))
    }
}

/// Render an error together with all of its sources, `outer: inner: root`
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }

    message
}

/// Failure payload of deploy and run: only `message`, `code` and `details`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&GatewayError> for SerializedError {
    fn from(err: &GatewayError) -> Self {
        Self {
            message: err.message.clone(),
            code: err.code,
            details: err.details.clone(),
        }
    }
}

impl From<GatewayError> for SerializedError {
    fn from(err: GatewayError) -> Self {
        Self {
            message: err.message,
            code: err.code,
            details: err.details,
        }
    }
}

impl fmt::Display for SerializedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, self.code) {
            (Some(message), Some(code)) => write!(f, "{} (code {})", message, code),
            (Some(message), None) => f.write_str(message),
            (None, Some(code)) => write!(f, "gateway error (code {})", code),
            (None, None) => f.write_str("unknown gateway error"),
        }
    }
}

/// Stable classification of connectivity failures, for UI branching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorReason {
    Unknown,
    ContactPointUnavailable,
    Unauthorized,
    ClusterUnavailable,
    Forbidden,
    OauthUrl,
    UnsupportedEngine,
    InvalidClientId,
    InvalidCredentials,
}

impl ErrorReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorReason::Unknown => "UNKNOWN",
            ErrorReason::ContactPointUnavailable => "CONTACT_POINT_UNAVAILABLE",
            ErrorReason::Unauthorized => "UNAUTHORIZED",
            ErrorReason::ClusterUnavailable => "CLUSTER_UNAVAILABLE",
            ErrorReason::Forbidden => "FORBIDDEN",
            ErrorReason::OauthUrl => "OAUTH_URL",
            ErrorReason::UnsupportedEngine => "UNSUPPORTED_ENGINE",
            ErrorReason::InvalidClientId => "INVALID_CLIENT_ID",
            ErrorReason::InvalidCredentials => "INVALID_CREDENTIALS",
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const NOT_FOUND_MARKERS: &[&str] = &[
    "ENOTFOUND",
    "Not Found",
    "dns error",
    "failed to lookup address",
];

const UNSUPPORTED_PROTOCOL_MARKERS: &[&str] = &["Unsupported protocol", "URL scheme is not allowed"];

/// Map a raw gateway fault onto an [`ErrorReason`].
///
/// Status codes are checked before message heuristics, and endpoint-specific
/// interpretations before generic ones. The order of the checks is part of
/// the contract.
pub fn get_error_reason(error: &GatewayError, endpoint: EndpointKind) -> ErrorReason {
    let cloud = endpoint == EndpointKind::ManagedCloud;

    // (1) status codes
    match error.grpc_code() {
        Some(Code::Unavailable) => {
            return if cloud {
                ErrorReason::ClusterUnavailable
            } else {
                ErrorReason::ContactPointUnavailable
            };
        }
        // Managed cloud gateways report a paused cluster as INTERNAL (13), not 7.
        // Only 7 is matched; a 13 falls through to the message checks below.
        Some(Code::PermissionDenied) if cloud => return ErrorReason::ClusterUnavailable,
        Some(Code::Unimplemented) => return ErrorReason::UnsupportedEngine,
        _ => {}
    }

    // (2) nothing left to inspect
    let message = match error.message.as_deref() {
        Some(message) if !message.is_empty() => message,
        _ => return ErrorReason::Unknown,
    };

    // (3) host or resource not found
    if NOT_FOUND_MARKERS.iter().any(|marker| message.contains(marker)) {
        return match endpoint {
            EndpointKind::OAuth => ErrorReason::OauthUrl,
            EndpointKind::ManagedCloud => ErrorReason::InvalidClientId,
            EndpointKind::SelfHosted => ErrorReason::ContactPointUnavailable,
        };
    }

    // (4) credentials
    if message.contains("Unauthorized") {
        return if cloud {
            ErrorReason::InvalidCredentials
        } else {
            ErrorReason::Unauthorized
        };
    }

    if message.contains("Forbidden") {
        return ErrorReason::Forbidden;
    }

    if endpoint == EndpointKind::OAuth
        && UNSUPPORTED_PROTOCOL_MARKERS
            .iter()
            .any(|marker| message.contains(marker))
    {
        return ErrorReason::OauthUrl;
    }

    ErrorReason::Unknown
}
