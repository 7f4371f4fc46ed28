//! Endpoint descriptors: where and how to reach a Zeebe gateway

use serde::{Deserialize, Serialize};
use std::fmt;

/// Region assumed for managed clusters that do not name one
pub const DEFAULT_CLUSTER_REGION: &str = "bru-2";

/// Token endpoint of the managed cloud identity provider
pub const CLOUD_OAUTH_URL: &str = "https://login.cloud.camunda.io/oauth/token";

/// Audience requested for managed cloud gateway tokens
pub const CLOUD_AUDIENCE: &str = "zeebe.camunda.io";

/// Connection target supplied by the caller.
///
/// Equality is structural: two descriptors are equal only if every field,
/// secrets included, matches. The client manager relies on this to decide
/// whether its cached client can be reused.
///
/// The serialized form carries a `type` tag (`selfHosted`, `oauth`,
/// `camundaCloud`) with camelCase fields, matching the settings files the
/// desktop application writes.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EndpointDescriptor {
    /// Self-hosted gateway without authentication
    #[serde(rename = "selfHosted")]
    SelfHosted { url: String },

    /// Self-hosted gateway secured by an OAuth client-credentials flow
    #[serde(rename = "oauth", rename_all = "camelCase")]
    OAuth {
        url: String,
        audience: String,
        client_id: String,
        client_secret: String,
        #[serde(rename = "oauthURL", alias = "oauthUrl")]
        oauth_url: String,
    },

    /// Managed cloud cluster addressed by its identity
    #[serde(rename = "camundaCloud", rename_all = "camelCase")]
    ManagedCloud {
        cluster_id: String,
        client_id: String,
        client_secret: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cluster_region: Option<String>,
    },
}

/// Discriminant of an [`EndpointDescriptor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointKind {
    #[serde(rename = "selfHosted")]
    SelfHosted,
    #[serde(rename = "oauth")]
    OAuth,
    #[serde(rename = "camundaCloud")]
    ManagedCloud,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::SelfHosted => "selfHosted",
            EndpointKind::OAuth => "oauth",
            EndpointKind::ManagedCloud => "camundaCloud",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EndpointDescriptor {
    /// Create a descriptor for an unauthenticated self-hosted gateway
    pub fn self_hosted(url: impl Into<String>) -> Self {
        EndpointDescriptor::SelfHosted { url: url.into() }
    }

    pub fn kind(&self) -> EndpointKind {
        match self {
            EndpointDescriptor::SelfHosted { .. } => EndpointKind::SelfHosted,
            EndpointDescriptor::OAuth { .. } => EndpointKind::OAuth,
            EndpointDescriptor::ManagedCloud { .. } => EndpointKind::ManagedCloud,
        }
    }

    /// Gateway URL as configured by the user (managed clusters have none)
    pub fn url(&self) -> Option<&str> {
        match self {
            EndpointDescriptor::SelfHosted { url } | EndpointDescriptor::OAuth { url, .. } => {
                Some(url)
            }
            EndpointDescriptor::ManagedCloud { .. } => None,
        }
    }

    pub fn client_id(&self) -> Option<&str> {
        match self {
            EndpointDescriptor::SelfHosted { .. } => None,
            EndpointDescriptor::OAuth { client_id, .. }
            | EndpointDescriptor::ManagedCloud { client_id, .. } => Some(client_id),
        }
    }

    pub fn oauth_url(&self) -> Option<&str> {
        match self {
            EndpointDescriptor::OAuth { oauth_url, .. } => Some(oauth_url),
            _ => None,
        }
    }

    /// Region of a managed cluster, falling back to [`DEFAULT_CLUSTER_REGION`]
    pub fn cluster_region(&self) -> Option<&str> {
        match self {
            EndpointDescriptor::ManagedCloud { cluster_region, .. } => Some(
                cluster_region
                    .as_deref()
                    .filter(|region| !region.is_empty())
                    .unwrap_or(DEFAULT_CLUSTER_REGION),
            ),
            _ => None,
        }
    }

    /// Whether the configured URL asks for an encrypted transport
    pub fn has_https_url(&self) -> bool {
        self.url()
            .map(|url| url.to_ascii_lowercase().starts_with("https://"))
            .unwrap_or(false)
    }

    /// Gateway address handed to the transport.
    ///
    /// Bare `host:port` URLs get a scheme matching the TLS decision; managed
    /// clusters are addressed through their regional gateway hostname.
    pub fn address(&self, use_tls: bool) -> String {
        match self {
            EndpointDescriptor::SelfHosted { url } | EndpointDescriptor::OAuth { url, .. } => {
                let url = url.trim();
                if url.contains("://") {
                    url.to_string()
                } else {
                    let scheme = if use_tls { "https" } else { "http" };
                    format!("{}://{}", scheme, url)
                }
            }
            EndpointDescriptor::ManagedCloud { cluster_id, .. } => format!(
                "https://{}.{}.zeebe.camunda.io:443",
                cluster_id,
                self.cluster_region().unwrap_or(DEFAULT_CLUSTER_REGION)
            ),
        }
    }

    /// The only view of a descriptor that may be logged or returned
    pub fn redacted(&self) -> RedactedEndpoint {
        RedactedEndpoint {
            kind: self.kind(),
            url: self.url().map(str::to_string),
            client_id: self.client_id().map(str::to_string),
            oauth_url: self.oauth_url().map(str::to_string),
        }
    }
}

impl fmt::Debug for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointDescriptor::SelfHosted { url } => {
                f.debug_struct("SelfHosted").field("url", url).finish()
            }
            EndpointDescriptor::OAuth {
                url,
                audience,
                client_id,
                oauth_url,
                ..
            } => f
                .debug_struct("OAuth")
                .field("url", url)
                .field("audience", audience)
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .field("oauth_url", oauth_url)
                .finish(),
            EndpointDescriptor::ManagedCloud {
                cluster_id,
                client_id,
                cluster_region,
                ..
            } => f
                .debug_struct("ManagedCloud")
                .field("cluster_id", cluster_id)
                .field("client_id", client_id)
                .field("client_secret", &"<redacted>")
                .field("cluster_region", cluster_region)
                .finish(),
        }
    }
}

/// Endpoint with every secret removed: `type`, `url`, `clientId`, `oauthURL`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactedEndpoint {
    #[serde(rename = "type")]
    pub kind: EndpointKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "oauthURL", skip_serializing_if = "Option::is_none")]
    pub oauth_url: Option<String>,
}

impl fmt::Display for RedactedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{{\"type\":\"{}\"}}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oauth() -> EndpointDescriptor {
        EndpointDescriptor::OAuth {
            url: "https://zeebe.example.com:443".to_string(),
            audience: "zeebe-api".to_string(),
            client_id: "modeler".to_string(),
            client_secret: "s3cr3t".to_string(),
            oauth_url: "https://auth.example.com/token".to_string(),
        }
    }

    #[test]
    fn test_structural_equality_includes_secrets() {
        let mut other = oauth();
        assert_eq!(oauth(), other);

        if let EndpointDescriptor::OAuth { client_secret, .. } = &mut other {
            *client_secret = "rotated".to_string();
        }
        assert_ne!(oauth(), other);
    }

    #[test]
    fn test_deserialize_tagged_descriptor() {
        let json = r#"{
            "type": "camundaCloud",
            "clusterId": "abc-123",
            "clientId": "id",
            "clientSecret": "secret"
        }"#;

        let endpoint: EndpointDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(endpoint.kind(), EndpointKind::ManagedCloud);
        assert_eq!(endpoint.cluster_region(), Some(DEFAULT_CLUSTER_REGION));
    }

    #[test]
    fn test_oauth_url_field_names() {
        let json = r#"{"type":"oauth","url":"http://localhost:26500","audience":"a",
            "clientId":"c","clientSecret":"s","oauthUrl":"http://localhost:8080/token"}"#;
        let endpoint: EndpointDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(endpoint.oauth_url(), Some("http://localhost:8080/token"));

        let serialized = serde_json::to_value(&endpoint).unwrap();
        assert_eq!(serialized["oauthURL"], "http://localhost:8080/token");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"type":"carrierPigeon","url":"http://localhost:26500"}"#;
        assert!(serde_json::from_str::<EndpointDescriptor>(json).is_err());
    }

    #[test]
    fn test_redacted_keeps_only_public_fields() {
        let redacted = oauth().redacted();
        let json = serde_json::to_value(&redacted).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["clientId", "oauthURL", "type", "url"]);
        assert!(!redacted.to_string().contains("s3cr3t"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", oauth());
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_address_resolution() {
        let bare = EndpointDescriptor::self_hosted("localhost:26500");
        assert_eq!(bare.address(false), "http://localhost:26500");
        assert_eq!(bare.address(true), "https://localhost:26500");

        let explicit = EndpointDescriptor::self_hosted("https://gateway:443");
        assert!(explicit.has_https_url());
        assert_eq!(explicit.address(true), "https://gateway:443");

        let cloud = EndpointDescriptor::ManagedCloud {
            cluster_id: "abc".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            cluster_region: Some("syd-1".to_string()),
        };
        assert_eq!(cloud.address(true), "https://abc.syd-1.zeebe.camunda.io:443");
        assert!(!cloud.has_https_url());
    }
}
