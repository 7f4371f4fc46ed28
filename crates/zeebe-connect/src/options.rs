//! Connection options derived from an endpoint descriptor

use crate::endpoint::{EndpointDescriptor, CLOUD_AUDIENCE, CLOUD_OAUTH_URL};
use crate::tls::TlsMaterial;
use std::fmt;

/// Everything the transport needs to build a client.
///
/// Options are derived per construction and never persisted. Retries are
/// always disabled so that connectivity problems surface immediately.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub retry: bool,
    pub oauth: Option<OAuthOptions>,
    pub cloud: Option<CloudOptions>,
    pub use_tls: bool,
    /// Root certificate bundle overriding the transport's default trust
    pub custom_root_certs: Option<Vec<u8>>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            retry: false,
            oauth: None,
            cloud: None,
            use_tls: false,
            custom_root_certs: None,
        }
    }
}

/// OAuth client-credentials configuration for self-hosted gateways
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthOptions {
    pub url: String,
    pub audience: String,
    pub client_id: String,
    pub client_secret: String,
    pub cache_on_disk: bool,
}

/// Managed cloud cluster credentials
#[derive(Clone, PartialEq, Eq)]
pub struct CloudOptions {
    pub client_id: String,
    pub client_secret: String,
    pub cluster_id: String,
    pub cluster_region: Option<String>,
    pub cache_on_disk: bool,
}

/// Token request parameters, whichever way the endpoint authenticates
#[derive(Clone, PartialEq, Eq)]
pub struct TokenCredentials {
    pub token_url: String,
    pub audience: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ConnectionOptions {
    /// Build options for `endpoint`, attaching the resolved trust material
    pub fn for_endpoint(endpoint: &EndpointDescriptor, tls: &TlsMaterial) -> Self {
        let mut options = ConnectionOptions::default();

        match endpoint {
            EndpointDescriptor::SelfHosted { .. } => {}
            EndpointDescriptor::OAuth {
                audience,
                client_id,
                client_secret,
                oauth_url,
                ..
            } => {
                options.oauth = Some(OAuthOptions {
                    url: oauth_url.clone(),
                    audience: audience.clone(),
                    client_id: client_id.clone(),
                    client_secret: client_secret.clone(),
                    cache_on_disk: false,
                });
            }
            EndpointDescriptor::ManagedCloud {
                cluster_id,
                client_id,
                client_secret,
                cluster_region,
            } => {
                options.cloud = Some(CloudOptions {
                    client_id: client_id.clone(),
                    client_secret: client_secret.clone(),
                    cluster_id: cluster_id.clone(),
                    cluster_region: cluster_region.clone().filter(|region| !region.is_empty()),
                    cache_on_disk: false,
                });
                options.use_tls = true;
            }
        }

        options.with_tls(endpoint, tls)
    }

    fn with_tls(mut self, endpoint: &EndpointDescriptor, tls: &TlsMaterial) -> Self {
        self.use_tls = self.use_tls || endpoint.has_https_url();

        if !tls.is_empty() {
            self.custom_root_certs = Some(tls.pem_bundle());
        }

        self
    }

    /// Credentials for the token endpoint, if the endpoint needs any
    pub fn token_credentials(&self) -> Option<TokenCredentials> {
        if let Some(oauth) = &self.oauth {
            return Some(TokenCredentials {
                token_url: oauth.url.clone(),
                audience: oauth.audience.clone(),
                client_id: oauth.client_id.clone(),
                client_secret: oauth.client_secret.clone(),
            });
        }

        self.cloud.as_ref().map(|cloud| TokenCredentials {
            token_url: CLOUD_OAUTH_URL.to_string(),
            audience: CLOUD_AUDIENCE.to_string(),
            client_id: cloud.client_id.clone(),
            client_secret: cloud.client_secret.clone(),
        })
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("retry", &self.retry)
            .field("oauth", &self.oauth)
            .field("cloud", &self.cloud)
            .field("use_tls", &self.use_tls)
            .field(
                "custom_root_certs",
                &self.custom_root_certs.as_ref().map(|bundle| bundle.len()),
            )
            .finish()
    }
}

impl fmt::Debug for OAuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthOptions")
            .field("url", &self.url)
            .field("audience", &self.audience)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("cache_on_disk", &self.cache_on_disk)
            .finish()
    }
}

impl fmt::Debug for CloudOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudOptions")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("cluster_id", &self.cluster_id)
            .field("cluster_region", &self.cluster_region)
            .field("cache_on_disk", &self.cache_on_disk)
            .finish()
    }
}

impl fmt::Debug for TokenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCredentials")
            .field("token_url", &self.token_url)
            .field("audience", &self.audience)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_tls() -> TlsMaterial {
        TlsMaterial::default()
    }

    #[test]
    fn test_self_hosted_plain() {
        let endpoint = EndpointDescriptor::self_hosted("http://localhost:26500");
        let options = ConnectionOptions::for_endpoint(&endpoint, &no_tls());

        assert!(!options.retry);
        assert!(!options.use_tls);
        assert!(options.oauth.is_none());
        assert!(options.cloud.is_none());
        assert!(options.custom_root_certs.is_none());
        assert!(options.token_credentials().is_none());
    }

    #[test]
    fn test_https_scheme_enables_tls() {
        let endpoint = EndpointDescriptor::self_hosted("https://zeebe.example.com");
        let options = ConnectionOptions::for_endpoint(&endpoint, &no_tls());

        assert!(options.use_tls);
    }

    #[test]
    fn test_oauth_block() {
        let endpoint = EndpointDescriptor::OAuth {
            url: "http://localhost:26500".to_string(),
            audience: "zeebe-api".to_string(),
            client_id: "modeler".to_string(),
            client_secret: "secret".to_string(),
            oauth_url: "http://localhost:18080/token".to_string(),
        };
        let options = ConnectionOptions::for_endpoint(&endpoint, &no_tls());

        let oauth = options.oauth.clone().unwrap();
        assert_eq!(oauth.url, "http://localhost:18080/token");
        assert_eq!(oauth.audience, "zeebe-api");
        assert!(!oauth.cache_on_disk);
        assert!(!options.use_tls);

        let credentials = options.token_credentials().unwrap();
        assert_eq!(credentials.token_url, "http://localhost:18080/token");
        assert_eq!(credentials.client_secret, "secret");
    }

    #[test]
    fn test_cloud_forces_tls() {
        let endpoint = EndpointDescriptor::ManagedCloud {
            cluster_id: "abc".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            cluster_region: None,
        };
        let options = ConnectionOptions::for_endpoint(&endpoint, &no_tls());

        assert!(options.use_tls);
        let cloud = options.cloud.clone().unwrap();
        assert_eq!(cloud.cluster_region, None);
        assert!(!cloud.cache_on_disk);

        let credentials = options.token_credentials().unwrap();
        assert_eq!(credentials.token_url, CLOUD_OAUTH_URL);
        assert_eq!(credentials.audience, CLOUD_AUDIENCE);
    }

    #[test]
    fn test_trust_material_attached_only_when_present() {
        let endpoint = EndpointDescriptor::self_hosted("https://zeebe.example.com");
        let tls = TlsMaterial::from_parts(Some("CUSTOM".to_string()), vec!["OS".to_string()]);

        let options = ConnectionOptions::for_endpoint(&endpoint, &tls);

        assert_eq!(options.custom_root_certs, Some(b"CUSTOM\nOS".to_vec()));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let endpoint = EndpointDescriptor::ManagedCloud {
            cluster_id: "abc".to_string(),
            client_id: "id".to_string(),
            client_secret: "hunter2".to_string(),
            cluster_region: Some("bru-3".to_string()),
        };
        let options = ConnectionOptions::for_endpoint(&endpoint, &no_tls());

        assert!(!format!("{:?}", options).contains("hunter2"));
    }
}
