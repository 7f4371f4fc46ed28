/*!
 * Endpoint selection from command line arguments
 */

use crate::error::{ModelerError, Result};
use clap::{Args, ValueEnum};
use zeebe_connect::EndpointDescriptor;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointTypeArg {
    /// Gateway without authentication
    SelfHosted,
    /// Gateway behind an OAuth client-credentials flow
    Oauth,
    /// Managed cloud cluster
    CamundaCloud,
}

/// Gateway endpoint flags shared by the gateway subcommands.
///
/// Without `--endpoint-type` the `[endpoint]` table of the config file is
/// used; a bare `--url` means a self-hosted gateway.
#[derive(Args, Debug, Clone, Default)]
pub struct EndpointArgs {
    /// Endpoint type
    #[arg(long, value_enum)]
    pub endpoint_type: Option<EndpointTypeArg>,

    /// Gateway address, e.g. http://localhost:26500
    #[arg(long)]
    pub url: Option<String>,

    /// OAuth audience
    #[arg(long)]
    pub audience: Option<String>,

    /// OAuth or cloud client id
    #[arg(long)]
    pub client_id: Option<String>,

    /// OAuth or cloud client secret
    #[arg(long, env = "ZEEBE_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// OAuth token endpoint
    #[arg(long)]
    pub oauth_url: Option<String>,

    /// Cloud cluster id
    #[arg(long)]
    pub cluster_id: Option<String>,

    /// Cloud cluster region
    #[arg(long)]
    pub cluster_region: Option<String>,
}

impl EndpointArgs {
    /// Build the descriptor, falling back to `configured` when no type is given
    pub fn resolve(self, configured: Option<EndpointDescriptor>) -> Result<EndpointDescriptor> {
        let endpoint_type = match (self.endpoint_type, configured, &self.url) {
            (Some(endpoint_type), _, _) => endpoint_type,
            (None, Some(configured), _) => return Ok(configured),
            (None, None, Some(_)) => EndpointTypeArg::SelfHosted,
            (None, None, None) => {
                return Err(ModelerError::Endpoint(
                    "no endpoint given; pass --url or configure [endpoint]".to_string(),
                ))
            }
        };

        match endpoint_type {
            EndpointTypeArg::SelfHosted => Ok(EndpointDescriptor::SelfHosted {
                url: required(self.url, "--url", "selfHosted")?,
            }),
            EndpointTypeArg::Oauth => Ok(EndpointDescriptor::OAuth {
                url: required(self.url, "--url", "oauth")?,
                audience: required(self.audience, "--audience", "oauth")?,
                client_id: required(self.client_id, "--client-id", "oauth")?,
                client_secret: required(self.client_secret, "--client-secret", "oauth")?,
                oauth_url: required(self.oauth_url, "--oauth-url", "oauth")?,
            }),
            EndpointTypeArg::CamundaCloud => Ok(EndpointDescriptor::ManagedCloud {
                cluster_id: required(self.cluster_id, "--cluster-id", "camundaCloud")?,
                client_id: required(self.client_id, "--client-id", "camundaCloud")?,
                client_secret: required(self.client_secret, "--client-secret", "camundaCloud")?,
                cluster_region: self.cluster_region.filter(|region| !region.is_empty()),
            }),
        }
    }
}

fn required(value: Option<String>, flag: &str, endpoint_type: &str) -> Result<String> {
    value.ok_or_else(|| {
        ModelerError::Endpoint(format!(
            "{} is required for {} endpoints",
            flag, endpoint_type
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_url_is_self_hosted() {
        let args = EndpointArgs {
            url: Some("http://localhost:26500".to_string()),
            ..Default::default()
        };

        assert_eq!(
            args.resolve(None).unwrap(),
            EndpointDescriptor::self_hosted("http://localhost:26500")
        );
    }

    #[test]
    fn test_configured_endpoint_is_fallback() {
        let configured = EndpointDescriptor::self_hosted("http://gateway:26500");
        let args = EndpointArgs {
            url: Some("http://ignored:26500".to_string()),
            ..Default::default()
        };

        assert_eq!(args.resolve(Some(configured.clone())).unwrap(), configured);
    }

    #[test]
    fn test_explicit_type_wins_over_config() {
        let configured = EndpointDescriptor::self_hosted("http://gateway:26500");
        let args = EndpointArgs {
            endpoint_type: Some(EndpointTypeArg::CamundaCloud),
            cluster_id: Some("abc".to_string()),
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            cluster_region: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(
            args.resolve(Some(configured)).unwrap(),
            EndpointDescriptor::ManagedCloud {
                cluster_id: "abc".to_string(),
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
                cluster_region: None,
            }
        );
    }

    #[test]
    fn test_missing_oauth_field() {
        let args = EndpointArgs {
            endpoint_type: Some(EndpointTypeArg::Oauth),
            url: Some("https://zeebe:443".to_string()),
            audience: Some("zeebe".to_string()),
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            ..Default::default()
        };

        let err = args.resolve(None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid endpoint: --oauth-url is required for oauth endpoints"
        );
    }

    #[test]
    fn test_nothing_given() {
        assert!(matches!(
            EndpointArgs::default().resolve(None),
            Err(ModelerError::Endpoint(_))
        ));
    }
}
