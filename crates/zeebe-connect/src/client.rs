//! Gateway client abstraction and its tonic implementation

use crate::error::{ConnectError, GatewayError};
use crate::oauth::TokenProvider;
use crate::options::ConnectionOptions;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tonic::Code;
use tracing::{debug, info};
use zeebe_proto::gateway_client::GatewayClient;
use zeebe_proto::{
    CreateProcessInstanceRequest, CreateProcessInstanceResponse, DeployResourceRequest,
    DeployResourceResponse, Resource, TopologyRequest, TopologyResponse,
};

/// Version selector meaning "latest deployed version"
const LATEST_VERSION: i32 = -1;

/// Remote calls the client manager issues against a gateway
#[async_trait]
pub trait ZeebeClient: Send + Sync {
    /// Lightweight probe returning cluster and version metadata
    async fn topology(&self) -> Result<TopologyResponse, GatewayError>;

    /// Deploy a single BPMN or DMN resource under `name`
    async fn deploy_resource(
        &self,
        name: &str,
        content: Vec<u8>,
    ) -> Result<DeployResourceResponse, GatewayError>;

    /// Start an instance of the latest version of `process_id`
    async fn create_process_instance(
        &self,
        process_id: &str,
        variables: &Map<String, Value>,
    ) -> Result<CreateProcessInstanceResponse, GatewayError>;

    /// Release the client; later calls fail
    async fn close(&self) -> Result<(), GatewayError>;
}

/// Builds clients for a gateway address.
///
/// Construction is synchronous: no connection is attempted until the first
/// remote call.
pub trait ClientFactory: Send + Sync {
    fn connect(
        &self,
        address: &str,
        options: &ConnectionOptions,
    ) -> Result<Arc<dyn ZeebeClient>, ConnectError>;
}

/// [`ClientFactory`] producing tonic-backed clients
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcClientFactory;

impl ClientFactory for GrpcClientFactory {
    fn connect(
        &self,
        address: &str,
        options: &ConnectionOptions,
    ) -> Result<Arc<dyn ZeebeClient>, ConnectError> {
        let mut endpoint = Endpoint::from_shared(address.to_string()).map_err(|e| {
            ConnectError::InvalidAddress {
                address: address.to_string(),
                reason: e.to_string(),
            }
        })?;

        if options.use_tls {
            let tls = match &options.custom_root_certs {
                Some(bundle) => ClientTlsConfig::new().ca_certificate(Certificate::from_pem(bundle)),
                None => ClientTlsConfig::new().with_native_roots(),
            };
            endpoint = endpoint.tls_config(tls)?;
        }

        let credentials = options
            .token_credentials()
            .map(TokenProvider::new)
            .transpose()?;

        info!(
            "Creating gateway client for {} (tls: {}, oauth: {})",
            address,
            options.use_tls,
            credentials.is_some()
        );

        let channel = endpoint.connect_lazy();

        Ok(Arc::new(GrpcZeebeClient::new(channel, credentials)))
    }
}

/// Gateway client speaking gRPC over a lazily connected channel.
///
/// Cheap to share: the underlying channel is reference counted.
pub struct GrpcZeebeClient {
    gateway: GatewayClient<Channel>,

    /// Bearer token source for OAuth and managed cloud endpoints
    credentials: Option<TokenProvider>,

    closed: AtomicBool,
}

impl GrpcZeebeClient {
    pub fn new(channel: Channel, credentials: Option<TokenProvider>) -> Self {
        Self {
            gateway: GatewayClient::new(channel),
            credentials,
            closed: AtomicBool::new(false),
        }
    }

    fn gateway(&self) -> Result<GatewayClient<Channel>, GatewayError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(GatewayError::new(Code::Cancelled, "Client is closed"));
        }

        Ok(self.gateway.clone())
    }

    /// Wrap a message, attaching the bearer token when the endpoint needs one
    async fn request<T>(&self, message: T) -> Result<tonic::Request<T>, GatewayError> {
        let mut request = tonic::Request::new(message);

        if let Some(credentials) = &self.credentials {
            let token = credentials.token().await?;
            let value = format!("Bearer {}", token).parse().map_err(|_| {
                GatewayError::from_message("OAuth token is not a valid header value")
            })?;
            request.metadata_mut().insert("authorization", value);
        }

        Ok(request)
    }
}

#[async_trait]
impl ZeebeClient for GrpcZeebeClient {
    async fn topology(&self) -> Result<TopologyResponse, GatewayError> {
        let mut gateway = self.gateway()?;
        let request = self.request(TopologyRequest {}).await?;

        let response = gateway.topology(request).await?;
        Ok(response.into_inner())
    }

    async fn deploy_resource(
        &self,
        name: &str,
        content: Vec<u8>,
    ) -> Result<DeployResourceResponse, GatewayError> {
        let mut gateway = self.gateway()?;

        debug!("Deploying resource {} ({} bytes)", name, content.len());

        let request = self
            .request(DeployResourceRequest {
                resources: vec![Resource {
                    name: name.to_string(),
                    content,
                }],
                tenant_id: String::new(),
            })
            .await?;

        let response = gateway.deploy_resource(request).await?;
        Ok(response.into_inner())
    }

    async fn create_process_instance(
        &self,
        process_id: &str,
        variables: &Map<String, Value>,
    ) -> Result<CreateProcessInstanceResponse, GatewayError> {
        let mut gateway = self.gateway()?;

        let variables = serde_json::to_string(variables).map_err(|e| {
            GatewayError::new(
                Code::InvalidArgument,
                format!("Failed to serialize variables: {}", e),
            )
        })?;

        let request = self
            .request(CreateProcessInstanceRequest {
                bpmn_process_id: process_id.to_string(),
                version: LATEST_VERSION,
                variables,
                ..Default::default()
            })
            .await?;

        let response = gateway.create_process_instance(request).await?;
        Ok(response.into_inner())
    }

    async fn close(&self) -> Result<(), GatewayError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            debug!("Gateway client already closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointDescriptor;
    use crate::tls::TlsMaterial;

    #[tokio::test]
    async fn test_factory_rejects_invalid_address() {
        let result = GrpcClientFactory.connect("not a uri", &ConnectionOptions::default());
        assert!(matches!(result, Err(ConnectError::InvalidAddress { .. })));
    }

    #[tokio::test]
    async fn test_closed_client_refuses_calls() {
        let endpoint = EndpointDescriptor::self_hosted("http://127.0.0.1:1");
        let options = ConnectionOptions::for_endpoint(&endpoint, &TlsMaterial::default());

        let client = GrpcClientFactory
            .connect(&endpoint.address(options.use_tls), &options)
            .unwrap();
        client.close().await.unwrap();

        let err = client.topology().await.unwrap_err();
        assert_eq!(err.grpc_code(), Some(Code::Cancelled));
    }

    #[tokio::test]
    async fn test_tls_endpoint_with_custom_roots() {
        let endpoint = EndpointDescriptor::self_hosted("https://127.0.0.1:1");
        let tls = TlsMaterial::from_parts(
            Some(include_str!("../tests/fixtures/root-ca.pem").to_string()),
            vec![],
        );
        let options = ConnectionOptions::for_endpoint(&endpoint, &tls);

        assert!(GrpcClientFactory
            .connect(&endpoint.address(options.use_tls), &options)
            .is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_unavailable() {
        let endpoint = EndpointDescriptor::self_hosted("http://127.0.0.1:1");
        let options = ConnectionOptions::for_endpoint(&endpoint, &TlsMaterial::default());

        let client = GrpcClientFactory
            .connect(&endpoint.address(options.use_tls), &options)
            .unwrap();

        let err = client.topology().await.unwrap_err();
        assert_eq!(err.grpc_code(), Some(Code::Unavailable));
    }
}
