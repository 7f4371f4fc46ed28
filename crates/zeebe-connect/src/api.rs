//! ZeebeApi: connectivity checks, deployments and instance creation against
//! a single, cached gateway client

use crate::client::{ClientFactory, GrpcClientFactory, ZeebeClient};
use crate::endpoint::EndpointDescriptor;
use crate::error::{get_error_reason, ConnectError, ErrorReason, GatewayError, SerializedError};
use crate::naming::{prepare_deployment_name, DiagramType};
use crate::options::ConnectionOptions;
use crate::services::{FileSystem, Flags, LocalFileSystem, NativeTrustStore, TrustStore};
use crate::tls::TlsMaterial;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, error, info, warn};
use zeebe_proto::{CreateProcessInstanceResponse, DeployResourceResponse};

/// Gateway version reported by a topology probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayVersion {
    pub gateway_version: String,
}

struct CachedClient {
    endpoint: EndpointDescriptor,
    client: Arc<dyn ZeebeClient>,
}

/// Shared access to the cached client for the duration of one operation.
///
/// Holding the lease keeps the slot read-locked, so the client cannot be
/// closed and replaced while a call on it is still in flight.
struct ClientLease<'a> {
    _slot: RwLockReadGuard<'a, Option<CachedClient>>,
    client: Arc<dyn ZeebeClient>,
}

impl Deref for ClientLease<'_> {
    type Target = dyn ZeebeClient;

    fn deref(&self) -> &Self::Target {
        self.client.as_ref()
    }
}

/// Endpoint client manager.
///
/// Keeps at most one live client, tagged with the descriptor it was built
/// from. A request for the same descriptor reuses it; a request for any
/// other descriptor closes it and installs a new one.
///
/// Every operation catches its faults: connectivity probes report an
/// [`ErrorReason`], deploy and run report a [`SerializedError`].
///
/// # Blocking
///
/// A call holds a read lease on the cached slot until the remote call
/// returns, and no deadline is set on the gRPC request. Switching to another
/// descriptor needs the write lock, so it waits for every call in flight on
/// the old client. tokio's `RwLock` is fair: once a switch is waiting, new
/// calls queue behind it, even calls for the old descriptor. A gateway that
/// never answers therefore stalls all later operations on this manager.
///
/// # Example
///
/// ```rust,no_run
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use zeebe_connect::{EndpointDescriptor, ZeebeApi};
///
/// # async fn example() {
/// let api = ZeebeApi::with_defaults(Arc::new(HashMap::<String, String>::new()));
/// let endpoint = EndpointDescriptor::self_hosted("http://localhost:26500");
///
/// match api.check_connection(&endpoint).await {
///     Ok(()) => println!("connected"),
///     Err(reason) => println!("cannot connect: {}", reason),
/// }
/// # }
/// ```
pub struct ZeebeApi {
    fs: Arc<dyn FileSystem>,
    factory: Arc<dyn ClientFactory>,
    flags: Arc<dyn Flags>,
    trust_store: Arc<dyn TrustStore>,

    /// The single cached client slot
    slot: RwLock<Option<CachedClient>>,
}

impl ZeebeApi {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        factory: Arc<dyn ClientFactory>,
        flags: Arc<dyn Flags>,
        trust_store: Arc<dyn TrustStore>,
    ) -> Self {
        Self {
            fs,
            factory,
            flags,
            trust_store,
            slot: RwLock::new(None),
        }
    }

    /// Local disk, gRPC transport and the OS trust store
    pub fn with_defaults(flags: Arc<dyn Flags>) -> Self {
        Self::new(
            Arc::new(LocalFileSystem),
            Arc::new(GrpcClientFactory),
            flags,
            Arc::new(NativeTrustStore),
        )
    }

    /// Check that the gateway behind `endpoint` answers a topology probe
    pub async fn check_connection(&self, endpoint: &EndpointDescriptor) -> Result<(), ErrorReason> {
        let result = match self.client(endpoint).await {
            Ok(client) => client.topology().await.map(|_| ()),
            Err(err) => Err(err),
        };

        result.map_err(|err| {
            error!(
                endpoint = %endpoint.redacted(),
                error = %err,
                "Failed to connect with config (secrets omitted)"
            );
            get_error_reason(&err, endpoint.kind())
        })
    }

    /// Deploy the definition stored at `file_path`.
    ///
    /// The deployment name is normalized with [`prepare_deployment_name`].
    pub async fn deploy(
        &self,
        endpoint: &EndpointDescriptor,
        name: &str,
        file_path: &Path,
        diagram_type: DiagramType,
    ) -> Result<DeployResourceResponse, SerializedError> {
        let result = self.try_deploy(endpoint, name, file_path, diagram_type).await;

        result.map_err(|err| {
            error!(
                endpoint = %endpoint.redacted(),
                file = %file_path.display(),
                error = %err,
                "Failed to deploy with config (secrets omitted)"
            );
            redact(err, endpoint)
        })
    }

    async fn try_deploy(
        &self,
        endpoint: &EndpointDescriptor,
        name: &str,
        file_path: &Path,
        diagram_type: DiagramType,
    ) -> Result<DeployResourceResponse, GatewayError> {
        let contents = self.fs.read_file(file_path).map_err(|e| {
            GatewayError::from_message(format!(
                "Failed to read {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let client = self.client(endpoint).await?;
        let deployment_name = prepare_deployment_name(name, file_path, diagram_type);

        client.deploy_resource(&deployment_name, contents).await
    }

    /// Start an instance of `process_id` with the given variables
    pub async fn run(
        &self,
        endpoint: &EndpointDescriptor,
        process_id: &str,
        variables: &Map<String, Value>,
    ) -> Result<CreateProcessInstanceResponse, SerializedError> {
        let result = match self.client(endpoint).await {
            Ok(client) => client.create_process_instance(process_id, variables).await,
            Err(err) => Err(err),
        };

        result.map_err(|err| {
            error!(
                endpoint = %endpoint.redacted(),
                process_id,
                error = %err,
                "Failed to run instance with config (secrets omitted)"
            );
            redact(err, endpoint)
        })
    }

    /// Read the gateway version from a topology probe
    pub async fn get_gateway_version(
        &self,
        endpoint: &EndpointDescriptor,
    ) -> Result<GatewayVersion, ErrorReason> {
        let result = match self.client(endpoint).await {
            Ok(client) => client.topology().await,
            Err(err) => Err(err),
        };

        match result {
            Ok(topology) => Ok(GatewayVersion {
                gateway_version: topology.gateway_version,
            }),
            Err(err) => {
                error!(
                    endpoint = %endpoint.redacted(),
                    error = %err,
                    "Failed to connect with config (secrets omitted)"
                );
                Err(get_error_reason(&err, endpoint.kind()))
            }
        }
    }

    /// Descriptor of the currently cached client, if any
    pub async fn cached_endpoint(&self) -> Option<EndpointDescriptor> {
        let slot = self.slot.read().await;
        slot.as_ref().map(|cached| cached.endpoint.clone())
    }

    /// Obtain a client for `endpoint`, reusing the cached one when the
    /// descriptor is structurally equal
    async fn client(&self, endpoint: &EndpointDescriptor) -> Result<ClientLease<'_>, GatewayError> {
        // 1. Reuse under a shared lock
        let slot = self.slot.read().await;
        let reusable = cached_client_for(&slot, endpoint);
        if let Some(client) = reusable {
            debug!("Reusing gateway client for {}", endpoint.redacted());
            return Ok(ClientLease {
                _slot: slot,
                client,
            });
        }
        drop(slot);

        // 2. Replace under the exclusive lock; someone may have beaten us to it
        let mut slot = self.slot.write().await;
        let client = match cached_client_for(&slot, endpoint) {
            Some(client) => client,
            None => self.replace(&mut slot, endpoint).await?,
        };

        Ok(ClientLease {
            _slot: slot.downgrade(),
            client,
        })
    }

    async fn replace(
        &self,
        slot: &mut Option<CachedClient>,
        endpoint: &EndpointDescriptor,
    ) -> Result<Arc<dyn ZeebeClient>, GatewayError> {
        if let Some(previous) = slot.take() {
            debug!(
                "Closing gateway client for {}",
                previous.endpoint.redacted()
            );
            if let Err(e) = previous.client.close().await {
                warn!("Failed to close gateway client: {}", e);
            }
        }

        let client = self.create_client(endpoint)?;

        *slot = Some(CachedClient {
            endpoint: endpoint.clone(),
            client: Arc::clone(&client),
        });

        Ok(client)
    }

    fn create_client(
        &self,
        endpoint: &EndpointDescriptor,
    ) -> Result<Arc<dyn ZeebeClient>, ConnectError> {
        let tls = TlsMaterial::resolve(
            self.flags.as_ref(),
            self.fs.as_ref(),
            self.trust_store.as_ref(),
        );
        let options = ConnectionOptions::for_endpoint(endpoint, &tls);
        let address = endpoint.address(options.use_tls);

        info!(
            "Connecting to {} endpoint at {}",
            endpoint.kind(),
            address
        );

        self.factory.connect(&address, &options)
    }
}

fn cached_client_for(
    slot: &Option<CachedClient>,
    endpoint: &EndpointDescriptor,
) -> Option<Arc<dyn ZeebeClient>> {
    slot.as_ref()
        .filter(|cached| cached.endpoint == *endpoint)
        .map(|cached| Arc::clone(&cached.client))
}

/// Prune a fault to message/code/details and scrub the endpoint's secret
fn redact(err: GatewayError, endpoint: &EndpointDescriptor) -> SerializedError {
    let mut serialized = SerializedError::from(err);

    if let Some(secret) = client_secret(endpoint).filter(|secret| !secret.is_empty()) {
        for text in [&mut serialized.message, &mut serialized.details]
            .into_iter()
            .flatten()
        {
            if text.contains(secret) {
                *text = text.replace(secret, "<redacted>");
            }
        }
    }

    serialized
}

fn client_secret(endpoint: &EndpointDescriptor) -> Option<&str> {
    match endpoint {
        EndpointDescriptor::SelfHosted { .. } => None,
        EndpointDescriptor::OAuth { client_secret, .. }
        | EndpointDescriptor::ManagedCloud { client_secret, .. } => Some(client_secret),
    }
}
