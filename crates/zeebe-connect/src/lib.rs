//! Zeebe Connect: client-side gRPC connectivity for the modeler
//!
//! This crate lets the desktop modeler talk to a Zeebe workflow-engine
//! cluster: check that a gateway is reachable, deploy BPMN/DMN definitions,
//! start process instances and read the gateway version.
//!
//! # Architecture
//!
//! - **ZeebeApi**: the endpoint client manager. Owns a single cached client
//!   keyed by the [`EndpointDescriptor`] it was built from
//! - **ClientFactory / ZeebeClient**: the seam to the transport;
//!   [`GrpcClientFactory`] builds tonic channels with TLS and OAuth applied
//! - **get_error_reason**: maps raw gateway faults onto [`ErrorReason`]
//!
//! # Example
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use std::path::Path;
//! use std::sync::Arc;
//! use zeebe_connect::{DiagramType, EndpointDescriptor, ZeebeApi};
//!
//! # async fn example() {
//! let api = ZeebeApi::with_defaults(Arc::new(HashMap::<String, String>::new()));
//! let endpoint = EndpointDescriptor::self_hosted("http://localhost:26500");
//!
//! let deployed = api
//!     .deploy(&endpoint, "", Path::new("diagrams/order.bpmn"), DiagramType::Bpmn)
//!     .await;
//! # }
//! ```

pub mod api;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod naming;
pub mod oauth;
pub mod options;
pub mod services;
pub mod tls;

pub use api::{GatewayVersion, ZeebeApi};
pub use client::{ClientFactory, GrpcClientFactory, GrpcZeebeClient, ZeebeClient};
pub use endpoint::{EndpointDescriptor, EndpointKind, RedactedEndpoint};
pub use error::{get_error_reason, ConnectError, ErrorReason, GatewayError, SerializedError};
pub use naming::{prepare_deployment_name, DiagramType};
pub use options::ConnectionOptions;
pub use services::{
    FileSystem, Flags, LocalFileSystem, NativeTrustStore, TrustStore, ZEEBE_SSL_CERTIFICATE,
};
pub use tls::TlsMaterial;

// Response types handed back to callers
pub use zeebe_proto::{CreateProcessInstanceResponse, DeployResourceResponse, TopologyResponse};
