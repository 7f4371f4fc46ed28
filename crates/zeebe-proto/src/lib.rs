//! gRPC protocol definitions for the Zeebe gateway.
//!
//! Generated from `proto/gateway.proto`, the subset of
//! `gateway_protocol.Gateway` needed by the modeler: the topology call,
//! resource deployment and process instance creation. Field numbers follow
//! the upstream gateway so messages stay wire compatible with any 8.x broker.

pub mod gateway_protocol {
    tonic::include_proto!("gateway_protocol");
}

// Re-export commonly used types for convenience
pub use gateway_protocol::*;
