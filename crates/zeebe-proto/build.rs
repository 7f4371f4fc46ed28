use std::error::Error;

// Responses are handed back to callers as JSON.
const SERIALIZED: &[&str] = &[
    ".gateway_protocol.TopologyResponse",
    ".gateway_protocol.BrokerInfo",
    ".gateway_protocol.Partition",
    ".gateway_protocol.DeployResourceResponse",
    ".gateway_protocol.Deployment",
    ".gateway_protocol.ProcessMetadata",
    ".gateway_protocol.DecisionMetadata",
    ".gateway_protocol.DecisionRequirementsMetadata",
    ".gateway_protocol.CreateProcessInstanceResponse",
];

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=proto/gateway.proto");

    // Parsed in-process so no protoc install is needed.
    let descriptors = protox::compile(["proto/gateway.proto"], ["proto"])?;

    // Nested types (the Deployment oneof, Partition enums) inherit their parent's attributes.
    let mut builder = tonic_prost_build::configure()
        .build_server(false)
        .field_attribute("gateway_protocol.Deployment.Metadata", "#[serde(flatten)]");

    for path in SERIALIZED {
        builder = builder.type_attribute(
            *path,
            "#[derive(serde::Serialize)] #[serde(rename_all = \"camelCase\")]",
        );
    }

    builder.compile_fds(descriptors)?;
    Ok(())
}
