/*!
 * Gateway subcommands
 *
 * Each command drives the endpoint client manager once and reports the
 * outcome as `{ "success": true, "response": ... }` or
 * `{ "success": false, "reason": ... }`.
 */

pub mod endpoint;

use crate::error::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use zeebe_connect::{DiagramType, EndpointDescriptor, ZeebeApi};

pub use endpoint::{EndpointArgs, EndpointTypeArg};

/// Outcome printed by the gateway subcommands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Value>,
}

impl CommandOutput {
    pub fn from_result<T, E>(result: std::result::Result<T, E>) -> Result<Self>
    where
        T: Serialize,
        E: Serialize,
    {
        Ok(match result {
            Ok(response) => Self {
                success: true,
                response: Some(serde_json::to_value(response)?),
                reason: None,
            },
            Err(reason) => Self {
                success: false,
                response: None,
                reason: Some(serde_json::to_value(reason)?),
            },
        })
    }
}

pub async fn check(api: &ZeebeApi, endpoint: &EndpointDescriptor) -> Result<CommandOutput> {
    CommandOutput::from_result(api.check_connection(endpoint).await)
}

pub async fn deploy(
    api: &ZeebeApi,
    endpoint: &EndpointDescriptor,
    name: &str,
    file_path: &Path,
    diagram_type: DiagramType,
) -> Result<CommandOutput> {
    CommandOutput::from_result(api.deploy(endpoint, name, file_path, diagram_type).await)
}

/// Start an instance; `variables` must be a JSON object
pub async fn run(
    api: &ZeebeApi,
    endpoint: &EndpointDescriptor,
    process_id: &str,
    variables: &str,
) -> Result<CommandOutput> {
    let variables: Map<String, Value> = serde_json::from_str(variables)?;
    CommandOutput::from_result(api.run(endpoint, process_id, &variables).await)
}

pub async fn version(api: &ZeebeApi, endpoint: &EndpointDescriptor) -> Result<CommandOutput> {
    CommandOutput::from_result(api.get_gateway_version(endpoint).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zeebe_connect::{ErrorReason, GatewayVersion, SerializedError};

    #[test]
    fn test_success_shape() {
        let output = CommandOutput::from_result::<_, ErrorReason>(Ok(GatewayVersion {
            gateway_version: "8.2.0".to_string(),
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({ "success": true, "response": { "gatewayVersion": "8.2.0" } })
        );
    }

    #[test]
    fn test_unit_success_has_null_response() {
        let output = CommandOutput::from_result::<(), ErrorReason>(Ok(())).unwrap();

        assert!(output.success);
        assert_eq!(output.response, Some(Value::Null));
    }

    #[test]
    fn test_reason_shape() {
        let output =
            CommandOutput::from_result::<(), _>(Err(ErrorReason::ContactPointUnavailable)).unwrap();

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({ "success": false, "reason": "CONTACT_POINT_UNAVAILABLE" })
        );
    }

    #[test]
    fn test_serialized_error_shape() {
        let output = CommandOutput::from_result::<(), _>(Err(SerializedError {
            message: Some("Command rejected".to_string()),
            code: Some(3),
            details: None,
        }))
        .unwrap();

        assert_eq!(
            output.reason,
            Some(json!({ "message": "Command rejected", "code": 3 }))
        );
    }
}
