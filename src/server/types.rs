// src/server/types.rs

use serde::{Deserialize, Serialize};

use crate::types::{ContainerIdentity, Operation};

/// JSON body of a trigger request.
///
/// `container_name` is optional at the schema level so that a missing name
/// is reported with the resolver's own message.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RequestData {
    #[serde(default)]
    pub container_name: Option<String>,
}

/// Acknowledgement returned once a trigger has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReturnMessage {
    pub message: String,
    pub container_name: String,
    pub compose_file: String,
}

impl ReturnMessage {
    pub fn accepted(operation: Operation, identity: &ContainerIdentity) -> Self {
        Self {
            message: operation.status_token().to_string(),
            container_name: identity.name.clone(),
            compose_file: identity.compose_file.clone(),
        }
    }
}

/// Body of every rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}
