// ABOUTME: Wire types mirroring the control plane's JSON shapes.
// ABOUTME: Services carry counts and a task reference; task definitions are immutable.

use crate::types::{ImageRef, SlotName, TaskDefinitionRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Lifecycle status reported by the control plane for a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Active,
    Inactive,
    Draining,
    #[serde(other)]
    Unknown,
}

/// A named deployment slot as the control plane reports it. Counts are
/// eventually consistent; `pending_count == 0` means the last requested
/// change has been fully applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub service_name: SlotName,
    pub status: ServiceStatus,
    pub desired_count: u64,
    pub running_count: u64,
    pub pending_count: u64,
    pub task_definition: TaskDefinitionRef,
}

impl Service {
    /// A slot is serving traffic when it is active with tasks running.
    pub fn is_serving(&self) -> bool {
        self.status == ServiceStatus::Active && self.running_count > 0
    }
}

/// One container entry within a task definition. Fields this tool does not
/// interpret (ports, environment, limits) are carried through `extra` so a
/// republished revision does not lose them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    pub name: String,
    pub image: ImageRef,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A named volume attached to a task definition, passed through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub name: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// An immutable template for how to run a container. New revisions are
/// created by `register_task_definition`; revisions are never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub family: String,
    pub container_definitions: Vec<ContainerDefinition>,
    #[serde(default)]
    pub volumes: Vec<Volume>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_deserializes_from_control_plane_json() {
        let service: Service = serde_json::from_str(
            r#"{
                "serviceName": "api-blue",
                "status": "ACTIVE",
                "desiredCount": 3,
                "runningCount": 3,
                "pendingCount": 0,
                "taskDefinition": "api:7"
            }"#,
        )
        .unwrap();

        assert_eq!(service.service_name.as_str(), "api-blue");
        assert_eq!(service.status, ServiceStatus::Active);
        assert!(service.is_serving());
    }

    #[test]
    fn unrecognized_status_maps_to_unknown() {
        let service: Service = serde_json::from_str(
            r#"{
                "serviceName": "api",
                "status": "PROVISIONING",
                "desiredCount": 0,
                "runningCount": 0,
                "pendingCount": 0,
                "taskDefinition": "api:1"
            }"#,
        )
        .unwrap();

        assert_eq!(service.status, ServiceStatus::Unknown);
        assert!(!service.is_serving());
    }

    #[test]
    fn container_definition_round_trips_unknown_fields() {
        let json = r#"{
            "name": "app",
            "image": "nginx:1.27",
            "portMappings": [{"containerPort": 80}],
            "memory": 256
        }"#;

        let def: ContainerDefinition = serde_json::from_str(json).unwrap();
        assert!(def.extra.contains_key("portMappings"));
        assert!(def.extra.contains_key("memory"));

        let back = serde_json::to_value(&def).unwrap();
        assert_eq!(back["memory"], 256);
    }
}
