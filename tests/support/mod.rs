// ABOUTME: Shared test support: an in-memory control plane double.
// ABOUTME: Reconciles updates instantly unless a slot is marked stuck.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use slotctl::cluster::{
    ClusterClient, ClusterError, ContainerDefinition, Service, ServiceStatus, ServiceUpdate,
    TaskDefinition,
};
use slotctl::types::{ImageRef, SlotName, TaskDefinitionRef};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

/// Record of one mutating control plane call, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RegisterTask {
        family: String,
    },
    CreateService {
        name: String,
        task: String,
        desired: u64,
    },
    UpdateService {
        name: String,
        task: Option<String>,
        desired: Option<u64>,
    },
    DeleteService {
        name: String,
    },
}

#[derive(Default)]
struct State {
    services: HashMap<String, Service>,
    tasks: HashMap<String, TaskDefinition>,
    revisions: HashMap<String, u64>,
    calls: Vec<Call>,
}

/// In-memory control plane. Updates reconcile immediately (running becomes
/// desired, pending drops to zero) except for slots marked stuck, whose
/// pending count stays at 1 so convergence never happens.
#[derive(Default)]
pub struct FakeCluster {
    state: Mutex<State>,
    stuck: Mutex<HashSet<String>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a service. Desired count mirrors the running count.
    pub fn with_service(
        self,
        name: &str,
        status: ServiceStatus,
        running: u64,
        task: &str,
    ) -> Self {
        let service = Service {
            service_name: SlotName::new(name).unwrap(),
            status,
            desired_count: running,
            running_count: running,
            pending_count: 0,
            task_definition: TaskDefinitionRef::from(task),
        };
        self.state
            .lock()
            .unwrap()
            .services
            .insert(name.to_string(), service);
        self
    }

    /// Seed a registered task definition revision.
    pub fn with_task_definition(self, reference: &str, definition: TaskDefinition) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let revision = reference
                .rsplit_once(':')
                .and_then(|(_, r)| r.parse().ok())
                .unwrap_or(1);
            let known = state
                .revisions
                .entry(definition.family.clone())
                .or_insert(0);
            *known = (*known).max(revision);
            state.tasks.insert(reference.to_string(), definition);
        }
        self
    }

    /// Make updates to `name` never converge: pending stays at 1.
    pub fn with_stuck_slot(self, name: &str) -> Self {
        self.stuck.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn has_service(&self, name: &str) -> bool {
        self.state.lock().unwrap().services.contains_key(name)
    }

    pub fn running_count(&self, name: &str) -> Option<u64> {
        self.state
            .lock()
            .unwrap()
            .services
            .get(name)
            .map(|s| s.running_count)
    }

    pub fn task_of(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .services
            .get(name)
            .map(|s| s.task_definition.to_string())
    }

    fn is_stuck(&self, name: &str) -> bool {
        self.stuck.lock().unwrap().contains(name)
    }
}

/// A minimal single-container task definition for seeding tests.
pub fn task_definition(family: &str, image: &str) -> TaskDefinition {
    TaskDefinition {
        family: family.to_string(),
        container_definitions: vec![ContainerDefinition {
            name: "app".to_string(),
            image: ImageRef::parse(image).unwrap(),
            extra: BTreeMap::new(),
        }],
        volumes: Vec::new(),
    }
}

#[async_trait]
impl ClusterClient for FakeCluster {
    async fn describe_service(&self, name: &SlotName) -> Result<Service, ClusterError> {
        self.state
            .lock()
            .unwrap()
            .services
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| ClusterError::NotFound {
                name: name.to_string(),
            })
    }

    async fn describe_task_definition(
        &self,
        task: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, ClusterError> {
        self.state
            .lock()
            .unwrap()
            .tasks
            .get(task.as_str())
            .cloned()
            .ok_or_else(|| ClusterError::Api {
                status: 404,
                message: format!("unknown task definition: {task}"),
            })
    }

    async fn register_task_definition(
        &self,
        definition: &TaskDefinition,
    ) -> Result<TaskDefinitionRef, ClusterError> {
        let mut state = self.state.lock().unwrap();
        let revision = state
            .revisions
            .entry(definition.family.clone())
            .and_modify(|r| *r += 1)
            .or_insert(1);
        let reference = format!("{}:{}", definition.family, revision);
        state.tasks.insert(reference.clone(), definition.clone());
        state.calls.push(Call::RegisterTask {
            family: definition.family.clone(),
        });
        Ok(TaskDefinitionRef::new(reference))
    }

    async fn create_service(
        &self,
        name: &SlotName,
        task: &TaskDefinitionRef,
        desired_count: u64,
    ) -> Result<(), ClusterError> {
        let stuck = self.is_stuck(name.as_str());
        let mut state = self.state.lock().unwrap();
        let service = Service {
            service_name: name.clone(),
            status: ServiceStatus::Active,
            desired_count,
            running_count: if stuck { 0 } else { desired_count },
            pending_count: if stuck { 1 } else { 0 },
            task_definition: task.clone(),
        };
        state.services.insert(name.to_string(), service);
        state.calls.push(Call::CreateService {
            name: name.to_string(),
            task: task.to_string(),
            desired: desired_count,
        });
        Ok(())
    }

    async fn update_service(
        &self,
        name: &SlotName,
        update: ServiceUpdate,
    ) -> Result<(), ClusterError> {
        let stuck = self.is_stuck(name.as_str());
        let mut state = self.state.lock().unwrap();
        let service =
            state
                .services
                .get_mut(name.as_str())
                .ok_or_else(|| ClusterError::NotFound {
                    name: name.to_string(),
                })?;

        if let Some(task) = &update.task_definition {
            service.task_definition = task.clone();
        }
        if let Some(desired) = update.desired_count {
            service.desired_count = desired;
            if stuck {
                service.pending_count = 1;
            } else {
                service.running_count = desired;
                service.pending_count = 0;
            }
        }

        state.calls.push(Call::UpdateService {
            name: name.to_string(),
            task: update.task_definition.map(|t| t.to_string()),
            desired: update.desired_count,
        });
        Ok(())
    }

    async fn delete_service(&self, name: &SlotName) -> Result<(), ClusterError> {
        let mut state = self.state.lock().unwrap();
        state
            .services
            .remove(name.as_str())
            .ok_or_else(|| ClusterError::NotFound {
                name: name.to_string(),
            })?;
        state.calls.push(Call::DeleteService {
            name: name.to_string(),
        });
        Ok(())
    }
}
