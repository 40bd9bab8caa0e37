// ABOUTME: HTTP implementation of ClusterClient over the control plane REST API.
// ABOUTME: JSON request/response via reqwest, keyed by cluster + service name.

use super::error::{ClusterError, TransportSnafu};
use super::types::{Service, TaskDefinition};
use super::{ClusterClient, ServiceUpdate};
use crate::types::{SlotName, TaskDefinitionRef};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

/// Connection parameters for the control plane, resolved from CLI flags and
/// environment before any request is made.
#[derive(Debug, Clone)]
pub struct ControlPlaneConfig {
    /// Target region; selects the regional API endpoint.
    pub region: String,
    /// Cluster all service operations are scoped to.
    pub cluster: String,
    /// Explicit endpoint override; defaults to the regional endpoint.
    pub endpoint: Option<String>,
    /// Bearer token attached to every request, if present.
    pub token: Option<String>,
}

impl ControlPlaneConfig {
    /// The base URL requests are issued against.
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://fleet.{}.internal", self.region))
    }
}

/// Concrete `ClusterClient` speaking the control plane's JSON API.
pub struct HttpClusterClient {
    http: reqwest::Client,
    base: String,
    cluster: String,
    token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateServiceRequest<'a> {
    service_name: &'a SlotName,
    task_definition: &'a TaskDefinitionRef,
    desired_count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateServiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    task_definition: Option<TaskDefinitionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    desired_count: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterTaskDefinitionResponse {
    task_definition: TaskDefinitionRef,
}

impl HttpClusterClient {
    pub fn new(config: &ControlPlaneConfig) -> Result<Self, ClusterError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("slotctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(TransportSnafu)?;

        Ok(Self {
            http,
            base: config.endpoint().trim_end_matches('/').to_string(),
            cluster: config.cluster.clone(),
            token: config.token.clone(),
        })
    }

    fn service_url(&self, name: &SlotName) -> String {
        format!(
            "{}/v1/clusters/{}/services/{}",
            self.base, self.cluster, name
        )
    }

    fn services_url(&self) -> String {
        format!("{}/v1/clusters/{}/services", self.base, self.cluster)
    }

    fn task_definition_url(&self, task: &TaskDefinitionRef) -> String {
        // Revision references contain ':' which must not split the path.
        format!(
            "{}/v1/task-definitions/{}",
            self.base,
            urlencoding::encode(task.as_str())
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map a non-success response to a `ClusterError`, reading the body for
    /// the control plane's message. 404 becomes `NotFound` when `name` is set.
    async fn error_for(
        response: reqwest::Response,
        name: Option<&SlotName>,
    ) -> ClusterError {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND
            && let Some(name) = name
        {
            return ClusterError::NotFound {
                name: name.to_string(),
            };
        }

        let message = response.text().await.unwrap_or_default();
        ClusterError::Api {
            status: status.as_u16(),
            message,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClusterError> {
        let body = response.text().await.context(TransportSnafu)?;
        serde_json::from_str(&body).map_err(|e| ClusterError::InvalidResponse {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ClusterClient for HttpClusterClient {
    async fn describe_service(&self, name: &SlotName) -> Result<Service, ClusterError> {
        tracing::debug!(service = %name, "describing service");
        let response = self
            .authorize(self.http.get(self.service_url(name)))
            .send()
            .await
            .context(TransportSnafu)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, Some(name)).await);
        }

        Self::read_json(response).await
    }

    async fn describe_task_definition(
        &self,
        task: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, ClusterError> {
        tracing::debug!(task = %task, "describing task definition");
        let response = self
            .authorize(self.http.get(self.task_definition_url(task)))
            .send()
            .await
            .context(TransportSnafu)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, None).await);
        }

        Self::read_json(response).await
    }

    async fn register_task_definition(
        &self,
        definition: &TaskDefinition,
    ) -> Result<TaskDefinitionRef, ClusterError> {
        tracing::debug!(family = %definition.family, "registering task definition revision");
        let response = self
            .authorize(
                self.http
                    .post(format!("{}/v1/task-definitions", self.base)),
            )
            .json(definition)
            .send()
            .await
            .context(TransportSnafu)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, None).await);
        }

        let registered: RegisterTaskDefinitionResponse = Self::read_json(response).await?;
        Ok(registered.task_definition)
    }

    async fn create_service(
        &self,
        name: &SlotName,
        task: &TaskDefinitionRef,
        desired_count: u64,
    ) -> Result<(), ClusterError> {
        tracing::debug!(service = %name, task = %task, desired_count, "creating service");
        let response = self
            .authorize(self.http.post(self.services_url()))
            .json(&CreateServiceRequest {
                service_name: name,
                task_definition: task,
                desired_count,
            })
            .send()
            .await
            .context(TransportSnafu)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, None).await);
        }
        Ok(())
    }

    async fn update_service(
        &self,
        name: &SlotName,
        update: ServiceUpdate,
    ) -> Result<(), ClusterError> {
        tracing::debug!(
            service = %name,
            desired_count = ?update.desired_count,
            "updating service"
        );
        let response = self
            .authorize(self.http.patch(self.service_url(name)))
            .json(&UpdateServiceRequest {
                task_definition: update.task_definition,
                desired_count: update.desired_count,
            })
            .send()
            .await
            .context(TransportSnafu)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, Some(name)).await);
        }
        Ok(())
    }

    async fn delete_service(&self, name: &SlotName) -> Result<(), ClusterError> {
        tracing::debug!(service = %name, "deleting service");
        let response = self
            .authorize(self.http.delete(self.service_url(name)))
            .send()
            .await
            .context(TransportSnafu)?;

        if !response.status().is_success() {
            return Err(Self::error_for(response, Some(name)).await);
        }
        Ok(())
    }
}
