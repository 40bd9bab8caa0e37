// ABOUTME: Tests for task definition republishing.
// ABOUTME: Image override, passthrough of family and volumes, ambiguity failure.

mod support;

use slotctl::cluster::{ClusterClient, Volume};
use slotctl::rollout::{RolloutError, TaskDefinitionPublisher};
use slotctl::types::{ImageRef, TaskDefinitionRef};
use std::collections::BTreeMap;
use support::{Call, FakeCluster, task_definition};

fn current() -> TaskDefinitionRef {
    TaskDefinitionRef::from("api:1")
}

#[tokio::test]
async fn publish_without_override_keeps_the_image() {
    let cluster = FakeCluster::new()
        .with_task_definition("api:1", task_definition("api", "registry/app:v1"));

    let publisher = TaskDefinitionPublisher::new(None);
    let new_ref = publisher.publish(&cluster, &current()).await.unwrap();
    assert_eq!(new_ref.as_str(), "api:2");

    let registered = cluster
        .describe_task_definition(&new_ref)
        .await
        .unwrap();
    assert_eq!(
        registered.container_definitions[0].image.as_str(),
        "registry/app:v1"
    );
}

#[tokio::test]
async fn publish_with_override_swaps_the_image() {
    let cluster = FakeCluster::new()
        .with_task_definition("api:1", task_definition("api", "registry/app:v1"));

    let publisher =
        TaskDefinitionPublisher::new(Some(ImageRef::parse("registry/app:v2").unwrap()));
    let new_ref = publisher.publish(&cluster, &current()).await.unwrap();

    let registered = cluster
        .describe_task_definition(&new_ref)
        .await
        .unwrap();
    assert_eq!(
        registered.container_definitions[0].image.as_str(),
        "registry/app:v2"
    );
}

#[tokio::test]
async fn family_and_volumes_pass_through_verbatim() {
    let mut definition = task_definition("api", "registry/app:v1");
    definition.volumes = vec![Volume {
        name: "data".to_string(),
        extra: BTreeMap::from([(
            "host".to_string(),
            serde_json::json!({"sourcePath": "/var/data"}),
        )]),
    }];
    let cluster = FakeCluster::new().with_task_definition("api:1", definition);

    let publisher =
        TaskDefinitionPublisher::new(Some(ImageRef::parse("registry/app:v2").unwrap()));
    let new_ref = publisher.publish(&cluster, &current()).await.unwrap();

    let registered = cluster
        .describe_task_definition(&new_ref)
        .await
        .unwrap();
    assert_eq!(registered.family, "api");
    assert_eq!(registered.volumes.len(), 1);
    assert_eq!(registered.volumes[0].name, "data");
    assert!(registered.volumes[0].extra.contains_key("host"));
}

#[tokio::test]
async fn multi_container_definition_is_rejected_without_registering() {
    let mut definition = task_definition("api", "registry/app:v1");
    definition
        .container_definitions
        .push(definition.container_definitions[0].clone());
    let cluster = FakeCluster::new().with_task_definition("api:1", definition);

    let publisher = TaskDefinitionPublisher::new(None);
    let err = publisher
        .publish(&cluster, &current())
        .await
        .expect_err("publish should fail");

    assert!(
        matches!(err, RolloutError::AmbiguousContainer { ref family, count: 2 } if family == "api"),
        "unexpected error: {err}"
    );
    assert!(
        !cluster
            .calls()
            .iter()
            .any(|c| matches!(c, Call::RegisterTask { .. })),
        "nothing may be registered on failure"
    );
}

#[tokio::test]
async fn empty_definition_is_rejected() {
    let mut definition = task_definition("api", "registry/app:v1");
    definition.container_definitions.clear();
    let cluster = FakeCluster::new().with_task_definition("api:1", definition);

    let publisher = TaskDefinitionPublisher::new(None);
    let err = publisher
        .publish(&cluster, &current())
        .await
        .expect_err("publish should fail");
    assert!(matches!(
        err,
        RolloutError::AmbiguousContainer { count: 0, .. }
    ));
}
