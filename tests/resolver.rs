use std::sync::Arc;

use compose_hook::resolve::{ContainerResolver, DockerCli, ResolutionError};
use compose_hook::types::ContainerIdentity;
use compose_hook_test_utils::builders::{
    inspect_with_compose_file, inspect_without_compose_labels, ps_listing,
};
use compose_hook_test_utils::{FakeExecutor, init_tracing};

fn resolver(executor: FakeExecutor) -> ContainerResolver {
    ContainerResolver::new(Arc::new(executor), DockerCli::default())
}

#[tokio::test]
async fn resolves_known_container_to_its_compose_file() {
    init_tracing();
    let executor = FakeExecutor::new()
        .succeed("docker ps -a --format=json", ps_listing(&["db", "web"]))
        .succeed("docker inspect web", inspect_with_compose_file("/srv/app/compose.yml"));

    let identity = resolver(executor).resolve(Some("web")).await.unwrap();

    assert_eq!(
        identity,
        ContainerIdentity {
            name: "web".into(),
            compose_file: "/srv/app/compose.yml".into(),
        }
    );
}

#[tokio::test]
async fn name_must_match_exactly() {
    init_tracing();
    let executor = FakeExecutor::new().succeed(
        "docker ps -a --format=json",
        ps_listing(&["web-1", "myweb"]),
    );

    let err = resolver(executor).resolve(Some("web")).await.unwrap_err();
    assert!(matches!(err, ResolutionError::NotFound));
    assert_eq!(err.to_string(), "container_name not found");
}

#[tokio::test]
async fn empty_listing_means_not_found() {
    init_tracing();
    let executor = FakeExecutor::new().succeed("docker ps -a --format=json", "");

    let err = resolver(executor).resolve(Some("web")).await.unwrap_err();
    assert!(matches!(err, ResolutionError::NotFound));
}

#[tokio::test]
async fn empty_name_never_reaches_the_runtime() {
    init_tracing();
    let executor = FakeExecutor::new();
    let executed = executor.executed();

    let err = resolver(executor).resolve(Some("")).await.unwrap_err();
    assert!(matches!(err, ResolutionError::NoContainerName));
    assert!(executed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_compose_label_is_resolution_error() {
    init_tracing();
    let executor = FakeExecutor::new()
        .succeed("docker ps -a --format=json", ps_listing(&["standalone"]))
        .succeed("docker inspect standalone", inspect_without_compose_labels());

    let err = resolver(executor)
        .resolve(Some("standalone"))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::ComposeFileShape(_)));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn failing_inspect_is_normalized() {
    init_tracing();
    let executor = FakeExecutor::new()
        .succeed("docker ps -a --format=json", ps_listing(&["web"]))
        .fail("docker inspect web", 1, "Error: No such object: web");

    let err = resolver(executor).resolve(Some("web")).await.unwrap_err();
    assert_eq!(err.to_string(), "couldn't find compose file for web");
}

#[tokio::test]
async fn malformed_listing_line_is_reported() {
    init_tracing();
    let executor = FakeExecutor::new().succeed(
        "docker ps -a --format=json",
        "{\"Names\":\"db\"}\n{oops\n",
    );

    let err = resolver(executor).resolve(Some("web")).await.unwrap_err();
    assert!(matches!(err, ResolutionError::MalformedListing { line: 2, .. }));
}

#[tokio::test]
async fn listing_failure_is_not_a_client_error() {
    init_tracing();
    let executor = FakeExecutor::new().fail("docker ps -a --format=json", 1, "daemon down");

    let err = resolver(executor).resolve(Some("web")).await.unwrap_err();
    assert!(matches!(err, ResolutionError::Command(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn container_name_is_passed_as_single_argument() {
    init_tracing();
    let hostile = "web; rm -rf /";
    let executor = FakeExecutor::new()
        .succeed("docker ps -a --format=json", ps_listing(&[hostile]))
        .succeed(
            &format!("docker inspect {hostile}"),
            inspect_with_compose_file("/srv/app/compose.yml"),
        );
    let executed = executor.executed();

    resolver(executor).resolve(Some(hostile)).await.unwrap();

    let inspect = executed.lock().unwrap()[1].clone();
    assert_eq!(inspect.program, "docker");
    assert_eq!(inspect.args, vec!["inspect".to_string(), hostile.to_string()]);
}

#[tokio::test]
async fn custom_docker_binary_is_used() {
    init_tracing();
    let executor = FakeExecutor::new()
        .succeed("/opt/bin/docker ps -a --format=json", ps_listing(&["web"]))
        .succeed("/opt/bin/docker inspect web", inspect_with_compose_file("/c.yml"));
    let resolver = ContainerResolver::new(Arc::new(executor), DockerCli::new("/opt/bin/docker"));

    let identity = resolver.resolve(Some("web")).await.unwrap();
    assert_eq!(identity.compose_file, "/c.yml");
}
