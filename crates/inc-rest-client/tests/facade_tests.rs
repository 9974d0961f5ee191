//! End-to-end tests of the client facade against a mock backend.

use inc_rest_api_contract::{FileBrowserFilter, NewModel};
use inc_rest_client::{ClientConfig, ErrorPresenter, RestClient, RestClientError};
use mockito::Matcher;
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Presenter that remembers every error it was handed
#[derive(Default)]
struct RecordingPresenter {
    presented: Mutex<Vec<String>>,
}

impl RecordingPresenter {
    fn presented(&self) -> Vec<String> {
        self.presented.lock().unwrap().clone()
    }
}

impl ErrorPresenter for RecordingPresenter {
    fn present(&self, error: &RestClientError) {
        self.presented.lock().unwrap().push(error.to_string());
    }
}

fn sample_model() -> NewModel {
    NewModel {
        domain: "image_recognition".to_string(),
        domain_flavour: "".to_string(),
        framework: "onnxrt".to_string(),
        id: "f00d".to_string(),
        input: None,
        model_path: "/models/resnet50.onnx".to_string(),
        output: None,
    }
}

#[tokio::test]
async fn test_request_is_sent_only_when_triggered() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/project")
        .match_body(Matcher::Json(json!({"id": 3})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 3, "name": "resnet"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    let request = client.get_project_details(3);
    assert!(!mock.matched_async().await);

    let details = request.send().await.unwrap();
    assert_eq!(details, json!({"id": 3, "name": "resnet"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_dropped_request_never_hits_the_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/list_model_zoo")
        .expect(0)
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    drop(client.list_model_zoo());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_pending_request_can_be_awaited_directly() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/project/list")
        .with_status(200)
        .with_body(r#"{"projects": []}"#)
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    let projects = client.get_project_list().await.unwrap();

    assert_eq!(projects, json!({"projects": []}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_workspace_path_is_recorded_even_when_request_fails() {
    let mut server = mockito::Server::new_async().await;
    let set_workspace = server
        .mock("POST", "/api/set_workspace")
        .match_body(Matcher::Json(json!({"path": "/ws"})))
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;
    let workloads = server
        .mock("POST", "/api/get_workloads_list")
        .match_body(Matcher::Json(json!({"workspace_path": "/ws"})))
        .with_status(200)
        .with_body(r#"{"workloads": []}"#)
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    let pending = client.set_workspace_path("/ws");
    assert_eq!(client.workspace_path().as_deref(), Some("/ws"));

    let err = pending.send().await.unwrap_err();
    assert!(matches!(err, RestClientError::UnexpectedResponse { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));

    client.get_all_models().send().await.unwrap();
    set_workspace.assert_async().await;
    workloads.assert_async().await;
}

#[tokio::test]
async fn test_workspace_path_used_while_set_request_is_still_pending() {
    let mut server = mockito::Server::new_async().await;
    let optimize = server
        .mock("POST", "/api/optimize")
        .match_body(Matcher::Json(json!({"workspace_path": "/ws", "id": "f00d"})))
        .with_status(200)
        .with_body(r#"{"exit_code": 0}"#)
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    let _never_sent = client.set_workspace_path("/ws");

    client.optimize(&sample_model()).send().await.unwrap();
    optimize.assert_async().await;
}

#[tokio::test]
async fn test_file_system_filter_query() {
    let mut server = mockito::Server::new_async().await;
    let all = server
        .mock("GET", "/api/filesystem")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("path".into(), "/home/user/".into()),
            Matcher::Regex("^[^&]*$".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let models = server
        .mock("GET", "/api/filesystem")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("path".into(), "/home/user/".into()),
            Matcher::UrlEncoded("filter".into(), "models".into()),
        ]))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    client
        .get_file_system("/home/user", FileBrowserFilter::All)
        .send()
        .await
        .unwrap();
    client
        .get_file_system("/home/user", FileBrowserFilter::Models)
        .send()
        .await
        .unwrap();

    all.assert_async().await;
    models.assert_async().await;
}

#[tokio::test]
async fn test_model_graph_repeats_group_parameter() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/model/graph")
        .match_query(Matcher::Regex("^path=/m/model.pb&group=a&group=b$".into()))
        .with_status(200)
        .with_body(r#"{"nodes": [], "edges": []}"#)
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    let graph = client
        .get_model_graph("/m/model.pb", Some(&["a", "b"][..]))
        .send()
        .await
        .unwrap();

    assert_eq!(graph["nodes"], json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_system_info_success_replaces_cache() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/system_info")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"sockets": 2, "cores_per_socket": 28}"#)
        .create_async()
        .await;

    let presenter = Arc::new(RecordingPresenter::default());
    let client = RestClient::from_url(&server.url())
        .unwrap()
        .with_error_presenter(presenter.clone());
    assert_eq!(client.system_info(), json!({}));

    client.get_system_info().unwrap().await.unwrap();

    assert_eq!(client.system_info(), json!({"sockets": 2, "cores_per_socket": 28}));
    assert!(presenter.presented().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_system_info_failure_goes_to_presenter_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/system_info")
        .with_status(503)
        .with_body(r#"{"error": "backend busy"}"#)
        .create_async()
        .await;

    let presenter = Arc::new(RecordingPresenter::default());
    let client = RestClient::from_url(&server.url())
        .unwrap()
        .with_error_presenter(presenter.clone());
    client.session().set_system_info(json!({"sockets": 1}));

    client.get_system_info().unwrap().await.unwrap();

    assert_eq!(client.system_info(), json!({"sockets": 1}));
    let presented = presenter.presented();
    assert_eq!(presented.len(), 1);
    assert!(presented[0].contains("backend busy"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_save_workload_sends_stamped_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/set_workspace")
        .with_status(200)
        .create_async()
        .await;
    let save = server
        .mock("POST", "/api/save_workload")
        .match_body(Matcher::Json(json!({"foo": 1, "workspace_path": "/ws"})))
        .with_status(200)
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    assert_eq!(client.set_workspace_path("/ws").send().await.unwrap(), Value::Null);

    let mut workload = Map::new();
    workload.insert("foo".to_string(), json!(1));
    client.save_workload(&mut workload).send().await.unwrap();

    assert_eq!(workload.get("workspace_path"), Some(&json!("/ws")));
    save.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_propagate_to_caller() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/benchmark/execute")
        .match_body(Matcher::Json(json!({"request_id": "r-9", "benchmark_id": 4})))
        .with_status(400)
        .with_body(r#"{"error": "benchmark already running"}"#)
        .create_async()
        .await;

    let presenter = Arc::new(RecordingPresenter::default());
    let client = RestClient::from_url(&server.url())
        .unwrap()
        .with_error_presenter(presenter.clone());

    let err = client.execute_benchmark(4, "r-9").send().await.unwrap_err();
    match err {
        RestClientError::ServerError { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(body, json!({"error": "benchmark already running"}));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(presenter.presented().is_empty());
}

#[tokio::test]
async fn test_typed_response_decoding() {
    #[derive(serde::Deserialize)]
    struct DefaultPath {
        path: String,
    }

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/get_default_path")
        .match_body(Matcher::Json(json!({"name": "workspace"})))
        .with_status(200)
        .with_body(r#"{"path": "/home/user/.neural_compressor"}"#)
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    let default: DefaultPath = client.get_default_path("workspace").send_json().await.unwrap();

    assert_eq!(default.path, "/home/user/.neural_compressor");
}

#[tokio::test]
async fn test_token_not_sent_by_default() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/dict/frameworks")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = RestClient::from_url(&server.url()).unwrap();
    assert_eq!(client.token(), None);
    client.set_token("abc");
    assert_eq!(client.token().as_deref(), Some("abc"));

    client.get_dictionary("frameworks").send().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_token_sent_when_attachment_enabled() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/get_possible_values")
        .match_header("authorization", "Bearer abc")
        .match_body(Matcher::Json(json!({"param": "dataset", "config": {"framework": "pytorch"}})))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let config = ClientConfig::from_url(&server.url())
        .unwrap()
        .with_attach_token(true);
    let client = RestClient::new(config).unwrap();
    client.set_token("abc");

    client
        .get_possible_values("dataset", Some(json!({"framework": "pytorch"})))
        .send()
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_token_set_after_building_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/project/list")
        .match_header("authorization", "Bearer late")
        .with_status(200)
        .with_body(r#"{"projects": []}"#)
        .create_async()
        .await;

    let config = ClientConfig::from_url(&server.url())
        .unwrap()
        .with_attach_token(true);
    let client = RestClient::new(config).unwrap();
    let request = client.get_project_list();
    client.set_token("late");

    request.send().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/list_model_zoo")
        .match_header("user-agent", "inc-dashboard/2.0")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let config = ClientConfig::from_url(&server.url())
        .unwrap()
        .with_user_agent("inc-dashboard/2.0")
        .with_timeout(Duration::from_secs(5));
    let client = RestClient::new(config).unwrap();

    client.list_model_zoo().send().await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_event_channels_shared_between_clones() {
    let client = RestClient::from_url("http://localhost:5000").unwrap();
    let observer = client.clone();
    let mut created = observer.events().project_created.subscribe();

    client.events().project_created.publish(true);

    assert!(created.recv().await.unwrap());
}
