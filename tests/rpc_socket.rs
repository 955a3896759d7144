//! The provider API served over a real Unix domain socket.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::UnixStream;

use scc_csi_provider::config::ServerConfig;
use scc_csi_provider::resilience::BackoffPolicy;
use scc_csi_provider::rpc::{MountRequest, MountResponse, VersionResponse};
use scc_csi_provider::{
    ErrorCode, MountPipeline, ProviderAdapter, ProviderServer, Shutdown, SpringConfigClient,
};

mod common;

async fn send(socket: &Path, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let stream = UnixStream::connect(socket).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(async move {
        let _ = conn.await;
    });

    let response = sender.send_request(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn mount_request(request: &MountRequest) -> Request<Body> {
    Request::post("/v1alpha1/mount")
        .header(header::HOST, "localhost")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(request).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn test_mount_and_version_over_socket() {
    let config_server = common::start_static_server(vec![
        ("/config/some/testing.json", 200, r#"{"some":"json"}"#),
        ("/springconfig/some/testing/master/abc.conf", 200, "content abc.def"),
    ])
    .await;

    let socket_dir = tempfile::tempdir().unwrap();
    let target_dir = tempfile::tempdir().unwrap();
    let socket_path = socket_dir.path().join("provider.sock");

    let client = SpringConfigClient::new(
        reqwest::Client::builder().no_proxy().build().unwrap(),
        BackoffPolicy::disabled(),
    );
    let adapter = Arc::new(ProviderAdapter::new(MountPipeline::new(client)));
    let server = ProviderServer::new(
        adapter,
        &ServerConfig {
            socket_path: socket_path.to_string_lossy().into_owned(),
            request_timeout_secs: 10,
        },
    );
    let listener = server.bind().unwrap();
    let shutdown = Shutdown::new();
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    // Version
    let (status, body) = send(
        &socket_path,
        Request::get("/v1alpha1/version")
            .header(header::HOST, "localhost")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let version: VersionResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(version.version, "v1alpha1");

    // Successful mount
    let attributes = serde_json::json!({
        "serverAddress": config_server.url(),
        "application": "some",
        "profile": "testing",
        "fileType": "json",
        "raw": r#"[{"source":"abc.conf","target":"def.conf"}]"#,
    })
    .to_string();
    let request = MountRequest {
        attributes,
        secrets: "{}".into(),
        target_path: target_dir.path().to_string_lossy().into_owned(),
        permission: "420".into(),
    };
    let (status, body) = send(&socket_path, mount_request(&request)).await;
    assert_eq!(status, StatusCode::OK);
    let response: MountResponse = serde_json::from_slice(&body).unwrap();
    assert!(response.is_success());
    assert_eq!(response.object_version.len(), 2);
    assert_eq!(
        std::fs::read_to_string(target_dir.path().join("some-testing.json")).unwrap(),
        r#"{"some":"json"}"#
    );
    assert_eq!(
        std::fs::read_to_string(target_dir.path().join("def.conf")).unwrap(),
        "content abc.def"
    );

    // Missing target path
    let (status, body) = send(
        &socket_path,
        mount_request(&MountRequest {
            target_path: String::new(),
            ..request.clone()
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: MountResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(response.error.unwrap().code, ErrorCode::MissingTargetPath);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
    assert!(!socket_path.exists());
}
