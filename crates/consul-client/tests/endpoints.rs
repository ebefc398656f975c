mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{server_client, RecordingSink};
use consul_client::{
    BlockingOptions, Consistency, FilterOptions, KvPutOptions, KvTxnOp, KvVerb, QueryOptions,
    ServiceOptions, ServiceRegistration, SessionRequest, TxnOp, TxnResult,
};

#[tokio::test]
async fn test_kv_put_sends_raw_value_with_token() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/kv/k"))
        .and(header("X-Consul-Token", "T"))
        .and(header("content-type", "application/octet-stream"))
        .and(body_string("v"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink.clone());
    let opts = KvPutOptions {
        base: QueryOptions::default().token("T"),
        ..Default::default()
    };

    assert!(client.kv().put("k", "v", &opts).await);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_kv_put_failed_cas_returns_false() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/kv/lock"))
        .and(query_param("cas", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(false)))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink.clone());
    let opts = KvPutOptions {
        cas: Some(0),
        ..Default::default()
    };

    assert!(!client.kv().put("lock", "held", &opts).await);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_kv_get_missing_key_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink.clone());

    let pair = client.kv().get("missing", &BlockingOptions::default()).await;
    assert!(pair.is_none());
    assert_eq!(sink.events(), vec![("kv.get".to_string(), Some(404))]);
}

#[tokio::test]
async fn test_kv_get_collapses_single_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app/mode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "Key": "app/mode",
            "CreateIndex": 5,
            "ModifyIndex": 9,
            "LockIndex": 0,
            "Flags": 0,
            "Value": "Ymx1ZQ=="
        }])))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);

    let pair = client
        .kv()
        .get("app/mode", &BlockingOptions::default())
        .await
        .unwrap();
    assert_eq!(pair.key, "app/mode");
    assert_eq!(pair.modify_index, 9);
    assert_eq!(pair.value_string().as_deref(), Some("blue"));
}

#[tokio::test]
async fn test_kv_list_passes_blocking_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app"))
        .and(query_param("recurse", "true"))
        .and(query_param("index", "42"))
        .and(query_param("wait", "5s"))
        .and(query_param("stale", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Key": "app/a", "Value": null},
            {"Key": "app/b", "Value": "Yg=="}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);
    let opts = BlockingOptions::default()
        .index(42)
        .wait(Duration::from_secs(5))
        .consistency(Consistency::Stale);

    let pairs = client.kv().list("app", &opts).await;
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].value, None);
    assert_eq!(pairs[1].decoded_value(), Some(b"b".to_vec()));
}

#[tokio::test]
async fn test_kv_keys_failure_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/kv/app"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink.clone());

    let keys = client.kv().keys("app", &Default::default()).await;
    assert!(keys.is_empty());
    assert_eq!(sink.events(), vec![("kv.keys".to_string(), Some(403))]);
}

#[tokio::test]
async fn test_catalog_nodes_with_node_meta() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/catalog/nodes"))
        .and(query_param("node-meta=env", "prod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ID": "n-1", "Node": "web-1", "Address": "10.0.0.1", "Meta": {"env": "prod"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);

    let nodes = client
        .catalog()
        .nodes(&FilterOptions::default().node_meta("env", "prod"))
        .await
        .unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].node, "web-1");
    assert_eq!(nodes[0].meta.get("env").map(String::as_str), Some("prod"));
}

#[tokio::test]
async fn test_catalog_node_unknown_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/catalog/node/ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);

    let node = client
        .catalog()
        .node("ghost", &FilterOptions::default())
        .await
        .unwrap();
    assert!(node.is_none());
}

#[tokio::test]
async fn test_health_service_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health/service/web"))
        .and(query_param("tag", "primary"))
        .and(query_param("tag", "v2"))
        .and(query_param("passing", "true"))
        .and(query_param("dc", "east"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "Node": {"Node": "web-1", "Address": "10.0.0.1"},
            "Service": {"ID": "web-1", "Service": "web", "Tags": ["primary", "v2"], "Port": 80},
            "Checks": [
                {"CheckID": "serfHealth", "Status": "passing"},
                {"CheckID": "service:web-1", "Status": "warning"}
            ]
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);
    let opts = ServiceOptions::default()
        .dc("east")
        .tag("primary")
        .tag("v2")
        .passing(true);

    let entries = client.health().service("web", &opts).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].service.port, 80);
    assert_eq!(entries[0].aggregated_status(), "warning");
}

#[tokio::test]
async fn test_health_read_propagates_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/health/node/web-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("rpc error"))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink.clone());

    let err = client
        .health()
        .node("web-1", &FilterOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: rpc error");
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_agent_register_failure_returns_false() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/agent/service/register"))
        .and(body_json(json!({"Name": "web", "Port": 8080})))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink.clone());
    let mut registration = ServiceRegistration::new("web");
    registration.port = Some(8080);

    assert!(!client.agent().service_register(&registration).await);
    assert_eq!(
        sink.events(),
        vec![("agent.service_register".to_string(), Some(500))]
    );
}

#[tokio::test]
async fn test_session_create_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/session/create"))
        .and(body_json(json!({"Name": "lock", "TTL": "15s"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ID": "adf4238a"})))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);
    let request = SessionRequest {
        name: "lock".to_string(),
        ttl: Some("15s".to_string()),
        ..Default::default()
    };

    let id = client
        .session()
        .create(&request, &QueryOptions::default())
        .await
        .unwrap();
    assert_eq!(id, "adf4238a");
}

#[tokio::test]
async fn test_session_info_unknown_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/session/info/nope"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink.clone());

    let info = client
        .session()
        .info("nope", &BlockingOptions::default())
        .await;
    assert!(info.is_none());
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_txn_success_results() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/txn"))
        .and(body_json(json!([
            {"KV": {"Verb": "set", "Key": "a", "Value": "MQ=="}}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Results": [{"KV": {"Key": "a", "ModifyIndex": 7}}],
            "Errors": null
        })))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);
    let ops = [TxnOp::Kv(KvTxnOp::new(KvVerb::Set, "a").with_value("1"))];

    let response = client
        .txn()
        .create(&ops, &QueryOptions::default())
        .await
        .unwrap();
    assert!(response.is_success());
    match &response.results[0] {
        TxnResult::Kv(pair) => assert_eq!(pair.modify_index, 7),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_txn_rollback_returns_errors() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/txn"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "Results": null,
            "Errors": [{"OpIndex": 1, "What": "failed to lock key \"b\""}]
        })))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);
    let ops = [
        TxnOp::Kv(KvTxnOp::new(KvVerb::Set, "a").with_value("1")),
        TxnOp::Kv(KvTxnOp::new(KvVerb::Lock, "b").with_session("s-1")),
    ];

    let response = client
        .txn()
        .create(&ops, &QueryOptions::default())
        .await
        .unwrap();
    assert!(!response.is_success());
    assert!(response.results.is_empty());
    assert_eq!(response.errors[0].op_index, 1);
}

#[tokio::test]
async fn test_snapshot_save_and_restore() {
    let server = MockServer::start().await;
    let archive = vec![0x1f, 0x8b, 0x08, 0x00, 0xff];

    Mock::given(method("GET"))
        .and(path("/v1/snapshot"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/x-gzip")
                .set_body_bytes(archive.clone()),
        )
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/snapshot"))
        .and(header("content-type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink.clone());

    let saved = client
        .snapshot()
        .save(&QueryOptions::default())
        .await
        .unwrap();
    assert_eq!(saved, archive);
    assert!(client.snapshot().restore(saved, &QueryOptions::default()).await);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_status_leader() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/status/leader"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("10.0.0.2:8300")))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let client = server_client(&server.uri(), sink);

    assert_eq!(client.status().leader().await.unwrap(), "10.0.0.2:8300");
}
