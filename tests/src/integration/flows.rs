//! # Integration Test Flows
//!
//! The catalog service, the three query subsystems and the gateway wired
//! together over one in-memory backend:
//!
//! 1. **Catalog → Paging**: a refresh decides which shards a page reads
//! 2. **Catalog → Assembly**: the newest shard holding a trace wins
//! 3. **Gateway → Chain node**: responses stamped and enriched
//! 4. **Failure paths**: backend outages and vanished shards

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use history_runtime::{HistoryNode, RuntimeConfig};
    use hq_06_history_gateway::StaticChainNode;
    use serde_json::{json, Value};
    use shared_types::search::memory::{BackendCall, InMemorySearchBackend};
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    async fn post(app: &Router, route: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(format!("/v1/history/{}", route))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn account_seqs(body: &Value) -> Vec<u64> {
        body["actions"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|a| a["account_action_seq"].as_u64())
            .collect()
    }

    // =============================================================================
    // CATALOG → PAGING
    // =============================================================================

    /// Before the first refresh the catalog is empty and pages are empty.
    #[tokio::test]
    async fn test_pages_empty_until_first_refresh() {
        let (catalog, app) = gateway(seeded_backend(), chain_node());

        let (status, body) = post(&app, "get_actions", json!({ "account_name": "alice" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["actions"], json!([]));

        catalog.refresh().await.unwrap();
        let (_, body) = post(&app, "get_actions", json!({ "account_name": "alice" })).await;
        assert_eq!(account_seqs(&body), vec![3, 2, 1, 0]);
        assert_eq!(body["last_irreversible_block"], json!(LAST_IRREVERSIBLE));
    }

    /// A shard created after startup becomes visible on the next refresh and
    /// continues the account's sequence.
    #[tokio::test]
    async fn test_new_shard_extends_history_after_refresh() {
        let backend = seeded_backend();
        let (catalog, app) = gateway(backend.clone(), chain_node());
        catalog.refresh().await.unwrap();

        for seq in 4..6u64 {
            let trx = format!("trx{}", seq);
            backend.insert("action_traces-1", &format!("a{}", seq), action_doc(seq, "alice", &trx));
            backend.insert("transaction_traces-1", &trx, trace_doc(&trx, seq, "executed"));
        }

        let (_, before) = post(&app, "get_actions", json!({ "account_name": "alice", "pos": -1, "offset": -1 })).await;
        assert_eq!(account_seqs(&before), vec![3]);

        let published = catalog.refresh().await.unwrap();
        assert_eq!(published.generation(), 2);

        let (_, newest) = post(&app, "get_actions", json!({ "account_name": "alice", "pos": -1, "offset": -1 })).await;
        assert_eq!(account_seqs(&newest), vec![5]);

        let (_, window) = post(&app, "get_actions", json!({ "account_name": "alice", "pos": 2, "offset": 3 })).await;
        assert_eq!(account_seqs(&window), vec![2, 3, 4, 5]);
        let memos: Vec<&Value> = window["actions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| &a["action_trace"]["act"]["data"]["memo"])
            .collect();
        assert_eq!(memos[3], &json!("invoice 5"));
    }

    /// Counting only touches shards from the snapshot, never the backend
    /// listing directly.
    #[tokio::test]
    async fn test_paging_reads_published_snapshot_only() {
        let backend = seeded_backend();
        let (catalog, app) = gateway(backend.clone(), chain_node());
        catalog.refresh().await.unwrap();
        backend.clear_calls();

        post(&app, "get_actions", json!({ "account_name": "alice" })).await;
        let calls = backend.calls();
        assert!(!calls.iter().any(|c| matches!(c, BackendCall::ListShards)));
        assert!(calls
            .iter()
            .any(|c| matches!(c, BackendCall::Count { shard } if shard == "action_traces-0")));
    }

    #[tokio::test]
    async fn test_find_actions_across_stack() {
        let (catalog, app) = gateway(seeded_backend(), chain_node());
        catalog.refresh().await.unwrap();

        let (status, body) = post(
            &app,
            "find_actions",
            json!({ "data": "invoice", "account_name": "alice", "from_date": "2018-06-10T00:00:00" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let seqs: Vec<&Value> = body["actions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| &a["global_action_seq"])
            .collect();
        assert_eq!(seqs, vec![&json!(1), &json!(2), &json!(3)]);
        assert!(body.get("last_irreversible_block").is_none());
    }

    // =============================================================================
    // CATALOG → ASSEMBLY → CHAIN NODE
    // =============================================================================

    #[tokio::test]
    async fn test_transaction_enriched_from_chain_node() {
        let (catalog, app) = gateway(seeded_backend(), chain_node());
        catalog.refresh().await.unwrap();

        let (status, body) = post(&app, "get_transaction", json!({ "id": "trx0" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!("trx0"));
        assert_eq!(body["block_num"], json!(block_of(0)));
        assert_eq!(body["trx"]["receipt"]["trx"], json!([0, "trx0"]));
        assert_eq!(body["trx"]["trx"]["signatures"], json!(["SIG_K1_alice"]));
        assert_eq!(body["last_irreversible_block"], json!(LAST_IRREVERSIBLE));
    }

    #[tokio::test]
    async fn test_transaction_without_chain_node_still_served() {
        let (catalog, app) = gateway(seeded_backend(), Arc::new(StaticChainNode::new()));
        catalog.refresh().await.unwrap();

        let (status, body) = post(&app, "get_transaction", json!({ "id": "trx1" })).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["trx"]["receipt"].get("trx").is_none());
        assert!(body["last_irreversible_block"].is_null());
    }

    /// Nested traces come back flattened with the raw ABI restored.
    #[tokio::test]
    async fn test_setabi_transaction_flattened_and_normalised() {
        let (catalog, app) = gateway(seeded_backend(), chain_node());
        catalog.refresh().await.unwrap();

        let (status, body) = post(&app, "get_transaction", json!({ "id": "abi0" })).await;
        assert_eq!(status, StatusCode::OK);
        let traces = body["traces"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        for trace in traces {
            assert_eq!(trace["act"]["data"]["abi"], json!(RAW_ABI));
        }
        assert_eq!(
            traces[0]["inline_traces"][0]["act"]["data"]["abi"],
            json!(RAW_ABI)
        );
    }

    /// A newer shard's copy of a trace wins over an older one.
    #[tokio::test]
    async fn test_newest_trace_copy_wins() {
        let backend = seeded_backend();
        backend.insert("transaction_traces-7", "trx1", trace_doc("trx1", 40, "executed"));
        let (catalog, app) = gateway(backend, chain_node());
        catalog.refresh().await.unwrap();

        let (_, body) = post(&app, "get_transaction", json!({ "id": "trx1" })).await;
        assert_eq!(body["block_num"], json!(block_of(40)));
    }

    #[tokio::test]
    async fn test_hard_failed_transaction_is_not_found() {
        let backend = seeded_backend();
        backend.insert("transaction_traces-0", "bad", trace_doc("bad", 9, "hard_fail"));
        let (catalog, app) = gateway(backend, chain_node());
        catalog.refresh().await.unwrap();

        let (status, body) = post(&app, "get_transaction", json!({ "id": "bad" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], json!(404));
    }

    // =============================================================================
    // ACCOUNTS
    // =============================================================================

    #[tokio::test]
    async fn test_account_lookups() {
        let backend = seeded_backend();
        backend.insert(
            "accounts-1",
            "dave",
            json!({
                "name": "dave",
                "pub_keys": [{ "key": ALICE_KEY, "permission": "active" }],
                "account_controls": [{ "name": "alice", "permission": "owner" }]
            }),
        );
        let (catalog, app) = gateway(backend, chain_node());
        catalog.refresh().await.unwrap();

        let (_, keys) = post(&app, "get_key_accounts", json!({ "public_key": ALICE_KEY })).await;
        assert_eq!(keys, json!({ "account_names": ["alice", "dave"] }));

        let (_, controlled) = post(
            &app,
            "get_controlled_accounts",
            json!({ "controlling_account": "alice" }),
        )
        .await;
        assert_eq!(controlled, json!({ "controlled_accounts": ["carol", "dave"] }));
    }

    // =============================================================================
    // FAILURE PATHS
    // =============================================================================

    /// A failed refresh keeps serving the previous snapshot and shows up in
    /// `/health`.
    #[tokio::test]
    async fn test_outage_keeps_previous_snapshot() {
        let backend = seeded_backend();
        let (catalog, app) = gateway(backend.clone(), chain_node());
        catalog.refresh().await.unwrap();

        backend.set_failing(true);
        assert!(catalog.refresh().await.is_err());
        let status = catalog.status();
        assert_eq!(status.generation, 1);
        assert_eq!(status.failures, 1);
        assert!(status.last_error.is_some());

        backend.set_failing(false);
        let (_, body) = post(&app, "get_actions", json!({ "account_name": "alice", "pos": 0, "offset": 0 })).await;
        assert_eq!(account_seqs(&body), vec![0]);

        let health = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(health.into_body(), usize::MAX)
            .await
            .unwrap();
        let health: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(health["failures"], json!(1));
        assert_eq!(health["shards"]["action_traces"], json!(1));
    }

    /// A trace shard dropped after the refresh is skipped by lookups.
    #[tokio::test]
    async fn test_dropped_trace_shard_skipped() {
        let backend = seeded_backend();
        backend.insert("transaction_traces-1", "late", trace_doc("late", 9, "executed"));
        let (catalog, app) = gateway(backend.clone(), chain_node());
        catalog.refresh().await.unwrap();

        backend.delete_shard("transaction_traces-1");
        let (status, _) = post(&app, "get_transaction", json!({ "id": "trx2" })).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = post(&app, "get_transaction", json!({ "id": "late" })).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_backend_outage_is_internal_error() {
        let backend = seeded_backend();
        let (catalog, app) = gateway(backend.clone(), chain_node());
        catalog.refresh().await.unwrap();
        backend.set_failing(true);

        let (status, body) = post(&app, "get_actions", json!({ "account_name": "alice" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], json!(500));

        let (status, _) = post(&app, "get_key_accounts", json!({ "public_key": ALICE_KEY })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    // =============================================================================
    // RUNTIME
    // =============================================================================

    /// The assembled node refreshes on its own and serves until shut down.
    #[tokio::test]
    async fn test_history_node_lifecycle() {
        let backend: Arc<InMemorySearchBackend> = seeded_backend();
        let mut config = RuntimeConfig {
            port: 0,
            catalog_refresh_interval: Duration::from_millis(50),
            ..Default::default()
        };
        config.gateway.host = IpAddr::V4(Ipv4Addr::LOCALHOST);

        let node = HistoryNode::with_adapters(config, backend.clone(), chain_node()).unwrap();
        let catalog = node.catalog();
        let listener = node.bind().await.unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(node.serve(listener, async {
            let _ = rx.await;
        }));

        for _ in 0..100 {
            if catalog.status().generation >= 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(catalog.status().generation >= 2);

        tx.send(()).unwrap();
        handle.await.unwrap().unwrap();

        // Refreshing stops with the server.
        let generation = catalog.status().generation;
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(catalog.status().generation, generation);
    }
}
