//! Chain history seeded into the in-memory search backend.
//!
//! ```text
//! action_traces-0        alice seq 0..4
//! transaction_traces-0   one trace per alice action, plus "abi0" (setabi)
//! transactions-0         envelopes for trx0 and abi0
//! accounts-0             alice (key EOS_ALICE), carol (controlled by alice)
//! ```

use axum::Router;
use hq_01_shard_catalog::{CatalogReader, ShardCatalogService};
use hq_03_action_paging::ActionPagingService;
use hq_04_transaction_assembly::TransactionAssemblyService;
use hq_05_account_lookup::AccountLookupService;
use hq_06_history_gateway::{build_router, AppState, ChainBlock, ChainInfo, GatewayConfig, StaticChainNode};
use serde_json::{json, Value};
use shared_types::search::memory::InMemorySearchBackend;
use std::sync::Arc;

/// Irreversible head reported by the chain node.
pub const LAST_IRREVERSIBLE: u64 = 90;

/// Public key owned by alice.
pub const ALICE_KEY: &str = "EOS_ALICE";

/// Raw ABI carried by the `abi0` transaction's hex data.
pub const RAW_ABI: &str = "0e656f73696f3a3a6162692f312e30";

/// One flat action row.
pub fn action_doc(seq: u64, receiver: &str, trx: &str) -> Value {
    json!({
        "receipt": { "receiver": receiver, "global_sequence": seq },
        "act": {
            "account": "eosio.token",
            "name": "transfer",
            "authorization": [{ "actor": receiver, "permission": "active" }],
            "data": { "from": receiver, "to": "bob", "memo": format!("invoice {}", seq) }
        },
        "trx_id": trx,
        "block_num": block_of(seq),
        "block_time": format!("2018-06-{:02}T12:00:00.000", 9 + seq)
    })
}

/// Transaction trace holding a single transfer.
pub fn trace_doc(trx: &str, seq: u64, status: &str) -> Value {
    json!({
        "id": trx,
        "block_num": block_of(seq),
        "block_time": format!("2018-06-{:02}T12:00:00.000", 9 + seq),
        "receipt": { "status": status, "cpu_usage_us": 100 },
        "action_traces": [{
            "receipt": { "receiver": "alice", "global_sequence": seq },
            "act": { "account": "eosio.token", "name": "transfer", "data": { "memo": format!("invoice {}", seq) } },
            "inline_traces": []
        }]
    })
}

/// Transaction trace of a `setabi` with one inline notification.
pub fn setabi_trace_doc(trx: &str) -> Value {
    let setabi = json!({
        "account": "eosio",
        "name": "setabi",
        "data": { "account": "alice", "abi": { "version": "eosio::abi/1.0" } },
        "hex_data": format!("{}{}", "0".repeat(20), RAW_ABI)
    });
    json!({
        "id": trx,
        "block_num": 500,
        "block_time": "2018-07-01T00:00:00.000",
        "receipt": { "status": "executed" },
        "action_traces": [{
            "receipt": { "receiver": "eosio", "global_sequence": 1000 },
            "act": setabi,
            "inline_traces": [{
                "receipt": { "receiver": "alice", "global_sequence": 1001 },
                "act": setabi,
                "inline_traces": []
            }]
        }]
    })
}

/// Signed envelope row.
pub fn transaction_doc(trx: &str) -> Value {
    json!({
        "trx_id": trx,
        "expiration": "2018-06-09T12:01:00",
        "ref_block_num": 10,
        "ref_block_prefix": 3_000_000_000u64,
        "max_net_usage_words": 0,
        "max_cpu_usage_ms": 0,
        "delay_sec": 0,
        "context_free_actions": [],
        "actions": [],
        "transaction_extensions": [],
        "signatures": ["SIG_K1_alice"],
        "context_free_data": []
    })
}

/// Block holding action `seq`.
pub fn block_of(seq: u64) -> u64 {
    100 + seq
}

/// Backend seeded with the layout in the module docs.
pub fn seeded_backend() -> Arc<InMemorySearchBackend> {
    let backend = Arc::new(InMemorySearchBackend::new());
    for seq in 0..4u64 {
        let trx = format!("trx{}", seq);
        backend.insert("action_traces-0", &format!("a{}", seq), action_doc(seq, "alice", &trx));
        backend.insert("transaction_traces-0", &trx, trace_doc(&trx, seq, "executed"));
    }
    backend.insert("transaction_traces-0", "abi0", setabi_trace_doc("abi0"));
    backend.insert("transactions-0", "trx0", transaction_doc("trx0"));
    backend.insert("transactions-0", "abi0", transaction_doc("abi0"));
    backend.insert(
        "accounts-0",
        "alice",
        json!({
            "name": "alice",
            "pub_keys": [{ "key": ALICE_KEY, "permission": "owner" }],
            "account_controls": []
        }),
    );
    backend.insert(
        "accounts-0",
        "carol",
        json!({
            "name": "carol",
            "pub_keys": [],
            "account_controls": [{ "name": "alice", "permission": "active" }]
        }),
    );
    backend
}

/// Chain node knowing the irreversible head and the block of `trx0`.
pub fn chain_node() -> Arc<StaticChainNode> {
    let chain = Arc::new(StaticChainNode::new());
    chain.set_info(ChainInfo {
        last_irreversible_block_num: json!(LAST_IRREVERSIBLE),
        ..Default::default()
    });
    let block: ChainBlock = serde_json::from_value(json!({
        "block_num": block_of(0),
        "transactions": [
            { "status": "executed", "trx": "other" },
            { "status": "executed", "trx": "trx0" }
        ]
    }))
    .unwrap();
    chain.insert_block(block_of(0), block);
    chain
}

/// Catalog service and router over `backend`, the way the runtime wires them.
pub fn gateway(
    backend: Arc<InMemorySearchBackend>,
    chain: Arc<StaticChainNode>,
) -> (Arc<ShardCatalogService>, Router) {
    let catalog = Arc::new(ShardCatalogService::new(backend.clone()));
    let reader: Arc<dyn CatalogReader> = catalog.clone();
    let state = AppState {
        actions: Arc::new(ActionPagingService::new(backend.clone(), reader.clone())),
        transactions: Arc::new(TransactionAssemblyService::new(
            backend.clone(),
            reader.clone(),
        )),
        accounts: Arc::new(AccountLookupService::new(backend, reader.clone())),
        catalog: reader,
        chain,
    };
    (catalog, build_router(&GatewayConfig::default(), state))
}
