//! HTTP routes and handlers.
//!
//! Every history route accepts GET and POST with a JSON object body. The
//! handlers only decode, delegate to a subsystem, and enrich the answer
//! from the chain node when it is reachable.

use crate::domain::{packed_reference, ApiError, GatewayConfig};
use crate::middleware::{create_cors_layer, enforce_deadline, track_metrics};
use crate::ports::ChainNode;
use axum::{
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{get, MethodRouter},
    Json, Router,
};
use bytes::Bytes;
use hq_01_shard_catalog::CatalogReader;
use hq_03_action_paging::{
    ActionHistoryApi, FindActionsRequest, FindActionsResponse, GetActionsRequest,
    GetActionsResponse,
};
use hq_04_transaction_assembly::{GetTransactionRequest, TransactionHistoryApi, TransactionView};
use hq_05_account_lookup::{
    AccountLookupApi, GetControlledAccountsRequest, GetControlledAccountsResponse,
    GetKeyAccountsRequest, GetKeyAccountsResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Field of the trace receipt that receives the block reference.
const RECEIPT_TRX_FIELD: &str = "trx";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Action paging and search
    pub actions: Arc<dyn ActionHistoryApi>,
    /// Transaction lookups
    pub transactions: Arc<dyn TransactionHistoryApi>,
    /// Account lookups
    pub accounts: Arc<dyn AccountLookupApi>,
    /// Catalog, for `/health`
    pub catalog: Arc<dyn CatalogReader>,
    /// Chain node, for enrichment
    pub chain: Arc<dyn ChainNode>,
}

/// Build the full router: history routes, `/health`, `/metrics`.
pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(&config.cors))
        .layer(from_fn_with_state(config.request_timeout, enforce_deadline))
        .layer(DefaultBodyLimit::max(config.max_body_size));

    Router::new()
        .route(&config.route("get_actions"), history_route(get_actions))
        .route(&config.route("get_transaction"), history_route(get_transaction))
        .route(&config.route("get_key_accounts"), history_route(get_key_accounts))
        .route(
            &config.route("get_controlled_accounts"),
            history_route(get_controlled_accounts),
        )
        .route(&config.route("find_actions"), history_route(find_actions))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route_layer(from_fn(track_metrics))
        .fallback(unknown_route)
        .layer(middleware)
        .with_state(state)
}

/// GET and POST to `handler`; any other method is a 405 with a JSON body.
fn history_route<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: axum::handler::Handler<T, AppState> + Clone,
    T: 'static,
{
    get(handler.clone())
        .post(handler)
        .fallback(invalid_method)
}

async fn invalid_method() -> ApiError {
    ApiError::invalid_method()
}

async fn unknown_route() -> ApiError {
    ApiError::unknown_route()
}

/// Decode a request body.
fn parse_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large.")
        } else {
            ApiError::unreadable_body()
        }
    })?;
    serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "Rejecting request body");
        ApiError::invalid_arguments()
    })
}

/// Last irreversible block, when the chain node answers.
async fn last_irreversible_block(chain: &dyn ChainNode) -> Option<Value> {
    match chain.get_info().await {
        Ok(info) => Some(info.last_irreversible_block_num),
        Err(e) => {
            debug!(error = %e, "Chain info unavailable");
            None
        }
    }
}

/// Block reference of the transaction, when the chain node answers.
async fn block_reference(chain: &dyn ChainNode, view: &TransactionView) -> Option<Value> {
    match chain.get_block(&view.block_num).await {
        Ok(block) => packed_reference(&block, &view.id),
        Err(e) => {
            debug!(error = %e, block_num = %view.block_num, "Block unavailable");
            None
        }
    }
}

// =============================================================================
// HISTORY HANDLERS
// =============================================================================

async fn get_actions(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GetActionsResponse>, ApiError> {
    let request: GetActionsRequest = parse_body(body)?;
    let mut response = state.actions.get_actions(request).await?;
    response.last_irreversible_block = last_irreversible_block(state.chain.as_ref()).await;
    Ok(Json(response))
}

async fn get_transaction(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TransactionView>, ApiError> {
    let request: GetTransactionRequest = parse_body(body)?;
    let mut view = state.transactions.get_transaction(request).await?;

    let chain = state.chain.as_ref();
    let (reference, last_irreversible) = tokio::join!(
        block_reference(chain, &view),
        last_irreversible_block(chain)
    );
    if let (Some(reference), Some(receipt)) = (reference, view.receipt_mut()) {
        receipt.insert(RECEIPT_TRX_FIELD.to_string(), reference);
    }
    view.last_irreversible_block = last_irreversible;
    Ok(Json(view))
}

async fn get_key_accounts(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GetKeyAccountsResponse>, ApiError> {
    let request: GetKeyAccountsRequest = parse_body(body)?;
    Ok(Json(state.accounts.get_key_accounts(request).await?))
}

async fn get_controlled_accounts(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GetControlledAccountsResponse>, ApiError> {
    let request: GetControlledAccountsRequest = parse_body(body)?;
    Ok(Json(state.accounts.get_controlled_accounts(request).await?))
}

async fn find_actions(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<FindActionsResponse>, ApiError> {
    let request: FindActionsRequest = parse_body(body)?;
    Ok(Json(state.actions.find_actions(request).await?))
}

// =============================================================================
// OPERATIONAL HANDLERS
// =============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.status())
}

async fn metrics() -> Result<impl IntoResponse, ApiError> {
    let text = history_telemetry::encode_metrics().map_err(|e| ApiError::internal(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        text,
    ))
}
