//! Query model to Elasticsearch bool/filter DSL.

use serde_json::{json, Map, Value};
use shared_types::{Filter, Query, SearchRequest, Sort, SortOrder};

/// Fields matched for account activity.
const ACCOUNT_FIELDS: [&str; 2] = ["receipt.receiver", "act.authorization.actor"];

fn filter_clause(filter: &Filter) -> Value {
    match filter {
        Filter::AccountActivity(account) => json!({
            "multi_match": { "query": account, "fields": ACCOUNT_FIELDS }
        }),
        Filter::NotExceptional => json!({
            "bool": { "must_not": [{ "exists": { "field": "except" } }] }
        }),
        Filter::PublicKey(key) => json!({ "match": { "pub_keys.key": key } }),
        Filter::ControllingAccount(name) => {
            json!({ "match": { "account_controls.name.keyword": name } })
        }
        Filter::ActionData(text) => json!({ "match": { "act.data": text } }),
        Filter::BlockTimeRange { from, to } => {
            let mut bounds = Map::new();
            if let Some(from) = from {
                bounds.insert("gte".into(), json!(from));
            }
            if let Some(to) = to {
                bounds.insert("lte".into(), json!(to));
            }
            json!({ "range": { "block_time": bounds } })
        }
        Filter::RecentDays(days) => json!({
            "range": { "block_time": { "gte": format!("now-{}d/d", days) } }
        }),
    }
}

/// `{"bool": {"filter": [...]}}` for `query`.
pub fn query_dsl(query: &Query) -> Value {
    let filters: Vec<Value> = query.filters.iter().map(filter_clause).collect();
    json!({ "bool": { "filter": filters } })
}

fn sort_dsl(sort: &Sort) -> Value {
    let order = match sort.order {
        SortOrder::Ascending => "asc",
        SortOrder::Descending => "desc",
    };
    let mut clause = Map::new();
    clause.insert(sort.field.clone(), json!({ "order": order }));
    json!([clause])
}

/// Body of one search request.
pub fn search_body(request: &SearchRequest) -> Value {
    let mut body = Map::new();
    body.insert("query".into(), query_dsl(&request.query));
    if let Some(sort) = &request.sort {
        body.insert("sort".into(), sort_dsl(sort));
    }
    body.insert("from".into(), json!(request.from));
    body.insert("size".into(), json!(request.size));
    Value::Object(body)
}

/// NDJSON body of a `_msearch` call: a header line and a body line per
/// request.
pub fn msearch_body(requests: &[SearchRequest]) -> String {
    let mut out = String::new();
    for request in requests {
        out.push_str(&json!({ "index": request.shard }).to_string());
        out.push('\n');
        out.push_str(&search_body(request).to_string());
        out.push('\n');
    }
    out
}
