//! 510(k) search endpoint handler.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use super::state::MockState;

/// Query parameters accepted by the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub skip: Option<u64>,
}

/// GET /device/510k.json
pub async fn search_clearances(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let state = state.read().await;

    let records = query
        .search
        .as_deref()
        .and_then(parse_product_code)
        .and_then(|code| state.records_for(&code));

    let Some(all) = records else {
        return not_found();
    };
    if all.is_empty() {
        return not_found();
    }

    let skip = query.skip.unwrap_or(0) as usize;
    let limit = query.limit.unwrap_or(100) as usize;

    let total = all.len();
    let end = (skip + limit).min(total);
    let results: Vec<_> = if skip < total {
        all[skip..end].to_vec()
    } else {
        Vec::new()
    };

    (
        StatusCode::OK,
        Json(json!({
            "meta": {
                "results": { "skip": skip, "limit": limit, "total": total }
            },
            "results": results,
        })),
    )
        .into_response()
}

/// Parse `product_code:<CODE>` out of the search expression.
fn parse_product_code(search: &str) -> Option<String> {
    search
        .strip_prefix("product_code:")
        .map(|code| code.trim_matches('"').to_string())
}

/// openFDA-style empty match set response.
fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": { "code": "NOT_FOUND", "message": "No matches found!" }
        })),
    )
        .into_response()
}
