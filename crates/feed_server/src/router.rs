use std::any::Any;
use std::sync::Arc;

use axum::extract::{RawQuery, State};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use feed_logging::feed_debug;
use tower_http::catch_panic::CatchPanicLayer;

use crate::{search, Collection, ConfigError, SearchParams, ServerError};

type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

#[derive(Debug, Clone)]
pub struct AppState {
    collection: Arc<Collection>,
    cache_control: HeaderValue,
}

impl AppState {
    pub fn new(collection: Collection, cache_control: &str) -> Result<Self, ConfigError> {
        let cache_control =
            HeaderValue::from_str(cache_control).map_err(|err| ConfigError::Invalid {
                name: "cache_control",
                value: cache_control.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Self {
            collection: Arc::new(collection),
            cache_control,
        })
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }
}

/// `GET /items` plus the legacy `GET /api/posts` alias.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/items", get(list_items))
        .route("/api/posts", get(list_items))
        .with_state(state)
        .layer(internal_fault_layer())
}

/// Turns a panicking handler into the generic 500 body.
pub fn internal_fault_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(handle_panic as PanicHandler)
}

async fn list_items(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let params = SearchParams::from_query_string(raw.as_deref().unwrap_or_default());
    let page = search(&state.collection, &params);
    feed_debug!(
        "GET items offset={} limit={} q={:?} -> {} of {}",
        params.offset,
        params.limit,
        params.query.as_str(),
        page.items.len(),
        page.total
    );
    ([(CACHE_CONTROL, state.cache_control.clone())], Json(page)).into_response()
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ServerError::Panic(detail).into_response()
}
