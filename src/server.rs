// ABOUTME: Router assembly and HTTP serving with graceful shutdown
// ABOUTME: Stacks request ids, tracing, timeout, body limit, and CORS over the domain routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Chef Contributors

use crate::errors::{AppError, AppResult};
use crate::middleware::{create_request_span, setup_cors, MakeRequestIdentifier};
use crate::resources::ServerResources;
use crate::routes::{AllergyRoutes, HealthRoutes, RecommendationRoutes};
use axum::body::Body;
use axum::Router;
use http::Request;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Build the application router with all middleware
pub fn router(resources: &Arc<ServerResources>) -> Router {
    let config = &resources.config;

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(RecommendationRoutes::routes(Arc::clone(resources)))
        .merge(AllergyRoutes::routes(Arc::clone(resources)))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestIdentifier))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| create_request_span(request)),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(TimeoutLayer::new(config.request_timeout))
                .layer(setup_cors(config)),
        )
}

/// Serve HTTP until `shutdown` resolves, then drain the recorder
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn serve<F>(resources: Arc<ServerResources>, shutdown: F) -> AppResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = format!("{}:{}", resources.config.host, resources.config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {address}: {e}")))?;
    info!(address = %address, "HTTP server listening");

    axum::serve(listener, router(&resources))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))?;

    resources.recorder.flush().await;
    let stats = resources.recorder.stats();
    info!(
        written = stats.written,
        failed = stats.failed,
        "HTTP server stopped; recommendation recorder drained"
    );
    Ok(())
}
