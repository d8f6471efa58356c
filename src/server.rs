//! HTTP surface for the recipe queries.
//!
//! Routes:
//!
//! ```text
//! GET /health                      {"status": "ok"}
//! GET /api/recipes                 listing, ?page=&limit=
//! GET /api/recipes/search          ?title=&cuisine=&rating=&total_time=&calories=&page=&limit=
//! GET /api/recipes/{id}            one recipe, 404 when missing
//! GET /, /index, /static/*         frontend, only when a static directory is configured
//! ```

mod error;

pub use error::{AppError, AppResult};

use crate::config::{PagingRules, QueryConfig, ServerRules};
use crate::filter::SearchParams;
use crate::query::PageRequest;
use crate::service::{RecipePage, RecipeService};
use crate::store::{Recipe, RecipeStore};
use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared per-request state
pub struct AppState<S> {
    service: RecipeService<S>,
    paging: PagingRules,
    static_dir: Option<Arc<PathBuf>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            paging: self.paging.clone(),
            static_dir: self.static_dir.clone(),
        }
    }
}

impl<S: RecipeStore> AppState<S> {
    pub fn new(service: RecipeService<S>, config: &QueryConfig) -> Self {
        Self {
            service,
            paging: config.paging.clone(),
            static_dir: config.server.static_dir.clone().map(Arc::new),
        }
    }

    fn page_request(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
        max_limit: Option<usize>,
    ) -> AppResult<PageRequest> {
        let limit = limit.unwrap_or(self.paging.default_limit as i64);
        Ok(PageRequest::new(page.unwrap_or(1), limit, max_limit)?)
    }
}

#[derive(Debug, Default, Deserialize)]
struct PagingQuery {
    page: Option<i64>,
    limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    title: Option<String>,
    cuisine: Option<String>,
    rating: Option<String>,
    total_time: Option<String>,
    calories: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
}

impl SearchQuery {
    fn params(&self) -> SearchParams {
        SearchParams {
            title: self.title.clone(),
            cuisine: self.cuisine.clone(),
            rating: self.rating.clone(),
            total_time: self.total_time.clone(),
            calories: self.calories.clone(),
        }
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_recipes<S: RecipeStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<PagingQuery>,
) -> AppResult<Json<RecipePage>> {
    let page = state.page_request(query.page, query.limit, Some(state.paging.max_limit))?;
    Ok(Json(state.service.list_recipes(page)?))
}

async fn search_recipes<S: RecipeStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<RecipePage>> {
    let page = state.page_request(query.page, query.limit, state.paging.search_max_limit)?;
    Ok(Json(state.service.search_recipes(&query.params(), page)?))
}

async fn get_recipe<S: RecipeStore + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> AppResult<Json<Recipe>> {
    state
        .service
        .get_recipe(id)?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn index_file<S: RecipeStore + 'static>(State(state): State<AppState<S>>) -> Response {
    let path = state
        .static_dir
        .as_deref()
        .map(|dir| dir.join("index.html"))
        .unwrap_or_else(|| PathBuf::from("index.html"));

    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Html(body).into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "detail": "index.html not found",
                "path_checked": path.display().to_string(),
            })),
        )
            .into_response(),
    }
}

/// Build the API router with CORS and request tracing
pub fn router<S: RecipeStore + 'static>(service: RecipeService<S>, config: &QueryConfig) -> Router {
    let state = AppState::new(service, config);

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/recipes", get(list_recipes::<S>))
        .route("/api/recipes/search", get(search_recipes::<S>))
        .route("/api/recipes/{id}", get(get_recipe::<S>));

    if let Some(dir) = state.static_dir.as_deref() {
        app = app
            .route("/", get(|| async { Redirect::temporary("/index") }))
            .route("/index", get(index_file::<S>))
            .nest_service("/static", ServeDir::new(dir));
    }

    app.layer(build_cors_layer(&config.server))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(rules: &ServerRules) -> CorsLayer {
    if rules.cors_allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = rules
        .cors_allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Bind and serve until Ctrl-C
pub async fn serve<S: RecipeStore + 'static>(
    service: RecipeService<S>,
    config: &QueryConfig,
) -> anyhow::Result<()> {
    let app = router(service, config);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind to {}", config.server.bind))?;
    let addr = listener.local_addr().context("failed to read bound address")?;
    info!(%addr, "recipe API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await
        .context("server error")?;

    info!("recipe API stopped");
    Ok(())
}
