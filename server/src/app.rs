//! Assembles the full axum [`Router`] (spec §6 "External interfaces") from
//! an already-spawned [`InitState`] and a [`Config`]. Split out of `main.rs`
//! so integration tests can build the exact same router the binary serves
//! without going through the CLI.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use campus_search_http::handlers::{busca, busca_ws};
use campus_search_http::orchestrator::SearchSource;
use campus_search_http::SearchState;
use campus_search_scrape::ScrapeEnv;

use crate::routes::{api_root, api_unmatched, get_course_preview, get_course_tree, get_discipline, AppState};
use crate::{Config, InitState};

/// `--env development` response shaping (spec §6): re-serialize JSON bodies
/// with `serde_json::to_vec_pretty`. Key order is already sorted regardless
/// of this flag, since `serde_json::Value`'s object map is a `BTreeMap`
/// without the (unused here) `preserve_order` feature.
async fn pretty_json_middleware(State(pretty): State<bool>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if !pretty {
        return response;
    }
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"));
    if !is_json {
        return response;
    }

    let (parts, body) = response.into_parts();
    let Ok(bytes) = axum::body::to_bytes(body, usize::MAX).await else {
        return Response::from_parts(parts, Body::empty());
    };
    let pretty_bytes = serde_json::from_slice::<serde_json::Value>(&bytes)
        .ok()
        .and_then(|value| serde_json::to_vec_pretty(&value).ok())
        .unwrap_or_else(|| bytes.to_vec());
    Response::from_parts(parts, Body::from(pretty_bytes))
}

/// Build the full app router: the generic fuzzy-search surface and the
/// typed lookup routes, merged under `/api`, falling back to the static
/// `Public/` tree for everything else (spec §6).
///
/// `/api/busca*` and the typed `/api/disciplina`, `/api/curso` routes need
/// different state types, so each gets its own sub-router before the two
/// are merged; the typed router's fallback also covers spec §6's
/// `GET /api/**` unmatched -> 400 (the `GET /api/` exact-empty-path -> 204
/// case is just its own route at `""`).
pub fn build_router(init: Arc<InitState>, env: ScrapeEnv, config: &Config) -> Router {
    let app_state = AppState { init: Arc::clone(&init), env };

    let sources: Vec<Arc<dyn SearchSource>> =
        vec![Arc::clone(&init.disciplines) as Arc<dyn SearchSource>, Arc::clone(&init.courses) as Arc<dyn SearchSource>];
    let search_state = SearchState { sources: Arc::new(sources), config: Arc::new(config.search.clone()) };

    let index_html = config.public_dir.join("index.html");

    let busca_router = Router::new()
        .route("/busca", get(busca))
        .route("/busca/ws", get(busca_ws))
        .with_state(search_state);

    let typed_router = Router::new()
        .route("/", get(api_root))
        .route("/disciplina/{code}", get(get_discipline))
        .route("/curso/{code}", get(get_course_preview))
        .route("/curso/{code}/{variant}", get(get_course_tree))
        .fallback(api_unmatched)
        .with_state(app_state);

    let api_router = Router::new().merge(busca_router).merge(typed_router);

    Router::new()
        .nest("/api", api_router)
        .fallback_service(ServeDir::new(&config.public_dir).not_found_service(ServeFile::new(&index_html)))
        .layer(TraceLayer::new_for_http())
        .layer(ServiceBuilder::new().option_layer(config.compression.then(CompressionLayer::new)))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(config.pretty_json, pretty_json_middleware))
}
