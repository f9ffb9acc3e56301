//! axum handlers for the reference deployment's typed routes (spec §6):
//! `GET /api/disciplina/:code`, `GET /api/curso/:code`, and
//! `GET /api/curso/:code/:variant`. The generic fuzzy-search routes
//! (`/api/busca`, `/api/busca/ws`) are served directly from
//! `campus_search_http::handlers`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use campus_search_http::RequestError;
use campus_search_scrape::ScrapeEnv;

use crate::domain::{CoursePreview, CourseTree, Discipline};
use crate::init::InitState;

#[derive(Clone)]
pub struct AppState {
    pub init: Arc<InitState>,
    pub env: ScrapeEnv,
}

/// `GET /api/disciplina/:code` (spec §6): exact, case-sensitive code match.
pub async fn get_discipline(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Discipline>, RequestError> {
    let corpus = state.init.discipline_instance(&state.env).await?;
    let records = corpus.snapshot().await;
    records
        .iter()
        .find(|d| d.code == code)
        .cloned()
        .map(Json)
        .ok_or(RequestError::NotFound)
}

/// `GET /api/curso/:code` (spec §6): the course's known variant codes.
pub async fn get_course_preview(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CoursePreview>, RequestError> {
    let corpus = state.init.course_instance(&state.env).await?;
    let records = corpus.snapshot().await;
    records
        .iter()
        .find(|c| c.code == code)
        .map(|c| Json(CoursePreview::from(c)))
        .ok_or(RequestError::NotFound)
}

/// `GET /api/curso/:code/:variant` (spec §6): `variant` is a variant code
/// or a 0-based index into the course's variant list (spec §8 scenarios).
pub async fn get_course_tree(
    State(state): State<AppState>,
    Path((code, variant)): Path<(String, String)>,
) -> Result<Json<CourseTree>, RequestError> {
    let corpus = state.init.course_instance(&state.env).await?;
    let records = corpus.snapshot().await;
    let course = records.iter().find(|c| c.code == code).ok_or(RequestError::NotFound)?;
    let found = course.find_variant(&variant).ok_or(RequestError::NotFound)?;

    Ok(Json(CourseTree {
        code: course.code.clone(),
        variant: found.code.clone(),
        semesters: found.semesters.clone(),
    }))
}

/// `GET /api/` (spec §6): empty path under `/api` is `204`, not `400`.
pub async fn api_root() -> RequestError {
    RequestError::NoContent
}

/// `GET /api/**` unmatched (spec §6): any other unrouted `/api` path is `400`.
pub async fn api_unmatched() -> RequestError {
    RequestError::Unknown
}
