//! End-to-end tests against the assembled router (spec §8 "Testable
//! properties" — the literal request/response scenarios), driven through
//! `tower::ServiceExt::oneshot` rather than a bound TCP listener.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use reqwest::Client;
use tower::ServiceExt;

use campus_search_scrape::{CacheConfig, ScrapeEnv};
use campus_search_server::app::build_router;
use campus_search_server::config::Env;
use campus_search_server::domain::{Course, CourseVariant, DisciplineRef, Discipline, Semester};
use campus_search_server::{Config, InitState};

fn test_env(dir: &std::path::Path) -> ScrapeEnv {
    ScrapeEnv {
        client: Client::new(),
        cache: CacheConfig { cache_dir: dir.to_path_buf(), use_caching: false },
        warn_about_http_version: false,
    }
}

fn test_config(tmp: &tempfile::TempDir) -> Config {
    Config::for_env(Env::Testing, "https://example.invalid".into(), tmp.path().to_path_buf())
}

async fn seeded_app(tmp: &tempfile::TempDir) -> axum::Router {
    let init = InitState::new("https://example.invalid");

    init.disciplines
        .set(vec![
            Discipline {
                code: "MC102".into(),
                name: "Algoritmos e Programacao de Computadores".into(),
                credits: 6,
                req_by: ["MC202".to_string()].into_iter().collect(),
            },
            Discipline {
                code: "MC202".into(),
                name: "Estruturas de Dados".into(),
                credits: 6,
                req_by: Default::default(),
            },
        ])
        .await;

    init.courses
        .set(vec![Course {
            code: "34".into(),
            name: "Engenharia de Computacao".into(),
            variants: vec![
                CourseVariant { code: "AA".into(), semesters: vec![] },
                CourseVariant { code: "AB".into(), semesters: vec![] },
                CourseVariant {
                    code: "AX".into(),
                    semesters: vec![Semester {
                        disciplines: vec![DisciplineRef { code: "F128".into(), credits: 4 }],
                        electives: 0,
                    }],
                },
            ],
        }])
        .await;

    init.mark_ready_for_test();

    let config = test_config(tmp);
    let env = test_env(&tmp.path().join("cache"));
    build_router(init, env, &config)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn discipline_lookup_by_exact_code() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(Request::builder().uri("/api/disciplina/MC102").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["code"], "MC102");
    assert_eq!(json["credits"], 6);
    assert_eq!(json["reqBy"], serde_json::json!(["MC202"]));
}

#[tokio::test]
async fn discipline_lookup_is_case_sensitive_and_404s_on_miss() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    for path in ["/api/disciplina/mc102", "/api/disciplina/MC1022"] {
        let res = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "path {path}");
    }
}

#[tokio::test]
async fn course_preview_lists_all_three_variant_codes() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(Request::builder().uri("/api/curso/34").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["variants"], serde_json::json!(["AA", "AB", "AX"]));
}

#[tokio::test]
async fn course_tree_resolves_variant_by_zero_based_index() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    // Index 2 (0-based) is the third variant, "AX".
    let res = app
        .oneshot(Request::builder().uri("/api/curso/34/2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["variant"], "AX");
    assert_eq!(json["semesters"][0]["disciplines"][0]["code"], "F128");
    assert_eq!(json["semesters"][0]["disciplines"][0]["credits"], 4);
    assert_eq!(json["semesters"][0]["electives"], 0);
}

#[tokio::test]
async fn course_tree_out_of_range_index_is_404() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    // Only 3 variants (indices 0..=2) exist; index 3 is out of range.
    let res = app
        .oneshot(Request::builder().uri("/api/curso/34/3").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn course_tree_resolves_variant_by_code() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(Request::builder().uri("/api/curso/34/AX").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["variant"], "AX");
}

#[tokio::test]
async fn busca_rejects_non_numeric_limit() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(
            Request::builder().uri("/api/busca?query=mc102&limit=cinco").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn busca_rejects_fractional_limit() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(
            Request::builder().uri("/api/busca?query=mc102&limit=10.0").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn busca_empty_query_returns_bounded_array() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(Request::builder().uri("/api/busca?query=&limit=25").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert!(json.as_array().unwrap().len() <= 25);
}

#[tokio::test]
async fn busca_ranks_exact_code_match_first() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(Request::builder().uri("/api/busca?query=mc102&limit=10").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let hits = json.as_array().unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0]["code"], "MC102");
}

#[tokio::test]
async fn empty_api_path_is_no_content() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res =
        app.oneshot(Request::builder().uri("/api/").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn unmatched_api_path_is_bad_request() {
    let tmp = tempfile::tempdir().unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(Request::builder().uri("/api/nonexistent/path").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_api_path_falls_back_to_public_index() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("Public")).unwrap();
    std::fs::write(tmp.path().join("Public").join("index.html"), "<html></html>").unwrap();
    let app = seeded_app(&tmp).await;

    let res = app
        .oneshot(Request::builder().uri("/some/client-side/route").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
