//! Integration tests for the `/list-project` form endpoints.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;

use common::{
    body_json, build_test_app, build_test_app_from, build_test_app_with, get, location,
    multipart_body, post_listing, valid_fields, RecordingPullRequests, UrlLosingParser, BOUNDARY,
    VALID_TOKEN,
};
use tower::ServiceExt;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

fn fields_with(overrides: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
    let mut fields: Vec<_> = valid_fields()
        .into_iter()
        .filter(|(name, _)| !overrides.iter().any(|(o, _)| o == name))
        .collect();
    fields.extend_from_slice(overrides);
    fields
}

// ---------------------------------------------------------------------------
// Session gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_submission_redirects_to_login() {
    let app = build_test_app();
    let response = post_listing(app.router, multipart_body(&valid_fields(), None), None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(app.directory.lookup_count(), 0);
    assert!(app.pull_requests.calls().is_empty());
}

#[tokio::test]
async fn unknown_session_token_redirects_to_login() {
    let app = build_test_app();
    let response = post_listing(
        app.router,
        multipart_body(&valid_fields(), None),
        Some("expired-token"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(app.pull_requests.calls().is_empty());
}

#[tokio::test]
async fn anonymous_form_request_redirects_to_login() {
    let app = build_test_app();
    let response = get(app.router, "/list-project", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn signed_in_user_receives_form_description() {
    let app = build_test_app();
    let response = get(app.router, "/list-project", Some(VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["maxAvatarSizeBytes"], 1024 * 1024);
    assert_eq!(json["maxReviewMapUrls"], 5);
    assert_eq!(json["acceptedAvatarExtensions"][0], "png");
    assert!(json["languages"].as_array().is_some_and(|a| !a.is_empty()));
    assert!(json["currentlySeeking"].as_array().is_some_and(|a| !a.is_empty()));
    assert!(json["tags"].as_array().is_some_and(|a| !a.is_empty()));
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let app = build_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/list-project")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::COOKIE, format!("theme=dark; session={VALID_TOKEN}"))
        .body(Body::from(multipart_body(&valid_fields(), None)))
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/project-listed?pr="));
    assert_eq!(app.pull_requests.calls().len(), 1);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_fields_return_validation_errors() {
    let app = build_test_app();
    let fields = [("name", "Only a name")];
    let response =
        post_listing(app.router, multipart_body(&fields, None), Some(VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    let errors = &json["validationErrors"];
    assert!(errors["repoUrl"].is_string());
    assert_eq!(errors["content"], "Please describe your project");
    assert!(errors.get("overview").is_none());
    assert!(errors["languages"].is_string());
    assert!(errors.get("name").is_none());

    assert_eq!(app.directory.lookup_count(), 0);
    assert!(app.pull_requests.calls().is_empty());
}

#[tokio::test]
async fn percent_encoded_repo_path_is_rejected_before_lookup() {
    let app = build_test_app();
    let fields = fields_with(&[("repoUrl", "https://github.com/a%2F..%2Fetc/b")]);
    let response =
        post_listing(app.router, multipart_body(&fields, None), Some(VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["validationErrors"]["repoUrl"].is_string());
    assert_eq!(app.directory.lookup_count(), 0);
    assert!(app.pull_requests.calls().is_empty());
}

#[tokio::test]
async fn too_many_review_maps_is_rejected() {
    let app = build_test_app();
    let fields = fields_with(&[
        ("reviewMapUrls[0]", "https://maps.test/0"),
        ("reviewMapUrls[1]", "https://maps.test/1"),
        ("reviewMapUrls[2]", "https://maps.test/2"),
        ("reviewMapUrls[3]", "https://maps.test/3"),
        ("reviewMapUrls[4]", "https://maps.test/4"),
        ("reviewMapUrls[5]", "https://maps.test/5"),
    ]);
    let response =
        post_listing(app.router, multipart_body(&fields, None), Some(VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(
        json["validationErrors"]["reviewMapUrls"],
        "You can add up to 5 Review Maps"
    );
}

#[tokio::test]
async fn non_image_avatar_is_rejected() {
    let app = build_test_app();
    let response = post_listing(
        app.router,
        multipart_body(&valid_fields(), Some(("avatar.png", b"not really a png"))),
        Some(VALID_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["validationErrors"]["avatar"].is_string());
    assert!(app.pull_requests.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Duplicate check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn already_listed_repository_is_rejected() {
    let app = build_test_app();
    // Differs from the listed https://github.com/tokio-rs/axum only by casing and a trailing slash.
    let fields = fields_with(&[("repoUrl", "https://github.com/Tokio-rs/Axum/")]);
    let response =
        post_listing(app.router, multipart_body(&fields, None), Some(VALID_TOKEN)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(
        json["validationErrors"]["repoUrl"],
        "This project is already listed on Open Source Hub"
    );
    assert_eq!(app.directory.lookup_count(), 1);
    assert!(app.pull_requests.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Pull request
// ---------------------------------------------------------------------------

#[tokio::test]
async fn valid_listing_opens_pull_request_and_redirects() {
    let app = build_test_app();
    let response = post_listing(
        app.router,
        multipart_body(&valid_fields(), Some(("logo.png", PNG))),
        Some(VALID_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/project-listed?pr=https%3A%2F%2Fgithub.com%2FCodesee-io%2Fopensourcehub%2Fpull%2F7"
    );

    let calls = app.pull_requests.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.login, "octocat");
    assert_eq!(call.github_token, "gho_octocat");
    assert_eq!(call.repo_owner, "Codesee-io");
    assert_eq!(call.repo_name, "opensourcehub");
    assert_eq!(
        call.paths,
        vec![
            "projects/Codesee-io/opensourcehub/index.md".to_string(),
            "projects/Codesee-io/opensourcehub/avatar.png".to_string(),
        ]
    );
    assert_eq!(app.directory.lookup_count(), 1);
}

#[tokio::test]
async fn empty_avatar_part_is_ignored() {
    let app = build_test_app();
    let response = post_listing(
        app.router,
        multipart_body(&valid_fields(), Some(("", b""))),
        Some(VALID_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let calls = app.pull_requests.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].paths,
        vec!["projects/Codesee-io/opensourcehub/index.md".to_string()]
    );
}

#[tokio::test]
async fn pull_request_failure_returns_generic_error() {
    let app = build_test_app_with(RecordingPullRequests {
        fail: true,
        ..Default::default()
    });
    let response = post_listing(
        app.router,
        multipart_body(&valid_fields(), None),
        Some(VALID_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(!json["error"]
        .as_str()
        .unwrap_or_default()
        .contains("Resource not accessible"));
    assert_eq!(app.pull_requests.calls().len(), 1);
}

#[tokio::test]
async fn parsed_listing_without_repo_url_is_internal_error() {
    let app = build_test_app_from(RecordingPullRequests::default(), Arc::new(UrlLosingParser));
    let response = post_listing(
        app.router,
        multipart_body(&valid_fields(), None),
        Some(VALID_TOKEN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
    assert_eq!(app.directory.lookup_count(), 0);
    assert!(app.pull_requests.calls().is_empty());
}

#[tokio::test]
async fn non_multipart_body_is_bad_request() {
    let app = build_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/list-project")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {VALID_TOKEN}"))
        .body(Body::from("{}"))
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(app.pull_requests.calls().is_empty());
}
