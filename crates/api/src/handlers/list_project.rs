//! Handlers for the `/list-project` form.
//!
//! Submission runs as a chain of gates: session, validation, duplicate
//! check, pull request. The first gate that fails decides the response.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use oshub_core::form_data::FormValues;
use oshub_core::repo_url::repo_owner_and_name;
use oshub_core::submission::{FieldErrors, ParseOutcome, RawSubmission, UploadedFile};

use crate::error::{AppError, AppResult};
use crate::middleware::session::MaybeUser;
use crate::response::{ListProjectForm, ValidationErrorsResponse};
use crate::state::AppState;

/// Where anonymous visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Confirmation page shown after the pull request is opened.
pub const PROJECT_LISTED_PATH: &str = "/project-listed";

/// Field error returned when the repository already has a listing.
pub const ALREADY_LISTED: &str = "This project is already listed on Open Source Hub";

/// Multipart field carrying the avatar image.
const AVATAR_FIELD: &str = "avatar";

/// GET /list-project
///
/// Describe the form for signed-in users; redirect everyone else to log in.
pub async fn show_form(MaybeUser(user): MaybeUser) -> Response {
    match user {
        Some(_) => Json(ListProjectForm::new()).into_response(),
        None => Redirect::to(LOGIN_PATH).into_response(),
    }
}

/// POST /list-project
///
/// The body is only read once a session is established, so anonymous
/// submissions are redirected without being parsed.
pub async fn submit(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    request: Request,
) -> AppResult<Response> {
    let Some(user) = user else {
        tracing::debug!("Anonymous listing submission, redirecting to login");
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };

    let multipart = Multipart::from_request(request, &state)
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?;
    let raw = read_submission(multipart).await?;

    let listing = match state.parser.parse(&raw, &user.login, chrono::Utc::now())? {
        ParseOutcome::Invalid(errors) => {
            tracing::debug!(
                user_id = user.id,
                fields = ?errors.keys().collect::<Vec<_>>(),
                "Listing submission failed validation"
            );
            return Ok(validation_errors(errors));
        }
        ParseOutcome::Parsed(listing) => listing,
    };

    let Some(repo_url) = listing.repo_url else {
        tracing::error!(user_id = user.id, "Parsed listing has no repository URL");
        return Err(AppError::InternalError(
            "Missing repo URL in new project form".into(),
        ));
    };

    if let Some(existing) = state.projects.find_by_repo_url(&repo_url).await? {
        tracing::info!(
            user_id = user.id,
            repo_url = %repo_url,
            existing_id = existing.id,
            "Rejected duplicate listing"
        );
        let mut errors = FieldErrors::new();
        errors.insert("repoUrl".into(), ALREADY_LISTED.into());
        return Ok(validation_errors(errors));
    }

    let repo = repo_owner_and_name(&repo_url)?;

    let pr = state
        .pull_requests
        .create_pull_request(&user, &listing.files, &repo.owner, &repo.name)
        .await?;

    tracing::info!(
        user_id = user.id,
        repo_url = %repo_url,
        pr_url = %pr.url,
        "Listing pull request created"
    );

    Ok(Redirect::to(&project_listed_location(&pr.url)).into_response())
}

/// Read every multipart field into a [`RawSubmission`].
///
/// Text fields keep their order and repeats. A file input left empty is
/// sent as a nameless, zero-length part and is treated as no avatar.
pub async fn read_submission(mut multipart: Multipart) -> AppResult<RawSubmission> {
    let mut values = FormValues::new();
    let mut avatar = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == AVATAR_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if !file_name.is_empty() && !bytes.is_empty() {
                avatar = Some(UploadedFile {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        values.append(name, value);
    }

    Ok(RawSubmission { values, avatar })
}

/// `/project-listed?pr=<url-encoded pr_url>`
pub fn project_listed_location(pr_url: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(pr_url.as_bytes()).collect();
    format!("{PROJECT_LISTED_PATH}?pr={encoded}")
}

fn validation_errors(errors: FieldErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ValidationErrorsResponse {
            validation_errors: errors,
        }),
    )
        .into_response()
}
