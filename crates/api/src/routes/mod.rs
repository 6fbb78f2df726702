pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers::list_project;
use crate::state::AppState;

/// Routes for the listing form.
///
/// ```text
/// GET  /list-project    form description (signed-in users)
/// POST /list-project    submit a listing (multipart/form-data)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new().route(
        "/list-project",
        get(list_project::show_form).post(list_project::submit),
    )
}
