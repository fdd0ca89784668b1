//! Route table for the portal.

use std::path::Path;

use axum::{routing::get, routing::post, Router};
use tower_http::{
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};

use crate::handlers;
use crate::state::ServerState;

/// Build the application router.
///
/// Anything not matched by a portal route is looked up in `static_dir`.
pub fn router(state: ServerState, static_dir: &Path) -> Router {
  let uploads_dir = state.uploads_dir.clone();

  Router::new()
    .route("/", get(handlers::index))
    .route_service("/exam", ServeFile::new(static_dir.join("exam.html")))
    .route("/page/{page}", get(handlers::page))
    .route("/mode", post(handlers::toggle_mode))
    .route("/exams/{id}/join", post(handlers::join_exam))
    .route("/learning/{id}/access", post(handlers::access_content))
    .route("/chat", post(handlers::send_chat))
    .route("/profile/avatar", post(handlers::upload_avatar))
    .route("/admin", get(handlers::admin_panel))
    .route("/admin/login", post(handlers::login))
    .route("/admin/close", post(handlers::close_panel))
    .route("/admin/tab/{tab}", get(handlers::switch_tab))
    .route("/admin/settings/name", post(handlers::update_website_name))
    .route("/admin/settings/image", post(handlers::update_homepage_image))
    .route("/admin/settings/password", post(handlers::update_password))
    .route("/admin/settings/student-image", post(handlers::update_student_image))
    .route("/admin/exams", post(handlers::create_exam))
    .route("/admin/exams/{id}", post(handlers::update_exam))
    .route("/admin/exams/{id}/edit", get(handlers::edit_exam))
    .route("/admin/exams/{id}/toggle", post(handlers::toggle_exam))
    .route("/admin/exams/{id}/delete", post(handlers::delete_exam))
    .route("/admin/content", post(handlers::add_content))
    .route("/admin/live", post(handlers::start_live))
    .nest_service("/uploads", ServeDir::new(uploads_dir))
    .fallback_service(ServeDir::new(static_dir))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
