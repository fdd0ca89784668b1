pub mod admin;
pub mod chat;
pub mod exams;
pub mod learning;
pub mod profile;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::db::LogOnError;
use crate::error::PortalError;
use crate::portal::{Command, Outcome};
use crate::state::ServerState;
use crate::views::{self, RenderOptions};

pub use admin::{
  add_content, admin_panel, close_panel, create_exam, delete_exam, edit_exam, login, start_live,
  switch_tab, toggle_exam, update_exam, update_homepage_image, update_password,
  update_student_image, update_website_name,
};
pub use chat::send_chat;
pub use exams::join_exam;
pub use learning::access_content;
pub use profile::upload_avatar;

/// Notices carried across a redirect, plus the catalog search term
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
  pub notice: Option<String>,
  pub error: Option<String>,
  pub q: Option<String>,
}

impl Flash {
  pub fn into_options(self, show_login: bool) -> RenderOptions {
    RenderOptions {
      search: self.q.unwrap_or_default(),
      notice: self.notice.filter(|s| !s.is_empty()),
      error: self.error.filter(|s| !s.is_empty()),
      show_login,
    }
  }
}

/// Render the portal as it currently stands
pub(crate) fn render(app: &ServerState, options: RenderOptions) -> Response {
  let portal = match app.lock() {
    Ok(portal) => portal,
    Err(e) => return unavailable(e),
  };
  page_response(views::render_portal(portal.state(), portal.view(), options))
}

/// A page that failed to render is a server error, not an empty page
fn page_response(rendered: askama::Result<String>) -> Response {
  match rendered {
    Ok(html) => Html(html).into_response(),
    Err(e) => {
      tracing::error!("Failed to render portal: {}", e);
      (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
    }
  }
}

/// Run a command, then redirect back to whatever page is now current
pub(crate) fn dispatch(app: &ServerState, command: Command) -> Response {
  let (result, page) = match app.lock() {
    Ok(mut portal) => {
      let result = portal.execute(command, Utc::now());
      (result, portal.state().current_page)
    }
    Err(e) => return unavailable(e),
  };
  redirect_with(&format!("/page/{}", page.as_str()), result)
}

/// Run a command, then redirect to `path`
pub(crate) fn dispatch_to(app: &ServerState, command: Command, path: &str) -> Response {
  let result = match app.lock() {
    Ok(mut portal) => portal.execute(command, Utc::now()),
    Err(e) => return unavailable(e),
  };
  redirect_with(path, result)
}

/// Attach the outcome's notice (or the error message) to a redirect
pub(crate) fn redirect_with(path: &str, result: Result<Outcome, PortalError>) -> Response {
  let query = match result {
    Ok(outcome) => outcome
      .notice()
      .map(|notice| format!("notice={}", urlencoding::encode(&notice))),
    Err(PortalError::Unavailable) => return unavailable(PortalError::Unavailable),
    Err(e) => Some(format!("error={}", urlencoding::encode(&e.to_string()))),
  };

  match query {
    Some(query) => Redirect::to(&format!("{}?{}", path, query)).into_response(),
    None => Redirect::to(path).into_response(),
  }
}

fn unavailable(e: PortalError) -> Response {
  (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

/// Front door: always lands on the home page
pub async fn index(State(app): State<ServerState>, Query(flash): Query<Flash>) -> Response {
  if let Ok(mut portal) = app.lock() {
    portal
      .execute(Command::Navigate("home".to_string()), Utc::now())
      .log_warn("Failed to navigate home");
  }
  render(&app, flash.into_options(false))
}

/// Show a page. Unknown page ids leave the current page as it is.
pub async fn page(
  State(app): State<ServerState>,
  Path(page): Path<String>,
  Query(flash): Query<Flash>,
) -> Response {
  if let Ok(mut portal) = app.lock() {
    portal
      .execute(Command::Navigate(page), Utc::now())
      .log_warn("Failed to navigate");
  }
  render(&app, flash.into_options(false))
}

pub async fn toggle_mode(State(app): State<ServerState>) -> Response {
  dispatch(&app, Command::ToggleMode)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_failure_is_server_error() {
    let response = page_response(Err(askama::Error::Fmt));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = page_response(Ok("<p>ok</p>".to_string()));
    assert_eq!(response.status(), StatusCode::OK);
  }

  #[test]
  fn test_error_redirect_carries_message() {
    let response = redirect_with("/page/exams", Err(PortalError::ExamInactive));
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
      response.headers()["location"],
      "/page/exams?error=This%20exam%20is%20not%20currently%20available"
    );
  }
}
