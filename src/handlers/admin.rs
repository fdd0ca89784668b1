//! Admin panel routes. Every mutating command is checked against the
//! admin session inside the portal, so these handlers only translate forms.

use axum::{
  extract::{Path, Query, State},
  response::Response,
  Form,
};
use chrono::Utc;
use serde::Deserialize;

use super::{dispatch, dispatch_to, render, Flash};
use crate::catalog::{ContentForm, ExamForm};
use crate::portal::{Command, Outcome};
use crate::state::ServerState;

const ADMIN_PAGE: &str = "/admin";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
  #[serde(default)]
  pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct NameForm {
  #[serde(default)]
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UrlForm {
  #[serde(default)]
  pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
  #[serde(default)]
  pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
  pub confirm: Option<String>,
}

impl DeleteForm {
  fn confirmed(&self) -> bool {
    self.confirm.as_deref() == Some("yes")
  }
}

#[derive(Debug, Deserialize)]
pub struct LiveForm {
  #[serde(default)]
  pub exam_id: String,
}

/// Open the panel, or show the login form when there is no admin session
pub async fn admin_panel(State(app): State<ServerState>, Query(flash): Query<Flash>) -> Response {
  let show_login = match app.lock() {
    Ok(mut portal) => matches!(
      portal.execute(Command::ShowAdminPanel, Utc::now()),
      Ok(Outcome::LoginRequired)
    ),
    Err(_) => false,
  };
  render(&app, flash.into_options(show_login))
}

pub async fn login(State(app): State<ServerState>, Form(form): Form<LoginForm>) -> Response {
  dispatch_to(&app, Command::AdminLogin(form.password), ADMIN_PAGE)
}

pub async fn close_panel(State(app): State<ServerState>) -> Response {
  dispatch(&app, Command::HideAdminPanel)
}

pub async fn switch_tab(State(app): State<ServerState>, Path(tab): Path<String>) -> Response {
  dispatch_to(&app, Command::SwitchAdminTab(tab), ADMIN_PAGE)
}

pub async fn update_website_name(
  State(app): State<ServerState>,
  Form(form): Form<NameForm>,
) -> Response {
  dispatch_to(&app, Command::UpdateWebsiteName(form.name), ADMIN_PAGE)
}

pub async fn update_homepage_image(
  State(app): State<ServerState>,
  Form(form): Form<UrlForm>,
) -> Response {
  dispatch_to(&app, Command::UpdateHomepageImage(form.url), ADMIN_PAGE)
}

pub async fn update_password(
  State(app): State<ServerState>,
  Form(form): Form<PasswordForm>,
) -> Response {
  dispatch_to(&app, Command::ChangeAdminPassword(form.password), ADMIN_PAGE)
}

pub async fn update_student_image(
  State(app): State<ServerState>,
  Form(form): Form<UrlForm>,
) -> Response {
  dispatch_to(&app, Command::UpdateStudentImage(form.url), ADMIN_PAGE)
}

pub async fn create_exam(State(app): State<ServerState>, Form(form): Form<ExamForm>) -> Response {
  dispatch_to(&app, Command::CreateExam(form), ADMIN_PAGE)
}

pub async fn edit_exam(State(app): State<ServerState>, Path(id): Path<i64>) -> Response {
  dispatch_to(&app, Command::EditExam(id), ADMIN_PAGE)
}

pub async fn update_exam(
  State(app): State<ServerState>,
  Path(id): Path<i64>,
  Form(form): Form<ExamForm>,
) -> Response {
  dispatch_to(&app, Command::UpdateExam { id, form }, ADMIN_PAGE)
}

pub async fn toggle_exam(State(app): State<ServerState>, Path(id): Path<i64>) -> Response {
  dispatch_to(&app, Command::ToggleExamStatus(id), ADMIN_PAGE)
}

/// First post asks for confirmation; a post with `confirm=yes` deletes
pub async fn delete_exam(
  State(app): State<ServerState>,
  Path(id): Path<i64>,
  Form(form): Form<DeleteForm>,
) -> Response {
  let confirmed = form.confirmed();
  dispatch_to(&app, Command::DeleteExam { id, confirmed }, ADMIN_PAGE)
}

pub async fn add_content(
  State(app): State<ServerState>,
  Form(form): Form<ContentForm>,
) -> Response {
  dispatch_to(&app, Command::AddLearningContent(form), ADMIN_PAGE)
}

/// Start a live session; an empty or unparsable selection means none
pub async fn start_live(State(app): State<ServerState>, Form(form): Form<LiveForm>) -> Response {
  let exam_id = form.exam_id.trim().parse::<i64>().ok();
  dispatch_to(&app, Command::StartLiveSession(exam_id), ADMIN_PAGE)
}
