use axum::{
  extract::{Path, State},
  response::Response,
  Form,
};
use serde::Deserialize;

use super::dispatch;
use crate::portal::Command;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct JoinForm {
  #[serde(default)]
  pub password: String,
}

/// Join an exam with its access password
pub async fn join_exam(
  State(app): State<ServerState>,
  Path(id): Path<i64>,
  Form(form): Form<JoinForm>,
) -> Response {
  dispatch(
    &app,
    Command::JoinExam {
      id,
      password: form.password,
    },
  )
}
