use axum::{
  extract::{Path, State},
  response::Response,
};

use super::dispatch;
use crate::portal::Command;
use crate::state::ServerState;

pub async fn access_content(State(app): State<ServerState>, Path(id): Path<i64>) -> Response {
  dispatch(&app, Command::AccessContent(id))
}
