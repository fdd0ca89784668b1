use axum::{extract::State, response::Response, Form};
use serde::Deserialize;

use super::dispatch;
use crate::portal::Command;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct ChatForm {
  #[serde(default)]
  pub query: String,
}

/// Ask the study assistant; the reply lands in the chat history
pub async fn send_chat(State(app): State<ServerState>, Form(form): Form<ChatForm>) -> Response {
  dispatch(&app, Command::SendChat(form.query))
}
