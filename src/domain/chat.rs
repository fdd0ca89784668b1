use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
  User,
  Bot,
}

impl Sender {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::User => "user",
      Self::Bot => "bot",
    }
  }
}

/// One entry in the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub sender: Sender,
  pub message: String,
  pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
  pub fn new(sender: Sender, message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
    Self {
      sender,
      message: message.into(),
      timestamp,
    }
  }
}
