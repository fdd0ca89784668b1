use serde::{Deserialize, Serialize};

/// An exam students can join with its password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
  pub id: i64,
  pub title: String,
  pub description: String,
  /// Minutes
  pub duration: u32,
  pub category: String,
  /// Stored and compared in plaintext
  pub password: String,
  pub is_active: bool,
  pub participants: u32,
}

impl Exam {
  /// Case-insensitive substring match against title or description.
  /// `term` must already be lowercase.
  pub fn matches(&self, term: &str) -> bool {
    self.title.to_lowercase().contains(term) || self.description.to_lowercase().contains(term)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
  Video,
  Document,
  Quiz,
}

impl ContentType {
  pub const ALL: [ContentType; 3] = [ContentType::Video, ContentType::Document, ContentType::Quiz];

  pub fn from_id(s: &str) -> Option<Self> {
    match s {
      "video" => Some(Self::Video),
      "document" => Some(Self::Document),
      "quiz" => Some(Self::Quiz),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Video => "video",
      Self::Document => "document",
      Self::Quiz => "quiz",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Video => "Video",
      Self::Document => "Document",
      Self::Quiz => "Quiz",
    }
  }

  /// Font Awesome icon name shown on learning cards
  pub fn icon(&self) -> &'static str {
    match self {
      Self::Video => "video",
      Self::Document => "file-pdf",
      Self::Quiz => "question-circle",
    }
  }
}

/// A learning resource listed on the learning page. There is no update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningItem {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub url: String,
  #[serde(rename = "type")]
  pub content_type: ContentType,
  pub category: String,
}
