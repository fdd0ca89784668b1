use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{ContentType, Exam, LearningItem};
use super::chat::{ChatMessage, Sender};

pub const DEFAULT_WEBSITE_NAME: &str = "Live Exam Portal";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_HOMEPAGE_IMAGE: &str = "https://images.unsplash.com/photo-1523240795612-9a054b0db644?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80";
pub const DEFAULT_AVATAR: &str = "https://via.placeholder.com/150";
pub const WELCOME_MESSAGE: &str =
  "Hello! I'm here to help with your learning. Ask me anything about your studies!";

/// Top-level pages reachable from the navigation bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
  #[default]
  Home,
  Exams,
  Learning,
  AiBoard,
  Profile,
}

impl Page {
  pub const ALL: [Page; 5] = [
    Page::Home,
    Page::Exams,
    Page::Learning,
    Page::AiBoard,
    Page::Profile,
  ];

  pub fn from_id(s: &str) -> Option<Self> {
    match s {
      "home" => Some(Self::Home),
      "exams" => Some(Self::Exams),
      "learning" => Some(Self::Learning),
      "ai-board" => Some(Self::AiBoard),
      "profile" => Some(Self::Profile),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Home => "home",
      Self::Exams => "exams",
      Self::Learning => "learning",
      Self::AiBoard => "ai-board",
      Self::Profile => "profile",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Home => "Home",
      Self::Exams => "Exams",
      Self::Learning => "Learning",
      Self::AiBoard => "AI Board",
      Self::Profile => "Profile",
    }
  }
}

/// Day/night display mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  #[default]
  Day,
  Night,
}

impl Mode {
  pub fn toggled(self) -> Self {
    match self {
      Self::Day => Self::Night,
      Self::Night => Self::Day,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Day => "day",
      Self::Night => "night",
    }
  }
}

/// The single student using this portal instance.
///
/// Missing fields in a persisted record fall back to the seed student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
  pub name: String,
  pub email: String,
  /// URL or data URI
  pub avatar: String,
  pub exams_count: u32,
  /// Percentage, 0-100; may be fractional
  pub avg_score: f64,
  pub learning_hours: u32,
}

impl Default for Student {
  fn default() -> Self {
    Self {
      name: "John Doe".to_string(),
      email: "john@example.com".to_string(),
      avatar: DEFAULT_AVATAR.to_string(),
      exams_count: 0,
      avg_score: 0.0,
      learning_hours: 0,
    }
  }
}

/// Root application state, persisted as one JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
  pub current_page: Page,
  pub is_admin: bool,
  pub admin_password: String,
  pub website_name: String,
  pub homepage_image: String,
  pub mode: Mode,
  pub student: Student,
  pub exams: Vec<Exam>,
  pub learning_content: Vec<LearningItem>,
  pub ai_chat_history: Vec<ChatMessage>,
}

impl AppState {
  /// Fixed seed data the portal starts from before any persisted state is applied.
  pub fn seed(now: DateTime<Utc>) -> Self {
    Self {
      current_page: Page::Home,
      is_admin: false,
      admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
      website_name: DEFAULT_WEBSITE_NAME.to_string(),
      homepage_image: DEFAULT_HOMEPAGE_IMAGE.to_string(),
      mode: Mode::Day,
      student: Student::default(),
      exams: seed_exams(),
      learning_content: seed_learning_content(),
      ai_chat_history: vec![ChatMessage::new(Sender::Bot, WELCOME_MESSAGE, now)],
    }
  }

  pub fn exam(&self, id: i64) -> Option<&Exam> {
    self.exams.iter().find(|e| e.id == id)
  }

  pub fn exam_mut(&mut self, id: i64) -> Option<&mut Exam> {
    self.exams.iter_mut().find(|e| e.id == id)
  }

  pub fn learning_item(&self, id: i64) -> Option<&LearningItem> {
    self.learning_content.iter().find(|c| c.id == id)
  }

  /// Exams visible in the public catalog, in catalog order
  pub fn active_exams(&self) -> impl Iterator<Item = &Exam> {
    self.exams.iter().filter(|e| e.is_active)
  }
}

#[allow(clippy::too_many_arguments)]
fn exam(
  id: i64,
  title: &str,
  description: &str,
  duration: u32,
  category: &str,
  password: &str,
  is_active: bool,
  participants: u32,
) -> Exam {
  Exam {
    id,
    title: title.to_string(),
    description: description.to_string(),
    duration,
    category: category.to_string(),
    password: password.to_string(),
    is_active,
    participants,
  }
}

fn seed_exams() -> Vec<Exam> {
  vec![
    exam(
      1,
      "Mathematics Final Exam",
      "Comprehensive mathematics examination covering algebra, geometry, and calculus.",
      120,
      "math",
      "math2024",
      true,
      45,
    ),
    exam(
      2,
      "Science Olympiad",
      "Challenging science exam covering physics, chemistry, and biology concepts.",
      90,
      "science",
      "science2024",
      true,
      32,
    ),
    exam(
      3,
      "English Literature Test",
      "Analysis of classic literature and comprehension questions.",
      75,
      "english",
      "english2024",
      false,
      28,
    ),
  ]
}

fn item(id: i64, title: &str, description: &str, content_type: ContentType, category: &str) -> LearningItem {
  LearningItem {
    id,
    title: title.to_string(),
    description: description.to_string(),
    url: "#".to_string(),
    content_type,
    category: category.to_string(),
  }
}

fn seed_learning_content() -> Vec<LearningItem> {
  vec![
    item(
      1,
      "Algebra Fundamentals",
      "Learn the basics of algebra including equations and functions.",
      ContentType::Video,
      "math",
    ),
    item(
      2,
      "Chemistry Formulas Guide",
      "Comprehensive guide to essential chemistry formulas and equations.",
      ContentType::Document,
      "science",
    ),
    item(
      3,
      "Literature Analysis Techniques",
      "Master the art of literary analysis and critical thinking.",
      ContentType::Document,
      "english",
    ),
  ]
}
