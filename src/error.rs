//! Error types for portal commands and state storage.
//!
//! `PortalError` messages are shown to the user as-is, so its `Display`
//! output is the user-visible wording.

/// A command was rejected and the state was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortalError {
  /// A required form field was empty or the duration was not a positive integer.
  #[error("Please fill in all fields")]
  MissingFields,

  #[error("Unknown content type: {0}")]
  InvalidContentType(String),

  #[error("Exam not found")]
  ExamNotFound,

  #[error("Incorrect password. Please try again.")]
  IncorrectExamPassword,

  #[error("Incorrect admin password. Please try again.")]
  IncorrectAdminPassword,

  #[error("Password must be at least 6 characters long")]
  PasswordTooShort,

  #[error("This exam is not currently available")]
  ExamInactive,

  /// The next id would overflow
  #[error("Cannot create more items")]
  IdsExhausted,

  #[error("Please select an exam to start a live session")]
  NoExamSelected,

  /// An admin-only command was issued without an admin session.
  #[error("Admin access required")]
  AdminRequired,

  #[error("Portal state unavailable")]
  Unavailable,
}

impl PortalError {
  /// Authorization failures as opposed to input validation failures
  pub fn is_authorization(&self) -> bool {
    matches!(
      self,
      Self::IncorrectExamPassword | Self::IncorrectAdminPassword | Self::AdminRequired
    )
  }
}

/// Failure reading or writing the persisted state blob.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
  #[error("Database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("Malformed state blob: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Stored state is not a JSON object")]
  NotAnObject,

  #[error("Database unavailable")]
  Lock,
}
