//! Exam and learning-content management.
//!
//! All functions operate on a borrowed [`AppState`] and leave it untouched
//! when they return an error. Lookup misses on delete/toggle/access are
//! silent no-ops.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{AppState, ContentType, Exam, LearningItem};
use crate::error::PortalError;
use crate::validation::{parse_duration, require_all};

/// Category given to content added from the admin panel
pub const DEFAULT_CONTENT_CATEGORY: &str = "general";

/// Exam categories offered by the admin form
pub const EXAM_CATEGORIES: [(&str, &str); 4] = [
  ("math", "Mathematics"),
  ("science", "Science"),
  ("english", "English"),
  ("history", "History"),
];

/// Raw exam form input, used for both create and update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExamForm {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub duration: String,
  #[serde(default)]
  pub password: String,
  #[serde(default)]
  pub category: String,
}

struct ValidExam {
  title: String,
  description: String,
  duration: u32,
  password: String,
  category: String,
}

impl ExamForm {
  /// Prefill values for editing an existing exam
  pub fn from_exam(exam: &Exam) -> Self {
    Self {
      title: exam.title.clone(),
      description: exam.description.clone(),
      duration: exam.duration.to_string(),
      password: exam.password.clone(),
      category: exam.category.clone(),
    }
  }

  fn validate(&self) -> Result<ValidExam, PortalError> {
    require_all(&[
      self.title.as_str(),
      self.description.as_str(),
      self.duration.as_str(),
      self.password.as_str(),
      self.category.as_str(),
    ])?;
    let duration = parse_duration(&self.duration)?;

    Ok(ValidExam {
      title: self.title.trim().to_string(),
      description: self.description.trim().to_string(),
      duration,
      password: self.password.clone(),
      category: self.category.trim().to_string(),
    })
  }
}

/// Raw learning-content form input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentForm {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub url: String,
  #[serde(default, rename = "type")]
  pub content_type: String,
}

/// Result of a successful join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedExam {
  pub id: i64,
  pub title: String,
  pub duration: u32,
}

/// Exam currently broadcast from the admin live tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSession {
  pub exam_id: i64,
  pub title: String,
  pub participants: u32,
}

/// Time-based id that is strictly greater than every existing id,
/// so rapid successive creates never collide.
pub fn next_id(existing: impl Iterator<Item = i64>, now: DateTime<Utc>) -> Result<i64, PortalError> {
  let max = existing.max().unwrap_or(0);
  let after = max.checked_add(1).ok_or(PortalError::IdsExhausted)?;
  Ok(now.timestamp_millis().max(after))
}

// ============================================================================
// Exams
// ============================================================================

pub fn create_exam(state: &mut AppState, form: &ExamForm, now: DateTime<Utc>) -> Result<i64, PortalError> {
  let valid = form.validate()?;
  let id = next_id(state.exams.iter().map(|e| e.id), now)?;

  state.exams.push(Exam {
    id,
    title: valid.title,
    description: valid.description,
    duration: valid.duration,
    category: valid.category,
    password: valid.password,
    is_active: true,
    participants: 0,
  });

  Ok(id)
}

/// Overwrite every editable field of an existing exam
pub fn update_exam(state: &mut AppState, id: i64, form: &ExamForm) -> Result<(), PortalError> {
  if state.exam(id).is_none() {
    return Err(PortalError::ExamNotFound);
  }
  let valid = form.validate()?;
  let exam = state.exam_mut(id).ok_or(PortalError::ExamNotFound)?;

  exam.title = valid.title;
  exam.description = valid.description;
  exam.duration = valid.duration;
  exam.password = valid.password;
  exam.category = valid.category;
  Ok(())
}

/// Remove an exam. Returns whether anything was removed.
pub fn delete_exam(state: &mut AppState, id: i64) -> bool {
  let before = state.exams.len();
  state.exams.retain(|e| e.id != id);
  state.exams.len() != before
}

/// Flip `is_active`, returning the new value, or `None` if the exam does not exist
pub fn toggle_exam_status(state: &mut AppState, id: i64) -> Option<bool> {
  let exam = state.exam_mut(id)?;
  exam.is_active = !exam.is_active;
  Some(exam.is_active)
}

/// Join an exam with its password.
///
/// The password is compared in plaintext and case-sensitively, with no
/// attempt limit. Only a successful join touches the state.
pub fn join_exam(state: &mut AppState, id: i64, password: &str) -> Result<JoinedExam, PortalError> {
  let joined = match state.exam(id) {
    Some(exam) if !exam.is_active => return Err(PortalError::ExamInactive),
    Some(exam) if exam.password == password => JoinedExam {
      id,
      title: exam.title.clone(),
      duration: exam.duration,
    },
    _ => return Err(PortalError::IncorrectExamPassword),
  };

  state.student.exams_count = state.student.exams_count.saturating_add(1);
  Ok(joined)
}

/// Active exams whose title or description contains `term`, ignoring case.
/// An empty term matches every active exam.
pub fn filter_exams<'a>(state: &'a AppState, term: &str) -> Vec<&'a Exam> {
  let term = term.trim().to_lowercase();
  state.active_exams().filter(|e| e.matches(&term)).collect()
}

/// Pick the exam for a live session. Only active exams can go live.
pub fn start_live_session(state: &AppState, exam_id: Option<i64>) -> Result<Option<LiveSession>, PortalError> {
  let exam_id = exam_id.ok_or(PortalError::NoExamSelected)?;
  Ok(
    state
      .exam(exam_id)
      .filter(|e| e.is_active)
      .map(|e| LiveSession {
        exam_id,
        title: e.title.clone(),
        participants: e.participants,
      }),
  )
}

// ============================================================================
// Learning content
// ============================================================================

pub fn add_learning_content(state: &mut AppState, form: &ContentForm, now: DateTime<Utc>) -> Result<i64, PortalError> {
  require_all(&[
    form.title.as_str(),
    form.description.as_str(),
    form.url.as_str(),
    form.content_type.as_str(),
  ])?;
  let content_type = ContentType::from_id(form.content_type.trim())
    .ok_or_else(|| PortalError::InvalidContentType(form.content_type.clone()))?;
  let id = next_id(state.learning_content.iter().map(|c| c.id), now)?;

  state.learning_content.push(LearningItem {
    id,
    title: form.title.trim().to_string(),
    description: form.description.trim().to_string(),
    url: form.url.trim().to_string(),
    content_type,
    category: DEFAULT_CONTENT_CATEGORY.to_string(),
  });

  Ok(id)
}

/// Open a learning item, counting one learning hour. Returns the item title.
pub fn access_content(state: &mut AppState, id: i64) -> Option<String> {
  let title = state.learning_item(id)?.title.clone();
  state.student.learning_hours = state.student.learning_hours.saturating_add(1);
  Some(title)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
  }

  fn form(title: &str, duration: &str) -> ExamForm {
    ExamForm {
      title: title.to_string(),
      description: "Covers everything".to_string(),
      duration: duration.to_string(),
      password: "Secret1".to_string(),
      category: "history".to_string(),
    }
  }

  fn ids(state: &AppState) -> Vec<i64> {
    state.exams.iter().map(|e| e.id).collect()
  }

  #[test]
  fn test_create_exam_defaults() {
    let mut state = AppState::seed(now());
    let id = create_exam(&mut state, &form("History Quiz", "30"), now()).unwrap();

    let exam = state.exam(id).unwrap();
    assert!(exam.is_active);
    assert_eq!(exam.participants, 0);
    assert_eq!(exam.duration, 30);
    assert_eq!(exam.category, "history");
    assert_eq!(state.exams.last().unwrap().id, id);
  }

  #[test]
  fn test_rapid_creates_get_unique_ids() {
    let mut state = AppState::seed(now());
    let mut created = Vec::new();
    for i in 0..5 {
      created.push(create_exam(&mut state, &form(&format!("Exam {}", i), "10"), now()).unwrap());
    }

    let mut all = ids(&state);
    all.sort();
    all.dedup();
    assert_eq!(all.len(), state.exams.len());
    assert!(created.windows(2).all(|w| w[0] < w[1]));
  }

  #[test]
  fn test_next_id_beats_clock_skew() {
    let existing = vec![now().timestamp_millis() + 500];
    assert_eq!(next_id(existing.into_iter(), now()), Ok(now().timestamp_millis() + 501));
    assert_eq!(next_id(std::iter::empty(), now()), Ok(now().timestamp_millis()));
  }

  #[test]
  fn test_next_id_at_i64_max_is_an_error() {
    assert_eq!(next_id([i64::MAX].into_iter(), now()), Err(PortalError::IdsExhausted));

    let mut state = AppState::seed(now());
    state.exams[0].id = i64::MAX;
    assert_eq!(
      create_exam(&mut state, &form("Overflow", "10"), now()),
      Err(PortalError::IdsExhausted)
    );
    assert_eq!(state.exams.len(), 3);
  }

  #[test]
  fn test_counters_saturate() {
    let mut state = AppState::seed(now());
    state.student.exams_count = u32::MAX;
    state.student.learning_hours = u32::MAX;

    join_exam(&mut state, 1, "math2024").unwrap();
    access_content(&mut state, 1).unwrap();
    assert_eq!(state.student.exams_count, u32::MAX);
    assert_eq!(state.student.learning_hours, u32::MAX);
  }

  #[test]
  fn test_join_inactive_exam_is_rejected() {
    let mut state = AppState::seed(now());
    assert_eq!(join_exam(&mut state, 3, "english2024"), Err(PortalError::ExamInactive));
    assert_eq!(state.student.exams_count, 0);
  }

  #[test]
  fn test_create_exam_rejects_invalid_input() {
    let mut state = AppState::seed(now());
    let before = state.clone();

    assert_eq!(create_exam(&mut state, &form("", "30"), now()), Err(PortalError::MissingFields));
    assert_eq!(create_exam(&mut state, &form("Quiz", "0"), now()), Err(PortalError::MissingFields));
    assert_eq!(create_exam(&mut state, &form("Quiz", "abc"), now()), Err(PortalError::MissingFields));
    let mut no_category = form("Quiz", "30");
    no_category.category.clear();
    assert_eq!(create_exam(&mut state, &no_category, now()), Err(PortalError::MissingFields));

    assert_eq!(state, before);
  }

  #[test]
  fn test_update_exam_overwrites_fields() {
    let mut state = AppState::seed(now());
    update_exam(&mut state, 2, &form("Physics Cup", "100")).unwrap();

    let exam = state.exam(2).unwrap();
    assert_eq!(exam.title, "Physics Cup");
    assert_eq!(exam.duration, 100);
    assert_eq!(exam.password, "Secret1");
    // Status and participants are not form fields
    assert!(exam.is_active);
    assert_eq!(exam.participants, 32);
  }

  #[test]
  fn test_update_missing_exam_reports_error() {
    let mut state = AppState::seed(now());
    let before = state.clone();
    assert_eq!(update_exam(&mut state, 99, &form("X", "10")), Err(PortalError::ExamNotFound));
    assert_eq!(state, before);
  }

  #[test]
  fn test_delete_exam() {
    let mut state = AppState::seed(now());
    assert!(delete_exam(&mut state, 2));
    assert_eq!(ids(&state), vec![1, 3]);

    assert!(!delete_exam(&mut state, 99));
    assert_eq!(ids(&state), vec![1, 3]);
  }

  #[test]
  fn test_delete_nonexistent_keeps_seed() {
    let mut state = AppState::seed(now());
    assert!(!delete_exam(&mut state, 99));
    assert_eq!(ids(&state), vec![1, 2, 3]);
  }

  #[test]
  fn test_toggle_exam_status() {
    let mut state = AppState::seed(now());
    assert_eq!(toggle_exam_status(&mut state, 3), Some(true));
    assert_eq!(toggle_exam_status(&mut state, 3), Some(false));
    assert_eq!(toggle_exam_status(&mut state, 42), None);
  }

  #[test]
  fn test_join_exam_with_correct_password() {
    let mut state = AppState::seed(now());
    let joined = join_exam(&mut state, 1, "math2024").unwrap();
    assert_eq!(joined.title, "Mathematics Final Exam");
    assert_eq!(joined.duration, 120);
    assert_eq!(state.student.exams_count, 1);
  }

  #[test]
  fn test_join_exam_wrong_password_is_noop() {
    let mut state = AppState::seed(now());
    let before = serde_json::to_string(&state).unwrap();

    assert_eq!(join_exam(&mut state, 1, "MATH2024"), Err(PortalError::IncorrectExamPassword));
    assert_eq!(join_exam(&mut state, 1, ""), Err(PortalError::IncorrectExamPassword));
    assert_eq!(join_exam(&mut state, 77, "math2024"), Err(PortalError::IncorrectExamPassword));

    assert_eq!(serde_json::to_string(&state).unwrap(), before);
  }

  #[test]
  fn test_filter_exams() {
    let state = AppState::seed(now());

    let all: Vec<i64> = filter_exams(&state, "").iter().map(|e| e.id).collect();
    assert_eq!(all, vec![1, 2]);

    let science: Vec<i64> = filter_exams(&state, "CHEMISTRY").iter().map(|e| e.id).collect();
    assert_eq!(science, vec![2]);

    // Inactive exams never match, even on an exact title
    assert!(filter_exams(&state, "literature").is_empty());
  }

  #[test]
  fn test_add_learning_content() {
    let mut state = AppState::seed(now());
    let content = ContentForm {
      title: "Periodic Table Quiz".to_string(),
      description: "Test yourself".to_string(),
      url: "https://example.com/quiz".to_string(),
      content_type: "quiz".to_string(),
    };
    let id = add_learning_content(&mut state, &content, now()).unwrap();

    let item = state.learning_item(id).unwrap();
    assert_eq!(item.content_type, ContentType::Quiz);
    assert_eq!(item.category, DEFAULT_CONTENT_CATEGORY);
    assert_eq!(state.learning_content.len(), 4);
  }

  #[test]
  fn test_add_learning_content_validation() {
    let mut state = AppState::seed(now());
    let mut content = ContentForm {
      title: "Notes".to_string(),
      description: "".to_string(),
      url: "#".to_string(),
      content_type: "video".to_string(),
    };
    assert_eq!(
      add_learning_content(&mut state, &content, now()),
      Err(PortalError::MissingFields)
    );

    content.description = "Lecture notes".to_string();
    content.content_type = "podcast".to_string();
    assert!(matches!(
      add_learning_content(&mut state, &content, now()),
      Err(PortalError::InvalidContentType(_))
    ));
    assert_eq!(state.learning_content.len(), 3);
  }

  #[test]
  fn test_access_content_counts_hours() {
    let mut state = AppState::seed(now());
    assert_eq!(access_content(&mut state, 1).as_deref(), Some("Algebra Fundamentals"));
    assert_eq!(access_content(&mut state, 404), None);
    assert_eq!(state.student.learning_hours, 1);
  }

  #[test]
  fn test_start_live_session() {
    let state = AppState::seed(now());
    assert_eq!(start_live_session(&state, None), Err(PortalError::NoExamSelected));

    let live = start_live_session(&state, Some(2)).unwrap().unwrap();
    assert_eq!(live.title, "Science Olympiad");
    assert_eq!(live.participants, 32);

    // Inactive or missing exams cannot go live
    assert_eq!(start_live_session(&state, Some(3)), Ok(None));
    assert_eq!(start_live_session(&state, Some(9)), Ok(None));
  }
}
