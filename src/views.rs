//! Page rendering.
//!
//! Everything here reads the portal state and produces HTML; nothing keeps
//! state of its own. The same state and options always render the same page.

use askama::Template;

use crate::catalog::{self, EXAM_CATEGORIES, ExamForm, LiveSession};
use crate::domain::{AppState, ContentType, Mode, Page};
use crate::filters;
use crate::navigation::{AdminTab, ViewState};

/// Per-request inputs that are not part of the portal state
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
  /// Exam catalog search term
  pub search: String,
  pub notice: Option<String>,
  pub error: Option<String>,
  /// Show the admin login form
  pub show_login: bool,
}

pub struct NavLink {
  pub id: &'static str,
  pub label: &'static str,
  pub active: bool,
}

pub struct ExamCard {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub duration: u32,
  pub participants: u32,
  pub category: String,
}

pub struct LearningCard {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub url: String,
  pub icon: &'static str,
}

pub struct ChatLine {
  pub sender: &'static str,
  pub message: String,
  pub time: String,
}

pub struct ProfileView {
  pub name: String,
  pub email: String,
  pub avatar: String,
  pub exams_count: u32,
  pub avg_score: String,
  pub learning_hours: u32,
}

pub struct AdminExamRow {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub duration: u32,
  pub participants: u32,
  pub toggle_label: &'static str,
}

pub struct SelectOption {
  pub value: String,
  pub label: String,
  pub selected: bool,
}

pub struct PendingDelete {
  pub id: i64,
  pub title: String,
}

pub struct AdminPanel {
  pub tabs: Vec<NavLink>,
  pub tab: &'static str,
  pub website_name: String,
  pub homepage_image: String,
  pub exams: Vec<AdminExamRow>,
  pub form: ExamForm,
  pub form_action: String,
  pub form_button: &'static str,
  pub categories: Vec<SelectOption>,
  pub content_types: Vec<SelectOption>,
  pub pending_delete: Option<PendingDelete>,
  pub live_options: Vec<SelectOption>,
  pub live: Option<LiveSession>,
}

#[derive(Template)]
#[template(path = "portal.html")]
pub struct PortalTemplate {
  pub site_name: String,
  pub mode: &'static str,
  pub mode_icon: &'static str,
  pub mode_toggle_title: &'static str,
  pub nav: Vec<NavLink>,
  pub page: &'static str,
  pub notice: Option<String>,
  pub error: Option<String>,
  pub homepage_image: String,
  pub search: String,
  pub exams: Vec<ExamCard>,
  pub learning: Vec<LearningCard>,
  pub chat: Vec<ChatLine>,
  pub profile: ProfileView,
  pub admin: Option<AdminPanel>,
  pub show_login: bool,
}

impl PortalTemplate {
  pub fn build(state: &AppState, view: &ViewState, options: RenderOptions) -> Self {
    let (mode_icon, mode_toggle_title) = match state.mode {
      Mode::Day => ("moon", "Switch to Night Mode"),
      Mode::Night => ("sun", "Switch to Day Mode"),
    };

    let admin = (state.is_admin && view.admin_panel_open).then(|| admin_panel(state, view));

    Self {
      site_name: state.website_name.clone(),
      mode: state.mode.as_str(),
      mode_icon,
      mode_toggle_title,
      nav: nav_links(state.current_page),
      page: state.current_page.as_str(),
      notice: options.notice,
      error: options.error,
      homepage_image: state.homepage_image.clone(),
      exams: exam_cards(state, &options.search),
      search: options.search,
      learning: learning_cards(state),
      chat: chat_lines(state),
      profile: profile_view(state),
      admin,
      show_login: options.show_login && !state.is_admin,
    }
  }
}

/// Render the current page with layout, notices and (when open) the admin panel
pub fn render_portal(state: &AppState, view: &ViewState, options: RenderOptions) -> askama::Result<String> {
  PortalTemplate::build(state, view, options).render()
}

fn nav_links(current: Page) -> Vec<NavLink> {
  Page::ALL
    .iter()
    .map(|page| NavLink {
      id: page.as_str(),
      label: page.label(),
      active: *page == current,
    })
    .collect()
}

/// Public catalog: active exams only, narrowed by the search term
fn exam_cards(state: &AppState, search: &str) -> Vec<ExamCard> {
  catalog::filter_exams(state, search)
    .into_iter()
    .map(|exam| ExamCard {
      id: exam.id,
      title: exam.title.clone(),
      description: exam.description.clone(),
      duration: exam.duration,
      participants: exam.participants,
      category: exam.category.clone(),
    })
    .collect()
}

fn learning_cards(state: &AppState) -> Vec<LearningCard> {
  state
    .learning_content
    .iter()
    .map(|item| LearningCard {
      id: item.id,
      title: item.title.clone(),
      description: item.description.clone(),
      url: item.url.clone(),
      icon: item.content_type.icon(),
    })
    .collect()
}

fn chat_lines(state: &AppState) -> Vec<ChatLine> {
  state
    .ai_chat_history
    .iter()
    .map(|msg| ChatLine {
      sender: msg.sender.as_str(),
      message: msg.message.clone(),
      time: msg.timestamp.format("%H:%M").to_string(),
    })
    .collect()
}

fn profile_view(state: &AppState) -> ProfileView {
  let student = &state.student;
  ProfileView {
    name: student.name.clone(),
    email: student.email.clone(),
    avatar: student.avatar.clone(),
    exams_count: student.exams_count,
    avg_score: format_score(student.avg_score),
    learning_hours: student.learning_hours,
  }
}

/// Whole scores print without a decimal point, others with one digit
fn format_score(score: f64) -> String {
  if score.fract() == 0.0 {
    format!("{:.0}", score)
  } else {
    format!("{:.1}", score)
  }
}

fn admin_panel(state: &AppState, view: &ViewState) -> AdminPanel {
  let tabs = AdminTab::ALL
    .iter()
    .map(|tab| NavLink {
      id: tab.as_str(),
      label: tab.label(),
      active: *tab == view.admin_tab,
    })
    .collect();

  // Management lists every exam, active or not
  let exams = state
    .exams
    .iter()
    .map(|exam| AdminExamRow {
      id: exam.id,
      title: exam.title.clone(),
      description: exam.description.clone(),
      duration: exam.duration,
      participants: exam.participants,
      toggle_label: if exam.is_active { "Disable" } else { "Enable" },
    })
    .collect();

  let editing = view.editing_exam.and_then(|id| state.exam(id));
  let (form, form_action, form_button) = match editing {
    Some(exam) => (
      ExamForm::from_exam(exam),
      format!("/admin/exams/{}", exam.id),
      "Update Exam",
    ),
    None => (ExamForm::default(), "/admin/exams".to_string(), "Create Exam"),
  };

  let categories = EXAM_CATEGORIES
    .iter()
    .map(|(value, label)| SelectOption {
      value: value.to_string(),
      label: label.to_string(),
      selected: form.category == *value,
    })
    .collect();

  let content_types = ContentType::ALL
    .iter()
    .map(|kind| SelectOption {
      value: kind.as_str().to_string(),
      label: kind.label().to_string(),
      selected: false,
    })
    .collect();

  let pending_delete = view
    .pending_delete
    .and_then(|id| state.exam(id))
    .map(|exam| PendingDelete {
      id: exam.id,
      title: exam.title.clone(),
    });

  let live_exam = view.live_session.as_ref().map(|live| live.exam_id);
  let live_options = state
    .active_exams()
    .map(|exam| SelectOption {
      value: exam.id.to_string(),
      label: exam.title.clone(),
      selected: Some(exam.id) == live_exam,
    })
    .collect();

  AdminPanel {
    tabs,
    tab: view.admin_tab.as_str(),
    website_name: state.website_name.clone(),
    homepage_image: state.homepage_image.clone(),
    exams,
    form,
    form_action,
    form_button,
    categories,
    content_types,
    pending_delete,
    live_options,
    live: view.live_session.clone(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  fn render(state: &AppState, view: &ViewState) -> String {
    render_portal(state, view, RenderOptions::default()).unwrap()
  }

  #[test]
  fn test_render_is_idempotent() {
    let state = AppState::seed(Utc::now());
    let view = ViewState::default();
    assert_eq!(render(&state, &view), render(&state, &view));
  }

  #[test]
  fn test_catalog_hides_inactive_exams() {
    let mut state = AppState::seed(Utc::now());
    state.current_page = Page::Exams;
    let html = render(&state, &ViewState::default());

    assert!(html.contains("Mathematics Final Exam"));
    assert!(html.contains("Science Olympiad"));
    assert!(!html.contains("English Literature Test"));
  }

  #[test]
  fn test_admin_panel_lists_all_exams() {
    let mut state = AppState::seed(Utc::now());
    state.is_admin = true;
    let view = ViewState {
      admin_panel_open: true,
      admin_tab: AdminTab::Exams,
      ..ViewState::default()
    };

    let template = PortalTemplate::build(&state, &view, RenderOptions::default());
    let admin = template.admin.as_ref().unwrap();
    assert_eq!(admin.exams.len(), 3);
    assert_eq!(admin.exams[2].toggle_label, "Enable");
    assert_eq!(admin.live_options.len(), 2);

    let html = template.render().unwrap();
    assert!(html.contains("English Literature Test"));
  }

  #[test]
  fn test_admin_panel_hidden_without_session() {
    let state = AppState::seed(Utc::now());
    let view = ViewState {
      admin_panel_open: true,
      ..ViewState::default()
    };
    assert!(PortalTemplate::build(&state, &view, RenderOptions::default()).admin.is_none());
  }

  #[test]
  fn test_search_narrows_catalog() {
    let mut state = AppState::seed(Utc::now());
    state.current_page = Page::Exams;
    let options = RenderOptions {
      search: "physics".to_string(),
      ..RenderOptions::default()
    };
    let template = PortalTemplate::build(&state, &ViewState::default(), options);
    let ids: Vec<i64> = template.exams.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2]);
  }

  #[test]
  fn test_edit_form_prefilled() {
    let mut state = AppState::seed(Utc::now());
    state.is_admin = true;
    let view = ViewState {
      admin_panel_open: true,
      admin_tab: AdminTab::Exams,
      editing_exam: Some(2),
      ..ViewState::default()
    };
    let template = PortalTemplate::build(&state, &view, RenderOptions::default());
    let admin = template.admin.unwrap();
    assert_eq!(admin.form.title, "Science Olympiad");
    assert_eq!(admin.form_action, "/admin/exams/2");
    assert_eq!(admin.form_button, "Update Exam");
    assert!(admin.categories.iter().any(|c| c.value == "science" && c.selected));
  }

  #[test]
  fn test_profile_and_chat_rendered() {
    let mut state = AppState::seed(Utc::now());
    state.current_page = Page::Profile;
    state.student.avg_score = 85.0;
    let html = render(&state, &ViewState::default());
    assert!(html.contains("John Doe"));
    assert!(html.contains("85%"));

    state.student.avg_score = 87.5;
    let html = render(&state, &ViewState::default());
    assert!(html.contains("87.5%"));

    state.current_page = Page::AiBoard;
    let html = render(&state, &ViewState::default());
    assert!(html.contains("Ask me anything about your studies!"));
  }
}
