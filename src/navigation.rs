//! Page navigation, admin panel visibility and display mode.

use crate::catalog::LiveSession;
use crate::domain::{AppState, Mode, Page};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
  #[default]
  General,
  Exams,
  Content,
  Live,
}

impl AdminTab {
  pub const ALL: [AdminTab; 4] = [AdminTab::General, AdminTab::Exams, AdminTab::Content, AdminTab::Live];

  pub fn from_id(s: &str) -> Option<Self> {
    match s {
      "general" => Some(Self::General),
      "exams" => Some(Self::Exams),
      "content" => Some(Self::Content),
      "live" => Some(Self::Live),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::General => "general",
      Self::Exams => "exams",
      Self::Content => "content",
      Self::Live => "live",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::General => "General",
      Self::Exams => "Exams",
      Self::Content => "Content",
      Self::Live => "Live",
    }
  }
}

/// UI state that is not persisted: it resets when the server restarts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
  pub admin_panel_open: bool,
  pub admin_tab: AdminTab,
  /// Exam loaded into the admin form for editing
  pub editing_exam: Option<i64>,
  /// Exam waiting for delete confirmation
  pub pending_delete: Option<i64>,
  pub live_session: Option<LiveSession>,
}

/// Switch to a page by id. Unknown ids change nothing and return `None`.
pub fn navigate_to(state: &mut AppState, page_id: &str) -> Option<Page> {
  let page = Page::from_id(page_id)?;
  state.current_page = page;
  Some(page)
}

/// Open the admin panel. Returns `false` without opening it when not logged in.
pub fn show_admin_panel(state: &AppState, view: &mut ViewState) -> bool {
  if !state.is_admin {
    return false;
  }
  view.admin_panel_open = true;
  true
}

pub fn hide_admin_panel(view: &mut ViewState) {
  view.admin_panel_open = false;
  view.editing_exam = None;
  view.pending_delete = None;
}

/// Select an admin tab. Only works while the panel is open.
/// Any delete awaiting confirmation is dropped.
pub fn switch_admin_tab(view: &mut ViewState, tab_id: &str) -> Option<AdminTab> {
  if !view.admin_panel_open {
    return None;
  }
  let tab = AdminTab::from_id(tab_id)?;
  view.admin_tab = tab;
  view.pending_delete = None;
  Some(tab)
}

pub fn toggle_mode(state: &mut AppState) -> Mode {
  state.mode = state.mode.toggled();
  state.mode
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  #[test]
  fn test_navigate_to_known_page() {
    let mut state = AppState::seed(Utc::now());
    assert_eq!(navigate_to(&mut state, "ai-board"), Some(Page::AiBoard));
    assert_eq!(state.current_page, Page::AiBoard);
  }

  #[test]
  fn test_navigate_to_unknown_page_is_noop() {
    let mut state = AppState::seed(Utc::now());
    navigate_to(&mut state, "profile");
    let before = state.clone();

    assert_eq!(navigate_to(&mut state, "dashboard"), None);
    assert_eq!(state, before);
  }

  #[test]
  fn test_admin_panel_requires_admin() {
    let mut state = AppState::seed(Utc::now());
    let mut view = ViewState::default();
    assert!(!show_admin_panel(&state, &mut view));
    assert!(!view.admin_panel_open);

    state.is_admin = true;
    assert!(show_admin_panel(&state, &mut view));
    assert!(view.admin_panel_open);
    // Panel is independent of the current page
    assert_eq!(state.current_page, Page::Home);
  }

  #[test]
  fn test_switch_tab_only_when_open() {
    let mut view = ViewState::default();
    assert_eq!(switch_admin_tab(&mut view, "live"), None);
    assert_eq!(view.admin_tab, AdminTab::General);

    view.admin_panel_open = true;
    assert_eq!(switch_admin_tab(&mut view, "live"), Some(AdminTab::Live));
    assert_eq!(switch_admin_tab(&mut view, "billing"), None);
    assert_eq!(view.admin_tab, AdminTab::Live);

    hide_admin_panel(&mut view);
    assert!(!view.admin_panel_open);
  }

  #[test]
  fn test_switch_tab_drops_pending_delete() {
    let mut view = ViewState {
      admin_panel_open: true,
      admin_tab: AdminTab::Exams,
      pending_delete: Some(2),
      ..ViewState::default()
    };
    assert_eq!(switch_admin_tab(&mut view, "exams"), Some(AdminTab::Exams));
    assert_eq!(view.pending_delete, None);
  }

  #[test]
  fn test_toggle_mode() {
    let mut state = AppState::seed(Utc::now());
    assert_eq!(toggle_mode(&mut state), Mode::Night);
    assert_eq!(toggle_mode(&mut state), Mode::Day);
  }
}
