//! The portal state container and its command layer.
//!
//! [`apply`] is the pure transition: it takes the state, the volatile view
//! state and one [`Command`], mutates them in place and reports an
//! [`Outcome`]. [`Portal`] owns both states plus the database and persists
//! the [`AppState`] after every command whose outcome changed it.

use chrono::{DateTime, Utc};

use crate::admin;
use crate::catalog::{self, ContentForm, ExamForm, LiveSession};
use crate::chat;
use crate::db::{self, DbPool, LogOnError};
use crate::domain::{AppState, Mode, Page};
use crate::error::PortalError;
use crate::navigation::{self, AdminTab, ViewState};

/// Everything a user can do to the portal
#[derive(Debug, Clone)]
pub enum Command {
  Navigate(String),
  ToggleMode,
  ShowAdminPanel,
  HideAdminPanel,
  SwitchAdminTab(String),
  AdminLogin(String),
  ChangeAdminPassword(String),
  UpdateWebsiteName(String),
  UpdateHomepageImage(String),
  UpdateStudentImage(String),
  CreateExam(ExamForm),
  EditExam(i64),
  UpdateExam { id: i64, form: ExamForm },
  /// Deletes only when `confirmed` is set and this exam was staged; otherwise stages it
  DeleteExam { id: i64, confirmed: bool },
  ToggleExamStatus(i64),
  JoinExam { id: i64, password: String },
  AddLearningContent(ContentForm),
  AccessContent(i64),
  StartLiveSession(Option<i64>),
  SendChat(String),
  UpdateAvatar(String),
}

impl Command {
  /// Commands behind the admin login
  pub fn requires_admin(&self) -> bool {
    matches!(
      self,
      Self::ChangeAdminPassword(_)
        | Self::UpdateWebsiteName(_)
        | Self::UpdateHomepageImage(_)
        | Self::UpdateStudentImage(_)
        | Self::CreateExam(_)
        | Self::EditExam(_)
        | Self::UpdateExam { .. }
        | Self::DeleteExam { .. }
        | Self::ToggleExamStatus(_)
        | Self::AddLearningContent(_)
        | Self::StartLiveSession(_)
    )
  }

  /// Short name for logs; never includes passwords
  pub fn name(&self) -> &'static str {
    match self {
      Self::Navigate(_) => "navigate",
      Self::ToggleMode => "toggle_mode",
      Self::ShowAdminPanel => "show_admin_panel",
      Self::HideAdminPanel => "hide_admin_panel",
      Self::SwitchAdminTab(_) => "switch_admin_tab",
      Self::AdminLogin(_) => "admin_login",
      Self::ChangeAdminPassword(_) => "change_admin_password",
      Self::UpdateWebsiteName(_) => "update_website_name",
      Self::UpdateHomepageImage(_) => "update_homepage_image",
      Self::UpdateStudentImage(_) => "update_student_image",
      Self::CreateExam(_) => "create_exam",
      Self::EditExam(_) => "edit_exam",
      Self::UpdateExam { .. } => "update_exam",
      Self::DeleteExam { .. } => "delete_exam",
      Self::ToggleExamStatus(_) => "toggle_exam_status",
      Self::JoinExam { .. } => "join_exam",
      Self::AddLearningContent(_) => "add_learning_content",
      Self::AccessContent(_) => "access_content",
      Self::StartLiveSession(_) => "start_live_session",
      Self::SendChat(_) => "send_chat",
      Self::UpdateAvatar(_) => "update_avatar",
    }
  }
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// Nothing changed (lookup miss, blank input, unknown id)
  Unchanged,
  Navigated(Page),
  ModeChanged(Mode),
  AdminPanelOpened,
  AdminPanelClosed,
  /// Admin panel requested without an admin session
  LoginRequired,
  AdminTabSwitched(AdminTab),
  LoggedIn,
  PasswordChanged,
  WebsiteNameUpdated,
  HomepageImageUpdated,
  StudentImageUpdated,
  ExamCreated(i64),
  ExamEditing(i64),
  ExamUpdated(i64),
  DeleteConfirmationRequired(i64),
  ExamDeleted(i64),
  ExamStatusToggled { id: i64, is_active: bool },
  ExamJoined { id: i64, title: String, duration: u32 },
  ContentAdded(i64),
  ContentAccessed { id: i64, title: String },
  LiveSessionStarted(LiveSession),
  ChatReplied(String),
  AvatarUpdated,
}

impl Outcome {
  /// Whether the persisted [`AppState`] changed
  pub fn mutates_state(&self) -> bool {
    !matches!(
      self,
      Self::Unchanged
        | Self::AdminPanelOpened
        | Self::AdminPanelClosed
        | Self::LoginRequired
        | Self::AdminTabSwitched(_)
        | Self::ExamEditing(_)
        | Self::DeleteConfirmationRequired(_)
        | Self::LiveSessionStarted(_)
    )
  }

  /// Success message shown to the user, if the outcome has one
  pub fn notice(&self) -> Option<String> {
    match self {
      Self::PasswordChanged => Some("Admin password updated successfully!".to_string()),
      Self::WebsiteNameUpdated => Some("Website name updated successfully!".to_string()),
      Self::HomepageImageUpdated => Some("Homepage image updated successfully!".to_string()),
      Self::StudentImageUpdated => Some("Student images updated successfully!".to_string()),
      Self::ExamCreated(_) => Some("Exam created successfully!".to_string()),
      Self::ExamUpdated(_) => Some("Exam updated successfully!".to_string()),
      Self::DeleteConfirmationRequired(_) => {
        Some("Are you sure you want to delete this exam?".to_string())
      }
      Self::ExamJoined { title, duration, .. } => Some(format!(
        "Successfully joined exam: {}. Starting exam: {} (Duration: {} minutes)",
        title, title, duration
      )),
      Self::ContentAdded(_) => Some("Learning content added successfully!".to_string()),
      Self::ContentAccessed { title, .. } => Some(format!("Accessing: {}", title)),
      Self::LiveSessionStarted(live) => Some(format!("Live session started for {}", live.title)),
      Self::AvatarUpdated => Some("Profile picture updated!".to_string()),
      _ => None,
    }
  }
}

/// Apply one command. On error neither state is changed.
pub fn apply(
  state: &mut AppState,
  view: &mut ViewState,
  command: Command,
  now: DateTime<Utc>,
) -> Result<Outcome, PortalError> {
  if command.requires_admin() && !state.is_admin {
    return Err(PortalError::AdminRequired);
  }

  let outcome = match command {
    Command::Navigate(page_id) => navigation::navigate_to(state, &page_id)
      .map(Outcome::Navigated)
      .unwrap_or(Outcome::Unchanged),
    Command::ToggleMode => Outcome::ModeChanged(navigation::toggle_mode(state)),
    Command::ShowAdminPanel => {
      if navigation::show_admin_panel(state, view) {
        Outcome::AdminPanelOpened
      } else {
        Outcome::LoginRequired
      }
    }
    Command::HideAdminPanel => {
      navigation::hide_admin_panel(view);
      Outcome::AdminPanelClosed
    }
    Command::SwitchAdminTab(tab_id) => navigation::switch_admin_tab(view, &tab_id)
      .map(Outcome::AdminTabSwitched)
      .unwrap_or(Outcome::Unchanged),
    Command::AdminLogin(password) => {
      admin::login(state, &password)?;
      navigation::show_admin_panel(state, view);
      Outcome::LoggedIn
    }
    Command::ChangeAdminPassword(password) => {
      admin::change_password(state, &password)?;
      Outcome::PasswordChanged
    }
    Command::UpdateWebsiteName(name) => settings_outcome(
      admin::update_website_name(state, &name),
      Outcome::WebsiteNameUpdated,
    ),
    Command::UpdateHomepageImage(url) => settings_outcome(
      admin::update_homepage_image(state, &url),
      Outcome::HomepageImageUpdated,
    ),
    Command::UpdateStudentImage(url) => settings_outcome(
      admin::update_student_image(state, &url),
      Outcome::StudentImageUpdated,
    ),
    Command::CreateExam(form) => {
      let id = catalog::create_exam(state, &form, now)?;
      view.editing_exam = None;
      Outcome::ExamCreated(id)
    }
    Command::EditExam(id) => {
      if state.exam(id).is_none() {
        return Ok(Outcome::Unchanged);
      }
      view.editing_exam = Some(id);
      view.admin_tab = AdminTab::Exams;
      Outcome::ExamEditing(id)
    }
    Command::UpdateExam { id, form } => {
      catalog::update_exam(state, id, &form)?;
      view.editing_exam = None;
      Outcome::ExamUpdated(id)
    }
    // A confirmation only counts for the exam that was staged first
    Command::DeleteExam { id, confirmed } if confirmed && view.pending_delete == Some(id) => {
      view.pending_delete = None;
      if view.editing_exam == Some(id) {
        view.editing_exam = None;
      }
      if catalog::delete_exam(state, id) {
        Outcome::ExamDeleted(id)
      } else {
        Outcome::Unchanged
      }
    }
    Command::DeleteExam { id, .. } => {
      if state.exam(id).is_none() {
        return Ok(Outcome::Unchanged);
      }
      view.pending_delete = Some(id);
      view.admin_tab = AdminTab::Exams;
      Outcome::DeleteConfirmationRequired(id)
    }
    Command::ToggleExamStatus(id) => catalog::toggle_exam_status(state, id)
      .map(|is_active| Outcome::ExamStatusToggled { id, is_active })
      .unwrap_or(Outcome::Unchanged),
    Command::JoinExam { id, password } => {
      let joined = catalog::join_exam(state, id, &password)?;
      Outcome::ExamJoined {
        id: joined.id,
        title: joined.title,
        duration: joined.duration,
      }
    }
    Command::AddLearningContent(form) => Outcome::ContentAdded(catalog::add_learning_content(state, &form, now)?),
    Command::AccessContent(id) => catalog::access_content(state, id)
      .map(|title| Outcome::ContentAccessed { id, title })
      .unwrap_or(Outcome::Unchanged),
    Command::StartLiveSession(exam_id) => match catalog::start_live_session(state, exam_id)? {
      Some(live) => {
        view.live_session = Some(live.clone());
        Outcome::LiveSessionStarted(live)
      }
      None => Outcome::Unchanged,
    },
    Command::SendChat(query) => chat::send_query(state, &query, now)
      .map(|reply| Outcome::ChatReplied(reply.to_string()))
      .unwrap_or(Outcome::Unchanged),
    Command::UpdateAvatar(url) => {
      if admin::update_student_image(state, &url) {
        Outcome::AvatarUpdated
      } else {
        Outcome::Unchanged
      }
    }
  };

  Ok(outcome)
}

fn settings_outcome(applied: bool, outcome: Outcome) -> Outcome {
  if applied { outcome } else { Outcome::Unchanged }
}

/// Owner of the single [`AppState`] instance.
pub struct Portal {
  state: AppState,
  view: ViewState,
  db: DbPool,
}

impl Portal {
  /// Build the state from seed data overlaid with whatever is saved in `db`
  pub fn open(db: DbPool, now: DateTime<Utc>) -> Self {
    let seed = AppState::seed(now);
    let saved = db::try_lock(&db)
      .log_warn("Could not read saved portal state")
      .and_then(|conn| db::load_state(&conn, &seed));

    let state = match saved {
      Some(state) => {
        tracing::info!(
          "Restored saved portal state ({} exams, {} learning items)",
          state.exams.len(),
          state.learning_content.len()
        );
        state
      }
      None => {
        tracing::info!("No saved portal state, starting from seed data");
        seed
      }
    };

    Self {
      state,
      view: ViewState::default(),
      db,
    }
  }

  pub fn state(&self) -> &AppState {
    &self.state
  }

  pub fn view(&self) -> &ViewState {
    &self.view
  }

  /// Apply a command and persist the state if it changed
  pub fn execute(&mut self, command: Command, now: DateTime<Utc>) -> Result<Outcome, PortalError> {
    let name = command.name();
    let outcome = match apply(&mut self.state, &mut self.view, command, now) {
      Ok(outcome) => outcome,
      Err(e) => {
        if e.is_authorization() {
          tracing::info!(command = name, error = %e, "Portal command not authorized");
        } else {
          tracing::debug!(command = name, error = %e, "Portal command rejected");
        }
        return Err(e);
      }
    };

    tracing::debug!(command = name, ?outcome, "Portal command applied");
    if outcome.mutates_state() {
      self.persist(now);
    }
    Ok(outcome)
  }

  /// Save failures are logged, never surfaced to the user
  fn persist(&self, now: DateTime<Utc>) {
    db::try_lock(&self.db)
      .and_then(|conn| db::save_state(&conn, &self.state, now))
      .log_warn("Failed to persist portal state");
  }
}
