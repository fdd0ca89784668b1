//! Admin session and site settings.
//!
//! The admin password is compared and stored in plaintext. There is no
//! logout: `is_admin` is part of the persisted state and survives restarts.

use crate::domain::AppState;
use crate::error::PortalError;
use crate::validation::{check_admin_password, non_blank};

pub fn login(state: &mut AppState, password: &str) -> Result<(), PortalError> {
  if password != state.admin_password {
    return Err(PortalError::IncorrectAdminPassword);
  }
  state.is_admin = true;
  Ok(())
}

/// Replace the admin password. No confirmation of the old password is asked for.
pub fn change_password(state: &mut AppState, new_password: &str) -> Result<(), PortalError> {
  check_admin_password(new_password)?;
  state.admin_password = new_password.to_string();
  Ok(())
}

// Blank input is ignored by all settings updates below; each returns whether it applied.

pub fn update_website_name(state: &mut AppState, name: &str) -> bool {
  let Some(name) = non_blank(name) else {
    return false;
  };
  state.website_name = name.to_string();
  true
}

pub fn update_homepage_image(state: &mut AppState, url: &str) -> bool {
  let Some(url) = non_blank(url) else {
    return false;
  };
  state.homepage_image = url.to_string();
  true
}

/// Set the student avatar from an image URL
pub fn update_student_image(state: &mut AppState, url: &str) -> bool {
  let Some(url) = non_blank(url) else {
    return false;
  };
  state.student.avatar = url.to_string();
  true
}
