//! Form input validation shared by the catalog and admin commands.
//!
//! Rules:
//! - Required text fields must be non-empty after trimming
//! - Durations are whole minutes greater than zero
//! - Admin passwords have a minimum length, counted in characters

use crate::error::PortalError;

/// Minimum admin password length in characters
pub const MIN_ADMIN_PASSWORD_LEN: usize = 6;

// ============================================================================
// Field checks
// ============================================================================

/// Fails with [`PortalError::MissingFields`] if any field is blank
pub fn require_all(fields: &[&str]) -> Result<(), PortalError> {
  if fields.iter().any(|f| f.trim().is_empty()) {
    return Err(PortalError::MissingFields);
  }
  Ok(())
}

/// Parse an exam duration in minutes. Zero, negative and non-numeric input
/// are all treated as a missing field.
pub fn parse_duration(raw: &str) -> Result<u32, PortalError> {
  match raw.trim().parse::<u32>() {
    Ok(minutes) if minutes > 0 => Ok(minutes),
    _ => Err(PortalError::MissingFields),
  }
}

pub fn check_admin_password(candidate: &str) -> Result<(), PortalError> {
  if candidate.chars().count() < MIN_ADMIN_PASSWORD_LEN {
    return Err(PortalError::PasswordTooShort);
  }
  Ok(())
}

/// Returns the trimmed value, or `None` for blank input
pub fn non_blank(raw: &str) -> Option<&str> {
  let trimmed = raw.trim();
  (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_require_all() {
    assert!(require_all(&["a", "b"]).is_ok());
    assert_eq!(require_all(&["a", ""]), Err(PortalError::MissingFields));
    assert_eq!(require_all(&["   ", "b"]), Err(PortalError::MissingFields));
  }

  #[test]
  fn test_parse_duration() {
    assert_eq!(parse_duration("90"), Ok(90));
    assert_eq!(parse_duration(" 45 "), Ok(45));
    assert!(parse_duration("0").is_err());
    assert!(parse_duration("-5").is_err());
    assert!(parse_duration("ninety").is_err());
    assert!(parse_duration("").is_err());
  }

  #[test]
  fn test_admin_password_length() {
    assert_eq!(check_admin_password("short"), Err(PortalError::PasswordTooShort));
    assert!(check_admin_password("sixsix").is_ok());
    // Multi-byte characters count once each
    assert!(check_admin_password("ééééé").is_err());
    assert!(check_admin_password("éééééé").is_ok());
  }

  #[test]
  fn test_non_blank() {
    assert_eq!(non_blank("  name "), Some("name"));
    assert_eq!(non_blank("   "), None);
  }
}
