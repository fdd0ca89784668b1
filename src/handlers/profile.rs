use axum::{
  extract::{Multipart, State},
  response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use super::dispatch_to;
use crate::portal::Command;
use crate::state::ServerState;

const PROFILE_PAGE: &str = "/page/profile";

/// Image types accepted as a profile picture
const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

struct Upload {
  extension: String,
  bytes: Vec<u8>,
}

/// Replace the student's avatar with an uploaded image
pub async fn upload_avatar(State(app): State<ServerState>, mut multipart: Multipart) -> Response {
  let upload = match extract_avatar(&mut multipart).await {
    Ok(upload) => upload,
    Err(e) => {
      tracing::warn!("Avatar upload rejected: {}", e);
      return upload_error_redirect(&e);
    }
  };

  if let Err(e) = tokio::fs::create_dir_all(&app.uploads_dir).await {
    tracing::error!("Failed to create uploads directory: {}", e);
    return upload_error_redirect("Failed to save uploaded image");
  }

  let file_name = format!("avatar-{}.{}", Utc::now().timestamp_millis(), upload.extension);
  if let Err(e) = tokio::fs::write(app.uploads_dir.join(&file_name), &upload.bytes).await {
    tracing::error!("Failed to write avatar {}: {}", file_name, e);
    return upload_error_redirect("Failed to save uploaded image");
  }

  tracing::info!("Saved avatar upload as {} ({} bytes)", file_name, upload.bytes.len());
  dispatch_to(
    &app,
    Command::UpdateAvatar(format!("/uploads/{}", file_name)),
    PROFILE_PAGE,
  )
}

fn upload_error_redirect(message: &str) -> Response {
  Redirect::to(&format!(
    "{}?error={}",
    PROFILE_PAGE,
    urlencoding::encode(message)
  ))
  .into_response()
}

/// Pull the `avatar` field out of the form, checking it is a non-empty image
async fn extract_avatar(multipart: &mut Multipart) -> Result<Upload, String> {
  while let Ok(Some(field)) = multipart.next_field().await {
    if field.name() != Some("avatar") {
      continue;
    }

    let extension = field
      .file_name()
      .and_then(image_extension)
      .ok_or_else(|| "Please choose a PNG, JPEG, GIF or WebP image".to_string())?;

    let bytes = field
      .bytes()
      .await
      .map_err(|e| format!("Failed to read upload: {}", e))?;
    if bytes.is_empty() {
      return Err("Uploaded image is empty".to_string());
    }

    return Ok(Upload {
      extension,
      bytes: bytes.to_vec(),
    });
  }
  Err("No image uploaded".to_string())
}

/// Lowercased extension of `file_name` if it is an accepted image type
fn image_extension(file_name: &str) -> Option<String> {
  let (_, ext) = file_name.rsplit_once('.')?;
  let ext = ext.to_ascii_lowercase();
  ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_image_extension() {
    assert_eq!(image_extension("me.PNG").as_deref(), Some("png"));
    assert_eq!(image_extension("photo.final.jpeg").as_deref(), Some("jpeg"));
    assert_eq!(image_extension("notes.txt"), None);
    assert_eq!(image_extension("avatar"), None);
  }
}
