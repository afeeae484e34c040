use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use tracing::debug;

use crate::errors::AppError;
use crate::models::profile::{ResumeUpload, UserProfile};

/// Extracts a `UserProfile` from a multipart request body. A body that is
/// not multipart at all is rejected as an `AppError` like any other bad input.
#[derive(Debug)]
pub struct ProfileForm(pub UserProfile);

#[async_trait]
impl<S> FromRequest<S> for ProfileForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        Ok(ProfileForm(read_profile(multipart).await?))
    }
}

/// Reads the landing form's multipart body into a `UserProfile`.
///
/// Missing text fields become empty strings so validation can report them
/// per field. A file input left empty by the browser arrives as a part with
/// no file name and no bytes and is treated as "no resume".
async fn read_profile(mut multipart: Multipart) -> Result<UserProfile, AppError> {
    let mut profile = UserProfile::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" | "bio" | "skills" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable field '{name}': {e}")))?;
                match name.as_str() {
                    "name" => profile.name = value,
                    "bio" => profile.bio = value,
                    _ => profile.skills = value,
                }
            }
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable resume upload: {e}")))?;
                if bytes.is_empty() {
                    continue;
                }
                debug!("Received resume '{file_name}' ({} bytes)", bytes.len());
                profile.resume = Some(ResumeUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(profile)
}
