//! Profile photos and the profile draft.
//!
//! A photo upload goes through an explicit slot: it is `Pending` while the
//! file is being read and only becomes `Ready` once the whole file has been
//! converted to a `data:` URI. A profile draft with a pending photo cannot be
//! turned into committable data.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::onboarding::PersonalProfileData;
use crate::validation::{FieldErrors, fields};

/// Largest accepted photo, in bytes.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Errors converting an upload into a data-URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("Please upload an image file")]
    NotAnImage,
    #[error("Image must be at most 5 MB")]
    TooLarge,
    #[error("The uploaded file is empty")]
    Empty,
}

/// Encode an uploaded image as a `data:` URI.
///
/// # Errors
///
/// Returns a [`PhotoError`] when the content type is not `image/*`, the file
/// is empty or larger than [`MAX_PHOTO_BYTES`].
///
/// ```
/// use clarity_core::photo::to_data_uri;
///
/// let uri = to_data_uri("image/png", &[0x89, 0x50, 0x4e, 0x47]).unwrap();
/// assert_eq!(uri, "data:image/png;base64,iVBORw==");
/// ```
pub fn to_data_uri(content_type: &str, bytes: &[u8]) -> Result<String, PhotoError> {
    let mime = content_type.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") || mime.len() == "image/".len() {
        return Err(PhotoError::NotAnImage);
    }
    if bytes.is_empty() {
        return Err(PhotoError::Empty);
    }
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge);
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// State of the profile picture while the form is being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PhotoSlot {
    /// No picture.
    #[default]
    Empty,
    /// A file is being read; the previous picture is kept until it finishes.
    Pending { previous: Option<String> },
    /// A picture is available.
    Ready(String),
}

impl PhotoSlot {
    fn current(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Pending { previous } => previous.as_deref(),
            Self::Ready(uri) => Some(uri),
        }
    }
}

/// Profile form input before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub age: String,
    pub email: String,
    pub location: String,
    photo: PhotoSlot,
}

impl ProfileDraft {
    /// Start a draft from committed profile data.
    #[must_use]
    pub fn from_data(data: &PersonalProfileData) -> Self {
        Self {
            name: data.name.clone(),
            age: data.age.clone(),
            email: data.email.clone(),
            location: data.location.clone(),
            photo: data
                .profile_picture
                .clone()
                .map_or(PhotoSlot::Empty, PhotoSlot::Ready),
        }
    }

    #[must_use]
    pub const fn photo(&self) -> &PhotoSlot {
        &self.photo
    }

    /// The picture to preview: the ready one, or the previous one while a
    /// read is pending.
    #[must_use]
    pub fn photo_preview(&self) -> Option<&str> {
        self.photo.current()
    }

    /// Mark a file read as started.
    pub fn begin_photo_upload(&mut self) {
        let previous = self.photo.current().map(str::to_owned);
        self.photo = PhotoSlot::Pending { previous };
    }

    /// Finish a pending read with its outcome.
    ///
    /// On failure the previous picture is restored.
    ///
    /// # Errors
    ///
    /// Returns the conversion error unchanged.
    pub fn finish_photo_upload(
        &mut self,
        outcome: Result<String, PhotoError>,
    ) -> Result<(), PhotoError> {
        let previous = self.photo.current().map(str::to_owned);
        match outcome {
            Ok(uri) => {
                self.photo = PhotoSlot::Ready(uri);
                Ok(())
            }
            Err(err) => {
                self.photo = previous.map_or(PhotoSlot::Empty, PhotoSlot::Ready);
                Err(err)
            }
        }
    }

    /// Validate and convert into committable profile data.
    ///
    /// # Errors
    ///
    /// Returns field errors for invalid fields, and a `profilePicture` error
    /// while a photo read is still pending.
    pub fn into_data(self) -> Result<PersonalProfileData, FieldErrors> {
        if matches!(self.photo, PhotoSlot::Pending { .. }) {
            return Err(FieldErrors::single(
                fields::PROFILE_PICTURE,
                "Photo upload is still in progress",
            ));
        }

        let data = PersonalProfileData {
            name: self.name.trim().to_string(),
            age: self.age.trim().to_string(),
            email: self.email.trim().to_string(),
            location: self.location,
            profile_picture: match self.photo {
                PhotoSlot::Ready(uri) => Some(uri),
                PhotoSlot::Empty | PhotoSlot::Pending { .. } => None,
            },
        };
        crate::validation::validate_profile(&data)?;
        Ok(data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> ProfileDraft {
        ProfileDraft {
            name: "Alex Thompson".to_string(),
            age: "24".to_string(),
            email: "alex@example.com".to_string(),
            location: "New York, US".to_string(),
            ..ProfileDraft::default()
        }
    }

    #[test]
    fn test_data_uri_rejects_non_images() {
        assert_eq!(
            to_data_uri("application/pdf", b"%PDF"),
            Err(PhotoError::NotAnImage)
        );
        assert_eq!(to_data_uri("image/", b"x"), Err(PhotoError::NotAnImage));
        assert_eq!(to_data_uri("image/jpeg", b""), Err(PhotoError::Empty));
    }

    #[test]
    fn test_data_uri_size_limit() {
        let big = vec![0u8; MAX_PHOTO_BYTES + 1];
        assert_eq!(to_data_uri("image/png", &big), Err(PhotoError::TooLarge));
    }

    #[test]
    fn test_pending_photo_blocks_commit() {
        let mut draft = draft();
        draft.begin_photo_upload();
        let errors = draft.into_data().unwrap_err();
        assert!(errors.has(fields::PROFILE_PICTURE));
    }

    #[test]
    fn test_finished_photo_is_committed() {
        let mut draft = draft();
        draft.begin_photo_upload();
        draft
            .finish_photo_upload(to_data_uri("image/png", b"png"))
            .unwrap();
        let data = draft.into_data().unwrap();
        assert!(data.profile_picture.unwrap().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_failed_read_restores_previous_picture() {
        let mut draft = draft();
        draft
            .finish_photo_upload(Ok("data:image/png;base64,AAAA".to_string()))
            .unwrap();
        draft.begin_photo_upload();
        assert_eq!(draft.photo_preview(), Some("data:image/png;base64,AAAA"));

        let err = draft
            .finish_photo_upload(to_data_uri("text/plain", b"hi"))
            .unwrap_err();
        assert_eq!(err, PhotoError::NotAnImage);
        assert_eq!(
            draft.photo(),
            &PhotoSlot::Ready("data:image/png;base64,AAAA".to_string())
        );
    }

    #[test]
    fn test_into_data_validates_fields() {
        let mut draft = draft();
        draft.age = "0".to_string();
        let errors = draft.into_data().unwrap_err();
        assert!(errors.has(fields::AGE));
    }

    #[test]
    fn test_from_data_keeps_picture() {
        let data = PersonalProfileData {
            profile_picture: Some("data:image/gif;base64,R0lG".to_string()),
            ..PersonalProfileData::default()
        };
        let draft = ProfileDraft::from_data(&data);
        assert_eq!(draft.photo_preview(), Some("data:image/gif;base64,R0lG"));
    }
}
