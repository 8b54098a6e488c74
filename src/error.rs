use crate::validate::ErrorMap;

pub type EdResult<T, E = EditorError> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    #[error("the profile has invalid fields: {0}")]
    Invalid(ErrorMap),

    #[error("avatar read failed: {0}")]
    AvatarReadFailed(String),

    #[error("invalid avatar: {0}")]
    InvalidAvatar(String),

    #[error("profile update failed")]
    UpdateFailed(#[source] anyhow::Error),

    #[error("the form has already been submitted")]
    FormClosed,

    #[error("an internal error occurred")]
    Anyhow(#[from] anyhow::Error),
}

impl EditorError {
    /// Convenient constructor for `EditorError::AvatarReadFailed`.
    pub fn avatar_read_failed(reason: impl std::fmt::Display) -> Self {
        Self::AvatarReadFailed(reason.to_string())
    }
}
