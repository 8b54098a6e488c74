use super::DataUrl;
use crate::error::{EdResult, EditorError};

use entrait::entrait_export as entrait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Largest avatar file accepted unless configured otherwise.
pub const DEFAULT_MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

/// A file picked by the user in the picture-selection dialog.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileSelection {
    pub path: PathBuf,
    /// Media type reported by the picker, if any.
    pub mime: Option<mime::Mime>,
}

impl FileSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mime: None,
        }
    }

    pub fn with_mime(self, mime: mime::Mime) -> Self {
        Self {
            mime: Some(mime),
            ..self
        }
    }

    /// The declared media type, falling back to a guess from the file extension.
    pub fn media_type(&self) -> Option<mime::Mime> {
        self.mime
            .clone()
            .or_else(|| guess_image_type(&self.path))
    }
}

fn guess_image_type(path: &Path) -> Option<mime::Mime> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "svg" => mime::IMAGE_SVG,
        "webp" => "image/webp".parse().ok()?,
        "ico" => "image/x-icon".parse().ok()?,
        "avif" => "image/avif".parse().ok()?,
        _ => return None,
    };
    Some(mime)
}

///
/// Read the selected file, giving up as soon as it is known to exceed `max_bytes`.
///
/// The reported size is checked first; the read itself is capped one byte past
/// the limit so a file that grows in the meantime is never buffered in full.
///
#[entrait(pub ReadAvatarFile, no_deps, mock_api=ReadAvatarFileMock)]
async fn read_avatar_file(selection: FileSelection, max_bytes: u64) -> EdResult<Vec<u8>> {
    let io_failed = |e: std::io::Error| {
        EditorError::avatar_read_failed(format!("{}: {e}", selection.path.display()))
    };

    let file = tokio::fs::File::open(&selection.path).await.map_err(io_failed)?;
    let len = file.metadata().await.map_err(io_failed)?.len();
    if len > max_bytes {
        return Err(too_large(&selection, max_bytes));
    }

    let mut bytes = Vec::with_capacity(len as usize);
    file.take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .await
        .map_err(io_failed)?;
    if bytes.len() as u64 > max_bytes {
        return Err(too_large(&selection, max_bytes));
    }

    Ok(bytes)
}

fn too_large(selection: &FileSelection, max_bytes: u64) -> EditorError {
    EditorError::avatar_read_failed(format!(
        "{} is larger than the limit of {max_bytes} bytes",
        selection.path.display()
    ))
}

/// Turn the bytes of a selected file into an embeddable image.
pub fn embed(selection: &FileSelection, bytes: &[u8], max_bytes: u64) -> EdResult<DataUrl> {
    let mime = selection
        .media_type()
        .filter(|mime| mime.type_() == mime::IMAGE)
        .ok_or_else(|| {
            EditorError::avatar_read_failed(format!(
                "{} is not an image",
                selection.path.display()
            ))
        })?;

    if bytes.is_empty() {
        return Err(EditorError::avatar_read_failed(format!(
            "{} is empty",
            selection.path.display()
        )));
    }
    if bytes.len() as u64 > max_bytes {
        return Err(EditorError::avatar_read_failed(format!(
            "{} is {} bytes, the limit is {max_bytes}",
            selection.path.display(),
            bytes.len()
        )));
    }

    Ok(DataUrl::encode(mime, bytes))
}
