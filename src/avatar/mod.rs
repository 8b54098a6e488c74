pub mod read;

pub use read::{FileSelection, ReadAvatarFile};

use crate::error::EditorError;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;

/// Image shown when a profile has no avatar of its own.
pub const PLACEHOLDER_IMAGE: &str = "/images/default-avatar.png";

/// Only used to check that a relative reference is well formed.
static CHECK_BASE: Lazy<url::Url> =
    Lazy::new(|| url::Url::parse("http://avatar.invalid/").expect("static base URL"));

///
/// A profile picture.
///
/// On the wire this is a single string: empty for the placeholder,
/// a `data:` URL for an embedded image, an `http(s)` URL, or a URL relative
/// to the site serving the profile (`/uploads/a.png`, `//cdn.example.com/a.png`).
///
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Avatar {
    #[default]
    Placeholder,
    Remote(url::Url),
    /// Path-absolute or scheme-relative reference, kept as written.
    Relative(String),
    Embedded(DataUrl),
}

impl Avatar {
    /// The value to use as an image source.
    pub fn src(&self) -> String {
        match self {
            Self::Placeholder => PLACEHOLDER_IMAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => Ok(()),
            Self::Remote(url) => write!(f, "{url}"),
            Self::Relative(reference) => f.write_str(reference),
            Self::Embedded(data_url) => write!(f, "{data_url}"),
        }
    }
}

impl FromStr for Avatar {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::Placeholder);
        }
        if s.starts_with("data:") {
            return Ok(Self::Embedded(s.parse()?));
        }
        if s.contains('\\') {
            return Err(EditorError::InvalidAvatar(format!("{s}: backslash in URL")));
        }
        if s.starts_with('/') {
            url::Url::options()
                .base_url(Some(&CHECK_BASE))
                .parse(s)
                .map_err(|e| EditorError::InvalidAvatar(format!("{s}: {e}")))?;
            return Ok(Self::Relative(s.to_string()));
        }

        // Bare relative names fail to parse; `file:` and drive-letter "schemes" fail the scheme check.
        let url = url::Url::parse(s).map_err(|e| EditorError::InvalidAvatar(format!("{s}: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(Self::Remote(url)),
            scheme => Err(EditorError::InvalidAvatar(format!(
                "{s}: unsupported scheme `{scheme}`"
            ))),
        }
    }
}

impl TryFrom<String> for Avatar {
    type Error = EditorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Avatar> for String {
    fn from(avatar: Avatar) -> Self {
        avatar.to_string()
    }
}

/// A self-contained `data:<mime>;base64,<payload>` image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DataUrl {
    mime: mime::Mime,
    payload: String,
}

impl DataUrl {
    pub fn encode(mime: mime::Mime, bytes: &[u8]) -> Self {
        Self {
            mime,
            payload: BASE64.encode(bytes),
        }
    }

    pub fn mime(&self) -> &mime::Mime {
        &self.mime
    }

    pub fn decode(&self) -> Result<Vec<u8>, EditorError> {
        BASE64
            .decode(&self.payload)
            .map_err(|e| EditorError::InvalidAvatar(format!("bad base64 payload: {e}")))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

impl FromStr for DataUrl {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EditorError::InvalidAvatar(format!("{reason} in data URL"));

        let rest = s.strip_prefix("data:").ok_or_else(|| invalid("missing scheme"))?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| invalid("missing payload"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("missing base64 marker"))?
            .parse::<mime::Mime>()
            .map_err(|_| invalid("bad media type"))?;
        if mime.type_() != mime::IMAGE {
            return Err(invalid("non-image media type"));
        }

        let data_url = Self {
            mime,
            payload: payload.to_string(),
        };
        data_url.decode()?;

        Ok(data_url)
    }
}
