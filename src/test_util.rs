use crate::avatar::FileSelection;
use crate::profile::{Profile, Project};

use std::io::Write;

/// The eight byte PNG signature, enough for an image the form never decodes.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";

pub fn test_profile() -> Profile {
    Profile {
        name: "Ana".to_string(),
        title: "Dev".to_string(),
        bio: "Hi".to_string(),
        email: "ana@x.com".to_string(),
        location: "Lisbon".to_string(),
        github: "ana".to_string(),
        avatar: "https://cdn.example.com/ana.png".parse().unwrap(),
        skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        projects: vec![Project(
            serde_json::json!({ "title": "Portfolio", "tags": ["Rust"] }),
        )],
        ..Default::default()
    }
}

/// Write `bytes` to a temporary file named with `suffix`.
pub fn temp_file(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}

pub fn select(file: &tempfile::NamedTempFile) -> FileSelection {
    FileSelection::new(file.path())
}
