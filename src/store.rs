use crate::error::EdResult;
use crate::profile::Profile;

use anyhow::Context;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Keeps a single profile as a JSON document on disk.
#[derive(Clone, Debug)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file means no profile has been saved yet.
    pub async fn load(&self) -> EdResult<Option<Profile>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("could not read {}", self.path.display()))
                    .into())
            }
        };

        let profile = serde_json::from_slice(&bytes)
            .with_context(|| format!("malformed profile in {}", self.path.display()))?;

        Ok(Some(profile))
    }

    pub async fn save(&self, profile: &Profile) -> EdResult<()> {
        let json = serde_json::to_vec_pretty(profile).context("could not serialize profile")?;

        // Write next to the target and rename, so readers never see a partial file.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("could not write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("could not replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}
