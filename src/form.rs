use crate::app::{Navigate, UpdateProfile};
use crate::avatar::read::{embed, DEFAULT_MAX_AVATAR_BYTES};
use crate::avatar::{Avatar, FileSelection, ReadAvatarFile};
use crate::error::{EdResult, EditorError};
use crate::profile::{Field, Profile, ProfileDraft};
use crate::tags;
use crate::validate::{validate, ErrorMap};

use std::fmt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Where the form sends the user once it is done.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route {
    Projects,
    Builder,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Projects => "/projects",
            Self::Builder => "/builder",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormState {
    Editing,
    Submitting,
    Done,
    /// The last handoff failed. Any edit or a new submit retries from `Editing`.
    Failed(String),
}

struct PendingRead {
    selection: FileSelection,
    task: JoinHandle<EdResult<Vec<u8>>>,
}

///
/// The profile editing form.
///
/// `D` supplies the collaborators: reading avatar files, storing the profile
/// and navigating away once the form is finished.
///
pub struct ProfileForm<D> {
    deps: D,
    draft: ProfileDraft,
    errors: ErrorMap,
    state: FormState,
    picker_open: bool,
    avatar_error: Option<String>,
    pending_read: Option<PendingRead>,
    max_avatar_bytes: u64,
}

impl<D> ProfileForm<D> {
    pub fn new(deps: D, current: Option<Profile>) -> Self {
        Self {
            deps,
            draft: ProfileDraft::from(current),
            errors: ErrorMap::default(),
            state: FormState::Editing,
            picker_open: false,
            avatar_error: None,
            pending_read: None,
            max_avatar_bytes: DEFAULT_MAX_AVATAR_BYTES,
        }
    }

    pub fn with_max_avatar_bytes(mut self, max_avatar_bytes: u64) -> Self {
        self.max_avatar_bytes = max_avatar_bytes;
        self
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// Errors from the last submit attempt.
    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// Why the last avatar selection was not applied, if it failed.
    pub fn avatar_error(&self) -> Option<&str> {
        self.avatar_error.as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> EdResult<()> {
        self.ensure_editable()?;
        self.draft.set(field, value);
        Ok(())
    }

    /// Skills outside the technology vocabulary are accepted as typed.
    pub fn add_skill(&mut self, skill: &str) -> EdResult<bool> {
        self.ensure_editable()?;
        if !tags::is_known(skill) {
            debug!(skill, "adding a skill outside the vocabulary");
        }
        Ok(self.draft.add_skill(skill))
    }

    pub fn remove_skill(&mut self, skill: &str) -> EdResult<bool> {
        self.ensure_editable()?;
        Ok(self.draft.remove_skill(skill))
    }

    pub fn set_skills<S: AsRef<str>>(&mut self, skills: impl IntoIterator<Item = S>) -> EdResult<()> {
        self.ensure_editable()?;
        self.draft.set_skills(skills);
        Ok(())
    }

    pub fn open_avatar_picker(&mut self) {
        self.picker_open = true;
    }

    /// Reset the avatar to the placeholder image.
    pub fn remove_avatar(&mut self) -> EdResult<()> {
        self.picker_open = false;
        self.ensure_editable()?;
        self.abort_pending_read();
        self.draft.avatar = Avatar::Placeholder;
        self.avatar_error = None;
        Ok(())
    }

    fn ensure_editable(&mut self) -> EdResult<()> {
        match self.state {
            FormState::Done => Err(EditorError::FormClosed),
            FormState::Editing => Ok(()),
            FormState::Submitting | FormState::Failed(_) => {
                self.state = FormState::Editing;
                Ok(())
            }
        }
    }

    fn abort_pending_read(&mut self) {
        if let Some(pending) = self.pending_read.take() {
            debug!(path = %pending.selection.path.display(), "superseded avatar read aborted");
            pending.task.abort();
        }
    }
}

impl<D> ProfileForm<D>
where
    D: ReadAvatarFile + Clone + Send + Sync + 'static,
{
    ///
    /// Apply the outcome of the picture-selection dialog.
    ///
    /// `None` means the dialog was cancelled and leaves the avatar untouched.
    /// The dialog is closed in every case.
    ///
    pub async fn select_avatar(&mut self, selection: Option<FileSelection>) -> EdResult<()> {
        self.picker_open = false;
        if let Some(selection) = selection {
            self.start_avatar_read(selection)?;
            self.finish_avatar_read().await?;
        }
        Ok(())
    }

    /// Begin reading `selection` in the background, aborting any read still in flight.
    pub fn start_avatar_read(&mut self, selection: FileSelection) -> EdResult<()> {
        self.ensure_editable()?;
        self.abort_pending_read();

        let deps = self.deps.clone();
        let max_bytes = self.max_avatar_bytes;
        let task = {
            let selection = selection.clone();
            tokio::spawn(async move { deps.read_avatar_file(selection, max_bytes).await })
        };
        self.pending_read = Some(PendingRead { selection, task });

        Ok(())
    }

    ///
    /// Wait for the pending avatar read and store its result.
    ///
    /// Returns `false` if no read was pending.
    ///
    pub async fn finish_avatar_read(&mut self) -> EdResult<bool> {
        let Some(PendingRead { selection, task }) = self.pending_read.take() else {
            return Ok(false);
        };
        self.picker_open = false;

        let embedded = match task.await {
            Ok(read) => read.and_then(|bytes| embed(&selection, &bytes, self.max_avatar_bytes)),
            Err(e) => Err(EditorError::avatar_read_failed(format!(
                "{}: read did not complete: {e}",
                selection.path.display()
            ))),
        };

        match embedded {
            Ok(data_url) => {
                debug!(path = %selection.path.display(), mime = %data_url.mime(), "avatar embedded");
                self.draft.avatar = Avatar::Embedded(data_url);
                self.avatar_error = None;
                Ok(true)
            }
            Err(e) => {
                warn!(path = %selection.path.display(), "avatar not applied: {e}");
                self.avatar_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

impl<D> ProfileForm<D>
where
    D: UpdateProfile + Navigate,
{
    ///
    /// Validate the draft and, if it is clean, hand it to the profile store and
    /// move on to the projects page.
    ///
    pub async fn submit(&mut self) -> EdResult<()> {
        self.ensure_editable()?;

        self.errors = validate(&self.draft);
        if !self.errors.is_empty() {
            warn!(errors = %self.errors, "profile submission rejected");
            return Err(EditorError::Invalid(self.errors.clone()));
        }

        // The draft is handed off as it is now; a read still in flight is discarded.
        self.abort_pending_read();
        self.state = FormState::Submitting;

        match self.deps.update_profile(self.draft.clone()).await {
            Ok(()) => {
                info!("profile updated");
                self.state = FormState::Done;
                self.deps.navigate(Route::Projects);
                Ok(())
            }
            Err(e) => {
                warn!("profile update failed: {e}");
                self.state = FormState::Failed(e.to_string());
                Err(EditorError::UpdateFailed(anyhow::Error::new(e)))
            }
        }
    }

    /// Leave the form without saving anything.
    pub fn cancel(mut self) {
        self.abort_pending_read();
        info!("profile editing cancelled");
        self.deps.navigate(Route::Builder);
    }
}

impl<D> Drop for ProfileForm<D> {
    fn drop(&mut self) {
        self.abort_pending_read();
    }
}
