use crate::error::EdResult;
use crate::form::Route;
use crate::profile::{Profile, ProfileDraft};
use crate::store::JsonProfileStore;

use entrait::entrait_export as entrait;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

#[derive(Clone)]
pub struct App {
    pub store: Arc<JsonProfileStore>,
    routes: Arc<Mutex<Vec<Route>>>,
}

impl App {
    pub fn new(store: JsonProfileStore) -> Self {
        Self {
            store: Arc::new(store),
            routes: Default::default(),
        }
    }

    /// Every route navigated to so far, oldest first.
    pub fn visited_routes(&self) -> Vec<Route> {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[entrait(pub UpdateProfile, mock_api=UpdateProfileMock)]
async fn update_profile(app: &App, draft: ProfileDraft) -> EdResult<()> {
    app.store.save(&Profile::from(draft)).await
}

#[entrait(pub Navigate, mock_api=NavigateMock)]
fn navigate(app: &App, route: Route) {
    info!(%route, "navigating");
    app.routes
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(route);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::Avatar;
    use crate::error::EditorError;
    use crate::form::{FormState, ProfileForm};
    use crate::profile::Field;
    use crate::test_util::*;

    use assert_matches::*;
    use entrait::Impl;

    fn test_app(dir: &tempfile::TempDir) -> App {
        App::new(JsonProfileStore::new(dir.path().join("profile.json")))
    }

    #[tokio::test]
    async fn edited_profile_is_saved_and_projects_page_opened() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);
        app.store.save(&test_profile()).await.unwrap();

        let current = app.store.load().await.unwrap();
        let mut form = ProfileForm::new(Impl::new(app.clone()), current);
        form.set(Field::Title, "Staff Engineer").unwrap();
        form.add_skill("Kubernetes").unwrap();

        let picture = temp_file(".png", PNG_BYTES);
        form.open_avatar_picker();
        form.select_avatar(Some(select(&picture))).await.unwrap();
        assert!(!form.is_picker_open());

        form.submit().await.unwrap();

        assert_eq!(&FormState::Done, form.state());
        assert_eq!(vec![Route::Projects], app.visited_routes());

        let saved = app.store.load().await.unwrap().unwrap();
        assert_eq!("Staff Engineer", saved.title);
        assert_eq!(["Rust", "PostgreSQL", "Kubernetes"], saved.skills.as_slice());
        assert_eq!(test_profile().projects, saved.projects);
        assert_matches!(&saved.avatar, Avatar::Embedded(data_url) if data_url.decode().unwrap() == PNG_BYTES);
    }

    #[tokio::test]
    async fn invalid_profile_is_neither_saved_nor_navigated() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);

        let mut form = ProfileForm::new(Impl::new(app.clone()), None);
        form.set(Field::Email, "ana").unwrap();

        assert_matches!(form.submit().await, Err(EditorError::Invalid(errors)) if errors.len() == 4);
        assert_eq!(&FormState::Editing, form.state());
        assert!(app.visited_routes().is_empty());
        assert_eq!(None, app.store.load().await.unwrap());
    }

    #[tokio::test]
    async fn cancel_leaves_the_stored_profile_alone() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);
        app.store.save(&test_profile()).await.unwrap();

        let mut form = ProfileForm::new(Impl::new(app.clone()), Some(test_profile()));
        form.set(Field::Name, "Someone Else").unwrap();
        form.cancel();

        assert_eq!(vec![Route::Builder], app.visited_routes());
        assert_eq!(Some(test_profile()), app.store.load().await.unwrap());
    }

    #[tokio::test]
    async fn unwritable_store_fails_the_submission() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(JsonProfileStore::new(
            dir.path().join("missing-dir").join("profile.json"),
        ));

        let mut form = ProfileForm::new(Impl::new(app.clone()), Some(test_profile()));

        assert_matches!(form.submit().await, Err(EditorError::UpdateFailed(_)));
        assert_matches!(form.state(), FormState::Failed(_));
        assert!(app.visited_routes().is_empty());
    }
}
