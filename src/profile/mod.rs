pub mod email;
pub mod field;

pub use field::Field;

use crate::avatar::Avatar;

use tracing::debug;

/// A project entry of a profile.
///
/// The form never edits projects, so they are kept as opaque JSON.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Project(pub serde_json::Value);

/// A stored profile record, as supplied to the form and persisted after a successful update.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    pub website: String,
    pub github: String,
    pub twitter: String,
    pub linkedin: String,
    pub avatar: Avatar,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
}

/// The in-memory, not yet persisted profile being edited.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    pub website: String,
    pub github: String,
    pub twitter: String,
    pub linkedin: String,
    pub avatar: Avatar,
    skills: Vec<String>,
    pub projects: Vec<Project>,
}

impl ProfileDraft {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Title => &self.title,
            Field::Bio => &self.bio,
            Field::Email => &self.email,
            Field::Location => &self.location,
            Field::Website => &self.website,
            Field::Github => &self.github,
            Field::Twitter => &self.twitter,
            Field::Linkedin => &self.linkedin,
        }
    }

    /// Replace the value of exactly one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Title => &mut self.title,
            Field::Bio => &mut self.bio,
            Field::Email => &mut self.email,
            Field::Location => &mut self.location,
            Field::Website => &mut self.website,
            Field::Github => &mut self.github,
            Field::Twitter => &mut self.twitter,
            Field::Linkedin => &mut self.linkedin,
        };
        *slot = value.into();
        debug!(%field, "profile field updated");
    }

    /// Skills in insertion order, without duplicates.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill.trim())
    }

    /// Returns `false` when the skill is blank or already present.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.has_skill(skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill.trim());
        self.skills.len() != before
    }

    /// Replace the whole skill selection, as a multi-select does on change.
    pub fn set_skills<S: AsRef<str>>(&mut self, skills: impl IntoIterator<Item = S>) {
        self.skills.clear();
        for skill in skills {
            self.add_skill(skill.as_ref());
        }
    }
}

impl From<Option<Profile>> for ProfileDraft {
    fn from(profile: Option<Profile>) -> Self {
        let profile = profile.unwrap_or_default();
        let mut draft = Self {
            name: profile.name,
            title: profile.title,
            bio: profile.bio,
            email: profile.email,
            location: profile.location,
            website: profile.website,
            github: profile.github,
            twitter: profile.twitter,
            linkedin: profile.linkedin,
            avatar: profile.avatar,
            skills: Vec::new(),
            projects: profile.projects,
        };
        draft.set_skills(profile.skills);
        draft
    }
}

impl From<ProfileDraft> for Profile {
    fn from(draft: ProfileDraft) -> Self {
        Self {
            name: draft.name,
            title: draft.title,
            bio: draft.bio,
            email: draft.email,
            location: draft.location,
            website: draft.website,
            github: draft.github,
            twitter: draft.twitter,
            linkedin: draft.linkedin,
            avatar: draft.avatar,
            skills: draft.skills,
            projects: draft.projects,
        }
    }
}
