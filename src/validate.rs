use crate::profile::email::Email;
use crate::profile::{Field, ProfileDraft};

use itertools::Itertools;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation messages. A field without an entry is valid.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<Field, Cow<'static, str>>);

impl ErrorMap {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(AsRef::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_ref()))
    }

    fn insert(&mut self, field: Field, message: impl Into<Cow<'static, str>>) {
        self.0.insert(field, message.into());
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter()
                .format_with(", ", |(field, message), f| f(&format_args!(
                    "{field}: {message}"
                )))
        )
    }
}

///
/// Check a draft against the submission rules.
///
/// Every rule is evaluated on every call, so the result always describes the whole draft.
///
pub fn validate(draft: &ProfileDraft) -> ErrorMap {
    let mut errors = ErrorMap::default();

    for (field, message) in [
        (Field::Name, "Name is required"),
        (Field::Title, "Title is required"),
        (Field::Bio, "Bio is required"),
    ] {
        if draft.field(field).trim().is_empty() {
            errors.insert(field, message);
        }
    }

    if let Err(message) = draft.email.parse::<Email>() {
        errors.insert(Field::Email, message);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProfileDraft {
        let mut draft = ProfileDraft::default();
        draft.set(Field::Name, "Ana");
        draft.set(Field::Title, "Dev");
        draft.set(Field::Bio, "Hi");
        draft.set(Field::Email, "ana@x.com");
        draft
    }

    fn with(field: Field, value: &str) -> ProfileDraft {
        let mut draft = valid_draft();
        draft.set(field, value);
        draft
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn whitespace_only_required_fields_fail() {
        for (field, message) in [
            (Field::Name, "Name is required"),
            (Field::Title, "Title is required"),
            (Field::Bio, "Bio is required"),
            (Field::Email, "Email is required"),
        ] {
            for blank in ["", " ", "\t\n  "] {
                let errors = validate(&with(field, blank));
                assert_eq!(1, errors.len());
                assert_eq!(Some(message), errors.get(field));
            }
        }
    }

    #[test]
    fn email_shape_is_checked() {
        assert_eq!(None, validate(&with(Field::Email, "a@b.c")).get(Field::Email));
        assert_eq!(
            Some("Email is invalid"),
            validate(&with(Field::Email, "not-an-email")).get(Field::Email)
        );
        assert_eq!(
            Some("Email is required"),
            validate(&with(Field::Email, "")).get(Field::Email)
        );
        assert_eq!(None, validate(&with(Field::Email, " ana@x.com ")).get(Field::Email));
        assert_eq!(
            Some("Email is invalid"),
            validate(&with(Field::Email, "ana lima@x.com")).get(Field::Email)
        );
    }

    #[test]
    fn empty_draft_reports_all_required_fields() {
        let errors = validate(&ProfileDraft::default());

        assert_eq!(4, errors.len());
        assert_eq!(
            vec![Field::Name, Field::Title, Field::Bio, Field::Email],
            errors.iter().map(|(field, _)| field).collect::<Vec<_>>()
        );
    }

    #[test]
    fn optional_fields_are_never_validated() {
        let mut draft = valid_draft();
        for field in [
            Field::Location,
            Field::Website,
            Field::Github,
            Field::Twitter,
            Field::Linkedin,
        ] {
            draft.set(field, "   not a url at all ");
        }
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn validation_is_idempotent() {
        let draft = with(Field::Email, "nope");
        assert_eq!(validate(&draft), validate(&draft));
    }

    #[test]
    fn error_map_formats_and_serializes_by_field_name() {
        let errors = validate(&with(Field::Bio, ""));

        assert_eq!("bio: Bio is required", errors.to_string());
        assert_eq!(
            r#"{"bio":"Bio is required"}"#,
            serde_json::to_string(&errors).unwrap()
        );
    }
}
