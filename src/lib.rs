pub mod app;
pub mod avatar;
pub mod config;
pub mod error;
pub mod form;
pub mod profile;
pub mod store;
pub mod tags;
pub mod validate;

#[cfg(test)]
mod test_util;

pub use form::{FormState, ProfileForm, Route};
pub use profile::{Field, Profile, ProfileDraft};
pub use validate::{validate, ErrorMap};
