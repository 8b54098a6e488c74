use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

// Anchored: the whole trimmed value must have the shape, so an address
// with inner whitespace such as "ana lima@x.com" is invalid.
static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Whether `s` has the basic `local@domain.tld` shape.
///
/// Surrounding whitespace is ignored.
fn is_email_shaped(s: &str) -> bool {
    EMAIL_SHAPE.is_match(s.trim())
}

/// An address that passed the shape check, without its surrounding whitespace.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Email(String);

impl FromStr for Email {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err("Email is required".to_string())
        } else if !is_email_shaped(s) {
            Err("Email is invalid".to_string())
        } else {
            Ok(Self(s.into()))
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_basic_addresses() {
        assert!(is_email_shaped("a@b.c"));
        assert!(is_email_shaped("ana@x.com"));
        assert!(is_email_shaped("  ana.lima+dev@mail.example.org "));
    }

    #[test]
    fn should_reject_malformed_addresses() {
        assert!(!is_email_shaped("not-an-email"));
        assert!(!is_email_shaped("ana@localhost"));
        assert!(!is_email_shaped("@x.com"));
        assert!(!is_email_shaped("ana lima@x.com"));
    }

    #[test]
    fn parsed_email_is_trimmed() {
        let email: Email = " ana@x.com ".parse().unwrap();
        assert_eq!("ana@x.com", email.as_ref());
        assert_eq!(Err("Email is required".to_string()), "  ".parse::<Email>());
        assert_eq!(Err("Email is invalid".to_string()), "ana lima@x.com".parse::<Email>());
    }
}
