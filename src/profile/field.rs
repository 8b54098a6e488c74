use std::fmt;
use std::str::FromStr;

/// The text fields of a profile, addressable by name.
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Title,
    Bio,
    Email,
    Location,
    Website,
    Github,
    Twitter,
    Linkedin,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Title,
        Field::Bio,
        Field::Email,
        Field::Location,
        Field::Website,
        Field::Github,
        Field::Twitter,
        Field::Linkedin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Title => "title",
            Self::Bio => "bio",
            Self::Email => "email",
            Self::Location => "location",
            Self::Website => "website",
            Self::Github => "github",
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown profile field: {s}"))
    }
}
