use crate::profile::ProfileDraft;

/// Technology tags offered by the skills selector.
pub const TECHNOLOGIES: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Vue",
    "Angular",
    "Svelte",
    "Next.js",
    "Node.js",
    "Express",
    "Python",
    "Django",
    "Flask",
    "FastAPI",
    "Java",
    "Spring",
    "Kotlin",
    "Swift",
    "Go",
    "Rust",
    "C",
    "C++",
    "C#",
    ".NET",
    "PHP",
    "Laravel",
    "Ruby",
    "Rails",
    "HTML",
    "CSS",
    "Tailwind CSS",
    "Sass",
    "GraphQL",
    "REST",
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "SQLite",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "Google Cloud",
    "Firebase",
    "Git",
    "Linux",
    "Figma",
    "React Native",
    "Flutter",
    "TensorFlow",
];

pub fn is_known(tag: &str) -> bool {
    TECHNOLOGIES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(tag.trim()))
}

/// Options for the skills selector matching `prefix`, skipping skills the draft already has.
///
/// Matching is case-insensitive. Vocabulary order is kept.
pub fn suggest<'a>(prefix: &str, draft: &'a ProfileDraft) -> impl Iterator<Item = &'static str> + 'a {
    let prefix = prefix.trim().to_lowercase();
    TECHNOLOGIES
        .iter()
        .copied()
        .filter(move |tag| tag.to_lowercase().starts_with(&prefix))
        .filter(move |tag| !draft.has_skill(tag))
}
