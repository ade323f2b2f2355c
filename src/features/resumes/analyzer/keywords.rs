//! Fixed rule tables for the ATS analyzer.
//!
//! Order matters: categories are evaluated, and reported, in table order, and
//! trigger questions are emitted in table order.

/// Resume section the analyzer looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Skills,
    Experience,
    Education,
    Achievements,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Skills => "skills",
            Category::Experience => "experience",
            Category::Education => "education",
            Category::Achievements => "achievements",
        }
    }
}

pub const CATEGORY_POINTS: u32 = 20;
pub const FORMATTING_POINTS: u32 = 10;
pub const ACTION_VERB_POINTS: u32 = 10;
pub const MAX_SCORE: u32 = 100;

pub const SKILLS_KEYWORDS: &[&str] = &[
    "skills",
    "technical",
    "proficient",
    "expertise",
    "abilities",
    "competencies",
];

pub const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "work history",
    "employment",
    "career",
    "professional",
];

pub const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "degree",
    "university",
    "college",
    "school",
    "graduated",
];

pub const ACHIEVEMENTS_KEYWORDS: &[&str] = &[
    "achievements",
    "accomplishments",
    "awards",
    "certifications",
    "projects",
];

pub const ACHIEVEMENTS_KEYWORDS_EXTENDED: &[&str] = &[
    "achievements",
    "accomplishments",
    "awards",
    "certifications",
    "projects",
    "achieved",
];

pub const BASIC_CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (Category::Skills, SKILLS_KEYWORDS),
    (Category::Experience, EXPERIENCE_KEYWORDS),
    (Category::Education, EDUCATION_KEYWORDS),
    (Category::Achievements, ACHIEVEMENTS_KEYWORDS),
];

pub const EXTENDED_CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (Category::Skills, SKILLS_KEYWORDS),
    (Category::Experience, EXPERIENCE_KEYWORDS),
    (Category::Education, EDUCATION_KEYWORDS),
    (Category::Achievements, ACHIEVEMENTS_KEYWORDS_EXTENDED),
];

/// Bullet markers. Matched case-sensitively against the raw text.
pub const BULLET_MARKERS: &[char] = &['\u{2022}', '-', '*'];

pub const ACTION_VERBS: &[&str] = &[
    "managed",
    "led",
    "developed",
    "created",
    "implemented",
    "improved",
    "achieved",
];

pub const BASIC_QUESTION_TRIGGERS: &[(&str, &str)] = &[
    (
        "project",
        "Can you tell me about a challenging project you worked on?",
    ),
    ("team", "How do you work in a team environment?"),
    ("lead", "Can you describe your leadership style?"),
];

pub const EXTENDED_QUESTION_TRIGGERS: &[(&str, &str)] = &[
    (
        "project",
        "Can you tell me about a challenging project you worked on?",
    ),
    ("team", "How do you work in a team environment?"),
    ("lead", "Can you describe your leadership style?"),
    ("problem", "How do you approach problem-solving?"),
];

pub const GENERIC_QUESTIONS: &[&str] = &[
    "What are your career goals?",
    "What are your greatest strengths?",
    "Where do you see yourself in 5 years?",
];
