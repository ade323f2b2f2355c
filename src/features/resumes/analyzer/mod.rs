//! Heuristic ATS analysis of resume text.
//!
//! Every keyword table is compiled once into an ASCII case-insensitive
//! Aho-Corasick automaton, so each rule is a scan over the original text with
//! no lowercased copy. Each of the four categories lands in exactly one of
//! `strengths` or `issues`.

pub mod keywords;

use std::fmt;
use std::str::FromStr;

use aho_corasick::AhoCorasick;
use chrono::Utc;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::features::resumes::models::{AnalysisResult, Issue, Strength};
use keywords::{
    Category, ACTION_VERBS, ACTION_VERB_POINTS, BASIC_CATEGORY_TABLE, BASIC_QUESTION_TRIGGERS,
    BULLET_MARKERS, CATEGORY_POINTS, EXTENDED_CATEGORY_TABLE, EXTENDED_QUESTION_TRIGGERS,
    FORMATTING_POINTS, GENERIC_QUESTIONS, MAX_SCORE,
};

/// Which rule set the analyzer applies.
///
/// `Basic` scores sections and formatting only and stays silent when bullets
/// are missing. `Extended` adds the action-verb check, the `problem` trigger,
/// a formatting issue and the generic closing questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    Basic,
    #[default]
    Extended,
}

impl ScoringPolicy {
    fn rules(self) -> &'static RuleSet {
        match self {
            ScoringPolicy::Basic => &BASIC_RULES,
            ScoringPolicy::Extended => &EXTENDED_RULES,
        }
    }

    fn reports_missing_formatting(self) -> bool {
        matches!(self, ScoringPolicy::Extended)
    }

    fn checks_action_verbs(self) -> bool {
        matches!(self, ScoringPolicy::Extended)
    }

    fn appends_generic_questions(self) -> bool {
        matches!(self, ScoringPolicy::Extended)
    }
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ScoringPolicy::Basic),
            "extended" => Ok(ScoringPolicy::Extended),
            other => Err(format!(
                "Unknown scoring policy '{}'. Expected 'basic' or 'extended'",
                other
            )),
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPolicy::Basic => f.write_str("basic"),
            ScoringPolicy::Extended => f.write_str("extended"),
        }
    }
}

/// Compiled matchers for one policy
struct RuleSet {
    categories: Vec<(Category, AhoCorasick)>,
    action_verbs: AhoCorasick,
    triggers: AhoCorasick,
    /// Follow-up question per trigger, indexed by trigger pattern id
    questions: Vec<&'static str>,
}

impl RuleSet {
    fn compile(
        categories: &[(Category, &[&str])],
        triggers: &'static [(&'static str, &'static str)],
    ) -> Self {
        let trigger_words: Vec<&str> = triggers.iter().map(|(word, _)| *word).collect();

        Self {
            categories: categories
                .iter()
                .map(|(category, words)| (*category, keyword_matcher(words)))
                .collect(),
            action_verbs: keyword_matcher(ACTION_VERBS),
            triggers: keyword_matcher(&trigger_words),
            questions: triggers.iter().map(|(_, question)| *question).collect(),
        }
    }

    /// Questions whose trigger occurs in `text`, in table order
    fn triggered_questions(&self, text: &str) -> Vec<String> {
        let mut hit = vec![false; self.questions.len()];
        for found in self.triggers.find_overlapping_iter(text) {
            hit[found.pattern().as_usize()] = true;
        }

        self.questions
            .iter()
            .zip(hit)
            .filter(|(_, hit)| *hit)
            .map(|(question, _)| question.to_string())
            .collect()
    }
}

fn keyword_matcher(words: &[&str]) -> AhoCorasick {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(words)
        .expect("keyword tables are valid patterns")
}

lazy_static! {
    static ref BASIC_RULES: RuleSet =
        RuleSet::compile(BASIC_CATEGORY_TABLE, BASIC_QUESTION_TRIGGERS);
    static ref EXTENDED_RULES: RuleSet =
        RuleSet::compile(EXTENDED_CATEGORY_TABLE, EXTENDED_QUESTION_TRIGGERS);
}

/// Score `text` with the given policy. Accepts any input, including empty.
pub fn analyze(text: &str, policy: ScoringPolicy) -> AnalysisResult {
    let rules = policy.rules();
    let mut points: u32 = 0;
    let mut strengths = Vec::new();
    let mut issues = Vec::new();

    for (category, matcher) in &rules.categories {
        if matcher.is_match(text) {
            points += CATEGORY_POINTS;
            strengths.push(category_strength(*category, policy));
        } else {
            issues.push(category_issue(*category));
        }
    }

    if text.contains(BULLET_MARKERS) {
        points += FORMATTING_POINTS;
        strengths.push(Strength {
            title: "Good formatting".to_string(),
            description: "Your resume uses bullet points effectively for better readability."
                .to_string(),
        });
    } else if policy.reports_missing_formatting() {
        issues.push(Issue {
            title: "Formatting could be improved".to_string(),
            description: "Consider using bullet points to make your resume more scannable."
                .to_string(),
            suggestion: "Use bullet points to highlight key achievements and responsibilities."
                .to_string(),
        });
    }

    if policy.checks_action_verbs() {
        if rules.action_verbs.is_match(text) {
            points += ACTION_VERB_POINTS;
            strengths.push(Strength {
                title: "Strong action verbs".to_string(),
                description:
                    "Your resume uses impactful action verbs to describe your experience."
                        .to_string(),
            });
        } else {
            issues.push(Issue {
                title: "Weak action verbs".to_string(),
                description: "Your resume could benefit from stronger action verbs.".to_string(),
                suggestion: "Use more impactful verbs like \"managed\", \"led\", \"developed\" to describe your experience.".to_string(),
            });
        }
    }

    let mut interview_questions = rules.triggered_questions(text);

    if policy.appends_generic_questions() {
        interview_questions.extend(GENERIC_QUESTIONS.iter().map(|q| q.to_string()));
    }

    AnalysisResult {
        ats_score: points.min(MAX_SCORE),
        strengths,
        issues,
        interview_questions,
        analyzed_at: Utc::now(),
    }
}

fn category_strength(category: Category, policy: ScoringPolicy) -> Strength {
    let name = category.name();
    let description = match policy {
        ScoringPolicy::Basic => format!("Your resume includes a well-defined {} section.", name),
        ScoringPolicy::Extended => format!(
            "Your resume includes a well-defined {} section, which is important for ATS systems.",
            name
        ),
    };

    Strength {
        title: format!("Strong {} section", name),
        description,
    }
}

fn category_issue(category: Category) -> Issue {
    let name = category.name();
    Issue {
        title: format!("Missing {} section", name),
        description: format!(
            "Your resume appears to be missing a dedicated {} section.",
            name
        ),
        suggestion: format!("Add a clear {} section to improve your ATS score.", name),
    }
}
