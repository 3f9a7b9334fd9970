use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Tech,
    Marketing,
    Design,
    Data,
    Remote,
    Skills,
    Application,
    Start,
    Salary,
    Cybersecurity,
    General,
}

/// Ordered keyword table. Declaration order is the tie-break: the first
/// group with any keyword contained in the utterance wins, even when a
/// later group would also match.
const RULES: &[(Intent, &[&str])] = &[
    (Intent::Tech, &["tech", "software", "programming", "developer", "coding"]),
    (Intent::Marketing, &["marketing", "social media", "content", "brand"]),
    (Intent::Design, &["design", "ux", "ui", "creative"]),
    (Intent::Data, &["data", "analytics", "machine learning", "statistics"]),
    (Intent::Remote, &["remote", "work from home", "virtual"]),
    (Intent::Skills, &["skill", "learn", "requirement", "prepare"]),
    (Intent::Application, &["apply", "application", "resume", "interview"]),
    (Intent::Start, &["start", "begin", "help", "new"]),
    (Intent::Salary, &["salary", "pay", "compensation", "money"]),
    (Intent::Cybersecurity, &["cyber", "security", "infosec", "penetration testing"]),
];

/// Maps an utterance to one intent category by case-insensitive substring
/// containment against the fixed rule table. Pure and deterministic; an
/// utterance matching no group resolves to [`Intent::General`].
#[derive(Clone, Debug, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, utterance: &str) -> Intent {
        let normalized = utterance.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| normalized.contains(keyword)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }
}
