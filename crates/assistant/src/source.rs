use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use stint_core::{AssistantReply, Catalog, IntentClassifier, ResponseComposer};

const LOCAL_GREETING: &str = "Hello! I'm the internship assistant. I can help you \
discover opportunities that fit your skills, interests, and career goals. What \
would you like to explore today?";

const LOCAL_GREETING_SUGGESTIONS: &[&str] = &[
    "Find tech internships",
    "Marketing opportunities",
    "Remote positions",
    "What skills do I need?",
    "How do I get started?",
];

/// Per-session reply strategy, selected exactly once at session creation
/// from the authenticated/anonymous flag.
///
/// `respond` never fails: every failure mode must be resolved into a
/// well-formed reply so the turn machine always returns to idle.
#[async_trait]
pub trait ResponseSource: Send + Sync {
    /// Content of the greeting turn a fresh session opens with.
    fn greeting(&self) -> AssistantReply;

    async fn respond(&self, utterance: &str) -> AssistantReply;
}

/// Anonymous-session source: keyword intent classification plus canned
/// composition over the built-in catalog. Runs in one uninterrupted step.
pub struct LocalRuleEngine {
    classifier: IntentClassifier,
    composer: Mutex<ResponseComposer>,
}

impl LocalRuleEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_composer(ResponseComposer::with_catalog(catalog))
    }

    /// Accepts a pre-built composer so tests can seed the fallback draw.
    pub fn with_composer(composer: ResponseComposer) -> Self {
        Self { classifier: IntentClassifier::new(), composer: Mutex::new(composer) }
    }

    /// Synchronous classify-and-compose path; also used directly by the CLI.
    pub fn answer(&self, utterance: &str) -> AssistantReply {
        let intent = self.classifier.classify(utterance);
        self.composer.lock().unwrap_or_else(PoisonError::into_inner).compose(intent)
    }
}

impl Default for LocalRuleEngine {
    fn default() -> Self {
        Self::new(Catalog::built_in())
    }
}

#[async_trait]
impl ResponseSource for LocalRuleEngine {
    fn greeting(&self) -> AssistantReply {
        AssistantReply {
            text: LOCAL_GREETING.to_string(),
            opportunities: Vec::new(),
            suggestions: LOCAL_GREETING_SUGGESTIONS
                .iter()
                .map(|suggestion| suggestion.to_string())
                .collect(),
        }
    }

    async fn respond(&self, utterance: &str) -> AssistantReply {
        self.answer(utterance)
    }
}

#[cfg(test)]
mod tests {
    use stint_core::{Catalog, Category};

    use super::{LocalRuleEngine, ResponseSource};

    #[test]
    fn greeting_carries_starter_suggestions() {
        let engine = LocalRuleEngine::default();
        let greeting = engine.greeting();

        assert!(!greeting.text.is_empty());
        assert!(!greeting.suggestions.is_empty());
        assert!(greeting.opportunities.is_empty());
    }

    #[test]
    fn answer_routes_through_classifier_and_composer() {
        let engine = LocalRuleEngine::default();

        let reply = engine.answer("Show me tech internships");
        assert!(!reply.opportunities.is_empty());
        assert!(reply.opportunities.iter().all(|entry| entry.category == Category::Tech));
        assert!(!reply.suggestions.is_empty());
    }

    #[tokio::test]
    async fn respond_matches_the_synchronous_path_for_fixed_intents() {
        let engine = LocalRuleEngine::new(Catalog::built_in());

        let via_answer = engine.answer("remote positions please");
        let via_respond = engine.respond("remote positions please").await;
        assert_eq!(via_answer, via_respond);
    }
}
