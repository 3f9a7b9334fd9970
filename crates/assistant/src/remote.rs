//! Delegation adapter for authenticated sessions: forwards the utterance to
//! the external recommendation/advice service and reshapes its reply into
//! the same response contract the local engine produces.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use stint_core::{
    AssistantReply, AuthContext, Category, Intent, IntentClassifier, Opportunity, OpportunityId,
};

use crate::source::ResponseSource;

pub const SIGN_IN_NOTICE: &str = "Please sign in to use the personalized assistant. \
I can help with career guidance and tailored recommendations once you're signed in.";

pub const SERVICE_APOLOGY: &str = "I'm having trouble reaching the recommendation \
service right now. Please try again in a moment.";

const UNRECOGNIZED_REPLY: &str = "I'm here to help with career guidance and \
internship recommendations. Ask me about specific roles, skills, or how to apply.";

const DELEGATE_GREETING: &str = "Hello! I'm your career assistant. I can help you \
discover opportunities, offer guidance, and answer questions about your \
professional journey. How can I help you today?";

const RECOMMENDATION_DIVIDER: &str = "\n\n---\n\n";

#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed service reply: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Authenticated-session source. Suspends at exactly one point (the network
/// round-trip); every failure mode degrades to a fixed notice so the caller
/// always receives a well-formed reply.
pub struct RemoteDelegate {
    client: reqwest::Client,
    chat_url: String,
    auth: Option<AuthContext>,
    classifier: IntentClassifier,
}

impl RemoteDelegate {
    /// The client carries the request timeout; retry policy stays with the
    /// remote collaborator.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        auth: Option<AuthContext>,
    ) -> Self {
        let base_url = base_url.into();
        let chat_url = format!("{}/student/chat", base_url.trim_end_matches('/'));
        Self { client, chat_url, auth, classifier: IntentClassifier::new() }
    }

    async fn exchange(
        &self,
        utterance: &str,
        auth: &AuthContext,
    ) -> Result<ChatReply, DelegateError> {
        let response = self
            .client
            .post(&self.chat_url)
            .query(&[("question", utterance)])
            .bearer_auth(auth.token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DelegateError::Status(status));
        }

        let body = response.text().await?;
        Ok(parse_reply(&body)?)
    }
}

#[async_trait]
impl ResponseSource for RemoteDelegate {
    fn greeting(&self) -> AssistantReply {
        AssistantReply::text_only(DELEGATE_GREETING)
    }

    async fn respond(&self, utterance: &str) -> AssistantReply {
        let Some(auth) = &self.auth else {
            return AssistantReply::text_only(SIGN_IN_NOTICE);
        };

        match self.exchange(utterance, auth).await {
            Ok(reply) => shape_reply(reply, &self.classifier),
            Err(error) => {
                warn!(error = %error, "delegation failed; returning apology notice");
                AssistantReply::text_only(SERVICE_APOLOGY)
            }
        }
    }
}

/// Wire reply: at most one of the three payload fields is expected; absence
/// of all of them is the unrecognized case.
#[derive(Debug, Default, Deserialize)]
struct ChatReply {
    #[serde(default)]
    recommendations: Option<Vec<RecommendationRecord>>,
    #[serde(default)]
    advice: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

/// The service's two deployments disagree on the identifier key, so all
/// three spellings are accepted with the historical precedence.
#[derive(Debug, Deserialize)]
struct RecommendationRecord {
    #[serde(default, rename = "_id")]
    underscore_id: Option<IdValue>,
    #[serde(default)]
    id: Option<IdValue>,
    #[serde(default)]
    job_id: Option<IdValue>,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    stipend: String,
    #[serde(default)]
    duration: String,
    /// Comma-delimited on the wire, not an array.
    #[serde(default)]
    skills: String,
    #[serde(default)]
    match_percentage: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(i64),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

fn parse_reply(body: &str) -> Result<ChatReply, serde_json::Error> {
    serde_json::from_str(body)
}

fn shape_reply(reply: ChatReply, classifier: &IntentClassifier) -> AssistantReply {
    if let Some(records) = reply.recommendations {
        if !records.is_empty() {
            return shape_recommendations(records, classifier);
        }
    }

    if let Some(advice) = non_empty(reply.advice) {
        return AssistantReply::text_only(advice);
    }
    if let Some(answer) = non_empty(reply.answer) {
        return AssistantReply::text_only(answer);
    }

    AssistantReply::text_only(UNRECOGNIZED_REPLY)
}

fn shape_recommendations(
    records: Vec<RecommendationRecord>,
    classifier: &IntentClassifier,
) -> AssistantReply {
    let opportunities: Vec<Opportunity> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize_record(record, index, classifier))
        .collect();

    let text = opportunities
        .iter()
        .map(recommendation_paragraph)
        .collect::<Vec<_>>()
        .join(RECOMMENDATION_DIVIDER);

    AssistantReply { text, opportunities, suggestions: Vec::new() }
}

/// Normalization boundary: the canonical record uses `Vec<String>` skills and
/// a string identifier; category is inferred from title+skills with the
/// intent rule table and falls back to `other`.
fn normalize_record(
    record: RecommendationRecord,
    index: usize,
    classifier: &IntentClassifier,
) -> Opportunity {
    let skills: Vec<String> = record
        .skills
        .split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect();

    let category = infer_category(classifier, &record.title, &skills);
    let identifier = record
        .underscore_id
        .or(record.id)
        .or(record.job_id)
        .map(IdValue::into_string)
        .unwrap_or_else(|| format!("REC-{}", index + 1));

    Opportunity {
        id: OpportunityId(identifier),
        title: record.title,
        company: None,
        location: record.location,
        skills,
        engagement: None,
        duration: record.duration,
        compensation: record.stipend,
        description: record.description,
        category,
        match_score: record.match_percentage.map(|score| score.min(100) as u8),
    }
}

fn infer_category(classifier: &IntentClassifier, title: &str, skills: &[String]) -> Category {
    let haystack = format!("{} {}", title, skills.join(" "));
    match classifier.classify(&haystack) {
        Intent::Tech => Category::Tech,
        Intent::Marketing => Category::Marketing,
        Intent::Design => Category::Design,
        Intent::Data => Category::Data,
        Intent::Cybersecurity => Category::Cybersecurity,
        _ => Category::Other,
    }
}

fn recommendation_paragraph(opportunity: &Opportunity) -> String {
    let mut paragraph = format!("**{}**\n{}", opportunity.title, opportunity.description);
    paragraph.push_str(&format!("\nLocation: {}", opportunity.location));
    paragraph.push_str(&format!("\nStipend: {}", opportunity.compensation));
    paragraph.push_str(&format!("\nDuration: {}", opportunity.duration));
    paragraph.push_str(&format!("\nSkills: {}", opportunity.skills.join(", ")));
    if let Some(score) = opportunity.match_score {
        paragraph.push_str(&format!("\nMatch: {score}%"));
    }
    paragraph
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use stint_core::{AuthContext, Category, IntentClassifier};

    use super::{
        parse_reply, shape_reply, RemoteDelegate, ResponseSource, SERVICE_APOLOGY,
        SIGN_IN_NOTICE, UNRECOGNIZED_REPLY,
    };

    fn shaped(body: &str) -> stint_core::AssistantReply {
        let reply = parse_reply(body).expect("reply parses");
        shape_reply(reply, &IntentClassifier::new())
    }

    #[test]
    fn recommendations_become_divided_paragraphs_and_records() {
        let reply = shaped(
            r#"{
                "recommendations": [
                    {
                        "_id": "64fa12",
                        "title": "Backend Developer Intern",
                        "description": "Build APIs.",
                        "location": "Remote",
                        "stipend": "$1500/month",
                        "duration": "3 months",
                        "skills": "Python, FastAPI , SQL",
                        "match_percentage": 87
                    },
                    {
                        "job_id": 42,
                        "title": "Brand Studio Intern",
                        "description": "Run campaigns.",
                        "location": "Boston, MA",
                        "stipend": "$1200/month",
                        "duration": "4 months",
                        "skills": "Copywriting, Social Media Marketing",
                        "match_percentage": 63
                    }
                ]
            }"#,
        );

        assert_eq!(reply.opportunities.len(), 2);
        assert_eq!(reply.text.matches("---").count(), 1);
        assert!(reply.suggestions.is_empty());

        let first = &reply.opportunities[0];
        assert_eq!(first.id.0, "64fa12");
        assert_eq!(first.skills, vec!["Python", "FastAPI", "SQL"]);
        assert_eq!(first.compensation, "$1500/month");
        assert_eq!(first.match_score, Some(87));
        assert_eq!(first.category, Category::Tech);

        let second = &reply.opportunities[1];
        assert_eq!(second.id.0, "42");
        assert_eq!(second.category, Category::Marketing);
    }

    #[test]
    fn identifier_spellings_follow_historical_precedence() {
        let reply = shaped(
            r#"{
                "recommendations": [
                    {"_id": "primary", "job_id": "tertiary", "title": "Ops Intern", "skills": ""},
                    {"id": "secondary", "job_id": "tertiary", "title": "Ops Intern", "skills": ""},
                    {"title": "Ops Intern", "skills": ""}
                ]
            }"#,
        );

        let ids: Vec<&str> =
            reply.opportunities.iter().map(|entry| entry.id.0.as_str()).collect();
        assert_eq!(ids, vec!["primary", "secondary", "REC-3"]);
    }

    #[test]
    fn uncategorizable_records_normalize_to_other_with_clamped_scores() {
        let reply = shaped(
            r#"{
                "recommendations": [
                    {"id": "x1", "title": "Warehouse Shift Lead", "skills": "Forklift", "match_percentage": 250}
                ]
            }"#,
        );

        let record = &reply.opportunities[0];
        assert_eq!(record.category, Category::Other);
        assert_eq!(record.match_score, Some(100));
        assert!(record.company.is_none());
        assert!(record.engagement.is_none());
    }

    #[test]
    fn advice_and_answer_replies_carry_text_only() {
        let advice = shaped(r#"{"advice": "Learn SQL before the fall cycle."}"#);
        assert_eq!(advice.text, "Learn SQL before the fall cycle.");
        assert!(advice.opportunities.is_empty());

        let answer = shaped(r#"{"answer": "Applications usually open in September."}"#);
        assert_eq!(answer.text, "Applications usually open in September.");
        assert!(answer.opportunities.is_empty());
    }

    #[test]
    fn missing_payload_fields_resolve_to_the_unrecognized_notice() {
        assert_eq!(shaped("{}").text, UNRECOGNIZED_REPLY);
        assert_eq!(shaped(r#"{"advice": "   "}"#).text, UNRECOGNIZED_REPLY);
        assert_eq!(shaped(r#"{"recommendations": []}"#).text, UNRECOGNIZED_REPLY);
    }

    #[test]
    fn malformed_bodies_fail_to_parse() {
        assert!(parse_reply("not json at all").is_err());
        assert!(parse_reply(r#"{"recommendations": "yes"}"#).is_err());
    }

    #[tokio::test]
    async fn missing_credentials_short_circuit_without_network_contact() {
        // The unroutable URL would fail loudly if contacted; the sign-in
        // notice must come back without any exchange.
        let delegate =
            RemoteDelegate::new(reqwest::Client::new(), "http://127.0.0.1:1", None);

        let reply = delegate.respond("recommend internships").await;
        assert_eq!(reply.text, SIGN_IN_NOTICE);
        assert!(reply.opportunities.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_the_fixed_apology() {
        let delegate = RemoteDelegate::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1",
            Some(AuthContext::new("student-1", "tok-test")),
        );

        let reply = delegate.respond("recommend internships").await;
        assert_eq!(reply.text, SERVICE_APOLOGY);
        assert!(reply.opportunities.is_empty());
    }
}
