use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use stint_assistant::{LocalRuleEngine, ResponseSource};
use stint_core::{Catalog, ResponseComposer, Session, Speaker, Turn, TurnRejection};

use super::{serialize_payload, CommandResult};

#[derive(Debug, Serialize)]
struct AskPayload {
    command: &'static str,
    status: &'static str,
    turns: Vec<TurnSummary>,
}

#[derive(Debug, Serialize)]
struct TurnSummary {
    speaker: &'static str,
    text: String,
    opportunities: Vec<OpportunitySummary>,
    suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct OpportunitySummary {
    id: String,
    title: String,
    category: &'static str,
    location: String,
}

/// Drives one full turn through a real session so the greeting, the user
/// turn, and the assistant turn all show up in the output.
pub fn run(text: &str, seed: Option<u64>) -> CommandResult {
    let engine = match seed {
        Some(seed) => LocalRuleEngine::with_composer(ResponseComposer::new(
            Catalog::built_in(),
            StdRng::seed_from_u64(seed),
        )),
        None => LocalRuleEngine::default(),
    };

    let mut session = Session::new(engine.greeting(), None);
    if let Err(rejection) = session.begin_turn(text) {
        let error_class = match rejection {
            TurnRejection::EmptySubmission => "input_rejected",
            TurnRejection::ResponseInFlight => "session_busy",
        };
        return CommandResult::failure("ask", error_class, rejection.to_string(), 2);
    }

    let reply = engine.answer(text);
    session.resolve_turn(reply);

    let turns = session.turns().iter().map(summarize_turn).collect();
    let payload = AskPayload { command: "ask", status: "ok", turns };
    CommandResult { exit_code: 0, output: serialize_payload(payload) }
}

fn summarize_turn(turn: &Turn) -> TurnSummary {
    TurnSummary {
        speaker: match turn.speaker {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        },
        text: turn.text.clone(),
        opportunities: turn
            .opportunities
            .iter()
            .map(|opportunity| OpportunitySummary {
                id: opportunity.id.0.clone(),
                title: opportunity.title.clone(),
                category: opportunity.category.as_str(),
                location: opportunity.location.clone(),
            })
            .collect(),
        suggestions: turn.suggestions.clone(),
    }
}
